//! Client for the random.org JSON-RPC Basic API (release 2).
//!
//! ## Structure
//!
//! - `client` - Generation methods and usage, one POST per call
//! - `convenience` - Bytes, hex, base64, UUID and bounded-number helpers
//! - `rng` - `rand(max)` facade and a `rand::RngCore` implementation
//! - `validation` - Local argument checks that run before any request
//! - `protocol/` - Parameters, request envelopes and response key normalization
//! - `dispatch` - HTTP status interpretation
//! - `responses` - Typed, read-only response wrappers
//! - `infrastructure/` - Transport and correlation-id ports with their adapters
//!
//! ```no_run
//! use random_org::{Config, RandomOrgClient};
//! use random_org::protocol::IntegersRequest;
//!
//! # fn main() -> random_org::Result<()> {
//! let client = RandomOrgClient::new(Config::new("00000000-0000-0000-0000-000000000000"));
//! let dice = client.generate_integers(IntegersRequest::new(5, 1, 6))?;
//! println!("{:?}", dice.data());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod convenience;
pub mod dispatch;
pub mod error;
pub mod infrastructure;
pub mod protocol;
pub mod responses;
pub mod rng;
pub mod validation;

pub use client::RandomOrgClient;
pub use config::Config;
pub use error::{RandomOrgError, Result};
pub use responses::{
    Blobs, DecimalFractions, Gaussians, IntegerSequences, Integers, RandomData, Strings, Usage,
    Uuids,
};
pub use rng::{RandMax, RandomValue, Rng};
