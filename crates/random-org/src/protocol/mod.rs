//! Wire protocol: option mapping, JSON-RPC envelope, response normalization.

pub mod envelope;
pub mod normalize;
pub mod params;

pub use envelope::{RequestEnvelope, WireMethod};
pub use params::{
    BlobFormat, BlobsRequest, Bounds, DecimalFractionsRequest, GaussiansRequest,
    IntegerSequencesRequest, IntegersRequest, Params, StringsRequest, UuidsRequest,
};
