//! Basic API client.
//!
//! One operation per generation method. Each call validates its options,
//! builds a JSON-RPC envelope, dispatches it, normalizes the response and
//! wraps it in the matching typed response.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::dispatch::{Dispatch, Dispatcher};
use crate::error::{RandomOrgError, Result};
use crate::infrastructure::http::ReqwestTransport;
use crate::infrastructure::ids::ThreadRngIds;
use crate::infrastructure::ports::{HttpTransport, IdSource};
use crate::protocol::normalize::process_response;
use crate::protocol::{Params, RequestEnvelope, WireMethod};
use crate::responses::{
    Blobs, DecimalFractions, Gaussians, IntegerSequences, Integers, RandomData, Strings, Usage,
    Uuids,
};
use crate::validation;

/// Client for the random.org Basic API
#[derive(Clone)]
pub struct RandomOrgClient {
    config: Config,
    dispatcher: Dispatcher,
    ids: Arc<dyn IdSource>,
}

impl RandomOrgClient {
    /// Create a client that talks HTTP through reqwest.
    pub fn new(config: Config) -> Self {
        let transport = Arc::new(ReqwestTransport::new(config.timeout()));
        Self::with_transport(config, transport)
    }

    /// Create client from environment variables (see [`Config::from_env`]).
    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }

    pub fn with_transport(config: Config, transport: Arc<dyn HttpTransport>) -> Self {
        let dispatcher = Dispatcher::new(transport, config.endpoint());
        Self {
            config,
            dispatcher,
            ids: Arc::new(ThreadRngIds::new()),
        }
    }

    /// Replace the correlation id source.
    pub fn with_ids(mut self, ids: Arc<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Random integers in `[min, max]`.
    ///
    /// Required: `n` in `[1, 10000]`, `min` and `max` in `[-1e9, 1e9]`.
    /// Optional: `replacement`, `base` (only `10`).
    pub fn generate_integers(&self, opts: impl Into<Params>) -> Result<Integers> {
        self.generate(WireMethod::GenerateIntegers, opts.into())
    }

    /// Uniform or multiform integer sequences.
    ///
    /// `length`, `min` and `max` may each be a scalar or one value per sequence.
    pub fn generate_integer_sequences(&self, opts: impl Into<Params>) -> Result<IntegerSequences> {
        self.generate(WireMethod::GenerateIntegerSequences, opts.into())
    }

    /// Decimal fractions in `[0, 1]` with `decimal_places` in `[1, 14]`.
    pub fn generate_decimal_fractions(&self, opts: impl Into<Params>) -> Result<DecimalFractions> {
        self.generate(WireMethod::GenerateDecimalFractions, opts.into())
    }

    /// Gaussian-distributed numbers.
    pub fn generate_gaussians(&self, opts: impl Into<Params>) -> Result<Gaussians> {
        self.generate(WireMethod::GenerateGaussians, opts.into())
    }

    pub fn generate_strings(&self, opts: impl Into<Params>) -> Result<Strings> {
        self.generate(WireMethod::GenerateStrings, opts.into())
    }

    /// Version 4 UUIDs, `n` in `[1, 1000]`.
    pub fn generate_uuids(&self, opts: impl Into<Params>) -> Result<Uuids> {
        self.generate(WireMethod::GenerateUuids, opts.into())
    }

    /// Blobs of `size` bits (divisible by 8), base64 unless `format` is `hex`.
    pub fn generate_blobs(&self, opts: impl Into<Params>) -> Result<Blobs> {
        self.generate(WireMethod::GenerateBlobs, opts.into())
    }

    /// Usage counters for the configured API key.
    pub fn usage(&self) -> Result<Usage> {
        let result = self.perform_and_process(WireMethod::GetUsage, &Params::new())?;
        Usage::from_normalized(result)
    }

    /// Run a generation method and check that exactly `n` values came back.
    fn generate<T: DeserializeOwned>(
        &self,
        method: WireMethod,
        opts: Params,
    ) -> Result<RandomData<T>> {
        let random = RandomData::from_normalized(self.perform_and_process(method, &opts)?)?;
        if let Some(n) = opts.get("n").and_then(Value::as_u64) {
            let received = random.data().len();
            if usize::try_from(n).ok() != Some(received) {
                return Err(RandomOrgError::bad_response(format!(
                    "requested {n} values, received {received}"
                )));
            }
        }
        Ok(random)
    }

    fn perform_and_process(&self, method: WireMethod, opts: &Params) -> Result<Value> {
        validation::validate(method, Some(opts))?;
        let response = self.perform_request(method, opts)?;
        process_response(&response, method.returns_random_data())
    }

    /// Build, send and unwrap one request. A status without a result is an error
    /// here since callers always expect data back.
    fn perform_request(&self, method: WireMethod, params: &Params) -> Result<Value> {
        let envelope =
            RequestEnvelope::build(method, params, self.config.api_key(), self.ids.next_id());

        match self.dispatcher.dispatch(&envelope)? {
            Dispatch::Parsed(response) => Ok(response),
            Dispatch::NoResult { status } => Err(RandomOrgError::NoResult { status }),
        }
    }
}
