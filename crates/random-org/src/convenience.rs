//! SecureRandom-style helpers built on the Basic API.

use uuid::Uuid;

use crate::client::RandomOrgClient;
use crate::error::{RandomOrgError, Result};
use crate::protocol::{BlobFormat, BlobsRequest, DecimalFractionsRequest, IntegersRequest, Params};
use crate::responses::RandomData;
use crate::rng::RandomValue;

/// Byte length used when none is given.
pub const DEFAULT_LENGTH: usize = 16;

/// Largest single blob the service hands out, in bytes.
pub const MAX_BLOB_BYTES: usize = 1_048_576 / 8;

/// Decimal places requested for unit floats.
const UNIT_FLOAT_PLACES: u32 = 14;

impl RandomOrgClient {
    /// `length` random bytes (default 16).
    pub fn random_bytes(&self, length: Option<usize>) -> Result<Vec<u8>> {
        let digits = self.hex(length)?;
        hex::decode(&digits).map_err(|e| {
            RandomOrgError::bad_response(format!("blob is not valid hex ({e}): {digits}"))
        })
    }

    /// A float in `[0.0, 1.0)` when `maximum` is 0, otherwise an integer in
    /// `[0, maximum)`.
    pub fn random_number(&self, maximum: i64) -> Result<RandomValue> {
        match maximum {
            0 => self.unit_float().map(RandomValue::Float),
            m if m < 0 => Err(RandomOrgError::argument(format!(
                "maximum must not be negative, got {m}"
            ))),
            // The service's range is inclusive.
            m => self.bounded_integer(0, m - 1).map(RandomValue::Integer),
        }
    }

    /// Hex string of `length` random bytes (`2 * length` digits).
    pub fn hex(&self, length: Option<usize>) -> Result<String> {
        self.blob(length, BlobFormat::Hex)
    }

    /// Base64 string of `length` random bytes.
    pub fn base64(&self, length: Option<usize>) -> Result<String> {
        self.blob(length, BlobFormat::Base64)
    }

    /// URL-safe base64 (`-` and `_`), unpadded unless `padding` is set.
    pub fn urlsafe_base64(&self, length: Option<usize>, padding: bool) -> Result<String> {
        let encoded = self.base64(length)?.replace('+', "-").replace('/', "_");
        if padding {
            Ok(encoded)
        } else {
            Ok(encoded.trim_end_matches('=').to_string())
        }
    }

    /// One version 4 UUID.
    pub fn uuid(&self) -> Result<Uuid> {
        single(self.generate_uuids(Params::new().with("n", 1))?)
    }

    /// One integer in the inclusive range `[min, max]`.
    pub fn bounded_integer(&self, min: i64, max: i64) -> Result<i64> {
        let request = IntegersRequest::new(1, min, max).replacement(true);
        single(self.generate_integers(Params::from(request).with("base", 10))?)
    }

    /// One decimal fraction with 14 places.
    pub fn unit_float(&self) -> Result<f64> {
        let request = DecimalFractionsRequest::new(1, UNIT_FLOAT_PLACES).replacement(true);
        single(self.generate_decimal_fractions(request)?)
    }

    fn blob(&self, length: Option<usize>, format: BlobFormat) -> Result<String> {
        let length = length.unwrap_or(DEFAULT_LENGTH);
        let bits = length
            .checked_mul(8)
            .and_then(|bits| u32::try_from(bits).ok())
            .ok_or_else(|| RandomOrgError::argument(format!("length {length} is too large")))?;
        single(self.generate_blobs(BlobsRequest::new(1, bits).format(format))?)
    }
}

/// First element of a single-value draw.
fn single<T>(random: RandomData<T>) -> Result<T> {
    random
        .into_data()
        .into_iter()
        .next()
        .ok_or_else(|| RandomOrgError::bad_response("random data is empty"))
}
