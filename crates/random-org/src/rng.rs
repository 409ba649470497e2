//! Random number generator facade.
//!
//! [`Rng`] offers `rand(max)` and `bytes(size)` on top of the client and
//! implements [`rand::RngCore`], so it can be handed to anything that takes a
//! general-purpose RNG:
//!
//! ```ignore
//! use rand::seq::SliceRandom;
//!
//! let mut rng = random_org::Rng::new(RandomOrgClient::from_env());
//! let pick = [1, 3, 5, 78, 9, 5, 3].choose(&mut rng);
//! ```
//!
//! Every draw is a network round trip and consumes service quota.

use serde_json::Value;
use std::ops::{Range, RangeInclusive};
use std::str::FromStr;

use crate::client::RandomOrgClient;
use crate::convenience::MAX_BLOB_BYTES;
use crate::error::{RandomOrgError, Result};
use crate::validation::INTEGER_LIMIT;

/// Precision of the fractional part of composed floats.
const FRACTION_SCALE: f64 = 1_000_000_000.0;
const FRACTION_DIGITS_MAX: i64 = 999_999_999;

/// Attempts at a composed float before giving up.
const MAX_REDRAWS: usize = 32;

/// Upper bound accepted by [`Rng::rand`].
#[derive(Debug, Clone, PartialEq)]
pub enum RandMax {
    /// Float in `[0.0, 1.0)`
    Absent,
    /// Integer in `[0, max)`
    Integer(i64),
    /// Float in `[0.0, max)`
    Float(f64),
    /// A member of the range
    Range(RangeInclusive<i64>),
}

impl From<()> for RandMax {
    fn from(_: ()) -> Self {
        Self::Absent
    }
}

impl From<i64> for RandMax {
    fn from(max: i64) -> Self {
        Self::Integer(max)
    }
}

impl From<i32> for RandMax {
    fn from(max: i32) -> Self {
        Self::Integer(i64::from(max))
    }
}

impl From<u32> for RandMax {
    fn from(max: u32) -> Self {
        Self::Integer(i64::from(max))
    }
}

impl From<f64> for RandMax {
    fn from(max: f64) -> Self {
        Self::Float(max)
    }
}

impl From<RangeInclusive<i64>> for RandMax {
    fn from(range: RangeInclusive<i64>) -> Self {
        Self::Range(range)
    }
}

impl From<Range<i64>> for RandMax {
    fn from(range: Range<i64>) -> Self {
        match range.end.checked_sub(1) {
            Some(last) => Self::Range(range.start..=last),
            #[allow(clippy::reversed_empty_ranges)]
            None => Self::Range(1..=0),
        }
    }
}

impl<T: Into<RandMax>> From<Option<T>> for RandMax {
    fn from(max: Option<T>) -> Self {
        max.map_or(Self::Absent, Into::into)
    }
}

fn above_limit(max: impl std::fmt::Display) -> RandomOrgError {
    RandomOrgError::argument(format!("max must not exceed {INTEGER_LIMIT}, got {max}"))
}

fn unsupported(what: impl std::fmt::Display) -> RandomOrgError {
    RandomOrgError::argument(format!("argument must be of a supported type, got {what}"))
}

impl TryFrom<&Value> for RandMax {
    type Error = RandomOrgError;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Absent),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(Self::Integer(i)),
                (None, Some(f)) => Ok(Self::Float(f)),
                _ => Err(unsupported(value)),
            },
            other => Err(unsupported(other)),
        }
    }
}

/// Parses `""`, `"42"`, `"2.5"`, `"1..10"` and `"1..=10"`.
impl FromStr for RandMax {
    type Err = RandomOrgError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::Absent);
        }
        if let Some((start, end)) = s.split_once("..=") {
            let (start, end) = (parse_bound(start, s)?, parse_bound(end, s)?);
            return Ok(Self::Range(start..=end));
        }
        if let Some((start, end)) = s.split_once("..") {
            let (start, end) = (parse_bound(start, s)?, parse_bound(end, s)?);
            return Ok((start..end).into());
        }
        if let Ok(i) = s.parse::<i64>() {
            return Ok(Self::Integer(i));
        }
        match s.parse::<f64>() {
            Ok(f) => Ok(Self::Float(f)),
            Err(_) => Err(unsupported(format!("'{s}'"))),
        }
    }
}

fn parse_bound(bound: &str, whole: &str) -> Result<i64> {
    bound
        .trim()
        .parse()
        .map_err(|_| unsupported(format!("'{whole}'")))
}

/// Outcome of a draw: integer bounds give integers, everything else floats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RandomValue {
    Integer(i64),
    Float(f64),
}

impl RandomValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Integer(i) => Some(i),
            Self::Float(_) => None,
        }
    }
}

impl std::fmt::Display for RandomValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// random.org as a random number generator.
#[derive(Clone)]
pub struct Rng {
    client: RandomOrgClient,
}

impl Rng {
    pub fn new(client: RandomOrgClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RandomOrgClient {
        &self.client
    }

    /// Draw a number bounded by `max`.
    ///
    /// - absent or zero: float in `[0.0, 1.0)`
    /// - integer: integer in `[0, max)`
    /// - float: float in `[0.0, max)`
    /// - range: a member of the range
    pub fn rand(&self, max: impl Into<RandMax>) -> Result<RandomValue> {
        match max.into() {
            RandMax::Absent | RandMax::Integer(0) => self.client.random_number(0),
            RandMax::Integer(max) if max < 0 => Err(RandomOrgError::argument(format!(
                "max must be positive, got {max}"
            ))),
            RandMax::Integer(max) if max > INTEGER_LIMIT => Err(above_limit(max)),
            RandMax::Integer(max) => self.client.random_number(max),
            RandMax::Float(max) if max == 0.0 => self.client.random_number(0),
            RandMax::Float(max) if !max.is_finite() || max < 0.0 => Err(
                RandomOrgError::argument(format!("max must be a positive finite number, got {max}")),
            ),
            RandMax::Float(max) if max > INTEGER_LIMIT as f64 => Err(above_limit(max)),
            RandMax::Float(max) => self.composed_float(max).map(RandomValue::Float),
            RandMax::Range(range) => self.member(range).map(RandomValue::Integer),
        }
    }

    /// `size` random bytes (default 16).
    pub fn bytes(&self, size: Option<usize>) -> Result<Vec<u8>> {
        self.client.random_bytes(size)
    }

    /// Float in `[0.0, max)` from two bounded integer draws.
    ///
    /// A single decimal-fraction draw carries at most 14 places, which cannot
    /// express an arbitrary-magnitude bound with a fractional part, so the
    /// whole part and a 9-digit remainder are drawn independently. Pairs that
    /// land at or above `max` are discarded and drawn again.
    fn composed_float(&self, max: f64) -> Result<f64> {
        let whole = max.trunc() as i64;
        let fraction = ((max - max.trunc()) * FRACTION_SCALE).floor() as i64;

        if whole == 0 {
            if fraction == 0 {
                // Below the remainder's resolution.
                return Ok(0.0);
            }
            let remainder = self.client.bounded_integer(0, fraction - 1)?;
            return Ok(remainder as f64 / FRACTION_SCALE);
        }

        let top = if fraction == 0 { whole - 1 } else { whole };
        for _ in 0..MAX_REDRAWS {
            let w = self.client.bounded_integer(0, top)?;
            let remainder = self.client.bounded_integer(0, FRACTION_DIGITS_MAX)?;
            let value = w as f64 + remainder as f64 / FRACTION_SCALE;
            if value < max {
                return Ok(value);
            }
            tracing::debug!(max, value, "Composed float above bound, drawing again");
        }
        Err(RandomOrgError::bad_response(format!(
            "no draw below {max} after {MAX_REDRAWS} attempts"
        )))
    }

    /// Uniform member of `range`, picked by a bounded index draw.
    fn member(&self, range: RangeInclusive<i64>) -> Result<i64> {
        let (start, end) = range.into_inner();
        if start > end {
            return Err(RandomOrgError::argument(format!(
                "range {start}..={end} is empty"
            )));
        }
        let last_index = end
            .checked_sub(start)
            .filter(|last| *last <= INTEGER_LIMIT)
            .ok_or_else(|| {
                RandomOrgError::argument(format!(
                    "range {start}..={end} is too large, at most {} members are supported",
                    INTEGER_LIMIT + 1
                ))
            })?;
        let index = self.client.bounded_integer(0, last_index)?;
        Ok(start + index)
    }
}

impl RandomOrgClient {
    /// This client as a random number generator.
    pub fn rng(&self) -> Rng {
        Rng::new(self.clone())
    }
}

impl rand::RngCore for Rng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    /// Panics if the service cannot be reached, like `OsRng` does when the OS
    /// source fails. Use `try_fill_bytes` to handle the error.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("random.org request failed: {e}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        for chunk in dest.chunks_mut(MAX_BLOB_BYTES) {
            let bytes = self.bytes(Some(chunk.len())).map_err(rand::Error::new)?;
            if bytes.len() != chunk.len() {
                return Err(rand::Error::new(RandomOrgError::bad_response(format!(
                    "asked for {} bytes, got {}",
                    chunk.len(),
                    bytes.len()
                ))));
            }
            chunk.copy_from_slice(&bytes);
        }
        Ok(())
    }
}
