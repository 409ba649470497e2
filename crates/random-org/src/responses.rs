//! Typed response wrappers.
//!
//! Wrappers are built once from a normalized (snake_case) mapping and are
//! read-only afterwards. Unknown keys are ignored and absent keys leave the
//! field unset; only a malformed timestamp fails construction.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{RandomOrgError, Result};

pub type Timestamp = DateTime<Utc>;

/// Parse a service timestamp.
///
/// random.org sends `2011-10-10 13:19:12Z`; RFC 3339 is accepted as well.
pub fn parse_timestamp(value: &str) -> Result<Timestamp> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.fZ")
        .map(|naive| naive.and_utc())
        .map_err(|e| RandomOrgError::Timestamp {
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn take_timestamp(map: &mut Map<String, Value>, key: &str) -> Result<Option<Timestamp>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => parse_timestamp(&s).map(Some),
        Some(other) => Err(RandomOrgError::Timestamp {
            value: other.to_string(),
            reason: "expected a string".to_string(),
        }),
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(RandomOrgError::bad_response(other)),
    }
}

/// Data returned by every generation method.
#[derive(Debug, Clone, PartialEq)]
pub struct RandomData<T> {
    data: Vec<T>,
    completion_time: Option<Timestamp>,
}

pub type Integers = RandomData<i64>;
pub type IntegerSequences = RandomData<Vec<i64>>;
pub type DecimalFractions = RandomData<f64>;
pub type Gaussians = RandomData<f64>;
pub type Strings = RandomData<String>;
pub type Uuids = RandomData<Uuid>;
/// Blob payloads, base64 or hex encoded as requested.
pub type Blobs = RandomData<String>;

impl<T> RandomData<T> {
    pub fn new(data: Vec<T>, completion_time: Option<Timestamp>) -> Self {
        Self {
            data,
            completion_time,
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// The first element, for single-value draws.
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn completion_time(&self) -> Option<Timestamp> {
        self.completion_time
    }
}

impl<T: DeserializeOwned> RandomData<T> {
    /// Build from the normalized `random` mapping.
    pub fn from_normalized(value: Value) -> Result<Self> {
        let mut map = into_object(value)?;
        let completion_time = take_timestamp(&mut map, "completion_time")?;
        let data = match map.remove("data") {
            None | Some(Value::Null) => Vec::new(),
            Some(payload) => serde_json::from_value(payload.clone()).map_err(|e| {
                RandomOrgError::bad_response(format!("unexpected data payload ({e}): {payload}"))
            })?,
        };
        Ok(Self::new(data, completion_time))
    }
}

/// Account usage returned by `getUsage`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Usage {
    status: Option<String>,
    creation_time: Option<Timestamp>,
    bits_left: Option<i64>,
    requests_left: Option<i64>,
    total_bits: Option<i64>,
    total_requests: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UsageFields {
    status: Option<String>,
    bits_left: Option<i64>,
    requests_left: Option<i64>,
    total_bits: Option<i64>,
    total_requests: Option<i64>,
}

impl Usage {
    /// Build from the normalized `result` mapping.
    pub fn from_normalized(value: Value) -> Result<Self> {
        let mut map = into_object(value)?;
        let creation_time = take_timestamp(&mut map, "creation_time")?;
        let fields: UsageFields = serde_json::from_value(Value::Object(map.clone()))
            .map_err(|e| {
                RandomOrgError::bad_response(format!(
                    "unexpected usage payload ({e}): {}",
                    Value::Object(map)
                ))
            })?;

        Ok(Self {
            status: fields.status,
            creation_time,
            bits_left: fields.bits_left,
            requests_left: fields.requests_left,
            total_bits: fields.total_bits,
            total_requests: fields.total_requests,
        })
    }

    /// `running` or `stopped`
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn creation_time(&self) -> Option<Timestamp> {
        self.creation_time
    }

    pub fn bits_left(&self) -> Option<i64> {
        self.bits_left
    }

    pub fn requests_left(&self) -> Option<i64> {
        self.requests_left
    }

    pub fn total_bits(&self) -> Option<i64> {
        self.total_bits
    }

    pub fn total_requests(&self) -> Option<i64> {
        self.total_requests
    }
}
