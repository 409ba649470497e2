//! Caller-side parameter representation.
//!
//! Options are always held under logical snake_case keys. The single
//! translation table [`WIRE_KEYS`] is applied right before serialization.

use serde::Serialize;
use serde_json::{Map, Value};

/// Logical key -> wire key. Keys not listed are sent unchanged.
pub const WIRE_KEYS: &[(&str, &str)] = &[
    ("decimal_places", "decimalPlaces"),
    ("standard_deviation", "standardDeviation"),
    ("significant_digits", "significantDigits"),
    ("api_key", "apiKey"),
];

/// Translate a logical option key to its wire spelling.
pub fn wire_key(key: &str) -> &str {
    WIRE_KEYS
        .iter()
        .find(|(logical, _)| *logical == key)
        .map(|(_, wire)| *wire)
        .unwrap_or(key)
}

/// Option mapping passed to the generation methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wire-cased copy of the options with the credential merged in.
    ///
    /// The caller's mapping is left untouched.
    pub fn to_wire(&self, api_key: &str) -> Map<String, Value> {
        let mut wire: Map<String, Value> = self
            .0
            .iter()
            .map(|(k, v)| (wire_key(k).to_string(), v.clone()))
            .collect();
        wire.insert(wire_key("api_key").to_string(), Value::from(api_key));
        wire
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// Typed request builders
// =============================================================================

/// A bound that is either shared by every sequence or given per sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bounds {
    Uniform(i64),
    Multiform(Vec<i64>),
}

impl From<i64> for Bounds {
    fn from(value: i64) -> Self {
        Self::Uniform(value)
    }
}

impl From<Vec<i64>> for Bounds {
    fn from(values: Vec<i64>) -> Self {
        Self::Multiform(values)
    }
}

impl From<Bounds> for Value {
    fn from(bounds: Bounds) -> Self {
        match bounds {
            Bounds::Uniform(v) => Value::from(v),
            Bounds::Multiform(vs) => Value::from(vs),
        }
    }
}

/// Output encoding of blob data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlobFormat {
    #[default]
    Base64,
    Hex,
}

impl BlobFormat {
    pub const ALLOWED: &'static [&'static str] = &["base64", "hex"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Hex => "hex",
        }
    }
}

/// `n` integers in `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegersRequest {
    pub n: u32,
    pub min: i64,
    pub max: i64,
    pub replacement: Option<bool>,
}

impl IntegersRequest {
    pub fn new(n: u32, min: i64, max: i64) -> Self {
        Self {
            n,
            min,
            max,
            replacement: None,
        }
    }

    pub fn replacement(mut self, replacement: bool) -> Self {
        self.replacement = Some(replacement);
        self
    }
}

impl From<IntegersRequest> for Params {
    fn from(req: IntegersRequest) -> Self {
        let params = Params::new()
            .with("n", req.n)
            .with("min", req.min)
            .with("max", req.max);
        with_replacement(params, req.replacement)
    }
}

/// `n` sequences of integers, uniform or multiform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerSequencesRequest {
    pub n: u32,
    pub length: Bounds,
    pub min: Bounds,
    pub max: Bounds,
    pub replacement: Option<bool>,
}

impl IntegerSequencesRequest {
    pub fn new(
        n: u32,
        length: impl Into<Bounds>,
        min: impl Into<Bounds>,
        max: impl Into<Bounds>,
    ) -> Self {
        Self {
            n,
            length: length.into(),
            min: min.into(),
            max: max.into(),
            replacement: None,
        }
    }

    pub fn replacement(mut self, replacement: bool) -> Self {
        self.replacement = Some(replacement);
        self
    }
}

impl From<IntegerSequencesRequest> for Params {
    fn from(req: IntegerSequencesRequest) -> Self {
        let params = Params::new()
            .with("n", req.n)
            .with("length", req.length)
            .with("min", req.min)
            .with("max", req.max);
        with_replacement(params, req.replacement)
    }
}

/// `n` fractions in `[0, 1]` with `decimal_places` places.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalFractionsRequest {
    pub n: u32,
    pub decimal_places: u32,
    pub replacement: Option<bool>,
}

impl DecimalFractionsRequest {
    pub fn new(n: u32, decimal_places: u32) -> Self {
        Self {
            n,
            decimal_places,
            replacement: None,
        }
    }

    pub fn replacement(mut self, replacement: bool) -> Self {
        self.replacement = Some(replacement);
        self
    }
}

impl From<DecimalFractionsRequest> for Params {
    fn from(req: DecimalFractionsRequest) -> Self {
        let params = Params::new()
            .with("n", req.n)
            .with("decimal_places", req.decimal_places);
        with_replacement(params, req.replacement)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaussiansRequest {
    pub n: u32,
    pub mean: f64,
    pub standard_deviation: f64,
    pub significant_digits: u32,
}

impl GaussiansRequest {
    pub fn new(n: u32, mean: f64, standard_deviation: f64, significant_digits: u32) -> Self {
        Self {
            n,
            mean,
            standard_deviation,
            significant_digits,
        }
    }
}

impl From<GaussiansRequest> for Params {
    fn from(req: GaussiansRequest) -> Self {
        Params::new()
            .with("n", req.n)
            .with("mean", req.mean)
            .with("standard_deviation", req.standard_deviation)
            .with("significant_digits", req.significant_digits)
    }
}

/// `n` strings of `length` characters drawn from `characters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringsRequest {
    pub n: u32,
    pub length: u32,
    pub characters: String,
    pub replacement: Option<bool>,
}

impl StringsRequest {
    pub fn new(n: u32, length: u32, characters: impl Into<String>) -> Self {
        Self {
            n,
            length,
            characters: characters.into(),
            replacement: None,
        }
    }

    pub fn replacement(mut self, replacement: bool) -> Self {
        self.replacement = Some(replacement);
        self
    }
}

impl From<StringsRequest> for Params {
    fn from(req: StringsRequest) -> Self {
        let params = Params::new()
            .with("n", req.n)
            .with("length", req.length)
            .with("characters", req.characters);
        with_replacement(params, req.replacement)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UuidsRequest {
    pub n: u32,
}

impl UuidsRequest {
    pub fn new(n: u32) -> Self {
        Self { n }
    }
}

impl From<UuidsRequest> for Params {
    fn from(req: UuidsRequest) -> Self {
        Params::new().with("n", req.n)
    }
}

/// `n` blobs of `size` bits each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobsRequest {
    pub n: u32,
    pub size: u32,
    pub format: Option<BlobFormat>,
}

impl BlobsRequest {
    pub fn new(n: u32, size: u32) -> Self {
        Self {
            n,
            size,
            format: None,
        }
    }

    pub fn format(mut self, format: BlobFormat) -> Self {
        self.format = Some(format);
        self
    }
}

impl From<BlobsRequest> for Params {
    fn from(req: BlobsRequest) -> Self {
        let mut params = Params::new().with("n", req.n).with("size", req.size);
        if let Some(format) = req.format {
            params.insert("format", format.as_str());
        }
        params
    }
}

fn with_replacement(mut params: Params, replacement: Option<bool>) -> Params {
    if let Some(replacement) = replacement {
        params.insert("replacement", replacement);
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_key_translates_known_keys_only() {
        assert_eq!(wire_key("decimal_places"), "decimalPlaces");
        assert_eq!(wire_key("standard_deviation"), "standardDeviation");
        assert_eq!(wire_key("significant_digits"), "significantDigits");
        assert_eq!(wire_key("n"), "n");
        assert_eq!(wire_key("replacement"), "replacement");
    }

    #[test]
    fn to_wire_merges_key_without_mutating_caller_params() {
        let params = Params::new().with("n", 1).with("decimal_places", 14);
        let wire = params.to_wire("secret");

        assert_eq!(
            Value::Object(wire),
            json!({"n": 1, "decimalPlaces": 14, "apiKey": "secret"})
        );
        assert!(!params.contains("apiKey"));
        assert!(params.contains("decimal_places"));
    }

    #[test]
    fn multiform_sequences_become_arrays() {
        let params: Params =
            IntegerSequencesRequest::new(2, vec![3, 4], vec![0, 10], 100).into();
        assert_eq!(params.get("length"), Some(&json!([3, 4])));
        assert_eq!(params.get("min"), Some(&json!([0, 10])));
        assert_eq!(params.get("max"), Some(&json!(100)));
        assert!(!params.contains("replacement"));
    }

    #[test]
    fn optional_fields_only_appear_when_set() {
        let params: Params = IntegersRequest::new(1, 0, 9).replacement(false).into();
        assert_eq!(params.get("replacement"), Some(&json!(false)));

        let blobs: Params = BlobsRequest::new(1, 128).format(BlobFormat::Hex).into();
        assert_eq!(blobs.get("format"), Some(&json!("hex")));

        let plain: Params = BlobsRequest::new(1, 128).into();
        assert!(!plain.contains("format"));
    }
}
