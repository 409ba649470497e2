//! JSON-RPC request envelope.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::protocol::params::Params;

pub const JSONRPC_VERSION: &str = "2.0";

/// Remote procedures of the Basic API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WireMethod {
    #[serde(rename = "generateIntegers")]
    GenerateIntegers,
    #[serde(rename = "generateIntegerSequences")]
    GenerateIntegerSequences,
    #[serde(rename = "generateDecimalFractions")]
    GenerateDecimalFractions,
    #[serde(rename = "generateGaussians")]
    GenerateGaussians,
    #[serde(rename = "generateStrings")]
    GenerateStrings,
    #[serde(rename = "generateUUIDs")]
    GenerateUuids,
    #[serde(rename = "generateBlobs")]
    GenerateBlobs,
    #[serde(rename = "getUsage")]
    GetUsage,
}

impl WireMethod {
    pub const ALL: [WireMethod; 8] = [
        Self::GenerateIntegers,
        Self::GenerateIntegerSequences,
        Self::GenerateDecimalFractions,
        Self::GenerateGaussians,
        Self::GenerateStrings,
        Self::GenerateUuids,
        Self::GenerateBlobs,
        Self::GetUsage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateIntegers => "generateIntegers",
            Self::GenerateIntegerSequences => "generateIntegerSequences",
            Self::GenerateDecimalFractions => "generateDecimalFractions",
            Self::GenerateGaussians => "generateGaussians",
            Self::GenerateStrings => "generateStrings",
            Self::GenerateUuids => "generateUUIDs",
            Self::GenerateBlobs => "generateBlobs",
            Self::GetUsage => "getUsage",
        }
    }

    /// Whether the result carries a `random` data envelope.
    pub fn returns_random_data(&self) -> bool {
        !matches!(self, Self::GetUsage)
    }
}

impl fmt::Display for WireMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One JSON-RPC call, built per request and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    jsonrpc: &'static str,
    id: u32,
    method: WireMethod,
    params: Map<String, Value>,
}

impl RequestEnvelope {
    pub fn build(method: WireMethod, params: &Params, api_key: &str, id: u32) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params: params.to_wire(api_key),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn method(&self) -> WireMethod {
        self.method
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn to_json(&self) -> String {
        // Keys are strings and values are already JSON, so this cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_the_json_rpc_shape() {
        let params = Params::new().with("n", 1).with("min", 0).with("max", 100);
        let envelope = RequestEnvelope::build(WireMethod::GenerateIntegers, &params, "key", 42);

        let value: Value = serde_json::from_str(&envelope.to_json()).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 42,
                "method": "generateIntegers",
                "params": {"n": 1, "min": 0, "max": 100, "apiKey": "key"}
            })
        );
    }

    #[test]
    fn serde_name_matches_as_str() {
        for method in WireMethod::ALL {
            let serialized = serde_json::to_value(method).unwrap();
            assert_eq!(serialized, json!(method.as_str()));
        }
    }

    #[test]
    fn only_usage_skips_random_data() {
        let usage_like: Vec<_> = WireMethod::ALL
            .iter()
            .filter(|m| !m.returns_random_data())
            .collect();
        assert_eq!(usage_like, vec![&WireMethod::GetUsage]);
    }
}
