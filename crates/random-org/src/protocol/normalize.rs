//! Response normalization.
//!
//! Rewrites camelCase keys to snake_case throughout a parsed response and
//! extracts the part the caller asked for.

use regex_lite::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::error::{RandomOrgError, Result};

static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("valid regex"));

static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("valid regex"));

/// `completionTime` -> `completion_time`, `HTTPStatus` -> `http_status`.
pub fn to_snake_case(key: &str) -> String {
    let split = ACRONYM_BOUNDARY.replace_all(key, "${1}_${2}");
    let split = WORD_BOUNDARY.replace_all(&split, "${1}_${2}");
    split.replace('-', "_").to_lowercase()
}

/// Recursively rewrite every mapping key to snake_case.
///
/// Arrays are walked element-wise; scalars pass through unchanged.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (to_snake_case(&k), normalize_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        leaf => leaf,
    }
}

/// Extract the payload of a parsed response.
///
/// With `expect_random_data` the normalized `result.random` mapping is
/// returned and both `random` and `random.data` must exist; otherwise the
/// normalized `result` mapping is returned as-is.
pub fn process_response(response: &Value, expect_random_data: bool) -> Result<Value> {
    let result = response
        .get("result")
        .ok_or_else(|| RandomOrgError::bad_response(response))?;

    if !expect_random_data {
        return Ok(normalize_keys(result.clone()));
    }

    let random = result
        .get("random")
        .ok_or_else(|| RandomOrgError::bad_response(response))?;
    if random.get("data").is_none() {
        return Err(RandomOrgError::bad_response(response));
    }

    Ok(normalize_keys(random.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn snake_cases_camel_and_pascal_keys() {
        assert_eq!(to_snake_case("bitsLeft"), "bits_left");
        assert_eq!(to_snake_case("completionTime"), "completion_time");
        assert_eq!(to_snake_case("TotalRequests"), "total_requests");
        assert_eq!(to_snake_case("HTTPStatus"), "http_status");
        assert_eq!(to_snake_case("advisory-delay"), "advisory_delay");
        assert_eq!(to_snake_case("sha256Hash"), "sha256_hash");
    }

    #[test]
    fn normalization_is_idempotent_on_snake_case() {
        let input = json!({"bits_left": 5, "random": {"data": [1, 2], "completion_time": "x"}});
        assert_eq!(normalize_keys(input.clone()), input);
    }

    #[test]
    fn normalization_walks_nested_maps_and_arrays() {
        let input = json!({
            "bitsLeft": 5,
            "random": {"data": [{"innerKey": 1}, 2], "completionTime": "2020-01-01 00:00:00Z"}
        });
        assert_eq!(
            normalize_keys(input),
            json!({
                "bits_left": 5,
                "random": {"data": [{"inner_key": 1}, 2], "completion_time": "2020-01-01 00:00:00Z"}
            })
        );
    }

    #[test]
    fn leaves_pass_through() {
        assert_eq!(normalize_keys(json!("camelCase")), json!("camelCase"));
        assert_eq!(normalize_keys(json!(null)), json!(null));
    }

    #[test]
    fn missing_result_is_an_api_error() {
        let err = process_response(&json!({"error": {"code": 401}}), false).unwrap_err();
        assert!(matches!(err, RandomOrgError::Api(ref msg) if msg.contains("401")));
    }

    #[test]
    fn missing_random_is_an_api_error() {
        let err = process_response(&json!({"result": {}}), true).unwrap_err();
        assert!(matches!(err, RandomOrgError::Api(_)));
    }

    #[test]
    fn missing_data_is_an_api_error() {
        let response = json!({"result": {"random": {"completionTime": "2020-01-01 00:00:00Z"}}});
        assert!(matches!(
            process_response(&response, true),
            Err(RandomOrgError::Api(_))
        ));
    }

    #[test]
    fn random_path_returns_normalized_random_mapping() {
        let response = json!({
            "result": {
                "random": {"data": [42], "completionTime": "2021-01-01 00:00:00Z"},
                "bitsUsed": 8
            }
        });
        assert_eq!(
            process_response(&response, true).unwrap(),
            json!({"data": [42], "completion_time": "2021-01-01 00:00:00Z"})
        );
    }

    #[test]
    fn plain_path_returns_normalized_result() {
        let response = json!({"result": {"status": "running", "bitsLeft": 250000}});
        assert_eq!(
            process_response(&response, false).unwrap(),
            json!({"status": "running", "bits_left": 250000})
        );
    }
}
