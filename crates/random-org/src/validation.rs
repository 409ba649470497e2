//! Local parameter validation.
//!
//! Each wire method declares a [`Schema`]: the keys that must be present and
//! the checks applied to whatever keys are present. Validation runs before a
//! request is built, so a failure here never reaches the network.

use serde_json::Value;

use crate::error::{RandomOrgError, Result};
use crate::protocol::params::BlobFormat;
use crate::protocol::{Params, WireMethod};

const MAX_N: i64 = 10_000;
/// Largest magnitude the service accepts for integer bounds.
pub const INTEGER_LIMIT: i64 = 1_000_000_000;
const GAUSSIAN_LIMIT: f64 = 1_000_000.0;

/// A single rule applied to one option key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// Integer in `[min, max]`
    Integer {
        key: &'static str,
        min: i64,
        max: i64,
    },
    /// Any number in `[min, max]`
    Number {
        key: &'static str,
        min: f64,
        max: f64,
    },
    /// Integer or list of integers, every element in `[min, max]`
    IntegerOrList {
        key: &'static str,
        min: i64,
        max: i64,
    },
    /// String of at most `max` characters
    MaxLength { key: &'static str, max: usize },
    /// Integer divisible by `divisor`
    MultipleOf { key: &'static str, divisor: i64 },
    /// String drawn from a fixed set
    OneOf {
        key: &'static str,
        allowed: &'static [&'static str],
    },
    /// Integer drawn from a fixed set
    OneOfIntegers {
        key: &'static str,
        allowed: &'static [i64],
    },
    Boolean { key: &'static str },
}

/// Required keys plus the checks for one method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schema {
    pub required: &'static [&'static str],
    pub checks: &'static [Check],
}

const REPLACEMENT: Check = Check::Boolean { key: "replacement" };

// Wrappers type integer data as numbers, so only decimal output is accepted.
const DECIMAL_BASE: Check = Check::OneOfIntegers {
    key: "base",
    allowed: &[10],
};

const INTEGERS: Schema = Schema {
    required: &["n", "min", "max"],
    checks: &[
        Check::Integer { key: "n", min: 1, max: MAX_N },
        Check::Integer { key: "min", min: -INTEGER_LIMIT, max: INTEGER_LIMIT },
        Check::Integer { key: "max", min: -INTEGER_LIMIT, max: INTEGER_LIMIT },
        REPLACEMENT,
        DECIMAL_BASE,
    ],
};

const INTEGER_SEQUENCES: Schema = Schema {
    required: &["n", "length", "min", "max"],
    checks: &[
        Check::Integer { key: "n", min: 1, max: MAX_N },
        Check::IntegerOrList { key: "length", min: 1, max: MAX_N },
        Check::IntegerOrList { key: "min", min: -INTEGER_LIMIT, max: INTEGER_LIMIT },
        Check::IntegerOrList { key: "max", min: -INTEGER_LIMIT, max: INTEGER_LIMIT },
        REPLACEMENT,
        DECIMAL_BASE,
    ],
};

const DECIMAL_FRACTIONS: Schema = Schema {
    required: &["n", "decimal_places"],
    checks: &[
        Check::Integer { key: "n", min: 1, max: MAX_N },
        Check::Integer { key: "decimal_places", min: 1, max: 14 },
        REPLACEMENT,
    ],
};

const GAUSSIANS: Schema = Schema {
    required: &["n", "mean", "standard_deviation", "significant_digits"],
    checks: &[
        Check::Integer { key: "n", min: 1, max: MAX_N },
        Check::Number { key: "mean", min: -GAUSSIAN_LIMIT, max: GAUSSIAN_LIMIT },
        Check::Number {
            key: "standard_deviation",
            min: -GAUSSIAN_LIMIT,
            max: GAUSSIAN_LIMIT,
        },
        Check::Integer { key: "significant_digits", min: 2, max: 14 },
    ],
};

const STRINGS: Schema = Schema {
    required: &["n", "length", "characters"],
    checks: &[
        Check::Integer { key: "n", min: 1, max: MAX_N },
        Check::Integer { key: "length", min: 1, max: 32 },
        Check::MaxLength { key: "characters", max: 128 },
        REPLACEMENT,
    ],
};

const UUIDS: Schema = Schema {
    required: &["n"],
    checks: &[Check::Integer { key: "n", min: 1, max: 1_000 }],
};

const BLOBS: Schema = Schema {
    required: &["n", "size"],
    checks: &[
        Check::Integer { key: "n", min: 1, max: 100 },
        Check::Integer { key: "size", min: 1, max: 1_048_576 },
        Check::OneOf { key: "format", allowed: BlobFormat::ALLOWED },
        Check::MultipleOf { key: "size", divisor: 8 },
    ],
};

const USAGE: Schema = Schema {
    required: &[],
    checks: &[],
};

pub fn schema_for(method: WireMethod) -> Schema {
    match method {
        WireMethod::GenerateIntegers => INTEGERS,
        WireMethod::GenerateIntegerSequences => INTEGER_SEQUENCES,
        WireMethod::GenerateDecimalFractions => DECIMAL_FRACTIONS,
        WireMethod::GenerateGaussians => GAUSSIANS,
        WireMethod::GenerateStrings => STRINGS,
        WireMethod::GenerateUuids => UUIDS,
        WireMethod::GenerateBlobs => BLOBS,
        WireMethod::GetUsage => USAGE,
    }
}

/// Validate options for `method` against its schema.
pub fn validate(method: WireMethod, opts: Option<&Params>) -> Result<()> {
    let schema = schema_for(method);
    let opts = verify_arguments(opts, schema.required)?;
    for check in schema.checks {
        verify(check, opts)?;
    }
    Ok(())
}

/// Fail unless the mapping exists and holds every required key.
pub fn verify_arguments<'a>(opts: Option<&'a Params>, required: &[&str]) -> Result<&'a Params> {
    let opts = opts.ok_or_else(|| RandomOrgError::argument("Missing required arguments."))?;
    if let Some(missing) = required.iter().find(|key| !opts.contains(key)) {
        return Err(RandomOrgError::argument(format!(
            "Missing required parameter {missing}"
        )));
    }
    Ok(opts)
}

/// Apply one check. Absent optional keys pass.
pub fn verify(check: &Check, opts: &Params) -> Result<()> {
    match *check {
        Check::Integer { key, min, max } => {
            let Some(value) = opts.get(key) else {
                return Ok(());
            };
            let num = as_integer(key, value)?;
            verify_range(key, num, min, max)
        }
        Check::Number { key, min, max } => {
            let Some(value) = opts.get(key) else {
                return Ok(());
            };
            let num = value.as_f64().ok_or_else(|| {
                RandomOrgError::argument(format!("parameter '{key}' must be a number."))
            })?;
            if num < min || num > max {
                return Err(range_error(key, min, max));
            }
            Ok(())
        }
        Check::IntegerOrList { key, min, max } => match opts.get(key) {
            None => Ok(()),
            Some(Value::Array(items)) => items.iter().try_for_each(|item| {
                let num = as_integer(key, item)?;
                if num < min || num > max {
                    return Err(RandomOrgError::argument(format!(
                        "{key} values must be in the [{min}, {max}] range."
                    )));
                }
                Ok(())
            }),
            Some(value) => verify_range(key, as_integer(key, value)?, min, max),
        },
        Check::MaxLength { key, max } => {
            let Some(value) = opts.get(key) else {
                return Ok(());
            };
            let content = value.as_str().ok_or_else(|| {
                RandomOrgError::argument(format!("parameter '{key}' must be a string."))
            })?;
            let length = content.chars().count();
            if length > max {
                return Err(RandomOrgError::argument(format!(
                    "string is too long ({length} > {max})"
                )));
            }
            Ok(())
        }
        Check::MultipleOf { key, divisor } => {
            let Some(value) = opts.get(key) else {
                return Ok(());
            };
            if as_integer(key, value)? % divisor != 0 {
                return Err(RandomOrgError::argument(format!(
                    "{key} parameter is not divisible by {divisor}"
                )));
            }
            Ok(())
        }
        Check::OneOf { key, allowed } => match opts.get(key) {
            None => Ok(()),
            Some(value) => match value.as_str() {
                Some(symbol) if allowed.contains(&symbol) => Ok(()),
                _ => Err(RandomOrgError::argument(format!(
                    "symbol {value} is not allowed"
                ))),
            },
        },
        Check::OneOfIntegers { key, allowed } => match opts.get(key) {
            None => Ok(()),
            Some(value) => match value.as_i64() {
                Some(num) if allowed.contains(&num) => Ok(()),
                _ => Err(RandomOrgError::argument(format!(
                    "value {value} is not allowed for parameter '{key}'"
                ))),
            },
        },
        Check::Boolean { key } => match opts.get(key) {
            None | Some(Value::Bool(_)) => Ok(()),
            Some(_) => Err(RandomOrgError::argument(format!(
                "parameter '{key}' must be a boolean."
            ))),
        },
    }
}

fn as_integer(key: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| RandomOrgError::argument(format!("parameter '{key}' must be an integer.")))
}

fn verify_range(key: &str, num: i64, min: i64, max: i64) -> Result<()> {
    if num < min || num > max {
        return Err(range_error(key, min, max));
    }
    Ok(())
}

fn range_error(key: &str, min: impl std::fmt::Display, max: impl std::fmt::Display) -> RandomOrgError {
    RandomOrgError::argument(format!(
        "parameter '{key}' must be in the [{min}, {max}] range."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{
        BlobsRequest, DecimalFractionsRequest, GaussiansRequest, IntegerSequencesRequest,
        IntegersRequest, StringsRequest, UuidsRequest,
    };
    use serde_json::json;

    fn assert_argument_error(result: Result<()>, needle: &str) {
        match result {
            Err(RandomOrgError::Argument(msg)) => {
                assert!(msg.contains(needle), "'{msg}' does not mention '{needle}'")
            }
            other => panic!("expected argument error, got {other:?}"),
        }
    }

    #[test]
    fn absent_options_fail() {
        assert_argument_error(
            validate(WireMethod::GenerateIntegers, None),
            "Missing required arguments",
        );
    }

    #[test]
    fn missing_key_is_named() {
        let params = Params::new().with("n", 1).with("min", 0);
        assert_argument_error(
            validate(WireMethod::GenerateIntegers, Some(&params)),
            "Missing required parameter max",
        );
    }

    #[test]
    fn n_outside_range_fails() {
        for n in [0, 10_001] {
            let params: Params = IntegersRequest::new(n, 0, 10).into();
            assert_argument_error(
                validate(WireMethod::GenerateIntegers, Some(&params)),
                "parameter 'n' must be in the [1, 10000] range.",
            );
        }
    }

    #[test]
    fn valid_integers_pass() {
        let params: Params = IntegersRequest::new(10_000, -1_000_000_000, 1_000_000_000)
            .replacement(false)
            .into();
        assert!(validate(WireMethod::GenerateIntegers, Some(&params)).is_ok());
    }

    #[test]
    fn integer_bounds_are_limited() {
        let params: Params = IntegersRequest::new(1, 0, 1_000_000_001).into();
        assert_argument_error(
            validate(WireMethod::GenerateIntegers, Some(&params)),
            "parameter 'max'",
        );
    }

    #[test]
    fn wrong_types_fail() {
        let params = Params::new().with("n", "five").with("min", 0).with("max", 9);
        assert_argument_error(
            validate(WireMethod::GenerateIntegers, Some(&params)),
            "must be an integer",
        );

        let params = Params::new()
            .with("n", 1)
            .with("min", 0)
            .with("max", 9)
            .with("replacement", "yes");
        assert_argument_error(
            validate(WireMethod::GenerateIntegers, Some(&params)),
            "must be a boolean",
        );
    }

    #[test]
    fn only_decimal_base_is_accepted() {
        let params: Params = IntegersRequest::new(1, 0, 9).into();
        let hex_base = params.clone().with("base", 16);
        assert_argument_error(
            validate(WireMethod::GenerateIntegers, Some(&hex_base)),
            "parameter 'base'",
        );
        let decimal = params.with("base", 10);
        assert!(validate(WireMethod::GenerateIntegers, Some(&decimal)).is_ok());
    }

    #[test]
    fn multiform_sequences_check_every_element() {
        let ok: Params = IntegerSequencesRequest::new(2, vec![5, 5], vec![0, 10], vec![10, 20]).into();
        assert!(validate(WireMethod::GenerateIntegerSequences, Some(&ok)).is_ok());

        let bad: Params =
            IntegerSequencesRequest::new(2, 5, vec![0, -1_000_000_001], 10).into();
        assert_argument_error(
            validate(WireMethod::GenerateIntegerSequences, Some(&bad)),
            "min values must be in the [-1000000000, 1000000000] range.",
        );
    }

    #[test]
    fn multiform_elements_must_be_integers() {
        let params = Params::new()
            .with("n", 2)
            .with("length", 3)
            .with("min", json!([0, "zero"]))
            .with("max", 10);
        assert_argument_error(
            validate(WireMethod::GenerateIntegerSequences, Some(&params)),
            "must be an integer",
        );
    }

    #[test]
    fn decimal_places_limited_to_fourteen() {
        let params: Params = DecimalFractionsRequest::new(1, 15).into();
        assert_argument_error(
            validate(WireMethod::GenerateDecimalFractions, Some(&params)),
            "parameter 'decimal_places' must be in the [1, 14] range.",
        );
    }

    #[test]
    fn gaussian_ranges() {
        let ok: Params = GaussiansRequest::new(1, 0.5, 1.0, 2).into();
        assert!(validate(WireMethod::GenerateGaussians, Some(&ok)).is_ok());

        let bad_mean: Params = GaussiansRequest::new(1, 1_000_000.5, 1.0, 2).into();
        assert_argument_error(
            validate(WireMethod::GenerateGaussians, Some(&bad_mean)),
            "parameter 'mean'",
        );

        let bad_digits: Params = GaussiansRequest::new(1, 0.0, 1.0, 1).into();
        assert_argument_error(
            validate(WireMethod::GenerateGaussians, Some(&bad_digits)),
            "parameter 'significant_digits' must be in the [2, 14] range.",
        );
    }

    #[test]
    fn strings_limit_length_and_alphabet() {
        let too_long: Params = StringsRequest::new(1, 33, "abc").into();
        assert_argument_error(
            validate(WireMethod::GenerateStrings, Some(&too_long)),
            "parameter 'length'",
        );

        let alphabet = "a".repeat(129);
        let big_alphabet: Params = StringsRequest::new(1, 8, alphabet).into();
        assert_argument_error(
            validate(WireMethod::GenerateStrings, Some(&big_alphabet)),
            "string is too long (129 > 128)",
        );
    }

    #[test]
    fn uuids_capped_at_one_thousand() {
        let params: Params = UuidsRequest::new(1_001).into();
        assert_argument_error(
            validate(WireMethod::GenerateUuids, Some(&params)),
            "parameter 'n' must be in the [1, 1000] range.",
        );
    }

    #[test]
    fn blob_size_must_be_divisible_by_eight() {
        let params: Params = BlobsRequest::new(1, 7).into();
        assert_argument_error(
            validate(WireMethod::GenerateBlobs, Some(&params)),
            "size parameter is not divisible by 8",
        );
    }

    #[test]
    fn blob_format_is_enumerated() {
        let params = Params::new().with("n", 1).with("size", 8).with("format", "octal");
        assert_argument_error(
            validate(WireMethod::GenerateBlobs, Some(&params)),
            "symbol \"octal\" is not allowed",
        );
    }

    #[test]
    fn usage_needs_nothing() {
        assert!(validate(WireMethod::GetUsage, Some(&Params::new())).is_ok());
    }
}
