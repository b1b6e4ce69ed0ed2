//! Numeric conversion helpers centralizing lenient amount parsing and safe casts.

use num_traits::cast::cast;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Round a f64 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert a usize count to f64.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// First numeric run in a price string, thousands separators allowed.
static AMOUNT_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"-?\d+(?:,\d{3})*(?:\.\d+)?").ok());

/// Parse an amount from free text such as `"199"`, `" 49.0 "`, `"₹299"` or
/// `"Rs. 199"`.
///
/// Returns `None` when no number can be extracted.
#[must_use]
pub fn parse_amount(text: &str) -> Option<i64> {
    let found = AMOUNT_RE.as_ref()?.find(text)?;
    let cleaned = found.as_str().replace(',', "");
    cleaned
        .parse::<i64>()
        .ok()
        .or_else(|| cleaned.parse::<f64>().ok().map(round_f64_to_i64))
}

/// Serde helper accepting a number, a numeric string, or null for an amount.
///
/// Anything unparseable deserializes to 0 so a single odd record never
/// poisons a whole list.
///
/// # Errors
///
/// Only fails when the underlying deserializer itself fails.
pub fn de_lenient_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or numeric string")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            Ok(round_f64_to_i64(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
            Ok(parse_amount(v).unwrap_or(0))
        }

        fn visit_bool<E: de::Error>(self, _v: bool) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_none<E: de::Error>(self) -> Result<i64, E> {
            Ok(0)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<i64, D2::Error> {
            d.deserialize_any(AmountVisitor)
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

/// Serde helper for an amount that may be absent: `null` or a missing field is
/// `None`, anything present but unparseable is `Some(0)`.
///
/// # Errors
///
/// Only fails when the underlying deserializer itself fails.
pub fn de_lenient_opt_amount<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|v| amount_from_value(&v)))
}

fn amount_from_value(value: &serde_json::Value) -> i64 {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(round_f64_to_i64))
            .unwrap_or(0),
        serde_json::Value::String(s) => parse_amount(s).unwrap_or(0),
        _ => 0,
    }
}

/// Serde helper accepting a string, a number, or null for free-text fields.
///
/// # Errors
///
/// Only fails when the underlying deserializer itself fails.
pub fn de_lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<String, D2::Error> {
            d.deserialize_any(TextVisitor)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
