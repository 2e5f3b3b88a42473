//! Lenient field deserializers for JSON produced by loosely-typed backends.
//!
//! Upstream payloads send `null` where a field is absent and floats where a
//! count or a second value is expected. `#[serde(default)]` alone only covers
//! missing keys, so fields that must survive both use `deserialize_with`.

use serde::{Deserialize, Deserializer};

/// `null` becomes `T::default()`. Pair with `#[serde(default)]` so a missing
/// key behaves the same way.
///
/// # Errors
///
/// Fails when the value is present but not a `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON number as whole seconds, rounded and clamped to `u32`. `null` is
/// zero.
///
/// # Errors
///
/// Fails when the value is present but not a number.
pub fn seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_seconds(deserializer)?.unwrap_or_default())
}

/// Any JSON number as whole seconds, rounded. `null` stays `None`.
///
/// # Errors
///
/// Fails when the value is present but not a number.
pub fn optional_seconds<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(whole_seconds))
}

/// Any JSON number as a non-negative count, rounded. `null` stays `None`.
///
/// # Errors
///
/// Fails when the value is present but not a number.
pub fn optional_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(whole_count))
}

// `as` saturates float-to-int casts, so only rounding and NaN need handling.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_seconds(v: f64) -> u32 {
    if v.is_nan() {
        0
    } else {
        v.round() as u32
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_count(v: f64) -> u64 {
    if v.is_nan() {
        0
    } else {
        v.round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        label: String,
        #[serde(default, deserialize_with = "seconds")]
        duration: u32,
        #[serde(default, deserialize_with = "optional_count")]
        reach: Option<u64>,
    }

    fn parse(json: &str) -> Sample {
        serde_json::from_str(json).expect("sample should parse")
    }

    #[test]
    fn null_and_missing_fields_take_defaults() {
        let nulls = parse(r#"{"label":null,"duration":null,"reach":null}"#);
        assert_eq!(nulls.label, "");
        assert_eq!(nulls.duration, 0);
        assert_eq!(nulls.reach, None);

        let empty = parse("{}");
        assert_eq!(empty.label, "");
        assert_eq!(empty.duration, 0);
        assert_eq!(empty.reach, None);
    }

    #[test]
    fn fractional_numbers_are_rounded() {
        let sample = parse(r#"{"duration":4.5,"reach":135.0}"#);
        assert_eq!(sample.duration, 5);
        assert_eq!(sample.reach, Some(135));
    }

    #[test]
    fn negative_numbers_clamp_to_zero() {
        let sample = parse(r#"{"duration":-3,"reach":-10.4}"#);
        assert_eq!(sample.duration, 0);
        assert_eq!(sample.reach, Some(0));
    }

    #[test]
    fn wrong_type_is_still_an_error() {
        assert!(serde_json::from_str::<Sample>(r#"{"duration":"five"}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"label":7}"#).is_err());
    }
}
