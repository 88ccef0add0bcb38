//! Serde helpers for CloudMailin wire quirks.

use serde::{Deserialize, Deserializer};

/// Decodes `null` as the field type's default value.
///
/// Use with `#[serde(deserialize_with = "null_default")]` on fields that the
/// API may send as `null` instead of omitting them.
pub fn null_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Numbers transmitted as quoted numerals (`"37135"`).
///
/// Decoding requires a JSON string holding an unsigned integer; encoding writes
/// the number back as a string so payloads round-trip unchanged.
pub mod string_number {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::fmt::Display;
    use std::str::FromStr;

    /// Serializes the number as a quoted numeral.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    /// Deserializes a quoted numeral into a number.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<T>()
            .map_err(|e| de::Error::custom(format!("invalid numeric string {:?}: {}", raw, e)))
    }
}
