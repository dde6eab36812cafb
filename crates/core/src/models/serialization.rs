//! Lenient deserializers for backend payloads.
//!
//! The fund backend is not strict about JSON types: scheme codes arrive as
//! numbers or strings, and some numeric columns are serialized as strings
//! (`"12.45"`) or empty strings. These helpers accept all of those shapes.
//!
//! Documents also spell the same field several ways (`_id` next to
//! `fundId`, `name` next to `schemeName`). serde's `alias` rejects a payload
//! carrying two spellings, so those types collapse the spellings onto one
//! key first (see [`normalized_object`] and `aliased_serde!`).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A canonical key and every spelling that maps onto it, highest precedence
/// first. The canonical key itself must appear in the list.
pub type KeyAliases = (&'static str, &'static [&'static str]);

/// Read a JSON value and, when it is an object, replace each alias group
/// with a single canonical key holding the first non-null spelling.
pub fn normalized_object<'de, D>(deserializer: D, groups: &[KeyAliases]) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let mut value = Value::deserialize(deserializer)?;
    if let Value::Object(map) = &mut value {
        for (canonical, spellings) in groups {
            let found: Vec<Value> = spellings.iter().filter_map(|key| map.remove(*key)).collect();
            if let Some(chosen) = found.into_iter().find(|v| !v.is_null()) {
                map.insert((*canonical).to_string(), chosen);
            }
        }
    }
    Ok(value)
}

/// Implement `Serialize`/`Deserialize` for a type derived with
/// `#[serde(remote = "Self")]`, running [`normalized_object`] with the given
/// alias groups before the derived deserializer.
macro_rules! aliased_serde {
    ($ty:ty, $groups:expr) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                <$ty>::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = $crate::models::serialization::normalized_object(deserializer, $groups)?;
                <$ty>::deserialize(value).map_err(<D::Error as serde::de::Error>::custom)
            }
        }
    };
}

pub(crate) use aliased_serde;

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FloatOrString {
    Float(f64),
    Str(String),
}

/// Accept `"123"`, `123` or `123.0` as an identifier string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Str(s) => s,
        StringOrNumber::Int(i) => i.to_string(),
        StringOrNumber::Float(f) => f.to_string(),
    })
}

/// Accept a number, a numeric string, an empty string or `null`.
/// Non-numeric strings and non-finite values become `None`.
pub fn float_or_string_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<FloatOrString>::deserialize(deserializer)?;
    Ok(match value {
        Some(FloatOrString::Float(f)) => Some(f),
        Some(FloatOrString::Str(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        None => None,
    }
    .filter(|f| f.is_finite()))
}

/// Like [`float_or_string_opt`] but missing values become `0.0`.
pub fn float_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(float_or_string_opt(deserializer)?.unwrap_or(0.0))
}

/// Treat `""` the same as a missing string.
pub fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
