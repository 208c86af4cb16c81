//! Custom serialization and deserialization functions.

use serde::{Serializer, Deserialize, Deserializer};
use serde::de;
use steamid_ng::SteamID;

/// Serializes values as strings and parses them back from strings.
pub mod string {
    use std::fmt::Display;
    use std::str::FromStr;
    use serde::{de, Serializer, Deserialize, Deserializer};
    
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
        where T: Display,
              S: Serializer
    {
        serializer.collect_str(value)
    }
    
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
        where T: FromStr,
              T::Err: Display,
              D: Deserializer<'de>
    {
        String::deserialize(deserializer)?.parse().map_err(de::Error::custom)
    }
}

/// Serializes a [`SteamID`] as its 64-bit form in a string.
pub fn steamid_as_string<S>(steamid: &SteamID, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer
{
    s.serialize_str(&u64::from(*steamid).to_string())
}

/// Deserializes `0`/`1` (or `true`/`false`) into a bool.
pub fn from_int_to_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrBool {
        Int(u8),
        Bool(bool),
    }
    
    match IntOrBool::deserialize(deserializer)? {
        IntOrBool::Int(0) => Ok(false),
        IntOrBool::Int(1) => Ok(true),
        IntOrBool::Int(n) => Err(de::Error::invalid_value(
            de::Unexpected::Unsigned(u64::from(n)),
            &"zero or one",
        )),
        IntOrBool::Bool(value) => Ok(value),
    }
}

/// Deserializes an optional number which may be sent as a string.
pub fn option_str_to_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
        None => Ok(None),
    }
}
