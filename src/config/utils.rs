use std::env;
use std::str::FromStr;

/// Read an env var, treating empty values as unset.
pub(super) fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse an env var into `T`, failing with a message naming the variable.
pub(super) fn env_parse<T>(key: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {key} '{raw}': {e}").into()),
        None => Ok(None),
    }
}

/// Parse a boolean flag; accepts true/false, 1/0, yes/no, on/off.
pub(super) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(super) fn env_bool(key: &str) -> Result<Option<bool>, Box<dyn std::error::Error>> {
    match env_string(key) {
        Some(raw) => parse_bool(&raw)
            .map(Some)
            .ok_or_else(|| format!("Invalid boolean for {key}: '{raw}'").into()),
        None => Ok(None),
    }
}
