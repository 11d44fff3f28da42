//! Query-string helpers shared by list and analytics endpoints.

use serde::{de, Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

/// Deserialize an optional query value, treating a blank value (`?days=`)
/// the same as an absent one. Non-blank values that fail to parse are
/// still errors.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "empty_string_as_none")]
        days: Option<i64>,
    }

    fn parse(query: &str) -> Result<Params, String> {
        let uri: Uri = format!("/items?{}", query).parse().unwrap();
        Query::<Params>::try_from_uri(&uri)
            .map(|Query(params)| params)
            .map_err(|e| e.body_text())
    }

    #[test]
    fn test_blank_and_missing_are_none() {
        assert_eq!(parse("").unwrap().days, None);
        assert_eq!(parse("days=").unwrap().days, None);
        assert_eq!(parse("days=%20").unwrap().days, None);
    }

    #[test]
    fn test_numbers_parse() {
        assert_eq!(parse("days=30").unwrap().days, Some(30));
        assert_eq!(parse("days=-2").unwrap().days, Some(-2));
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(parse("days=soon").is_err());
    }
}
