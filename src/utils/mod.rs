//! Request-parsing helpers shared by the modules.

use std::str::FromStr;

use crate::store::StoreError;

/// Parse a path identifier. Anything that is not an unsigned integer names
/// no entry, so it is reported as not found rather than as a parse error.
pub fn parse_id(raw: &str, kind: &'static str) -> Result<u64, StoreError> {
    raw.trim()
        .parse()
        .map_err(|_| StoreError::not_found(kind, raw))
}

/// Parse an optional numeric query value; blank or malformed values are
/// treated as absent.
pub fn parse_number<T: FromStr>(raw: Option<&str>) -> Option<T> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse().ok())
}

/// Drop blank text query values.
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_numeric_id_is_not_found() {
        assert_eq!(parse_id("7", "Book"), Ok(7));
        assert_eq!(
            parse_id("seven", "Book"),
            Err(StoreError::not_found("Book", "seven"))
        );
        assert!(parse_id("-1", "Book").is_err());
    }

    #[test]
    fn malformed_numbers_are_ignored() {
        assert_eq!(parse_number::<i64>(Some(" 2 ")), Some(2));
        assert_eq!(parse_number::<i64>(Some("-4")), Some(-4));
        assert_eq!(parse_number::<i64>(Some("two")), None);
        assert_eq!(parse_number::<i64>(Some("")), None);
        assert_eq!(parse_number::<i64>(None), None);
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some("rust".into())), Some("rust".into()));
    }
}
