use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::store::{FieldValue, Record};

/// Genre applied when a new book does not name one.
pub const DEFAULT_GENRE: &str = "General";

/// A book in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned identifier; never changes after creation
    pub id: u64,
    pub title: String,
    pub author: String,
    /// Publication year
    pub year: i32,
    pub genre: String,
}

impl Record for Book {
    const KIND: &'static str = "Book";
    const FIELDS: &'static [&'static str] = &["id", "title", "author", "year", "genre"];

    fn id(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Number(self.id as i64)),
            "title" => Some(FieldValue::Text(&self.title)),
            "author" => Some(FieldValue::Text(&self.author)),
            "year" => Some(FieldValue::Number(i64::from(self.year))),
            "genre" => Some(FieldValue::Text(&self.genre)),
            _ => None,
        }
    }
}

/// Book fields as sent by a client.
///
/// Shared by create, full replace and partial update; each operation decides
/// which fields are required. An `id` in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: Option<String>,
    pub author: Option<String>,
    /// Accepts a whole number or a numeric string such as `"1999"`
    #[serde(default, deserialize_with = "lenient_year")]
    pub year: Option<i32>,
    pub genre: Option<String>,
}

impl BookFields {
    /// Names of the fields present in the payload, in declaration order.
    pub fn supplied(&self) -> Vec<&'static str> {
        [
            ("title", self.title.is_some()),
            ("author", self.author.is_some()),
            ("year", self.year.is_some()),
            ("genre", self.genre.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }

    /// Required fields that are absent or empty. A full replace also requires
    /// `year` and `genre`.
    pub(crate) fn missing_required(&self, full_replace: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.title) {
            missing.push("title");
        }
        if is_blank(&self.author) {
            missing.push("author");
        }
        if full_replace && self.year.is_none() {
            missing.push("year");
        }
        if full_replace && is_blank(&self.genre) {
            missing.push("genre");
        }
        missing
    }
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let year = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(number)) => number.as_i64().and_then(|year| i32::try_from(year).ok()),
        Some(Value::String(text)) => text.trim().parse::<i32>().ok(),
        Some(_) => None,
    };
    year.map(Some)
        .ok_or_else(|| de::Error::custom("year must be a whole number, e.g. 1999"))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplied_lists_present_fields_only() {
        let fields: BookFields = serde_json::from_str(r#"{"year": 2030, "id": 99}"#).unwrap();
        assert_eq!(fields.supplied(), vec!["year"]);
    }

    #[test]
    fn year_accepts_numbers_and_numeric_strings() {
        let fields: BookFields = serde_json::from_str(r#"{"year": "1999"}"#).unwrap();
        assert_eq!(fields.year, Some(1999));

        let fields: BookFields = serde_json::from_str(r#"{"year": 2030, "title": "x"}"#).unwrap();
        assert_eq!(fields.year, Some(2030));

        let fields: BookFields = serde_json::from_str(r#"{"year": null}"#).unwrap();
        assert_eq!(fields.supplied(), Vec::<&str>::new());
    }

    #[test]
    fn non_numeric_year_names_the_field() {
        let error = serde_json::from_str::<BookFields>(r#"{"year": "soon"}"#).unwrap_err();
        assert!(error.to_string().contains("year must be a whole number"));

        assert!(serde_json::from_str::<BookFields>(r#"{"year": 19.5}"#).is_err());
    }

    #[test]
    fn empty_strings_count_as_missing() {
        let fields = BookFields {
            title: Some(String::new()),
            author: Some("Ursula K. Le Guin".into()),
            ..BookFields::default()
        };
        assert_eq!(fields.missing_required(false), vec!["title"]);
        assert_eq!(fields.missing_required(true), vec!["title", "year", "genre"]);
    }
}
