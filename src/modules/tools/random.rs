//! Random sample data for `GET /api/random`.

use axum::Json;
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

const QUOTES: &[&str] = &[
    "Talk is cheap. Show me the code.",
    "Programs must be written for people to read, and only incidentally for machines to execute.",
    "Simplicity is prerequisite for reliability.",
    "Make it work, make it right, make it fast.",
    "The best error message is the one that never shows up.",
];

/// Random values drawn from the bytes of a fresh v4 UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub number: u32,
    pub quote: &'static str,
    pub color: String,
}

impl Sample {
    pub fn draw() -> Self {
        Self::from_bytes(*Uuid::new_v4().as_bytes())
    }

    /// Bytes 6 and 8 carry the UUID version and variant, so they are skipped.
    fn from_bytes(bytes: [u8; 16]) -> Self {
        let number = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) % 101;
        let quote = QUOTES[usize::from(bytes[4]) % QUOTES.len()];
        let color = format!("#{:02x}{:02x}{:02x}", bytes[9], bytes[10], bytes[11]);
        Self {
            number,
            quote,
            color,
        }
    }
}

pub async fn random_data() -> Json<Value> {
    let sample = Sample::draw();
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(json!({
        "success": true,
        "data": {
            "number": sample.number,
            "quote": sample.quote,
            "color": sample.color,
            "uuid": Uuid::new_v4().to_string(),
            "timestamp": timestamp,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_values_stay_in_range() {
        for _ in 0..50 {
            let sample = Sample::draw();
            assert!(sample.number <= 100);
            assert!(QUOTES.contains(&sample.quote));
            assert_eq!(sample.color.len(), 7);
            assert!(sample.color.starts_with('#'));
        }
    }

    #[test]
    fn sample_is_derived_from_bytes() {
        let mut bytes = [0u8; 16];
        bytes[0] = 105;
        bytes[4] = 6;
        bytes[9..12].copy_from_slice(&[0xab, 0x01, 0xff]);

        let sample = Sample::from_bytes(bytes);
        assert_eq!(sample.number, 4);
        assert_eq!(sample.quote, QUOTES[1]);
        assert_eq!(sample.color, "#ab01ff");
    }
}
