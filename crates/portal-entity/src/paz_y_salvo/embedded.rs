//! JSON encode/decode for the embedded clearance collections.
//!
//! Decoding never fails: absent, empty and malformed text all read as an
//! empty list. Malformed text is logged so it can be told apart from a
//! collection that was never written.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use portal_core::AppResult;

/// Decode an embedded list. Returns an empty list on any failure.
pub fn decode_list<T: DeserializeOwned>(raw: Option<&str>, field: &'static str) -> Vec<T> {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<T>>(text) {
        Ok(items) => items,
        Err(e) => {
            warn!(field, error = %e, "Discarding malformed embedded collection");
            Vec::new()
        }
    }
}

/// Encode a full list, replacing whatever was stored.
pub fn encode_list<T: Serialize>(items: &[T]) -> AppResult<String> {
    Ok(serde_json::to_string(items)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_soft_failures() {
        let none: Vec<u32> = decode_list(None, "test");
        let empty: Vec<u32> = decode_list(Some(""), "test");
        let blank: Vec<u32> = decode_list(Some("   "), "test");
        let broken: Vec<u32> = decode_list(Some("[1, 2,"), "test");
        let wrong_shape: Vec<u32> = decode_list(Some("{\"a\": 1}"), "test");

        assert!(none.is_empty());
        assert!(empty.is_empty());
        assert!(blank.is_empty());
        assert!(broken.is_empty());
        assert!(wrong_shape.is_empty());
    }

    #[test]
    fn test_encode_then_decode() {
        let text = encode_list(&[3u32, 1, 2]).unwrap();
        assert_eq!(text, "[3,1,2]");
        let back: Vec<u32> = decode_list(Some(&text), "test");
        assert_eq!(back, vec![3, 1, 2]);
    }
}
