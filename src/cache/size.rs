//! Size Estimation Module
//!
//! Approximate, capped byte estimates for memoized values. These feed the
//! memory budget only; they are a guard against unbounded growth, not an
//! exact accounting.

use crate::cache::CachedValue;

// == Estimation Constants ==
/// Cap on the estimate for a text value
pub const TEXT_ESTIMATE_CAP: usize = 1024 * 1024; // 1 MiB

/// Cap on the estimate for a structured value
pub const DOC_ESTIMATE_CAP: usize = 2 * 1024 * 1024; // 2 MiB

/// Crude stand-in when a structured value cannot be measured
pub const FALLBACK_ESTIMATE: usize = 1024;

/// Flat charge per entry for map and queue bookkeeping
pub const ENTRY_OVERHEAD: usize = 64;

// == Estimate Size ==
/// Returns the byte footprint charged against the memory budget.
///
/// Text values are measured by UTF-8 length. Structured values are measured
/// by serialized length; if serialization fails the value is charged the
/// fallback estimate instead of surfacing an error. Both measurements are
/// capped, so a pathological value can never claim more than its cap plus
/// the flat overhead.
pub fn estimate_size(value: &CachedValue) -> usize {
    let payload = match value {
        CachedValue::Text(s) => s.len().min(TEXT_ESTIMATE_CAP),
        CachedValue::Doc(doc) => match serde_json::to_string(doc) {
            Ok(json) => json.len().min(DOC_ESTIMATE_CAP),
            Err(_) => FALLBACK_ESTIMATE,
        },
    };
    payload + ENTRY_OVERHEAD
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_estimate_is_byte_length_plus_overhead() {
        let value = CachedValue::Text("https://cdn.example.com/a.webp".to_string());
        assert_eq!(estimate_size(&value), 30 + ENTRY_OVERHEAD);
    }

    #[test]
    fn test_text_estimate_counts_bytes_not_chars() {
        // Multibyte characters are charged at their encoded length
        let value = CachedValue::Text("é".to_string());
        assert_eq!(estimate_size(&value), 2 + ENTRY_OVERHEAD);
    }

    #[test]
    fn test_text_estimate_is_capped() {
        let value = CachedValue::Text("x".repeat(TEXT_ESTIMATE_CAP + 5000));
        assert_eq!(estimate_size(&value), TEXT_ESTIMATE_CAP + ENTRY_OVERHEAD);
    }

    #[test]
    fn test_doc_estimate_tracks_serialized_length() {
        let value = CachedValue::Doc(json!({"srcset": "a 320w, b 640w"}));
        let json_len = serde_json::to_string(&json!({"srcset": "a 320w, b 640w"}))
            .unwrap()
            .len();
        assert_eq!(estimate_size(&value), json_len + ENTRY_OVERHEAD);
    }

    #[test]
    fn test_doc_estimate_is_capped() {
        let huge = json!({ "blob": "y".repeat(DOC_ESTIMATE_CAP + 5000) });
        let value = CachedValue::Doc(huge);
        assert_eq!(estimate_size(&value), DOC_ESTIMATE_CAP + ENTRY_OVERHEAD);
    }

    #[test]
    fn test_empty_values_still_cost_overhead() {
        let value = CachedValue::Text(String::new());
        assert_eq!(estimate_size(&value), ENTRY_OVERHEAD);
    }
}
