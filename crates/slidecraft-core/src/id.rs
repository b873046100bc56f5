//! Caller-opaque identifiers for overlays and blocks.

use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

/// Generate a unique id of the form `<prefix>-<millis>-<counter>`.
///
/// The counter keeps ids unique when several are created within the same
/// millisecond (e.g. pasting a slide with many blocks).
pub fn generate_id(prefix: &str) -> String {
    static ID_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{prefix}-{millis}-{counter}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let a = generate_id("ov");
        let b = generate_id("ov");
        assert_ne!(a, b);
        assert!(a.starts_with("ov-"));
        assert_eq!(a.split('-').count(), 3);
    }
}
