//! Content fingerprints for duplicate suppression.

use hrm_core::hashing::sha256_hex;
use hrm_core::types::DbId;

/// Number of message characters that participate in the fingerprint.
pub const PREVIEW_CHARS: usize = 120;

/// Fingerprint of (sender, receiver, category, message preview).
///
/// Two dispatch requests with the same fingerprint inside the dedup
/// window are treated as a repeat of one event, not two events.
pub fn content_fingerprint(
    sender: Option<DbId>,
    receiver: DbId,
    category: &str,
    message: &str,
) -> String {
    let preview: String = message.chars().take(PREVIEW_CHARS).collect();
    let sender = sender.map(|id| id.to_string()).unwrap_or_default();
    sha256_hex(format!("{sender}|{receiver}|{category}|{preview}").as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_match() {
        let a = content_fingerprint(Some(1), 2, "chat", "Hello!");
        let b = content_fingerprint(Some(1), 2, "chat", "Hello!");
        assert_eq!(a, b);
    }

    #[test]
    fn every_field_participates() {
        let base = content_fingerprint(Some(1), 2, "chat", "Hello!");
        assert_ne!(base, content_fingerprint(Some(9), 2, "chat", "Hello!"));
        assert_ne!(base, content_fingerprint(Some(1), 9, "chat", "Hello!"));
        assert_ne!(base, content_fingerprint(Some(1), 2, "task", "Hello!"));
        assert_ne!(base, content_fingerprint(Some(1), 2, "chat", "Goodbye!"));
        assert_ne!(base, content_fingerprint(None, 2, "chat", "Hello!"));
    }

    #[test]
    fn long_messages_compare_by_preview_only() {
        let head = "x".repeat(PREVIEW_CHARS);
        let a = content_fingerprint(Some(1), 2, "chat", &format!("{head}tail one"));
        let b = content_fingerprint(Some(1), 2, "chat", &format!("{head}tail two"));
        assert_eq!(a, b);
    }

    #[test]
    fn truncation_is_char_safe() {
        // Multi-byte chars near the cut must not panic.
        let msg = "é".repeat(PREVIEW_CHARS + 10);
        let _ = content_fingerprint(Some(1), 2, "chat", &msg);
    }
}
