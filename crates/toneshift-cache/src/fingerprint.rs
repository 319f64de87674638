//! Cache key derivation

use toneshift_history::ToneLevel;

/// Deterministic cache key for a `(text, tone level)` request
///
/// The whole text is hashed, so texts sharing a long prefix still get
/// distinct keys, and the key length is fixed regardless of text size.
pub fn fingerprint(text: &str, tone_level: ToneLevel) -> String {
    format!("{:016x}:{}", fxhash::hash64(text), tone_level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(level: i64) -> ToneLevel {
        ToneLevel::new(level).unwrap()
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        assert_eq!(
            fingerprint("Hello world", tone(10)),
            fingerprint("Hello world", tone(10))
        );
    }

    #[test]
    fn test_fingerprint_depends_on_tone() {
        assert_ne!(
            fingerprint("Hello world", tone(10)),
            fingerprint("Hello world", tone(90))
        );
        assert!(fingerprint("Hello world", tone(90)).ends_with(":90"));
    }

    #[test]
    fn test_fingerprint_uses_whole_text() {
        let prefix = "x".repeat(500);
        let a = format!("{prefix} ending one");
        let b = format!("{prefix} ending two");
        assert_ne!(fingerprint(&a, tone(50)), fingerprint(&b, tone(50)));
    }

    #[test]
    fn test_fingerprint_length_is_bounded() {
        let long = "word ".repeat(10_000);
        assert_eq!(fingerprint(&long, tone(100)).len(), 16 + 1 + 3);
    }
}
