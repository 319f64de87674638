//! Snapshot and tone level types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, Result};

/// Placeholder text a fresh session starts with
pub const DEFAULT_TEXT: &str = "Enter your text here to adjust its tone. This tool will help you transform your writing style from formal to casual or vice versa.";

/// Position of the tone dial, `0` (formal) to `100` (casual)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ToneLevel(u8);

impl ToneLevel {
    /// Lowest tone level
    pub const MIN: ToneLevel = ToneLevel(0);
    /// Highest tone level
    pub const MAX: ToneLevel = ToneLevel(100);

    /// Create a tone level, rejecting anything outside `[0, 100]`
    pub fn new(level: i64) -> Result<Self> {
        if (0..=100).contains(&level) {
            Ok(ToneLevel(level as u8))
        } else {
            Err(HistoryError::ToneOutOfRange(level))
        }
    }

    /// Raw dial value
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for ToneLevel {
    fn default() -> Self {
        ToneLevel(50)
    }
}

impl TryFrom<u8> for ToneLevel {
    type Error = HistoryError;

    fn try_from(level: u8) -> Result<Self> {
        ToneLevel::new(i64::from(level))
    }
}

impl From<ToneLevel> for u8 {
    fn from(level: ToneLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ToneLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One immutable point in the editing history
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    text: String,
    tone_level: ToneLevel,
}

impl Snapshot {
    /// Create a new snapshot
    pub fn new(text: impl Into<String>, tone_level: ToneLevel) -> Self {
        Snapshot {
            text: text.into(),
            tone_level,
        }
    }

    /// The snapshot text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The snapshot tone level
    pub fn tone_level(&self) -> ToneLevel {
        self.tone_level
    }

    /// Copy of this snapshot with different text, same tone
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Snapshot::new(text, self.tone_level)
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Snapshot::new(DEFAULT_TEXT, ToneLevel::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_level_bounds() {
        assert_eq!(ToneLevel::new(0).unwrap(), ToneLevel::MIN);
        assert_eq!(ToneLevel::new(100).unwrap(), ToneLevel::MAX);
        assert!(matches!(
            ToneLevel::new(101),
            Err(HistoryError::ToneOutOfRange(101))
        ));
        assert!(matches!(
            ToneLevel::new(-1),
            Err(HistoryError::ToneOutOfRange(-1))
        ));
    }

    #[test]
    fn test_snapshot_wire_format() {
        let snapshot = Snapshot::new("Hello world", ToneLevel::new(50).unwrap());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "text": "Hello world", "toneLevel": 50 })
        );
    }

    #[test]
    fn test_snapshot_rejects_invalid_tone_on_load() {
        let result: std::result::Result<Snapshot, _> =
            serde_json::from_str(r#"{"text":"hi","toneLevel":140}"#);
        assert!(result.is_err());

        let result: std::result::Result<Snapshot, _> =
            serde_json::from_str(r#"{"text":"hi","toneLevel":12.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_with_text_keeps_tone() {
        let snapshot = Snapshot::new("a", ToneLevel::new(80).unwrap());
        let edited = snapshot.with_text("b");
        assert_eq!(edited.text(), "b");
        assert_eq!(edited.tone_level().value(), 80);
        assert_eq!(snapshot.text(), "a");
    }

    #[test]
    fn test_default_snapshot() {
        let snapshot = Snapshot::default();
        assert_eq!(snapshot.text(), DEFAULT_TEXT);
        assert_eq!(snapshot.tone_level().value(), 50);
    }
}
