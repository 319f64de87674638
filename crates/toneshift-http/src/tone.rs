//! Tone level to writing style mapping

use std::fmt;

use toneshift_history::ToneLevel;

/// Writing style a tone level maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneStyle {
    /// `[0, 25)`
    Formal,
    /// `[25, 50)`
    Professional,
    /// `[50, 75)`
    Conversational,
    /// `[75, 100]`
    Casual,
}

impl ToneStyle {
    /// Style for a tone level
    pub fn from_level(level: ToneLevel) -> Self {
        match level.value() {
            0..=24 => ToneStyle::Formal,
            25..=49 => ToneStyle::Professional,
            50..=74 => ToneStyle::Conversational,
            _ => ToneStyle::Casual,
        }
    }

    /// Style descriptor sent to the model
    pub fn descriptor(self) -> &'static str {
        match self {
            ToneStyle::Formal => {
                "formal, professional, academic style with complex vocabulary and sentence structures"
            }
            ToneStyle::Professional => {
                "professional but approachable style with standard business vocabulary"
            }
            ToneStyle::Conversational => "conversational, friendly style with everyday vocabulary",
            ToneStyle::Casual => {
                "casual, relaxed style with simple sentences and colloquial expressions"
            }
        }
    }

    /// Short label for display
    pub fn label(self) -> &'static str {
        match self {
            ToneStyle::Formal => "Formal",
            ToneStyle::Professional => "Professional",
            ToneStyle::Conversational => "Conversational",
            ToneStyle::Casual => "Casual",
        }
    }
}

impl fmt::Display for ToneStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Instruction asking the model to rewrite `text` in the style of `level`
pub fn build_prompt(text: &str, level: ToneLevel) -> String {
    let descriptor = ToneStyle::from_level(level).descriptor();
    format!(
        "Please rewrite the following text to adjust its tone to be {descriptor}. \n\
         Maintain the original meaning and information, but change the style, word choice, and sentence structure to match the requested tone.\n\
         Keep the length similar to the original text.\n\
         \n\
         Original text:\n\
         {text}\n\
         \n\
         Rewritten text with adjusted tone:"
    )
}
