//! Legal character sets
//!
//! A layout is just the set of keys the current language may type. Rendering
//! an on-screen keyboard from it is the host's business.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::sim::CharacterSet;

/// Characters accepted in every language
pub const ALWAYS_LEGAL: [char; 2] = [' ', '-'];

/// Legal keys for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyLayout {
    /// Language code, e.g. `"en"`
    pub code: String,
    /// Every letter of the layout, in display order
    pub keys: String,
    #[serde(skip)]
    folded: BTreeSet<char>,
}

impl KeyLayout {
    pub fn new(code: &str, keys: &str) -> Self {
        let mut layout = Self {
            code: code.to_string(),
            keys: keys.to_string(),
            folded: BTreeSet::new(),
        };
        layout.rebuild();
        layout
    }

    /// A–Z
    pub fn latin() -> Self {
        Self::new("en", "QWERTYUIOPASDFGHJKLZXCVBNM")
    }

    /// Parse a `{ "code": ..., "keys": ... }` layout
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let mut layout: KeyLayout = serde_json::from_str(json)?;
        layout.rebuild();
        Ok(layout)
    }

    fn rebuild(&mut self) {
        self.folded = self
            .keys
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .collect();
    }
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::latin()
    }
}

impl CharacterSet for KeyLayout {
    /// Case-insensitive membership; space and hyphen are always legal
    fn is_legal(&self, ch: char) -> bool {
        if ALWAYS_LEGAL.contains(&ch) {
            return true;
        }
        let mut upper = ch.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) => self.folded.contains(&u),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_is_case_insensitive() {
        let layout = KeyLayout::latin();
        assert!(layout.is_legal('a'));
        assert!(layout.is_legal('Z'));
        assert!(layout.is_legal(' '));
        assert!(layout.is_legal('-'));
        assert!(!layout.is_legal('1'));
        assert!(!layout.is_legal('ж'));
    }

    #[test]
    fn test_from_json() {
        let layout = KeyLayout::from_json(r#"{ "code": "ru", "keys": "ЙЦУКЕН ЁЖ" }"#).unwrap();
        assert_eq!(layout.code, "ru");
        assert!(layout.is_legal('ж'));
        assert!(layout.is_legal('ё'));
        assert!(!layout.is_legal('q'));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            KeyLayout::from_json("[1, 2]"),
            Err(LoadError::Json(_))
        ));
    }
}
