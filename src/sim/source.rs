//! Contracts with the host: where words come from and which keys count

use serde::{Deserialize, Serialize};

/// Opaque handle to a word's illustration (a URL or asset path)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A word handed to the engine for spawning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub text: String,
    pub image: ImageRef,
}

impl WordEntry {
    pub fn new(text: impl Into<String>, image: impl Into<ImageRef>) -> Self {
        Self {
            text: text.into(),
            image: image.into(),
        }
    }
}

/// Supplies the next word to drop.
///
/// Called at most once per tick, only while no word is falling. Must answer
/// synchronously; any loading happens elsewhere.
pub trait WordSource {
    /// Next word, or `None` if nothing is ready (the engine retries next tick)
    fn next_word(&mut self) -> Option<WordEntry>;

    /// Identifier of the active word category. A change clears the board.
    fn category(&self) -> Option<&str> {
        None
    }
}

impl<S: WordSource + ?Sized> WordSource for Box<S> {
    fn next_word(&mut self) -> Option<WordEntry> {
        (**self).next_word()
    }

    fn category(&self) -> Option<&str> {
        (**self).category()
    }
}

/// Keys the player may type for the current language
pub trait CharacterSet {
    fn is_legal(&self, ch: char) -> bool;
}

/// An already-filtered keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    /// Empty the input buffer
    Clear,
}
