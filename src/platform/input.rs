//! Key-name translation
//!
//! Browser `KeyboardEvent.key` values come in as strings: single characters,
//! or names like `"Backspace"` and `"Shift"`.

use crate::sim::{CharacterSet, KeyInput};

/// Key name that empties the input buffer
pub const CLEAR_KEY: &str = "Backspace";

/// Map a host key name to engine input, dropping anything the layout does not allow
pub fn translate_key(key: &str, charset: &dyn CharacterSet) -> Option<KeyInput> {
    if key == CLEAR_KEY {
        return Some(KeyInput::Clear);
    }

    let mut chars = key.chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(ch), None) => ch,
        _ => return None,
    };
    if !charset.is_legal(ch) {
        return None;
    }

    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(KeyInput::Char(u)),
        _ => Some(KeyInput::Char(ch)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::KeyLayout;

    #[test]
    fn test_translate_key() {
        let layout = KeyLayout::latin();
        assert_eq!(translate_key("a", &layout), Some(KeyInput::Char('A')));
        assert_eq!(translate_key("Q", &layout), Some(KeyInput::Char('Q')));
        assert_eq!(translate_key(" ", &layout), Some(KeyInput::Char(' ')));
        assert_eq!(translate_key("-", &layout), Some(KeyInput::Char('-')));
        assert_eq!(translate_key("Backspace", &layout), Some(KeyInput::Clear));
    }

    #[test]
    fn test_translate_key_filters() {
        let layout = KeyLayout::latin();
        assert_eq!(translate_key("Shift", &layout), None);
        assert_eq!(translate_key("Enter", &layout), None);
        assert_eq!(translate_key("7", &layout), None);
        assert_eq!(translate_key("", &layout), None);
        assert_eq!(translate_key("д", &layout), None);
    }
}
