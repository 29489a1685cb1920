//! Platform abstraction layer
//!
//! Turns raw host key names into the engine's [`KeyInput`](crate::sim::KeyInput):
//! - `keyboard`: legal character sets for a language
//! - `input`: key-name translation and filtering

pub mod input;
pub mod keyboard;

pub use input::translate_key;
pub use keyboard::KeyLayout;
