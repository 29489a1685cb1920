//! Presentation module
//!
//! Reads engine state and draws it; never writes back. `layout` is plain
//! math and builds everywhere, `canvas` needs a browser.

pub mod layout;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use layout::{DeviceClass, LetterState, Layout, letter_states};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
