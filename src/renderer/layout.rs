//! Size and colour decisions for drawing a frame

use crate::sim::{matched_prefix_len, normalize};

/// Viewport class, by CSS width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_viewport_width(width: f32) -> Self {
        if width <= 480.0 {
            DeviceClass::Mobile
        } else if width <= 1024.0 {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }
}

/// Font and image sizes for a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub device: DeviceClass,
    pub font_size: f32,
    pub image_size: f32,
}

impl Layout {
    /// Scale text and images with the surface area, bounded per device class
    pub fn for_surface(width: f32, height: f32, viewport_width: f32) -> Self {
        let device = DeviceClass::from_viewport_width(viewport_width);
        let side = (width * height).max(0.0).sqrt();
        let (font_size, image_size) = match device {
            DeviceClass::Mobile => ((side / 23.0).clamp(18.0, 26.0), (side / 12.0).clamp(104.0, 208.0)),
            DeviceClass::Tablet => ((side / 28.0).clamp(18.0, 30.0), (side / 14.0).clamp(140.0, 250.0)),
            DeviceClass::Desktop => ((side / 30.0).clamp(22.0, 40.0), (side / 8.0).clamp(200.0, 400.0)),
        };
        Self {
            device,
            font_size,
            image_size,
        }
    }

    /// Side of the grey square drawn while an image is loading or missing
    pub fn placeholder_size(&self) -> f32 {
        self.image_size * 0.8
    }
}

/// How to colour one letter of the falling word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterState {
    /// Typed correctly (green)
    Typed,
    /// The letter where typing went wrong (red)
    Wrong,
    /// Not typed yet (white)
    Pending,
}

impl LetterState {
    pub fn color(self) -> &'static str {
        match self {
            LetterState::Typed => "#00FF00",
            LetterState::Wrong => "#FF4444",
            LetterState::Pending => "#FFFFFF",
        }
    }
}

/// Per-letter feedback for `word` given the typed `input`
pub fn letter_states(input: &str, word: &str) -> Vec<LetterState> {
    let matched = matched_prefix_len(input, word);
    // Compare against the buffer as the matcher sees it
    let typed = normalize(input).chars().count();
    word.chars()
        .enumerate()
        .map(|(i, _)| {
            if i < matched {
                LetterState::Typed
            } else if i == matched && typed > matched {
                LetterState::Wrong
            } else {
                LetterState::Pending
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_class() {
        assert_eq!(DeviceClass::from_viewport_width(375.0), DeviceClass::Mobile);
        assert_eq!(DeviceClass::from_viewport_width(800.0), DeviceClass::Tablet);
        assert_eq!(DeviceClass::from_viewport_width(1920.0), DeviceClass::Desktop);
    }

    #[test]
    fn test_layout_bounds() {
        let small = Layout::for_surface(100.0, 100.0, 1920.0);
        assert_eq!(small.font_size, 22.0);
        assert_eq!(small.image_size, 200.0);

        let huge = Layout::for_surface(4000.0, 4000.0, 1920.0);
        assert_eq!(huge.font_size, 40.0);
        assert_eq!(huge.image_size, 400.0);

        let phone = Layout::for_surface(360.0, 640.0, 360.0);
        assert!(phone.image_size >= 104.0 && phone.image_size <= 208.0);
    }

    #[test]
    fn test_letter_states() {
        use LetterState::*;
        assert_eq!(letter_states("", "ROME"), [Pending, Pending, Pending, Pending]);
        assert_eq!(letter_states("ro", "ROME"), [Typed, Typed, Pending, Pending]);
        assert_eq!(letter_states("RX", "ROME"), [Typed, Wrong, Pending, Pending]);
    }

    #[test]
    fn test_letter_states_collapsed_whitespace() {
        use LetterState::*;
        assert_eq!(
            letter_states("NEW  Y", "NEW YORK"),
            [Typed, Typed, Typed, Typed, Typed, Pending, Pending, Pending]
        );
        assert_eq!(
            letter_states("new  x", "NEW YORK"),
            [Typed, Typed, Typed, Typed, Wrong, Pending, Pending, Pending]
        );
    }
}
