//! Canvas 2D renderer
//!
//! Draws a frame from a read-only view of the game state: black background,
//! each word's image with its letters coloured by typing progress, particles
//! fading out, and the input line.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::layout::{Layout, letter_states};
use crate::sim::{FallingWord, GameState, Particle, is_partial_match};

/// Letter spacing relative to the width of an `M`
const LETTER_SPACING: f64 = 1.1;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    layout: Layout,
    /// Image elements by path; loading happens in the browser, off the tick
    images: HashMap<String, HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, viewport_width: f32) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into()?;
        let layout = Layout::for_surface(
            canvas.width() as f32,
            canvas.height() as f32,
            viewport_width,
        );
        Ok(Self {
            canvas,
            ctx,
            layout,
            images: HashMap::new(),
        })
    }

    pub fn size(&self) -> (f32, f32) {
        (self.canvas.width() as f32, self.canvas.height() as f32)
    }

    /// Resize the backing store and recompute text/image sizes
    pub fn resize(&mut self, width: u32, height: u32, viewport_width: f32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.layout = Layout::for_surface(width as f32, height as f32, viewport_width);
        log::info!(
            "Renderer resized to {}x{} ({:?}, font {:.0}, image {:.0})",
            width,
            height,
            self.layout.device,
            self.layout.font_size,
            self.layout.image_size
        );
    }

    /// Fill the surface with the background colour
    pub fn clear(&self) {
        self.ctx.set_fill_style_str("black");
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    /// Draw one frame
    pub fn render(&mut self, state: &GameState) {
        self.clear();
        for word in &state.words {
            self.draw_word(word, &state.input);
        }
        for particle in &state.particles {
            self.draw_particle(particle);
        }
        self.draw_input(state);
    }

    fn image(&mut self, path: &str) -> Option<HtmlImageElement> {
        if path.is_empty() {
            return None;
        }
        if let Some(img) = self.images.get(path) {
            return Some(img.clone());
        }
        let img = HtmlImageElement::new().ok()?;
        img.set_src(path);
        log::debug!("Loading image {}", path);
        self.images.insert(path.to_string(), img.clone());
        Some(img)
    }

    fn draw_word(&mut self, word: &FallingWord, input: &str) {
        if word.exploding {
            for particle in &word.particles {
                self.draw_particle(particle);
            }
            return;
        }

        let x = word.pos.x as f64;
        let y = word.pos.y as f64;
        let max_size = self.layout.image_size as f64;

        let image_height = match self.image(word.image.as_str()) {
            Some(img) if img.complete() && img.natural_width() > 0 => {
                let w = img.natural_width() as f64;
                let h = img.natural_height().max(1) as f64;
                let scale = (max_size / w).min(max_size / h);
                let (sw, sh) = (w * scale, h * scale);
                let _ = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        &img,
                        x - sw / 2.0,
                        y - sh / 2.0,
                        sw,
                        sh,
                    );
                sh
            }
            _ => {
                // Placeholder while the image loads (or if it failed)
                let size = self.layout.placeholder_size() as f64;
                self.ctx.set_fill_style_str("lightgray");
                self.ctx.fill_rect(x - size / 2.0, y - size / 2.0, size, size);
                let font = (size / 3.0).max(20.0);
                self.ctx.set_fill_style_str("black");
                self.ctx.set_font(&format!("{font}px Arial"));
                self.ctx.set_text_align("center");
                let _ = self.ctx.fill_text("?", x, y + font / 3.0);
                size
            }
        };

        self.draw_letters(word, input, image_height);
    }

    fn draw_letters(&self, word: &FallingWord, input: &str, image_height: f64) {
        let font_size = self.layout.font_size as f64;
        self.ctx.set_font(&format!("{font_size}px Arial"));
        self.ctx.set_text_align("center");
        self.ctx.set_stroke_style_str("black");
        self.ctx.set_line_width(4.0);

        let char_width = self
            .ctx
            .measure_text("M")
            .map(|m| m.width())
            .unwrap_or(font_size);
        let count = word.text.chars().count() as f64;
        let start_x = word.pos.x as f64 - count * char_width * LETTER_SPACING / 2.0;
        let text_y = word.pos.y as f64 + image_height / 2.0 + font_size * 1.5;

        let states = letter_states(input, &word.text);
        let mut buf = [0u8; 4];
        for (i, (ch, state)) in word.text.chars().zip(states).enumerate() {
            let letter = ch.encode_utf8(&mut buf);
            let cx = start_x + (i as f64 + 0.5) * char_width * LETTER_SPACING;
            self.ctx.set_fill_style_str(state.color());
            let _ = self.ctx.stroke_text(letter, cx, text_y);
            let _ = self.ctx.fill_text(letter, cx, text_y);
        }
        self.ctx.set_text_align("start");
    }

    fn draw_particle(&self, particle: &Particle) {
        let alpha = particle.life_fraction();
        self.ctx
            .set_fill_style_str(&format!("rgba(255, 165, 0, {alpha})"));
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            particle.pos.x as f64,
            particle.pos.y as f64,
            particle.radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn draw_input(&self, state: &GameState) {
        let bottom = self.canvas.height() as f64 - 20.0;
        self.ctx.set_font("24px Arial");
        self.ctx.set_fill_style_str("white");
        let _ = self.ctx.fill_text(&format!("> {}", state.input), 10.0, bottom);

        if let Some(word) = state.active_word() {
            let ok = is_partial_match(&state.input, &word.text);
            let (text, color) = if ok { ("✓", "lime") } else { ("✗", "red") };
            self.ctx.set_fill_style_str(color);
            let _ = self.ctx.fill_text(text, 200.0, bottom);
        }
    }
}
