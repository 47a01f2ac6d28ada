//! Icon sprites.
//!
//! The device app ships its robot and charger markers as base64 PNG
//! strings; [`Sprite`] decodes one into RGBA pixels ready to blit.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{Rgba, RgbaImage};

use crate::RenderError;

/// A decoded RGBA icon.
#[derive(Debug, Clone)]
pub struct Sprite {
    pixels: RgbaImage,
}

impl Sprite {
    /// Decode a sprite from a base64-encoded PNG.
    pub fn from_png_base64(b64: &str) -> Result<Self, RenderError> {
        let bytes = STANDARD.decode(b64).map_err(RenderError::SpriteBase64)?;
        let image = image::load_from_memory(&bytes).map_err(RenderError::Decode)?;
        Ok(Self {
            pixels: image.to_rgba8(),
        })
    }

    /// Sprite width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Sprite height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Iterate `(x, y, pixel)` over the sprite.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgba<u8>)> + '_ {
        self.pixels.enumerate_pixels().map(|(x, y, p)| (x, y, *p))
    }
}
