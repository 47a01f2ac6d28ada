#![forbid(unsafe_code)]

//! Pixel kernel for the vacmap engine.
//!
//! A thin capability layer over the `image` crate: [`Canvas`] is an RGBA
//! surface with exactly the operations the map compositor needs — pixel
//! writes (including first-write-wins painting), polylines, sprite blits,
//! content bounds, crop, vertical flip, nearest-neighbor scaling, and PNG
//! encoding. [`Sprite`] loads the base64 PNG icons the device ships.
//!
//! Nothing in this crate knows about tiles, traces, or telemetry; the
//! compositor in `vacmap-engine` drives it.

pub mod canvas;
pub mod sprite;

pub use canvas::{Bounds, Canvas};
pub use image::Rgba;
pub use sprite::Sprite;

/// Errors raised by the pixel kernel.
#[derive(Debug)]
pub enum RenderError {
    /// A sprite asset is not valid base64.
    SpriteBase64(base64::DecodeError),
    /// A sprite asset failed to decode as an image.
    Decode(image::ImageError),
    /// The composed canvas failed to encode.
    Encode(image::ImageError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpriteBase64(err) => write!(f, "sprite base64 decode failed: {err}"),
            Self::Decode(err) => write!(f, "sprite image decode failed: {err}"),
            Self::Encode(err) => write!(f, "canvas encode failed: {err}"),
        }
    }
}

impl std::error::Error for RenderError {}
