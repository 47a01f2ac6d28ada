//! RGBA drawing surface.
//!
//! [`Canvas`] wraps an [`image::RgbaImage`] with the small capability
//! surface the map compositor composes through. The backing starts fully
//! transparent; a pixel counts as painted once its alpha is non-zero, which
//! is what [`Canvas::paint_if_empty`] and [`Canvas::content_bounds`] key on.

use std::io::Cursor;

use image::{ImageFormat, Pixel, Rgba, RgbaImage, imageops};

use crate::{RenderError, Sprite};

/// A rectangle of painted content, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Left edge (inclusive).
    pub x: u32,
    /// Top edge (inclusive).
    pub y: u32,
    /// Width in pixels, at least 1.
    pub width: u32,
    /// Height in pixels, at least 1.
    pub height: u32,
}

/// An RGBA surface with a transparent background.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Create a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Canvas width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Canvas height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The pixel at `(x, y)`, or `None` outside the canvas.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.width() && y < self.height() {
            Some(*self.pixels.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Whether the pixel at `(x, y)` has been painted (non-zero alpha).
    #[inline]
    pub fn is_painted(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).is_some_and(|p| p.0[3] != 0)
    }

    /// Write a pixel, overwriting whatever is there. Out-of-bounds writes
    /// are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x < self.width() && y < self.height() {
            self.pixels.put_pixel(x, y, color);
        }
    }

    /// Write a pixel only if nothing has painted it yet.
    ///
    /// Returns `true` if the pixel was written.
    #[inline]
    pub fn paint_if_empty(&mut self, x: u32, y: u32, color: Rgba<u8>) -> bool {
        if x < self.width() && y < self.height() && !self.is_painted(x, y) {
            self.pixels.put_pixel(x, y, color);
            true
        } else {
            false
        }
    }

    /// Draw a connected 1-px polyline through `points`, overwriting painted
    /// pixels. Segments are clipped to the canvas; a single point draws one
    /// pixel.
    pub fn draw_polyline(&mut self, points: &[(i32, i32)], color: Rgba<u8>) {
        match points {
            [] => {}
            [point] => self.set_pixel_signed(point.0, point.1, color),
            _ => {
                for pair in points.windows(2) {
                    self.draw_segment(pair[0], pair[1], color);
                }
            }
        }
    }

    /// Bresenham segment between two points.
    fn draw_segment(&mut self, from: (i32, i32), to: (i32, i32), color: Rgba<u8>) {
        let (mut x, mut y) = from;
        let (x1, y1) = to;
        let dx = (x1 - x).abs();
        let dy = (y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.set_pixel_signed(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    #[inline]
    fn set_pixel_signed(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as u32, y as u32, color);
        }
    }

    /// Alpha-blend a sprite centered on `(center_x, center_y)`. Pixels
    /// falling outside the canvas are clipped.
    pub fn draw_sprite(&mut self, sprite: &Sprite, center_x: i32, center_y: i32) {
        let left = center_x - (sprite.width() as i32) / 2;
        let top = center_y - (sprite.height() as i32) / 2;
        for (sx, sy, src) in sprite.pixels() {
            if src.0[3] == 0 {
                continue;
            }
            let dx = left + sx as i32;
            let dy = top + sy as i32;
            if dx < 0 || dy < 0 || dx as u32 >= self.width() || dy as u32 >= self.height() {
                continue;
            }
            let dst = self.pixels.get_pixel_mut(dx as u32, dy as u32);
            dst.blend(&src);
        }
    }

    /// Bounding box of all painted pixels, or `None` for an untouched
    /// canvas.
    pub fn content_bounds(&self) -> Option<Bounds> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut any = false;

        for (x, y, pixel) in self.pixels.enumerate_pixels() {
            if pixel.0[3] == 0 {
                continue;
            }
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        any.then(|| Bounds {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Copy out the given region as a new canvas.
    pub fn crop(&self, bounds: Bounds) -> Canvas {
        Canvas {
            pixels: imageops::crop_imm(&self.pixels, bounds.x, bounds.y, bounds.width, bounds.height)
                .to_image(),
        }
    }

    /// Mirror the canvas top-to-bottom in place.
    pub fn flip_vertical(&mut self) {
        imageops::flip_vertical_in_place(&mut self.pixels);
    }

    /// Resample to `(new_width, new_height)` with nearest-neighbor
    /// sampling.
    pub fn scale_nearest(&self, new_width: u32, new_height: u32) -> Canvas {
        Canvas {
            pixels: imageops::resize(&self.pixels, new_width, new_height, imageops::FilterType::Nearest),
        }
    }

    /// Encode the canvas as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut out = Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut out, ImageFormat::Png)
            .map_err(RenderError::Encode)?;
        Ok(out.into_inner())
    }
}
