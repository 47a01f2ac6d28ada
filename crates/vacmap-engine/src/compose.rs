//! Map composition.
//!
//! One render pass walks the full 6400×6400 logical canvas: tiles first
//! (first write wins), then the trace polyline, then the position icons.
//! The result is cropped to its painted bounding box, flipped (device
//! origin is bottom-left, image origin top-left), scaled, and PNG-encoded.

use tracing::debug;
use vacmap_codec::{PixelKind, TILE_COUNT, TILE_SIDE};
use vacmap_render::{Canvas, RenderError, Rgba, Sprite};

use crate::assets::{CHARGER_PNG, ROBOT_PNG};
use crate::models::{Coordinate, PositionKind};
use crate::position::PositionTracker;
use crate::tiles::TileStore;
use crate::trace::TraceAccumulator;

/// Full logical canvas edge: 8 tiles of 100 px per side.
const CANVAS_SIDE: u32 = 6400;
/// Tiles per canvas edge.
const GRID_SIDE: usize = 8;
/// Device units per rendered pixel for position icons.
const POSITION_PIXEL_WIDTH: f64 = 50.0;
/// Render-space offset for position icons.
const POSITION_OFFSET: f64 = 400.0;
/// Crops above this edge length are never upscaled.
const UPSCALE_LIMIT: u32 = 400;
/// Nearest-neighbor factor for small maps.
const UPSCALE_FACTOR: u32 = 3;

const FLOOR_COLOR: Rgba<u8> = Rgba([0xba, 0xda, 0xff, 0xff]);
const WALL_COLOR: Rgba<u8> = Rgba([0x4e, 0x96, 0xe2, 0xff]);
const CARPET_COLOR: Rgba<u8> = Rgba([0x1a, 0x81, 0xed, 0xff]);
const TRACE_COLOR: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Last encoded map plus the width request it answered.
#[derive(Debug, Clone, Default)]
pub(crate) struct RenderCache {
    bytes: Option<Vec<u8>>,
    width: Option<u32>,
    valid: bool,
}

impl RenderCache {
    /// Cached bytes for this width request, if still valid.
    pub(crate) fn lookup(&self, width: Option<u32>) -> Option<&Vec<u8>> {
        if self.valid && self.width == width {
            self.bytes.as_ref()
        } else {
            None
        }
    }

    pub(crate) fn store(&mut self, bytes: Vec<u8>, width: Option<u32>) {
        self.bytes = Some(bytes);
        self.width = width;
        self.valid = true;
    }

    pub(crate) fn invalidate(&mut self) {
        self.valid = false;
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Compose the accumulated state into PNG bytes, or `None` when nothing has
/// painted a single pixel yet.
pub(crate) fn render_map(
    tiles: &TileStore,
    positions: &PositionTracker,
    trace: &TraceAccumulator,
    width: Option<u32>,
) -> Result<Option<Vec<u8>>, RenderError> {
    let mut canvas = Canvas::new(CANVAS_SIDE, CANVAS_SIDE);
    draw_tiles(tiles, &mut canvas);
    draw_trace(trace, &mut canvas);
    draw_positions(positions, &mut canvas)?;

    let Some(bounds) = canvas.content_bounds() else {
        debug!("nothing painted yet, no map to render");
        return Ok(None);
    };
    debug!(
        x = bounds.x,
        y = bounds.y,
        width = bounds.width,
        height = bounds.height,
        "cropping composed canvas"
    );

    let mut cropped = canvas.crop(bounds);
    cropped.flip_vertical();
    let scaled = scale_for_output(cropped, width);
    let bytes = scaled.encode_png()?;
    Ok(Some(bytes))
}

fn draw_tiles(tiles: &TileStore, canvas: &mut Canvas) {
    for index in 0..TILE_COUNT {
        if !tiles.is_in_use(index) {
            continue;
        }
        // Column-major layout: the index walks down a column of 8 tiles
        // before moving one column right.
        let origin_x = (index / GRID_SIDE * TILE_SIDE) as u32;
        let origin_y = (index % GRID_SIDE * TILE_SIDE) as u32;
        for ix in 0..TILE_SIDE {
            for iy in 0..TILE_SIDE {
                let color = match PixelKind::from_code(tiles.code_at(index, ix, iy)) {
                    PixelKind::Floor => FLOOR_COLOR,
                    PixelKind::Wall => WALL_COLOR,
                    PixelKind::Carpet => CARPET_COLOR,
                    PixelKind::Unknown => continue,
                };
                canvas.paint_if_empty(origin_x + ix as u32, origin_y + iy as u32, color);
            }
        }
    }
}

fn draw_trace(trace: &TraceAccumulator, canvas: &mut Canvas) {
    if trace.is_empty() {
        return;
    }
    let points: Vec<(i32, i32)> = trace.points().iter().map(|p| (p.x, p.y)).collect();
    canvas.draw_polyline(&points, TRACE_COLOR);
}

fn draw_positions(positions: &PositionTracker, canvas: &mut Canvas) -> Result<(), RenderError> {
    if let Some(robot) = positions.get(PositionKind::Robot) {
        let sprite = Sprite::from_png_base64(ROBOT_PNG)?;
        let (x, y) = position_pixel(robot);
        canvas.draw_sprite(&sprite, x, y);
    }
    if let Some(charger) = positions.get(PositionKind::Charger) {
        let sprite = Sprite::from_png_base64(CHARGER_PNG)?;
        let (x, y) = position_pixel(charger);
        canvas.draw_sprite(&sprite, x, y);
    }
    Ok(())
}

/// Device coordinate → icon pixel, truncating like the vendor app's integer
/// conversion.
fn position_pixel(coordinate: Coordinate) -> (i32, i32) {
    let x = (coordinate.x as f64 / POSITION_PIXEL_WIDTH + POSITION_OFFSET) as i32;
    let y = (coordinate.y as f64 / POSITION_PIXEL_WIDTH + POSITION_OFFSET) as i32;
    (x, y)
}

/// Apply the output scaling rules: an explicit width request wins, large
/// crops pass through, small ones get the legibility upscale.
fn scale_for_output(cropped: Canvas, width: Option<u32>) -> Canvas {
    match width {
        Some(w) if w > 0 => {
            let height =
                ((w as f64 / cropped.width() as f64) * cropped.height() as f64) as u32;
            debug!(width = w, height, "scaling to requested width");
            cropped.scale_nearest(w, height.max(1))
        }
        _ if cropped.width() > UPSCALE_LIMIT || cropped.height() > UPSCALE_LIMIT => cropped,
        _ => cropped.scale_nearest(
            cropped.width() * UPSCALE_FACTOR,
            cropped.height() * UPSCALE_FACTOR,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_pixel_truncates_toward_zero() {
        assert_eq!(position_pixel(Coordinate { x: 0, y: 0 }), (400, 400));
        assert_eq!(position_pixel(Coordinate { x: 100, y: 50 }), (402, 401));
        // -75 / 50 + 400 = 398.5, truncated to 398.
        assert_eq!(position_pixel(Coordinate { x: -75, y: -75 }), (398, 398));
    }

    #[test]
    fn small_crops_get_the_legibility_upscale() {
        let canvas = Canvas::new(10, 20);
        let scaled = scale_for_output(canvas, None);
        assert_eq!((scaled.width(), scaled.height()), (30, 60));
    }

    #[test]
    fn large_crops_pass_through() {
        let canvas = Canvas::new(401, 10);
        let scaled = scale_for_output(canvas, None);
        assert_eq!((scaled.width(), scaled.height()), (401, 10));
    }

    #[test]
    fn threshold_edge_is_still_upscaled() {
        let canvas = Canvas::new(400, 400);
        let scaled = scale_for_output(canvas, None);
        assert_eq!((scaled.width(), scaled.height()), (1200, 1200));
    }

    #[test]
    fn requested_width_overrides_the_threshold() {
        let canvas = Canvas::new(500, 250);
        let scaled = scale_for_output(canvas, Some(100));
        assert_eq!((scaled.width(), scaled.height()), (100, 50));
    }

    #[test]
    fn zero_width_request_falls_back_to_the_threshold_rules() {
        let canvas = Canvas::new(10, 10);
        let scaled = scale_for_output(canvas, Some(0));
        assert_eq!((scaled.width(), scaled.height()), (30, 30));
    }

    #[test]
    fn embedded_sprites_decode() {
        let robot = Sprite::from_png_base64(ROBOT_PNG).expect("robot icon decodes");
        assert_eq!((robot.width(), robot.height()), (6, 6));
        let charger = Sprite::from_png_base64(CHARGER_PNG).expect("charger icon decodes");
        assert_eq!((charger.width(), charger.height()), (10, 14));
    }

    #[test]
    fn cache_lookup_is_keyed_by_width() {
        let mut cache = RenderCache::default();
        assert!(cache.lookup(None).is_none());
        cache.store(vec![1, 2, 3], None);
        assert_eq!(cache.lookup(None), Some(&vec![1, 2, 3]));
        assert!(cache.lookup(Some(100)).is_none());
        cache.invalidate();
        assert!(cache.lookup(None).is_none());
    }
}
