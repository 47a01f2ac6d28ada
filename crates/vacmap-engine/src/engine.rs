//! The caller-owned engine facade.

use tracing::debug;
use vacmap_render::RenderError;

use crate::compose::{self, RenderCache};
use crate::error::EngineError;
use crate::models::{Coordinate, Outcome, PositionKind, PositionUpdate, Room, RoomUpdate};
use crate::position::PositionTracker;
use crate::rooms::RoomRegistry;
use crate::tiles::TileStore;
use crate::trace::{TraceAccumulator, TraceProgress};

/// Incremental map reconstruction for one device session.
///
/// The engine is a synchronous state machine: the external dispatcher
/// serializes `apply_*` calls into it and asks for [`MapEngine::render`]
/// when it wants pixels. Any accepted mutation of tiles, positions, or
/// trace invalidates the render cache; rooms are informational and leave it
/// alone. The engine never performs I/O — pagination continuations are
/// returned as data for the caller's fetch loop.
#[derive(Debug, Default)]
pub struct MapEngine {
    tiles: TileStore,
    positions: PositionTracker,
    trace: TraceAccumulator,
    rooms: RoomRegistry,
    cache: RenderCache,
}

impl MapEngine {
    /// An empty engine for a fresh device session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one tile payload. See [`crate::tiles::TileStore::apply`].
    pub fn apply_tile(&mut self, index: usize, payload: &str) -> Result<Outcome, EngineError> {
        let outcome = self.tiles.apply(index, payload)?;
        self.note(outcome);
        Ok(outcome)
    }

    /// Apply one robot or charger position report.
    pub fn apply_position(
        &mut self,
        kind: PositionKind,
        update: PositionUpdate,
    ) -> Result<Outcome, EngineError> {
        let outcome = self.positions.apply(kind, update)?;
        self.note(outcome);
        Ok(outcome)
    }

    /// Apply one paginated trace chunk; the returned progress carries the
    /// next offset to fetch, if any.
    pub fn apply_trace_chunk(
        &mut self,
        total_count: u32,
        chunk_start: u32,
        payload: &str,
    ) -> Result<TraceProgress, EngineError> {
        let progress = self.trace.apply_chunk(total_count, chunk_start, payload)?;
        self.note(progress.outcome);
        Ok(progress)
    }

    /// Announce a new map set expecting `subset_count` rooms.
    pub fn apply_map_set(&mut self, subset_count: usize) -> Outcome {
        self.rooms.apply_map_set(subset_count)
    }

    /// Apply one room subset report.
    pub fn apply_map_subset(&mut self, update: &RoomUpdate) -> Result<Outcome, EngineError> {
        self.rooms.apply_subset(update)
    }

    /// Wipe every component; called when the active map id changes.
    pub fn reset_session(&mut self) {
        debug!("map session reset");
        self.tiles.clear();
        self.positions.clear();
        self.trace.clear();
        self.rooms.clear();
        self.cache.invalidate();
    }

    /// Render the reconstructed map as PNG bytes at its natural size.
    ///
    /// Returns `Ok(None)` while nothing has painted a pixel yet — an
    /// expected steady state before the first cleaning cycle, not an error.
    pub fn render(&mut self) -> Result<Option<Vec<u8>>, RenderError> {
        self.render_scaled(None)
    }

    /// Render like [`MapEngine::render`], scaled to an explicit pixel width
    /// with proportional height. The cache is keyed by the width request.
    pub fn render_scaled(&mut self, width: Option<u32>) -> Result<Option<Vec<u8>>, RenderError> {
        if let Some(bytes) = self.cache.lookup(width) {
            debug!("render cache hit");
            return Ok(Some(bytes.clone()));
        }
        let rendered = compose::render_map(&self.tiles, &self.positions, &self.trace, width)?;
        match &rendered {
            Some(bytes) => self.cache.store(bytes.clone(), width),
            None => self.cache.invalidate(),
        }
        Ok(rendered)
    }

    /// Last-known robot coordinate.
    pub fn robot_position(&self) -> Option<Coordinate> {
        self.positions.get(PositionKind::Robot)
    }

    /// Last-known charger coordinate.
    pub fn charger_position(&self) -> Option<Coordinate> {
        self.positions.get(PositionKind::Charger)
    }

    /// Read access to the tile store.
    pub fn tile_store(&self) -> &TileStore {
        &self.tiles
    }

    /// Accumulated trace points this session.
    pub fn trace_len(&self) -> usize {
        self.trace.len()
    }

    /// Accumulated rooms, ordered by subtype.
    pub fn rooms(&self) -> Vec<Room> {
        self.rooms.rooms().cloned().collect()
    }

    /// Whether every announced room subset has arrived.
    pub fn rooms_complete(&self) -> bool {
        self.rooms.is_complete()
    }

    /// Whether the cached render still reflects the accumulated state.
    pub fn is_render_current(&self) -> bool {
        self.cache.is_valid()
    }

    fn note(&mut self, outcome: Outcome) {
        if outcome.is_changed() {
            self.cache.invalidate();
        }
    }
}
