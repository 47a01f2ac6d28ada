//! The 64-slot tile store.
//!
//! Cells live in one flat arena indexed by `(slot, ix, iy)` arithmetic
//! rather than nested buffers; slot bookkeeping rides alongside. An
//! incoming payload is fingerprinted before it is decoded so a repeat of
//! the last payload for a slot costs a hash, not an LZMA pass.

use std::hash::{Hash, Hasher};

use ahash::AHasher;
use tracing::debug;
use vacmap_codec::{TILE_CELLS, TILE_COUNT, TILE_SIDE, TileGrid};

use crate::error::EngineError;
use crate::models::Outcome;

/// Payload value the vendor emits for a piece whose content is a known
/// stable no-op. Always treated as "no change" and never decoded, whatever
/// the slot's previous sentinel was.
pub const STABLE_PAYLOAD: &str = "1295764014";

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    in_use: bool,
    sentinel: Option<u64>,
}

/// Fixed 8×8 grid of decoded tiles over one flat cell arena.
#[derive(Debug, Clone)]
pub struct TileStore {
    cells: Box<[u8]>,
    slots: [Slot; TILE_COUNT],
}

impl TileStore {
    /// An empty store: every slot unused, every cell unknown.
    pub fn new() -> Self {
        Self {
            cells: vec![0u8; TILE_COUNT * TILE_CELLS].into_boxed_slice(),
            slots: [Slot::default(); TILE_COUNT],
        }
    }

    /// Apply one tile payload to its slot.
    ///
    /// Decoding is skipped when the payload fingerprint matches the slot's
    /// sentinel or when the payload is [`STABLE_PAYLOAD`]. A decode failure
    /// leaves the slot byte-for-byte intact.
    pub fn apply(&mut self, index: usize, payload: &str) -> Result<Outcome, EngineError> {
        if index >= TILE_COUNT {
            return Err(EngineError::OutOfRange { index });
        }
        if payload == STABLE_PAYLOAD {
            debug!(index, "stable tile payload, skipping decode");
            return Ok(Outcome::Unchanged);
        }
        let sentinel = fingerprint(payload);
        if self.slots[index].sentinel == Some(sentinel) {
            debug!(index, "tile payload unchanged");
            return Ok(Outcome::Unchanged);
        }

        // Decode into scratch first so a corrupt payload cannot leave a
        // partial tile behind.
        let grid = TileGrid::decode(payload)?;
        let base = index * TILE_CELLS;
        self.cells[base..base + TILE_CELLS].copy_from_slice(grid.as_bytes());
        self.slots[index] = Slot {
            in_use: true,
            sentinel: Some(sentinel),
        };
        debug!(index, "tile slot updated");
        Ok(Outcome::Changed)
    }

    /// Whether the slot has ever accepted a tile this session.
    #[inline]
    pub fn is_in_use(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(|slot| slot.in_use)
    }

    /// Raw cell code at `(index, ix, iy)`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= TILE_COUNT` or either cell index is
    /// `>= TILE_SIDE`.
    #[inline]
    pub fn code_at(&self, index: usize, ix: usize, iy: usize) -> u8 {
        assert!(index < TILE_COUNT && ix < TILE_SIDE && iy < TILE_SIDE);
        self.cells[index * TILE_CELLS + ix * TILE_SIDE + iy]
    }

    /// Drop every tile and sentinel.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.slots = [Slot::default(); TILE_COUNT];
    }
}

impl Default for TileStore {
    fn default() -> Self {
        Self::new()
    }
}

fn fingerprint(payload: &str) -> u64 {
    let mut hasher = AHasher::default();
    payload.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vacmap_codec::payload::encode_payload;

    fn tile_payload_with(cells: &[(usize, usize, u8)]) -> String {
        let mut raw = vec![0u8; TILE_CELLS];
        for &(ix, iy, code) in cells {
            raw[ix * TILE_SIDE + iy] = code;
        }
        encode_payload(&raw)
    }

    #[test]
    fn out_of_range_index_is_rejected_without_mutation() {
        let mut store = TileStore::new();
        let err = store.apply(64, &tile_payload_with(&[])).unwrap_err();
        assert!(matches!(err, EngineError::OutOfRange { index: 64 }));
        assert!((0..TILE_COUNT).all(|i| !store.is_in_use(i)));
    }

    #[test]
    fn first_payload_changes_then_repeat_is_unchanged() {
        let mut store = TileStore::new();
        let payload = tile_payload_with(&[(10, 20, 0x01)]);
        assert_eq!(store.apply(5, &payload).unwrap(), Outcome::Changed);
        assert_eq!(store.apply(5, &payload).unwrap(), Outcome::Unchanged);
        assert_eq!(store.code_at(5, 10, 20), 0x01);
    }

    #[test]
    fn new_payload_for_same_slot_changes_again() {
        let mut store = TileStore::new();
        let first = tile_payload_with(&[(0, 0, 0x01)]);
        let second = tile_payload_with(&[(0, 0, 0x02)]);
        assert_eq!(store.apply(0, &first).unwrap(), Outcome::Changed);
        assert_eq!(store.apply(0, &second).unwrap(), Outcome::Changed);
        assert_eq!(store.code_at(0, 0, 0), 0x02);
    }

    #[test]
    fn stable_payload_is_always_unchanged_and_never_decoded() {
        let mut store = TileStore::new();
        // First sight, no prior sentinel.
        assert_eq!(store.apply(3, STABLE_PAYLOAD).unwrap(), Outcome::Unchanged);
        assert!(!store.is_in_use(3));
        // After real content it still reports unchanged and leaves the
        // tile alone.
        let payload = tile_payload_with(&[(1, 1, 0x03)]);
        assert_eq!(store.apply(3, &payload).unwrap(), Outcome::Changed);
        assert_eq!(store.apply(3, STABLE_PAYLOAD).unwrap(), Outcome::Unchanged);
        assert_eq!(store.code_at(3, 1, 1), 0x03);
    }

    #[test]
    fn apply_only_touches_the_target_slot() {
        let mut store = TileStore::new();
        let payload = tile_payload_with(&[(0, 0, 0x01)]);
        store.apply(7, &payload).unwrap();
        for index in (0..TILE_COUNT).filter(|&i| i != 7) {
            assert!(!store.is_in_use(index));
            assert_eq!(store.code_at(index, 0, 0), 0);
        }
    }

    #[test]
    fn corrupt_payload_retains_previous_tile() {
        let mut store = TileStore::new();
        let payload = tile_payload_with(&[(2, 2, 0x02)]);
        store.apply(1, &payload).unwrap();
        assert!(store.apply(1, "@@not-a-payload@@").is_err());
        assert!(store.is_in_use(1));
        assert_eq!(store.code_at(1, 2, 2), 0x02);
        // The good payload is still known, so replaying it is a no-op.
        assert_eq!(store.apply(1, &payload).unwrap(), Outcome::Unchanged);
    }

    #[test]
    fn clear_resets_slots_and_cells() {
        let mut store = TileStore::new();
        let payload = tile_payload_with(&[(9, 9, 0x01)]);
        store.apply(2, &payload).unwrap();
        store.clear();
        assert!(!store.is_in_use(2));
        assert_eq!(store.code_at(2, 9, 9), 0);
        // A cleared store accepts the same payload as new content.
        assert_eq!(store.apply(2, &payload).unwrap(), Outcome::Changed);
    }
}
