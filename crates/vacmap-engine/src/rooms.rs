//! Room subset accumulation.
//!
//! A map set announces how many room subsets exist; the subsets then
//! trickle in one report at a time. Rooms are informational only — nothing
//! here touches the render path.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::EngineError;
use crate::models::{Outcome, Room, RoomUpdate};

/// Subset outline flavor this engine understands.
const OUTLINE_TYPE: &str = "ar";

/// Vendor subtype → display name.
const ROOM_NAMES: [&str; 15] = [
    "Default",
    "Living Room",
    "Dining Room",
    "Bedroom",
    "Study",
    "Kitchen",
    "Bathroom",
    "Laundry",
    "Lounge",
    "Storeroom",
    "Kids room",
    "Sunroom",
    "Corridor",
    "Balcony",
    "Gym",
];

/// Accumulated room subsets for the active map set, keyed by subtype.
#[derive(Debug, Clone, Default)]
pub struct RoomRegistry {
    rooms: BTreeMap<u8, Room>,
    expected: usize,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new map set expecting `subset_count` rooms, discarding any
    /// accumulated ones.
    pub fn apply_map_set(&mut self, subset_count: usize) -> Outcome {
        let changed = !self.rooms.is_empty() || self.expected != subset_count;
        self.rooms.clear();
        self.expected = subset_count;
        if changed {
            debug!(subset_count, "map set replaced");
            Outcome::Changed
        } else {
            Outcome::Unchanged
        }
    }

    /// Apply one room subset report.
    ///
    /// Subsets that are not `"ar"` outlines are ignored; a report without a
    /// subtype, or with one outside the name table, is rejected without
    /// mutation.
    pub fn apply_subset(&mut self, update: &RoomUpdate) -> Result<Outcome, EngineError> {
        if update.subset_type != OUTLINE_TYPE {
            debug!(subset_type = %update.subset_type, "ignoring non-outline subset");
            return Ok(Outcome::Unchanged);
        }
        let Some(subtype) = update.subtype else {
            return Err(EngineError::MissingRoomSubtype { id: update.id });
        };
        let name = ROOM_NAMES
            .get(subtype as usize)
            .ok_or(EngineError::UnknownRoomSubtype { subtype })?;
        let room = Room {
            id: update.id,
            name: (*name).to_string(),
            outline: update.outline.clone(),
        };
        if self.rooms.get(&subtype) == Some(&room) {
            return Ok(Outcome::Unchanged);
        }
        debug!(subtype, id = room.id, "room subset stored");
        self.rooms.insert(subtype, room);
        Ok(Outcome::Changed)
    }

    /// Accumulated rooms, ordered by subtype.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> + '_ {
        self.rooms.values()
    }

    /// Number of rooms accumulated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Whether every announced subset has arrived.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.expected > 0 && self.rooms.len() == self.expected
    }

    /// Forget the map set and its rooms.
    pub fn clear(&mut self) {
        self.rooms.clear();
        self.expected = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline_update(subtype: u8, id: i32) -> RoomUpdate {
        RoomUpdate {
            subset_type: OUTLINE_TYPE.to_string(),
            subtype: Some(subtype),
            id,
            outline: format!("-1400,-2600;{id}"),
        }
    }

    #[test]
    fn subsets_accumulate_until_complete() {
        let mut registry = RoomRegistry::new();
        assert_eq!(registry.apply_map_set(2), Outcome::Changed);
        assert!(!registry.is_complete());
        registry.apply_subset(&outline_update(5, 10)).unwrap();
        registry.apply_subset(&outline_update(3, 11)).unwrap();
        assert!(registry.is_complete());
        let names: Vec<_> = registry.rooms().map(|room| room.name.as_str()).collect();
        assert_eq!(names, vec!["Bedroom", "Kitchen"]);
    }

    #[test]
    fn duplicate_subset_is_unchanged() {
        let mut registry = RoomRegistry::new();
        registry.apply_map_set(1);
        let update = outline_update(1, 7);
        assert_eq!(registry.apply_subset(&update).unwrap(), Outcome::Changed);
        assert_eq!(registry.apply_subset(&update).unwrap(), Outcome::Unchanged);
    }

    #[test]
    fn non_outline_subsets_are_ignored() {
        let mut registry = RoomRegistry::new();
        registry.apply_map_set(1);
        let update = RoomUpdate {
            subset_type: "vw".to_string(),
            subtype: Some(1),
            id: 9,
            outline: String::new(),
        };
        assert_eq!(registry.apply_subset(&update).unwrap(), Outcome::Unchanged);
        assert!(registry.is_empty());
    }

    #[test]
    fn missing_subtype_is_rejected() {
        let mut registry = RoomRegistry::new();
        let update = RoomUpdate {
            subset_type: OUTLINE_TYPE.to_string(),
            subtype: None,
            id: 4,
            outline: String::new(),
        };
        assert!(matches!(
            registry.apply_subset(&update).unwrap_err(),
            EngineError::MissingRoomSubtype { id: 4 }
        ));
    }

    #[test]
    fn unknown_subtype_is_rejected() {
        let mut registry = RoomRegistry::new();
        let err = registry.apply_subset(&outline_update(15, 1)).unwrap_err();
        assert!(matches!(err, EngineError::UnknownRoomSubtype { subtype: 15 }));
        assert!(registry.is_empty());
    }

    #[test]
    fn new_map_set_discards_rooms() {
        let mut registry = RoomRegistry::new();
        registry.apply_map_set(1);
        registry.apply_subset(&outline_update(0, 1)).unwrap();
        assert_eq!(registry.apply_map_set(1), Outcome::Changed);
        assert!(registry.is_empty());
        // Same count, nothing accumulated: a repeat announcement is a no-op.
        assert_eq!(registry.apply_map_set(1), Outcome::Unchanged);
    }
}
