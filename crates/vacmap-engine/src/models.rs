//! Telemetry-facing value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Signed device-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

/// Which tracked entity a position report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionKind {
    Robot,
    Charger,
}

impl fmt::Display for PositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Robot => "robot",
            Self::Charger => "charger",
        })
    }
}

/// A raw position report; either field may be absent on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl PositionUpdate {
    /// A fully populated report.
    pub const fn new(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }
}

/// Result of applying one telemetry update to a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State was mutated; any cached render is stale.
    Changed,
    /// The update carried nothing new.
    Unchanged,
}

impl Outcome {
    /// Whether this outcome invalidates downstream caches.
    #[inline]
    pub const fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// One named room subset accumulated from `getMapSubSet` reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Vendor subset id.
    pub id: i32,
    /// Display name resolved from the subtype table.
    pub name: String,
    /// Opaque outline coordinate blob, kept verbatim.
    pub outline: String,
}

/// A raw room subset report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomUpdate {
    /// Subset flavor; only `"ar"` outlines are meaningful here.
    pub subset_type: String,
    /// Room subtype indexing the fixed name table.
    pub subtype: Option<u8>,
    /// Vendor subset id.
    pub id: i32,
    /// Opaque outline coordinate blob.
    pub outline: String,
}
