#![forbid(unsafe_code)]

//! Incremental map reconstruction for a robotic vacuum.
//!
//! The device reports its floor plan in pieces: compressed 100×100 tiles,
//! robot/charger position fixes, paginated path-trace chunks, and room
//! subset metadata. [`MapEngine`] accumulates them, detects which updates
//! actually changed anything, and composes the current knowledge into a
//! PNG on demand, caching the result until state moves again.
//!
//! Transport, scheduling, and authentication live with the caller: the
//! engine is synchronous, does no I/O, and reports follow-up fetches (the
//! next trace offset) as plain data.
//!
//! ```
//! use vacmap_engine::{MapEngine, PositionKind, PositionUpdate};
//!
//! let mut engine = MapEngine::new();
//! assert!(engine.render().unwrap().is_none()); // nothing reported yet
//!
//! let outcome = engine
//!     .apply_position(PositionKind::Robot, PositionUpdate::new(120, -55))
//!     .unwrap();
//! assert!(outcome.is_changed());
//! let png = engine.render().unwrap().expect("the robot icon is content");
//! assert!(!png.is_empty());
//! ```

mod assets;
mod compose;
mod engine;
mod error;
mod models;
mod position;
mod rooms;
mod tiles;
mod trace;

pub use engine::MapEngine;
pub use error::EngineError;
pub use models::{Coordinate, Outcome, PositionKind, PositionUpdate, Room, RoomUpdate};
pub use position::PositionTracker;
pub use rooms::RoomRegistry;
pub use tiles::{STABLE_PAYLOAD, TileStore};
pub use trace::{TRACE_PAGE_POINTS, TraceAccumulator, TraceProgress};
pub use vacmap_codec::{DecodeError, TracePoint};
pub use vacmap_render::RenderError;
