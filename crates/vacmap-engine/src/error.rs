//! Engine error types.

use thiserror::Error;
use vacmap_codec::DecodeError;

use crate::models::PositionKind;

/// Errors raised while applying telemetry to the engine.
///
/// All of these are recoverable: the offending update is rejected and the
/// accumulated state is left exactly as it was.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Tile index outside the fixed 64-slot grid.
    #[error("tile index {index} outside the 0..=63 slot range")]
    OutOfRange { index: usize },

    /// A position report without both coordinates.
    #[error("position update for {kind} is missing x or y")]
    MissingCoordinate { kind: PositionKind },

    /// A room subset report without a subtype field.
    #[error("room subset {id} is missing its subtype")]
    MissingRoomSubtype { id: i32 },

    /// A room subtype outside the fixed name table.
    #[error("room subtype {subtype} is not in the subtype table")]
    UnknownRoomSubtype { subtype: u8 },

    /// A payload that failed base64 or LZMA decoding.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
