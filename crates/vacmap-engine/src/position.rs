//! Robot and charger position tracking.

use tracing::{debug, warn};

use crate::error::EngineError;
use crate::models::{Coordinate, Outcome, PositionKind, PositionUpdate};

/// Last-known robot and charger coordinates.
///
/// A kind that has never reported stays `None`; the compositor uses that to
/// decide whether to draw the icon at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionTracker {
    robot: Option<Coordinate>,
    charger: Option<Coordinate>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one position report.
    ///
    /// The first coordinate for a kind and any coordinate that differs from
    /// the stored one are `Changed`; an exact repeat is `Unchanged`. A
    /// report missing either axis is rejected without mutation.
    pub fn apply(
        &mut self,
        kind: PositionKind,
        update: PositionUpdate,
    ) -> Result<Outcome, EngineError> {
        let (Some(x), Some(y)) = (update.x, update.y) else {
            warn!(%kind, "position update missing x or y");
            return Err(EngineError::MissingCoordinate { kind });
        };
        let next = Coordinate { x, y };
        let slot = match kind {
            PositionKind::Robot => &mut self.robot,
            PositionKind::Charger => &mut self.charger,
        };
        if *slot == Some(next) {
            return Ok(Outcome::Unchanged);
        }
        debug!(%kind, x, y, "position updated");
        *slot = Some(next);
        Ok(Outcome::Changed)
    }

    /// Last-known coordinate for a kind, if it has ever reported.
    #[inline]
    pub fn get(&self, kind: PositionKind) -> Option<Coordinate> {
        match kind {
            PositionKind::Robot => self.robot,
            PositionKind::Charger => self.charger,
        }
    }

    /// Forget both positions.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
