//! Paginated path-history accumulation.
//!
//! The device serves its trace in pages of 200 points. The accumulator
//! appends each decoded chunk and hands back the offset of the next page —
//! advisory data for the caller's fetch loop; the engine never fetches
//! anything itself.

use tracing::debug;

use crate::error::EngineError;
use crate::models::Outcome;
use vacmap_codec::TracePoint;

/// Device points per trace fetch.
pub const TRACE_PAGE_POINTS: u32 = 200;

/// What applying one trace chunk did, plus where pagination stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceProgress {
    pub outcome: Outcome,
    /// Offset the caller should fetch next, or `None` when the trace is
    /// complete (or the chunk was empty).
    pub next_start: Option<u32>,
}

/// Ordered render-space path history for one trace session.
#[derive(Debug, Clone, Default)]
pub struct TraceAccumulator {
    points: Vec<TracePoint>,
}

impl TraceAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one trace chunk.
    ///
    /// The payload is decoded before anything is mutated, so a corrupt
    /// chunk retains the previous points. A chunk at offset 0 starts a new
    /// session and discards what came before — that discard alone counts as
    /// a change. Zero decoded records are valid and never advance the
    /// offset.
    pub fn apply_chunk(
        &mut self,
        total_count: u32,
        chunk_start: u32,
        payload: &str,
    ) -> Result<TraceProgress, EngineError> {
        let raw = vacmap_codec::decode_payload(payload)?;
        let new_points = vacmap_codec::parse_trace_points(&raw);

        let cleared = chunk_start == 0 && !self.points.is_empty();
        if cleared {
            self.points.clear();
        }

        if new_points.is_empty() {
            let outcome = if cleared {
                Outcome::Changed
            } else {
                Outcome::Unchanged
            };
            return Ok(TraceProgress {
                outcome,
                next_start: None,
            });
        }

        self.points.extend_from_slice(&new_points);
        let next = chunk_start + TRACE_PAGE_POINTS;
        let next_start = (next < total_count).then_some(next);
        debug!(
            appended = new_points.len(),
            total = self.points.len(),
            ?next_start,
            "trace chunk applied"
        );
        Ok(TraceProgress {
            outcome: Outcome::Changed,
            next_start,
        })
    }

    /// Accumulated points, in arrival order.
    #[inline]
    pub fn points(&self) -> &[TracePoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop the accumulated session.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}
