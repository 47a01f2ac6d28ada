//! Property tests for the engine's bookkeeping invariants.

use proptest::prelude::*;
use vacmap_codec::payload::encode_payload;
use vacmap_engine::{MapEngine, Outcome, PositionKind, PositionUpdate, TRACE_PAGE_POINTS};

fn trace_chunk(records: &[(i16, i16)]) -> String {
    let mut bytes = Vec::with_capacity(records.len() * 5);
    for &(x, y) in records {
        bytes.extend_from_slice(&x.to_le_bytes());
        bytes.extend_from_slice(&y.to_le_bytes());
        bytes.push(0);
    }
    encode_payload(&bytes)
}

proptest! {
    /// Position outcomes must mirror a naive last-value model.
    #[test]
    fn proptest_position_outcomes_match_model(
        reports in prop::collection::vec((any::<bool>(), -5000i32..5000, -5000i32..5000), 1..40)
    ) {
        let mut engine = MapEngine::new();
        let mut robot = None;
        let mut charger = None;
        for (is_robot, x, y) in reports {
            let (kind, model) = if is_robot {
                (PositionKind::Robot, &mut robot)
            } else {
                (PositionKind::Charger, &mut charger)
            };
            let outcome = engine.apply_position(kind, PositionUpdate::new(x, y)).unwrap();
            let expected = if *model == Some((x, y)) {
                Outcome::Unchanged
            } else {
                Outcome::Changed
            };
            prop_assert_eq!(outcome, expected);
            *model = Some((x, y));
        }
        prop_assert_eq!(
            engine.robot_position().map(|c| (c.x, c.y)),
            robot
        );
        prop_assert_eq!(
            engine.charger_position().map(|c| (c.x, c.y)),
            charger
        );
    }

    /// Chained trace chunks accumulate exactly their record counts, and the
    /// continuation offset walks in page-size steps.
    #[test]
    fn proptest_trace_accumulation_counts(
        chunks in prop::collection::vec(prop::collection::vec((any::<i16>(), any::<i16>()), 1..64), 1..8)
    ) {
        let mut engine = MapEngine::new();
        let total: u32 = 10_000; // larger than any offset the loop reaches
        let mut expected = 0usize;
        let mut offset = 0u32;
        for records in &chunks {
            let progress = engine
                .apply_trace_chunk(total, offset, &trace_chunk(records))
                .unwrap();
            expected += records.len();
            prop_assert_eq!(progress.outcome, Outcome::Changed);
            prop_assert_eq!(progress.next_start, Some(offset + TRACE_PAGE_POINTS));
            offset += TRACE_PAGE_POINTS;
            prop_assert_eq!(engine.trace_len(), expected);
        }
    }
}
