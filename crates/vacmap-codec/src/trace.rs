//! Path-history records.
//!
//! A trace chunk decompresses to a run of fixed 5-byte records: a signed
//! little-endian x, a signed little-endian y, and one reserved byte. Device
//! units are five times finer than render units and offset so the map
//! center lands at (400, 400).

/// Bytes per trace record on the wire.
pub const TRACE_RECORD_LEN: usize = 5;

/// Device units per render unit along each axis.
const TRACE_SCALE: i32 = 5;
/// Render-space offset applied after scaling.
const TRACE_OFFSET: i32 = 400;

/// One path point in render-space units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TracePoint {
    pub x: i32,
    pub y: i32,
}

/// Parse a decompressed trace chunk into render-space points, in record
/// order.
///
/// The transform is `floor(raw / 5) + 400` per axis. A trailing partial
/// record is dropped; an empty chunk parses to an empty list.
pub fn parse_trace_points(bytes: &[u8]) -> Vec<TracePoint> {
    let mut points = Vec::with_capacity(bytes.len() / TRACE_RECORD_LEN);
    for record in bytes.chunks_exact(TRACE_RECORD_LEN) {
        let raw_x = i16::from_le_bytes([record[0], record[1]]) as i32;
        let raw_y = i16::from_le_bytes([record[2], record[3]]) as i32;
        // record[4] is reserved by the vendor.
        points.push(TracePoint {
            x: raw_x.div_euclid(TRACE_SCALE) + TRACE_OFFSET,
            y: raw_y.div_euclid(TRACE_SCALE) + TRACE_OFFSET,
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(x: i16, y: i16) -> [u8; 5] {
        let [x0, x1] = x.to_le_bytes();
        let [y0, y1] = y.to_le_bytes();
        [x0, x1, y0, y1, 0]
    }

    #[test]
    fn parses_records_in_order() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&record(1000, -1000));
        bytes.extend_from_slice(&record(0, 5));
        let points = parse_trace_points(&bytes);
        assert_eq!(
            points,
            vec![
                TracePoint { x: 600, y: 200 },
                TracePoint { x: 400, y: 401 },
            ]
        );
    }

    #[test]
    fn negative_raws_floor_toward_negative_infinity() {
        let points = parse_trace_points(&record(-7, -1));
        assert_eq!(points, vec![TracePoint { x: 398, y: 399 }]);
    }

    #[test]
    fn trailing_partial_record_is_dropped() {
        let mut bytes = record(50, 50).to_vec();
        bytes.extend_from_slice(&[1, 2, 3]);
        assert_eq!(parse_trace_points(&bytes).len(), 1);
    }

    #[test]
    fn empty_chunk_parses_empty() {
        assert!(parse_trace_points(&[]).is_empty());
    }

    #[test]
    fn reserved_byte_is_ignored() {
        let mut bytes = record(100, 100);
        bytes[4] = 0xff;
        assert_eq!(parse_trace_points(&bytes), vec![TracePoint { x: 420, y: 420 }]);
    }

    proptest! {
        #[test]
        fn proptest_transform_and_count(pairs in prop::collection::vec((any::<i16>(), any::<i16>()), 0..256)) {
            let mut bytes = Vec::new();
            for &(x, y) in &pairs {
                bytes.extend_from_slice(&record(x, y));
            }
            let points = parse_trace_points(&bytes);
            prop_assert_eq!(points.len(), pairs.len());
            for (point, &(x, y)) in points.iter().zip(&pairs) {
                prop_assert_eq!(point.x, (x as i32).div_euclid(5) + 400);
                prop_assert_eq!(point.y, (y as i32).div_euclid(5) + 400);
            }
        }
    }
}
