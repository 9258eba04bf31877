use crate::model::{PositionResolver, Route};

/// The chain segment closest to a queried point.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentHit {
    /// Index of the segment in chain order (segment `i` joins chain
    /// waypoints `i` and `i + 1`).
    pub segment_index: usize,
    pub from_id: String,
    pub to_id: String,
    pub distance: f32,
}

/// Euclidean distance from `point` to the segment `a`-`b` (not the
/// infinite line): the projection parameter is clamped to the segment.
/// A zero-length segment measures the distance to its single point.
pub fn point_segment_distance(point: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let seg = (b.0 - a.0, b.1 - a.1);
    let len_sq = seg.0 * seg.0 + seg.1 * seg.1;
    let t = if len_sq <= f32::EPSILON {
        0.0
    } else {
        (((point.0 - a.0) * seg.0 + (point.1 - a.1) * seg.1) / len_sq).clamp(0.0, 1.0)
    };
    let closest = (a.0 + seg.0 * t, a.1 + seg.1 * t);
    let dx = point.0 - closest.0;
    let dy = point.1 - closest.1;
    (dx * dx + dy * dy).sqrt()
}

/// Find the chain segment nearest to `point`, if it lies within
/// `threshold`.
///
/// Fails closed: returns `None` when any waypoint of the chain cannot
/// be resolved. Ties resolve to the lowest segment index because the
/// scan keeps the first strict minimum.
pub fn nearest_segment(
    route: &Route,
    point: (f32, f32),
    resolver: &dyn PositionResolver,
    threshold: f32,
) -> Option<SegmentHit> {
    let chain = route.chain();
    let mut positions = Vec::with_capacity(chain.len());
    for id in &chain {
        positions.push(resolver.resolve(id)?);
    }

    let mut best: Option<SegmentHit> = None;
    for (index, pair) in positions.windows(2).enumerate() {
        let distance = point_segment_distance(point, pair[0], pair[1]);
        if best.as_ref().is_none_or(|hit| distance < hit.distance) {
            best = Some(SegmentHit {
                segment_index: index,
                from_id: chain[index].to_string(),
                to_id: chain[index + 1].to_string(),
                distance,
            });
        }
    }

    best.filter(|hit| hit.distance <= threshold)
}
