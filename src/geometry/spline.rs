use super::types::PathCommand;

// ── Tangent handle scaling ──────────────────────────────────────────
/// Fraction of the neighbour-to-neighbour vector used for the cubic
/// handles at an interior joint.
const JOINT_TANGENT_SCALE: f32 = 0.3;
/// Fraction of the one-sided difference used for the handle at either
/// curve end, where only one neighbour exists.
const ENDPOINT_TANGENT_SCALE: f32 = 0.5;

/// Cubic segments of an interpolating spline through `points`.
///
/// Handles are Catmull-Rom style: at an interior joint both the
/// incoming and the outgoing handle are the same scaled vector between
/// the joint's two neighbours, so the path is tangent-continuous there
/// and passes exactly through every input point. The caller emits the
/// `MoveTo` for `points[0]`.
pub(super) fn interpolating_spline(points: &[(f32, f32)]) -> Vec<PathCommand> {
    if points.len() < 3 {
        return Vec::new();
    }
    let last = points.len() - 1;
    let mut commands = Vec::with_capacity(last);
    for i in 0..last {
        let from = points[i];
        let to = points[i + 1];
        let outgoing = if i == 0 {
            scaled(diff(points[1], points[0]), ENDPOINT_TANGENT_SCALE)
        } else {
            scaled(diff(points[i + 1], points[i - 1]), JOINT_TANGENT_SCALE)
        };
        let incoming = if i + 1 == last {
            scaled(diff(points[last], points[last - 1]), ENDPOINT_TANGENT_SCALE)
        } else {
            scaled(diff(points[i + 2], points[i]), JOINT_TANGENT_SCALE)
        };
        commands.push(PathCommand::CubicTo {
            ctrl1: (from.0 + outgoing.0, from.1 + outgoing.1),
            ctrl2: (to.0 - incoming.0, to.1 - incoming.1),
            to,
        });
    }
    commands
}

fn diff(a: (f32, f32), b: (f32, f32)) -> (f32, f32) {
    (a.0 - b.0, a.1 - b.1)
}

fn scaled(v: (f32, f32), factor: f32) -> (f32, f32) {
    (v.0 * factor, v.1 * factor)
}
