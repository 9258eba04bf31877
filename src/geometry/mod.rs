mod spatial;
mod spline;
mod types;

pub use spatial::{SegmentHit, nearest_segment, point_segment_distance};
pub use types::{PathCommand, RoutePath};

use crate::model::{PositionResolver, Route, RouteShape};
use spline::interpolating_spline;

/// Rebuild the renderable path for a route from scratch.
///
/// Paths are cheap, so there is no caching and no partial recompute:
/// the editor calls this after every chain mutation and after any
/// waypoint moves. If any waypoint of the chain cannot be resolved the
/// result is the empty path - the route may reference a system that was
/// deleted and not cleaned up yet.
pub fn build_path(route: &Route, resolver: &dyn PositionResolver) -> RoutePath {
    match route.shape() {
        RouteShape::Chain { waypoints } => {
            let mut positions = Vec::with_capacity(waypoints.len());
            for id in waypoints {
                match resolver.resolve(id) {
                    Some(position) => positions.push(position),
                    None => return RoutePath::empty(),
                }
            }
            let mut commands = Vec::with_capacity(positions.len());
            commands.push(PathCommand::MoveTo { to: positions[0] });
            for &to in &positions[1..] {
                commands.push(PathCommand::LineTo { to });
            }
            RoutePath { commands }
        }
        RouteShape::Simple {
            start,
            end,
            shape_points,
        } => {
            let (Some(start_pos), Some(end_pos)) =
                (resolver.resolve(start), resolver.resolve(end))
            else {
                return RoutePath::empty();
            };
            let mut commands = vec![PathCommand::MoveTo { to: start_pos }];
            match shape_points.len() {
                0 => commands.push(PathCommand::LineTo { to: end_pos }),
                1 => commands.push(PathCommand::QuadTo {
                    ctrl: shape_points[0],
                    to: end_pos,
                }),
                _ => {
                    let mut through = Vec::with_capacity(shape_points.len() + 2);
                    through.push(start_pos);
                    through.extend_from_slice(shape_points);
                    through.push(end_pos);
                    commands.extend(interpolating_spline(&through));
                }
            }
            RoutePath { commands }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn positions(entries: &[(&str, (f32, f32))]) -> HashMap<String, (f32, f32)> {
        entries
            .iter()
            .map(|(id, pos)| (id.to_string(), *pos))
            .collect()
    }

    #[test]
    fn chain_route_builds_a_plain_polyline() {
        let route = Route::with_chain(
            "r",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )
        .unwrap();
        let map = positions(&[("a", (0.0, 0.0)), ("b", (10.0, 0.0)), ("c", (10.0, 10.0))]);
        let path = build_path(&route, &map);
        assert_eq!(
            path.commands,
            vec![
                PathCommand::MoveTo { to: (0.0, 0.0) },
                PathCommand::LineTo { to: (10.0, 0.0) },
                PathCommand::LineTo { to: (10.0, 10.0) },
            ]
        );
    }

    #[test]
    fn simple_route_without_shape_points_is_a_straight_segment() {
        let route = Route::new("r", "a", "b");
        let map = positions(&[("a", (0.0, 0.0)), ("b", (30.0, 0.0))]);
        let path = build_path(&route, &map);
        assert_eq!(
            path.commands,
            vec![
                PathCommand::MoveTo { to: (0.0, 0.0) },
                PathCommand::LineTo { to: (30.0, 0.0) },
            ]
        );
    }

    #[test]
    fn single_shape_point_becomes_the_quadratic_control() {
        let mut route = Route::new("r", "a", "b");
        route.set_shape_points(vec![(15.0, 20.0)]);
        let map = positions(&[("a", (0.0, 0.0)), ("b", (30.0, 0.0))]);
        let path = build_path(&route, &map);
        assert_eq!(
            path.commands,
            vec![
                PathCommand::MoveTo { to: (0.0, 0.0) },
                PathCommand::QuadTo {
                    ctrl: (15.0, 20.0),
                    to: (30.0, 0.0),
                },
            ]
        );
    }

    #[test]
    fn curve_passes_exactly_through_shape_points() {
        let mut route = Route::new("r", "a", "b");
        route.set_shape_points(vec![(10.0, 0.0), (20.0, 5.0)]);
        let map = positions(&[("a", (0.0, 0.0)), ("b", (30.0, 0.0))]);
        let path = build_path(&route, &map);
        let on_curve = path.on_curve_points();
        assert!(on_curve.contains(&(10.0, 0.0)));
        assert!(on_curve.contains(&(20.0, 5.0)));
        assert_eq!(on_curve.first(), Some(&(0.0, 0.0)));
        assert_eq!(on_curve.last(), Some(&(30.0, 0.0)));
    }

    #[test]
    fn unresolved_waypoint_yields_an_empty_path() {
        let route = Route::new("r", "a", "missing");
        let map = positions(&[("a", (0.0, 0.0))]);
        assert!(build_path(&route, &map).is_empty());

        let chain = Route::with_chain(
            "r",
            vec!["a".to_string(), "gone".to_string(), "c".to_string()],
        )
        .unwrap();
        assert!(build_path(&chain, &map).is_empty());
    }
}
