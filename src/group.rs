use std::collections::BTreeMap;

use crate::model::{PositionResolver, Route, RouteGroup};

impl RouteGroup {
    /// Idempotent; returns false when the route was already a member.
    pub fn add_member(&mut self, route_id: impl Into<String>) -> bool {
        self.member_ids.insert(route_id.into())
    }

    /// Idempotent; returns false when the route was not a member.
    pub fn remove_member(&mut self, route_id: &str) -> bool {
        self.member_ids.remove(route_id)
    }

    pub fn contains_member(&self, route_id: &str) -> bool {
        self.member_ids.contains(route_id)
    }

    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }
}

/// Label anchor for a route group: the unweighted average of each
/// member route's endpoint midpoint.
///
/// Members that are unknown in `routes` or whose endpoints do not both
/// resolve are skipped; `None` when nothing contributes.
pub fn anchor_point(
    group: &RouteGroup,
    routes: &BTreeMap<String, Route>,
    resolver: &dyn PositionResolver,
) -> Option<(f32, f32)> {
    let mut sum = (0.0f32, 0.0f32);
    let mut count = 0usize;
    for route_id in &group.member_ids {
        let Some(route) = routes.get(route_id) else {
            continue;
        };
        let (Some(start), Some(end)) = (
            resolver.resolve(route.start()),
            resolver.resolve(route.end()),
        ) else {
            continue;
        };
        sum.0 += (start.0 + end.0) / 2.0;
        sum.1 += (start.1 + end.1) / 2.0;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some((sum.0 / count as f32, sum.1 / count as f32))
}
