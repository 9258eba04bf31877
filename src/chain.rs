use thiserror::Error;

use crate::model::{Route, RouteShape};

/// The one hard failure of the engine: an operation tried to shrink a
/// chain below two waypoints. Everything else that "cannot happen" in
/// routine editing (split at an end, merge with no shared endpoint,
/// removing an absent id) is an empty result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("a route must keep at least two waypoints")]
    ChainTooShort,
}

impl Route {
    pub fn contains(&self, waypoint_id: &str) -> bool {
        self.chain().iter().any(|id| *id == waypoint_id)
    }

    /// Index of the first occurrence of `waypoint_id` in the chain.
    pub fn index_of(&self, waypoint_id: &str) -> Option<usize> {
        self.chain().iter().position(|id| *id == waypoint_id)
    }

    /// Insert a waypoint at `index` (0 ..= chain length). Growing the
    /// chain is always legal; a simple route becomes a chain route and
    /// loses its shape points, since chain routes render strictly
    /// waypoint-to-waypoint.
    ///
    /// Panics when `index` is out of range - that is not reachable from
    /// interactive editing, only from a bug in the calling layer.
    pub fn insert_waypoint(&mut self, index: usize, waypoint_id: impl Into<String>) {
        let count = self.waypoint_count();
        assert!(index <= count, "waypoint index {index} out of range 0..={count}");
        let mut waypoints: Vec<String> =
            self.chain().iter().map(|id| id.to_string()).collect();
        waypoints.insert(index, waypoint_id.into());
        self.shape = RouteShape::Chain { waypoints };
    }

    /// Remove the first occurrence of `waypoint_id`.
    ///
    /// Fails with `ChainTooShort` whenever the chain currently holds
    /// exactly two waypoints, even if the id is absent; the length check
    /// guards the invariant before anything else. Returns `Ok(false)`
    /// when the id is not in the chain (idempotent no-op).
    pub fn remove_waypoint(&mut self, waypoint_id: &str) -> Result<bool, ChainError> {
        let RouteShape::Chain { waypoints } = &mut self.shape else {
            return Err(ChainError::ChainTooShort);
        };
        let Some(index) = waypoints.iter().position(|id| id == waypoint_id) else {
            return Ok(false);
        };
        waypoints.remove(index);
        if waypoints.len() == 2 {
            // Back to a simple route; shape points were already gone.
            let start = waypoints[0].clone();
            let end = waypoints[1].clone();
            self.shape = RouteShape::Simple {
                start,
                end,
                shape_points: Vec::new(),
            };
        }
        Ok(true)
    }

    /// Split the route at an interior waypoint. The original keeps
    /// `chain[0..=k]`, the returned route holds `chain[k..]`; the split
    /// waypoint is shared by both halves. Shape points are not
    /// partitionable and are discarded on both sides.
    ///
    /// Returns `None` when the waypoint is absent or is the first or
    /// last element of the chain.
    pub fn split_at(&mut self, waypoint_id: &str) -> Option<Route> {
        let index = self.index_of(waypoint_id)?;
        if index == 0 || index == self.waypoint_count() - 1 {
            return None;
        }
        let waypoints: Vec<String> = self.chain().iter().map(|id| id.to_string()).collect();
        let head = waypoints[..=index].to_vec();
        let tail = waypoints[index..].to_vec();

        // Both halves hold at least two waypoints by the index checks
        // above, so these conversions cannot fail.
        self.shape = RouteShape::from_waypoints(head, Vec::new()).ok()?;
        let mut split_off = Route::new(format!("{} (split)", self.name), "", "");
        split_off.shape = RouteShape::from_waypoints(tail, Vec::new()).ok()?;
        split_off.route_class = self.route_class;
        split_off.travel_type = self.travel_type.clone();
        split_off.hazards = self.hazards.clone();
        Some(split_off)
    }

    /// Merge two routes that share an endpoint.
    ///
    /// The four orientation cases are tried in a fixed order and the
    /// first match wins, which also settles the closed-loop tie (a route
    /// whose start and end coincide merges end-of-a to start-of-b):
    /// 1. end(a) == start(b)
    /// 2. end(a) == end(b)      (b is reversed)
    /// 3. start(a) == end(b)    (b comes first)
    /// 4. start(a) == start(b)  (b is reversed and comes first)
    ///
    /// Returns `None` when no endpoints coincide - a routine outcome of
    /// exploratory selection, not an error.
    pub fn merge(a: &Route, b: &Route) -> Option<Route> {
        let chain_a: Vec<String> = a.chain().iter().map(|id| id.to_string()).collect();
        let chain_b: Vec<String> = b.chain().iter().map(|id| id.to_string()).collect();

        let merged: Vec<String> = if a.end() == b.start() {
            chain_a.iter().chain(chain_b[1..].iter()).cloned().collect()
        } else if a.end() == b.end() {
            let reversed: Vec<String> = chain_b.iter().rev().cloned().collect();
            chain_a.iter().chain(reversed[1..].iter()).cloned().collect()
        } else if a.start() == b.end() {
            chain_b.iter().chain(chain_a[1..].iter()).cloned().collect()
        } else if a.start() == b.start() {
            chain_b[1..]
                .iter()
                .rev()
                .chain(chain_a.iter())
                .cloned()
                .collect()
        } else {
            return None;
        };

        let mut route = Route::new(format!("{} + {}", a.name, b.name), "", "");
        // Two chains overlapping in one waypoint always yield at least
        // three, so the merged route is a chain route.
        route.shape = RouteShape::from_waypoints(merged, Vec::new()).ok()?;
        route.route_class = a.route_class;
        route.travel_type = a.travel_type.clone();
        route.hazards = a.hazards.clone();
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_route(name: &str, ids: &[&str]) -> Route {
        Route::with_chain(name, ids.iter().map(|id| id.to_string()).collect()).unwrap()
    }

    #[test]
    fn insert_at_beginning_middle_and_end() {
        let mut route = Route::new("r", "sys1", "sys2");
        route.insert_waypoint(0, "sys0");
        assert_eq!(route.chain(), vec!["sys0", "sys1", "sys2"]);
        route.insert_waypoint(2, "sys1.5");
        assert_eq!(route.chain(), vec!["sys0", "sys1", "sys1.5", "sys2"]);
        route.insert_waypoint(4, "sys3");
        assert_eq!(route.chain(), vec!["sys0", "sys1", "sys1.5", "sys2", "sys3"]);
    }

    #[test]
    fn insert_clears_shape_points_by_construction() {
        let mut route = Route::new("r", "a", "b");
        route.set_shape_points(vec![(1.0, 1.0)]);
        route.insert_waypoint(1, "mid");
        assert!(route.shape_points().is_empty());
        assert!(!route.is_simple());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn insert_past_end_is_a_caller_bug() {
        let mut route = Route::new("r", "a", "b");
        route.insert_waypoint(3, "c");
    }

    #[test]
    fn remove_middle_then_collapse_to_simple() {
        let mut route = chain_route("r", &["sys1", "sys2", "sys3", "sys4"]);
        assert_eq!(route.remove_waypoint("sys2"), Ok(true));
        assert_eq!(route.chain(), vec!["sys1", "sys3", "sys4"]);
        assert_eq!(route.remove_waypoint("sys3"), Ok(true));
        assert_eq!(route.chain(), vec!["sys1", "sys4"]);
        assert!(route.is_simple());
    }

    #[test]
    fn remove_below_two_waypoints_fails_and_leaves_chain_intact() {
        let mut route = Route::new("r", "sys1", "sys2");
        assert_eq!(route.remove_waypoint("sys1"), Err(ChainError::ChainTooShort));
        // Length is checked before presence.
        assert_eq!(route.remove_waypoint("ghost"), Err(ChainError::ChainTooShort));
        assert_eq!(route.chain(), vec!["sys1", "sys2"]);
    }

    #[test]
    fn remove_absent_id_is_a_no_op() {
        let mut route = chain_route("r", &["a", "b", "c"]);
        assert_eq!(route.remove_waypoint("ghost"), Ok(false));
        assert_eq!(route.chain(), vec!["a", "b", "c"]);
    }

    #[test]
    fn queries_report_first_occurrence() {
        let route = chain_route("r", &["sys1", "sys2", "sys3", "sys4", "sys5"]);
        assert!(route.contains("sys1"));
        assert!(route.contains("sys3"));
        assert!(!route.contains("sys99"));
        assert_eq!(route.index_of("sys1"), Some(0));
        assert_eq!(route.index_of("sys3"), Some(2));
        assert_eq!(route.index_of("sys5"), Some(4));
        assert_eq!(route.index_of("sys99"), None);
    }

    #[test]
    fn split_shares_the_split_waypoint() {
        let mut route = chain_route("Main Route", &["sys1", "sys2", "sys3", "sys4", "sys5"]);
        let tail = route.split_at("sys3").unwrap();
        assert_eq!(route.chain(), vec!["sys1", "sys2", "sys3"]);
        assert_eq!(tail.chain(), vec!["sys3", "sys4", "sys5"]);
        assert_ne!(tail.id, route.id);
        assert_eq!(tail.name, "Main Route (split)");
    }

    #[test]
    fn split_at_edges_returns_none() {
        let mut route = chain_route("r", &["a", "b", "c"]);
        assert!(route.split_at("a").is_none());
        assert!(route.split_at("c").is_none());
        assert!(route.split_at("ghost").is_none());
        assert_eq!(route.chain(), vec!["a", "b", "c"]);
    }

    #[test]
    fn split_discards_shape_points_on_both_halves() {
        let mut route = chain_route("r", &["a", "b", "c"]);
        let tail = route.split_at("b").unwrap();
        assert!(route.shape_points().is_empty());
        assert!(tail.shape_points().is_empty());
        assert!(route.is_simple());
        assert!(tail.is_simple());
    }

    #[test]
    fn merge_end_to_start() {
        let a = chain_route("Route 1", &["sys1", "sys2", "sys3"]);
        let b = chain_route("Route 2", &["sys3", "sys4", "sys5"]);
        let merged = Route::merge(&a, &b).unwrap();
        assert_eq!(merged.chain(), vec!["sys1", "sys2", "sys3", "sys4", "sys5"]);
        assert_eq!(merged.name, "Route 1 + Route 2");
    }

    #[test]
    fn merge_end_to_end_reverses_second_route() {
        let a = chain_route("a", &["sys10", "sys11", "sys12"]);
        let b = chain_route("b", &["sys14", "sys13", "sys12"]);
        let merged = Route::merge(&a, &b).unwrap();
        assert_eq!(merged.chain(), vec!["sys10", "sys11", "sys12", "sys13", "sys14"]);
    }

    #[test]
    fn merge_start_to_start_reverses_and_prepends() {
        let a = chain_route("a", &["Z", "Y", "X"]);
        let b = chain_route("b", &["Z", "Q", "R"]);
        // start(a) == start(b): b reversed, then a.
        let merged = Route::merge(&a, &b).unwrap();
        assert_eq!(merged.chain(), vec!["R", "Q", "Z", "Y", "X"]);
    }

    #[test]
    fn merge_orientations_cover_the_same_logical_path() {
        let forward = ["X", "Y", "Z"];
        let backward = ["Z", "Y", "X"];
        let tail_forward = ["Z", "Q", "R"];
        let tail_backward = ["R", "Q", "Z"];
        let expect = ["X", "Y", "Z", "Q", "R"];
        let expect_rev = ["R", "Q", "Z", "Y", "X"];

        let cases = [
            (forward, tail_forward),
            (forward, tail_backward),
            (backward, tail_forward),
            (backward, tail_backward),
        ];
        for (left, right) in cases {
            let merged =
                Route::merge(&chain_route("l", &left), &chain_route("r", &right)).unwrap();
            let chain = merged.chain();
            assert!(
                chain == expect || chain == expect_rev,
                "unexpected merge of {left:?} and {right:?}: {chain:?}"
            );
        }
    }

    #[test]
    fn merge_without_shared_endpoint_returns_none() {
        let a = chain_route("a", &["X", "Y", "Z"]);
        let b = chain_route("b", &["P", "Q", "R"]);
        assert!(Route::merge(&a, &b).is_none());
    }

    #[test]
    fn merge_closed_loop_tie_break_is_end_to_start() {
        let a = chain_route("a", &["A", "B", "C"]);
        // b is a closed loop: both its endpoints match end(a), so the
        // end-to-start case must win over end-to-end.
        let b = chain_route("b", &["C", "D", "C"]);
        let merged = Route::merge(&a, &b).unwrap();
        assert_eq!(merged.chain(), vec!["A", "B", "C", "D", "C"]);
    }

    #[test]
    fn split_then_merge_restores_the_chain() {
        let mut route = chain_route("r", &["A", "B", "C", "D", "E"]);
        let tail = route.split_at("C").unwrap();
        let merged = Route::merge(&route, &tail).unwrap();
        assert_eq!(merged.chain(), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn merge_carries_flat_attributes_from_first_route() {
        let mut a = chain_route("a", &["X", "Y"]);
        a.route_class = Some(2);
        a.hazards = vec!["pirates".to_string()];
        let b = chain_route("b", &["Y", "Z"]);
        let merged = Route::merge(&a, &b).unwrap();
        assert_eq!(merged.route_class, Some(2));
        assert_eq!(merged.hazards, vec!["pirates".to_string()]);
    }
}
