use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::chain::ChainError;

/// Resolves a waypoint identifier to its current world position.
///
/// Positions are owned by the system registry, never by routes; every
/// geometry and query function reads them through this trait so a route
/// stays valid while systems move underneath it.
pub trait PositionResolver {
    fn resolve(&self, waypoint_id: &str) -> Option<(f32, f32)>;
}

impl PositionResolver for HashMap<String, (f32, f32)> {
    fn resolve(&self, waypoint_id: &str) -> Option<(f32, f32)> {
        self.get(waypoint_id).copied()
    }
}

impl PositionResolver for BTreeMap<String, (f32, f32)> {
    fn resolve(&self, waypoint_id: &str) -> Option<(f32, f32)> {
        self.get(waypoint_id).copied()
    }
}

/// Connectivity of a route.
///
/// `Simple` is the two-waypoint case, the only one eligible for
/// free-form curve shaping. `Chain` holds three or more waypoints and is
/// rendered strictly waypoint-to-waypoint, so it has no shape points at
/// all - the variant itself enforces the rule.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteShape {
    Simple {
        start: String,
        end: String,
        shape_points: Vec<(f32, f32)>,
    },
    Chain {
        waypoints: Vec<String>,
    },
}

impl RouteShape {
    pub(crate) fn from_waypoints(
        chain: Vec<String>,
        shape_points: Vec<(f32, f32)>,
    ) -> Result<Self, ChainError> {
        match chain.len() {
            0 | 1 => Err(ChainError::ChainTooShort),
            2 => {
                let mut ids = chain.into_iter();
                let start = ids.next().unwrap_or_default();
                let end = ids.next().unwrap_or_default();
                Ok(RouteShape::Simple {
                    start,
                    end,
                    shape_points,
                })
            }
            _ => Ok(RouteShape::Chain { waypoints: chain }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RouteRecord", into = "RouteRecord")]
pub struct Route {
    pub id: String,
    pub name: String,
    pub(crate) shape: RouteShape,
    pub route_class: Option<u32>,
    pub travel_type: Option<String>,
    pub hazards: Vec<String>,
}

impl Route {
    /// Create a two-waypoint route with a generated id and no shape
    /// points.
    pub fn new(
        name: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            shape: RouteShape::Simple {
                start: start.into(),
                end: end.into(),
                shape_points: Vec::new(),
            },
            route_class: None,
            travel_type: None,
            hazards: Vec::new(),
        }
    }

    /// Create a route from a full waypoint chain. Fails with
    /// `ChainTooShort` below two waypoints.
    pub fn with_chain(
        name: impl Into<String>,
        chain: Vec<String>,
    ) -> Result<Self, ChainError> {
        let mut route = Self::new(name, String::new(), String::new());
        route.shape = RouteShape::from_waypoints(chain, Vec::new())?;
        Ok(route)
    }

    pub fn shape(&self) -> &RouteShape {
        &self.shape
    }

    pub fn is_simple(&self) -> bool {
        matches!(self.shape, RouteShape::Simple { .. })
    }

    pub fn start(&self) -> &str {
        match &self.shape {
            RouteShape::Simple { start, .. } => start,
            RouteShape::Chain { waypoints } => &waypoints[0],
        }
    }

    pub fn end(&self) -> &str {
        match &self.shape {
            RouteShape::Simple { end, .. } => end,
            RouteShape::Chain { waypoints } => &waypoints[waypoints.len() - 1],
        }
    }

    /// The waypoint chain verbatim, always at least two entries.
    pub fn chain(&self) -> Vec<&str> {
        match &self.shape {
            RouteShape::Simple { start, end, .. } => vec![start.as_str(), end.as_str()],
            RouteShape::Chain { waypoints } => waypoints.iter().map(String::as_str).collect(),
        }
    }

    pub fn waypoint_count(&self) -> usize {
        match &self.shape {
            RouteShape::Simple { .. } => 2,
            RouteShape::Chain { waypoints } => waypoints.len(),
        }
    }

    /// Replace the whole chain. The chain is authoritative, so any
    /// existing shape points are discarded.
    pub fn set_chain(&mut self, chain: Vec<String>) -> Result<(), ChainError> {
        self.shape = RouteShape::from_waypoints(chain, Vec::new())?;
        Ok(())
    }

    pub fn shape_points(&self) -> &[(f32, f32)] {
        match &self.shape {
            RouteShape::Simple { shape_points, .. } => shape_points,
            RouteShape::Chain { .. } => &[],
        }
    }

    /// Replace the free-form shape points. No-op on chain routes, which
    /// render waypoint-to-waypoint and carry none.
    pub fn set_shape_points(&mut self, points: Vec<(f32, f32)>) {
        if let RouteShape::Simple { shape_points, .. } = &mut self.shape {
            *shape_points = points;
        }
    }

    pub fn reset_to_straight_line(&mut self) {
        self.set_shape_points(Vec::new());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteGroup {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "route_ids")]
    pub member_ids: BTreeSet<String>,
}

impl RouteGroup {
    pub fn new(name: impl Into<String>, member_ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            member_ids: member_ids.into_iter().collect(),
        }
    }
}

/// Flat persistence record for a route.
///
/// `start_system_id`/`end_system_id` are kept for files written before
/// chains existed; `system_chain` wins whenever it holds two or more
/// entries. `control_points` is accepted as the historical name for
/// `shape_points`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RouteRecord {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) start_system_id: String,
    #[serde(default)]
    pub(crate) end_system_id: String,
    #[serde(default)]
    pub(crate) system_chain: Vec<String>,
    #[serde(default, alias = "control_points")]
    pub(crate) shape_points: Vec<(f32, f32)>,
    #[serde(default)]
    pub(crate) route_class: Option<u32>,
    #[serde(default)]
    pub(crate) travel_type: Option<String>,
    #[serde(default)]
    pub(crate) hazards: Vec<String>,
}

impl TryFrom<RouteRecord> for Route {
    type Error = ChainError;

    fn try_from(record: RouteRecord) -> Result<Self, Self::Error> {
        let chain = if record.system_chain.len() >= 2 {
            record.system_chain
        } else if !record.start_system_id.is_empty() && !record.end_system_id.is_empty() {
            vec![record.start_system_id, record.end_system_id]
        } else {
            return Err(ChainError::ChainTooShort);
        };
        let shape = RouteShape::from_waypoints(chain, record.shape_points)?;
        Ok(Self {
            id: record.id,
            name: record.name,
            shape,
            route_class: record.route_class,
            travel_type: record.travel_type,
            hazards: record.hazards,
        })
    }
}

impl From<Route> for RouteRecord {
    fn from(route: Route) -> Self {
        let system_chain: Vec<String> = route.chain().iter().map(|id| id.to_string()).collect();
        Self {
            start_system_id: system_chain[0].clone(),
            end_system_id: system_chain[system_chain.len() - 1].clone(),
            shape_points: route.shape_points().to_vec(),
            system_chain,
            id: route.id,
            name: route.name,
            route_class: route.route_class,
            travel_type: route.travel_type,
            hazards: route.hazards,
        }
    }
}
