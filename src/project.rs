use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{PositionResolver, Route, RouteGroup};

/// The owning collection of an editing session: routes and the groups
/// that reference them by id. Groups hold identifiers, never route
/// references, so deletion order is never a problem - the route goes
/// first, then its id is purged from every group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "ProjectRecord", into = "ProjectRecord")]
pub struct StarMapProject {
    pub metadata: BTreeMap<String, String>,
    routes: BTreeMap<String, Route>,
    groups: BTreeMap<String, RouteGroup>,
}

impl StarMapProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route(&mut self, route: Route) {
        self.routes.insert(route.id.clone(), route);
    }

    pub fn route(&self, route_id: &str) -> Option<&Route> {
        self.routes.get(route_id)
    }

    pub fn route_mut(&mut self, route_id: &str) -> Option<&mut Route> {
        self.routes.get_mut(route_id)
    }

    pub fn routes(&self) -> &BTreeMap<String, Route> {
        &self.routes
    }

    pub fn group(&self, group_id: &str) -> Option<&RouteGroup> {
        self.groups.get(group_id)
    }

    pub fn groups(&self) -> impl Iterator<Item = &RouteGroup> {
        self.groups.values()
    }

    /// Create a group from a user-selected set of routes. Unknown route
    /// ids are dropped; a selection with no known routes creates no
    /// group.
    pub fn create_group(
        &mut self,
        name: impl Into<String>,
        route_ids: impl IntoIterator<Item = String>,
    ) -> Option<&RouteGroup> {
        let members: Vec<String> = route_ids
            .into_iter()
            .filter(|id| self.routes.contains_key(id))
            .collect();
        if members.is_empty() {
            return None;
        }
        let group = RouteGroup::new(name, members);
        let id = group.id.clone();
        self.groups.insert(id.clone(), group);
        self.groups.get(&id)
    }

    pub fn remove_group(&mut self, group_id: &str) -> Option<RouteGroup> {
        self.groups.remove(group_id)
    }

    /// Remove a route and cascade: purge its id from every group and
    /// delete any group left without members.
    pub fn remove_route(&mut self, route_id: &str) -> Option<Route> {
        let removed = self.routes.remove(route_id)?;
        for group in self.groups.values_mut() {
            group.remove_member(route_id);
        }
        self.groups.retain(|_, group| !group.is_empty());
        Some(removed)
    }

    /// Loader-side cleanup: drop every route with a waypoint that no
    /// longer resolves, with the same group cascade as interactive
    /// removal. Returns the ids of the dropped routes.
    pub fn drop_unresolvable_routes(&mut self, resolver: &dyn PositionResolver) -> Vec<String> {
        let dangling: Vec<String> = self
            .routes
            .values()
            .filter(|route| {
                route
                    .chain()
                    .iter()
                    .any(|id| resolver.resolve(id).is_none())
            })
            .map(|route| route.id.clone())
            .collect();
        for route_id in &dangling {
            self.remove_route(route_id);
        }
        dangling
    }
}

/// Save-file shape: routes and groups as flat arrays, the way the
/// editor has always written them. Editor-shell layers of a full save
/// (templates, systems, zones) are not ours and are ignored on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProjectRecord {
    #[serde(default)]
    metadata: BTreeMap<String, String>,
    #[serde(default)]
    routes: Vec<Route>,
    #[serde(default, alias = "groups")]
    route_groups: Vec<RouteGroup>,
}

impl From<ProjectRecord> for StarMapProject {
    fn from(record: ProjectRecord) -> Self {
        Self {
            metadata: record.metadata,
            routes: record
                .routes
                .into_iter()
                .map(|route| (route.id.clone(), route))
                .collect(),
            groups: record
                .route_groups
                .into_iter()
                .map(|group| (group.id.clone(), group))
                .collect(),
        }
    }
}

impl From<StarMapProject> for ProjectRecord {
    fn from(project: StarMapProject) -> Self {
        Self {
            metadata: project.metadata,
            routes: project.routes.into_values().collect(),
            route_groups: project.groups.into_values().collect(),
        }
    }
}
