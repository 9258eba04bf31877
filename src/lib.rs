pub mod chain;
pub mod geometry;
pub mod group;
pub mod model;
pub mod project;
pub mod registry;

pub use chain::ChainError;
pub use geometry::{PathCommand, RoutePath, SegmentHit, build_path, nearest_segment};
pub use model::{PositionResolver, Route, RouteGroup, RouteShape};
pub use project::StarMapProject;
pub use registry::{SystemRecord, SystemRegistry};
