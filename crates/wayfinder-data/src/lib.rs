//! Dataset loading and the graphs built from it

pub mod error;
pub mod loader;
pub mod social;
pub mod campus;

pub use error::{DataError, Result};
pub use loader::{BuildingRecord, CoAppearances, PathRecord};
pub use social::SocialGraph;
pub use campus::{route_segments, CampusMap, RouteSegment};
