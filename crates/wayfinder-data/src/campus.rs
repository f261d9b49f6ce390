//! Campus map: buildings on a planar walkway network

use std::collections::{BTreeMap, HashMap};
use std::path::Path as FsPath;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wayfinder_core::{dijkstra, Cost, Graph, Node, Path, Point};

use crate::error::{DataError, Result};
use crate::loader::{load_buildings, load_paths, BuildingRecord, PathRecord};

/// One leg of a route, flattened for callers that draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub cost: f64,
}

/// Flatten a route into drawable segments.
pub fn route_segments(path: &Path<Point>) -> Vec<RouteSegment> {
    path.segments()
        .into_iter()
        .map(|segment| RouteSegment {
            x1: segment.start().x,
            y1: segment.start().y,
            x2: segment.end().x,
            y2: segment.end().y,
            cost: segment.cost(),
        })
        .collect()
}

/// Walkway graph plus the named buildings placed on it.
#[derive(Debug)]
pub struct CampusMap {
    graph: Graph<Point, Cost>,
    names: BTreeMap<String, String>,
    locations: HashMap<String, Point>,
}

impl CampusMap {
    /// Build the map from parsed records.
    ///
    /// Every building location and every path endpoint becomes a node.
    /// Each path record adds one directed edge costed by its recorded
    /// distance, or by its straight-line length when none was given.
    pub fn from_records(buildings: Vec<BuildingRecord>, paths: Vec<PathRecord>) -> Result<Self> {
        let mut graph = Graph::new();
        let mut names = BTreeMap::new();
        let mut locations = HashMap::new();

        for building in buildings {
            let location = Point::new(building.x, building.y);
            graph.add_node(Node::new(location));
            locations.insert(building.short_name.clone(), location);
            names.insert(building.short_name, building.long_name);
        }

        for record in paths {
            let from = Node::new(Point::new(record.x1, record.y1));
            let to = Node::new(Point::new(record.x2, record.y2));
            let distance = record
                .distance
                .unwrap_or_else(|| from.data().distance_to(to.data()));
            graph.add_node(from.clone());
            graph.add_node(to.clone());
            graph.add_edge(&from, &to, Cost::new(distance)?)?;
        }

        info!(
            "Built campus map: {} buildings, {} points, {} segments",
            names.len(),
            graph.size(),
            graph.edge_count()
        );
        Ok(CampusMap {
            graph,
            names,
            locations,
        })
    }

    /// Load and build from a buildings file and a paths file.
    pub fn load(buildings: &FsPath, paths: &FsPath) -> Result<Self> {
        Self::from_records(load_buildings(buildings)?, load_paths(paths)?)
    }

    pub fn short_name_exists(&self, short_name: &str) -> bool {
        self.names.contains_key(short_name)
    }

    pub fn long_name_for_short(&self, short_name: &str) -> Result<&str> {
        self.names
            .get(short_name)
            .map(String::as_str)
            .ok_or_else(|| DataError::UnknownBuilding(short_name.to_string()))
    }

    /// Short name → long name for every building.
    pub fn building_names(&self) -> BTreeMap<String, String> {
        self.names.clone()
    }

    pub fn location(&self, short_name: &str) -> Option<Point> {
        self.locations.get(short_name).copied()
    }

    /// Cheapest walking route between two buildings.
    ///
    /// Unknown names are an error; `Ok(None)` means the buildings exist but
    /// no walkway connects them.
    pub fn find_shortest_path(&self, start: &str, end: &str) -> Result<Option<Path<Point>>> {
        let from = self
            .location(start)
            .ok_or_else(|| DataError::UnknownBuilding(start.to_string()))?;
        let to = self
            .location(end)
            .ok_or_else(|| DataError::UnknownBuilding(end.to_string()))?;

        debug!("Routing {} {} -> {} {}", start, from, end, to);
        Ok(dijkstra::shortest_path(&self.graph, &Node::new(from), &Node::new(to))?)
    }
}
