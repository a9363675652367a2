//! Wayfinder Core - floor-plan parsing, routing, and instruction synthesis
//!
//! This crate provides the building-navigation core:
//! - Floor-plan document parsing and serialization (XML)
//! - Weighted directed map graph with room lookups
//! - Dijkstra shortest-path routing
//! - Turn-by-turn Angle/Distance instruction synthesis with heading
//!   bookkeeping across sequential requests

pub mod directions;
pub mod floorplan;
pub mod map;
pub mod route;
pub mod session;

pub use directions::Instruction;
pub use floorplan::{ConnectionRecord, FloorPlan, NodeRecord, PlanError, RoomList};
pub use map::{DirectedEdge, MapError, MapModel, Vertex, VertexId};
pub use route::shortest_path;
pub use session::{NavSession, RouteError};
