//! Weighted directed map graph built from a floor plan

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::floorplan::{FloorPlan, PlanError};

/// Identifier of a map vertex
pub type VertexId = u32;

#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("Duplicate vertex identifier {0}")]
    DuplicateVertex(VertexId),
    #[error("Room {room} is claimed by both vertex {first} and vertex {second}")]
    DuplicateRoom {
        room: u32,
        first: VertexId,
        second: VertexId,
    },
    #[error("Multiple start locations (vertices {0} and {1})")]
    DuplicateStart(VertexId, VertexId),
    #[error("Connection references unknown vertex {0}")]
    UnknownVertex(VertexId),
    #[error("Connection {a} -- {b} has negative weight {weight}")]
    NegativeWeight { a: VertexId, b: VertexId, weight: f64 },
}

/// A waypoint in the building with the rooms it serves
#[derive(Debug, Clone)]
pub struct Vertex {
    pub id: VertexId,
    pub x: i32,
    pub y: i32,
    pub rooms: Vec<u32>,
}

/// One direction of a corridor between two vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectedEdge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
}

/// In-memory weighted directed graph for one floor plan.
///
/// Construction is atomic: [`MapModel::from_plan`] either yields a fully
/// validated map or an error, never a partially populated one. The model
/// is immutable afterwards, so several navigation sessions can share one
/// map read-only.
#[derive(Debug, Clone, Default)]
pub struct MapModel {
    vertices: HashMap<VertexId, Vertex>,
    rooms: HashMap<u32, VertexId>,
    /// Outgoing edges indexed by source vertex id, sized to max id + 1
    adjacency: Vec<Vec<DirectedEdge>>,
    edge_count: usize,
    start: Option<VertexId>,
}

impl MapModel {
    /// Build a validated map from a parsed floor plan.
    ///
    /// Rejects duplicate vertex identifiers, rooms claimed by more than
    /// one vertex, more than one start location, connections referencing
    /// undeclared vertices, and negative weights.
    pub fn from_plan(plan: &FloorPlan) -> Result<Self, MapError> {
        let mut vertices = HashMap::new();
        let mut rooms = HashMap::new();
        let mut start = None;
        let mut max_id: VertexId = 0;

        for node in &plan.nodes {
            if vertices.contains_key(&node.id) {
                return Err(MapError::DuplicateVertex(node.id));
            }
            for &room in node.rooms() {
                if let Some(&first) = rooms.get(&room) {
                    return Err(MapError::DuplicateRoom {
                        room,
                        first,
                        second: node.id,
                    });
                }
                rooms.insert(room, node.id);
            }
            if node.start_location {
                if let Some(first) = start {
                    return Err(MapError::DuplicateStart(first, node.id));
                }
                start = Some(node.id);
            }
            max_id = max_id.max(node.id);
            vertices.insert(
                node.id,
                Vertex {
                    id: node.id,
                    x: node.x,
                    y: node.y,
                    rooms: node.rooms().to_vec(),
                },
            );
        }

        let slots = if vertices.is_empty() {
            0
        } else {
            max_id as usize + 1
        };
        let mut adjacency = vec![Vec::new(); slots];
        let mut edge_count = 0;

        for conn in &plan.connections {
            for id in [conn.a, conn.b] {
                if !vertices.contains_key(&id) {
                    return Err(MapError::UnknownVertex(id));
                }
            }
            if conn.weight < 0.0 {
                return Err(MapError::NegativeWeight {
                    a: conn.a,
                    b: conn.b,
                    weight: conn.weight,
                });
            }
            adjacency[conn.a as usize].push(DirectedEdge {
                from: conn.a,
                to: conn.b,
                weight: conn.weight,
            });
            adjacency[conn.b as usize].push(DirectedEdge {
                from: conn.b,
                to: conn.a,
                weight: conn.weight,
            });
            edge_count += 2;
        }

        debug!(
            vertices = vertices.len(),
            edges = edge_count,
            "Floor plan loaded"
        );

        Ok(Self {
            vertices,
            rooms,
            adjacency,
            edge_count,
            start,
        })
    }

    /// Parse and build a map from an XML string
    pub fn from_xml(xml: &str) -> Result<Self, MapError> {
        Self::from_plan(&FloorPlan::from_xml(xml)?)
    }

    /// Parse and build a map from a floor-plan file
    pub fn from_file(path: &Path) -> Result<Self, MapError> {
        Self::from_plan(&FloorPlan::from_file(path)?)
    }

    /// Look up a vertex by identifier
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(&id)
    }

    /// True iff some vertex serves the given room
    pub fn room_exists(&self, room: u32) -> bool {
        self.rooms.contains_key(&room)
    }

    /// The vertex serving the given room, if any
    pub fn vertex_for_room(&self, room: u32) -> Option<VertexId> {
        self.rooms.get(&room).copied()
    }

    /// Vertex flagged as the start location in the floor plan
    pub fn start_vertex(&self) -> Option<VertexId> {
        self.start
    }

    /// Outgoing edges of a vertex; empty for unknown identifiers
    pub fn outgoing(&self, id: VertexId) -> &[DirectedEdge] {
        self.adjacency
            .get(id as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Size of the dense adjacency table (max vertex id + 1)
    pub(crate) fn slot_count(&self) -> usize {
        self.adjacency.len()
    }
}
