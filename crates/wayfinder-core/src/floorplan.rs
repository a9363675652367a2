//! Floor-plan document parsing and serialization
//!
//! A floor plan is an XML description of one building level: `Node` records
//! for waypoints/junctions (planar coordinates plus the rooms they serve)
//! and `Connection` records for the corridors between them. Records of the
//! same kind are grouped in the document.

use quick_xml::de::from_str;
use quick_xml::se::to_string;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to parse floor plan: {0}")]
    ParseError(String),
    #[error("Failed to serialize floor plan: {0}")]
    SerializeError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A waypoint or junction on the floor plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Unique node identifier
    #[serde(rename = "Identifier")]
    pub id: u32,
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
    /// Rooms reachable from this waypoint, if any
    #[serde(rename = "Rooms", default)]
    pub rooms: Option<RoomList>,
    /// Marks the initial position of the robot; at most one node sets this
    #[serde(rename = "StartLocation", default)]
    pub start_location: bool,
}

impl NodeRecord {
    /// Room numbers for this node, empty when no `Rooms` element is present
    pub fn rooms(&self) -> &[u32] {
        self.rooms
            .as_ref()
            .map(|r| r.rooms.as_slice())
            .unwrap_or(&[])
    }
}

/// List of room numbers under a `Rooms` element
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomList {
    #[serde(rename = "Rm", default)]
    pub rooms: Vec<u32>,
}

/// An undirected corridor between two nodes.
///
/// Each connection yields a matched pair of directed edges (A to B and
/// B to A, same weight) when the map is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRecord {
    #[serde(rename = "A")]
    pub a: u32,
    #[serde(rename = "B")]
    pub b: u32,
    /// Physical distance in map units; must be non-negative
    #[serde(rename = "Weight")]
    pub weight: f64,
}

/// Root floor-plan document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename = "Map")]
pub struct FloorPlan {
    #[serde(rename = "Node", default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(rename = "Connection", default)]
    pub connections: Vec<ConnectionRecord>,
}

impl FloorPlan {
    /// Parse a floor plan from an XML string
    pub fn from_xml(xml: &str) -> Result<Self, PlanError> {
        from_str(xml).map_err(|e| PlanError::ParseError(e.to_string()))
    }

    /// Parse a floor plan from a file
    pub fn from_file(path: &Path) -> Result<Self, PlanError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_xml(&content)
    }

    /// Serialize to an XML string
    pub fn to_xml(&self) -> Result<String, PlanError> {
        let xml = to_string(self).map_err(|e| PlanError::SerializeError(e.to_string()))?;
        Ok(format!("<?xml version='1.0'?>\n{}", xml))
    }

    /// Write to a file
    pub fn to_file(&self, path: &Path) -> Result<(), PlanError> {
        let xml = self.to_xml()?;
        std::fs::write(path, xml)?;
        Ok(())
    }

    /// Find the node flagged as the start location, if any
    pub fn start_node(&self) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.start_location)
    }
}
