//! Stateful navigation session across sequential direction requests

use thiserror::Error;
use tracing::{debug, warn};

use crate::directions::{synthesize, Instruction};
use crate::map::{MapModel, VertexId};
use crate::route::shortest_path;

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Room {0} does not exist on the loaded map")]
    RoomNotFound(u32),
    #[error("No route from vertex {from} to vertex {to}")]
    NoRoute { from: VertexId, to: VertexId },
    #[error("Floor plan declares no start location")]
    NoStartLocation,
    #[error("Route references vertex {0} missing from the map")]
    MissingVertex(VertexId),
}

/// Tracks one agent's position and heading between direction requests.
///
/// The map is passed by reference on every call, so several sessions
/// (several robots) can share one read-only [`MapModel`]. Calls are
/// blocking and the session is not thread-safe; concurrent callers must
/// serialize access externally.
#[derive(Debug, Clone)]
pub struct NavSession {
    current: VertexId,
    heading: i32,
}

impl NavSession {
    /// Start at the floor plan's declared start location
    pub fn new(map: &MapModel) -> Result<Self, RouteError> {
        let current = map.start_vertex().ok_or(RouteError::NoStartLocation)?;
        Ok(Self {
            current,
            heading: 0,
        })
    }

    /// Start at the vertex serving the given room
    pub fn start_at_room(map: &MapModel, room: u32) -> Result<Self, RouteError> {
        let current = map
            .vertex_for_room(room)
            .ok_or(RouteError::RoomNotFound(room))?;
        Ok(Self {
            current,
            heading: 0,
        })
    }

    /// Vertex the session currently occupies
    pub fn current_vertex(&self) -> VertexId {
        self.current
    }

    /// Compute drive instructions from the current position to `room`.
    ///
    /// On success the session advances to the destination vertex and the
    /// heading is reconciled back to the "north" reference, so the next
    /// request starts from known state. A failed request leaves the
    /// session untouched. A destination already at the current vertex is
    /// a no-op and returns an empty list.
    pub fn directions(
        &mut self,
        map: &MapModel,
        room: u32,
    ) -> Result<Vec<Instruction>, RouteError> {
        let destination = map
            .vertex_for_room(room)
            .ok_or(RouteError::RoomNotFound(room))?;

        if destination == self.current {
            debug!(room, vertex = destination, "Already at destination");
            return Ok(Vec::new());
        }

        let path = shortest_path(map, self.current, destination);
        if path.is_empty() {
            warn!(from = self.current, to = destination, "No route found");
            return Err(RouteError::NoRoute {
                from: self.current,
                to: destination,
            });
        }

        let mut heading = self.heading;
        let instructions = synthesize(map, &path, &mut heading)?;

        self.heading = heading;
        self.current = destination;
        debug!(room, steps = instructions.len(), "Route computed");
        Ok(instructions)
    }
}
