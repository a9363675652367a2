//! Shortest-path routing over the map graph

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::map::{DirectedEdge, MapModel, VertexId};

/// Heap entry ordered so the smallest tentative distance pops first
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    vertex: VertexId,
    distance: f64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed, BinaryHeap is a max-heap
        other.distance.total_cmp(&self.distance)
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the minimum total-weight path from `from` to `to` with
/// Dijkstra's algorithm (edge weights are non-negative by map invariant).
///
/// Returns the ordered directed edges of the path. The result is empty
/// when `from == to` or when `to` is unreachable; callers that need to
/// tell those apart compare the endpoints themselves.
pub fn shortest_path(map: &MapModel, from: VertexId, to: VertexId) -> Vec<DirectedEdge> {
    if from == to {
        return Vec::new();
    }
    let slots = map.slot_count();
    if from as usize >= slots || to as usize >= slots {
        return Vec::new();
    }

    let mut dist = vec![f64::INFINITY; slots];
    let mut edge_to: Vec<Option<DirectedEdge>> = vec![None; slots];
    let mut queue = BinaryHeap::new();

    dist[from as usize] = 0.0;
    queue.push(QueueEntry {
        vertex: from,
        distance: 0.0,
    });

    while let Some(QueueEntry { vertex, distance }) = queue.pop() {
        if distance > dist[vertex as usize] {
            // Stale entry superseded by a shorter relaxation
            continue;
        }
        if vertex == to {
            break;
        }
        for edge in map.outgoing(vertex) {
            let next = edge.to as usize;
            let candidate = distance + edge.weight;
            if candidate < dist[next] {
                dist[next] = candidate;
                edge_to[next] = Some(*edge);
                queue.push(QueueEntry {
                    vertex: edge.to,
                    distance: candidate,
                });
            }
        }
    }

    // Walk the predecessor edges back from the destination
    let mut path = Vec::new();
    let mut cursor = to;
    while cursor != from {
        match edge_to[cursor as usize] {
            Some(edge) => {
                path.push(edge);
                cursor = edge.from;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floorplan::{ConnectionRecord, FloorPlan, NodeRecord};

    fn map(nodes: &[(u32, i32, i32)], conns: &[(u32, u32, f64)]) -> MapModel {
        let plan = FloorPlan {
            nodes: nodes
                .iter()
                .map(|&(id, x, y)| NodeRecord {
                    id,
                    x,
                    y,
                    rooms: None,
                    start_location: false,
                })
                .collect(),
            connections: conns
                .iter()
                .map(|&(a, b, weight)| ConnectionRecord { a, b, weight })
                .collect(),
        };
        MapModel::from_plan(&plan).unwrap()
    }

    fn total_weight(path: &[DirectedEdge]) -> f64 {
        path.iter().map(|e| e.weight).sum()
    }

    #[test]
    fn test_square_shortest_path() {
        // Unit square, opposite corners are two unit edges apart
        let map = map(
            &[(0, 0, 0), (1, 1, 0), (2, 1, 1), (3, 0, 1)],
            &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0)],
        );

        let path = shortest_path(&map, 0, 2);
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].from, 0);
        assert_eq!(path[path.len() - 1].to, 2);
        assert_eq!(total_weight(&path), 2.0);
    }

    #[test]
    fn test_prefers_lighter_path() {
        // Direct corridor is heavier than the two-hop detour
        let map = map(
            &[(0, 0, 0), (1, 5, 0), (2, 10, 0)],
            &[(0, 2, 10.0), (0, 1, 1.0), (1, 2, 1.0)],
        );

        let path = shortest_path(&map, 0, 2);
        assert_eq!(path.len(), 2);
        assert_eq!(total_weight(&path), 2.0);
    }

    #[test]
    fn test_path_edges_are_contiguous() {
        let map = map(
            &[(0, 0, 0), (1, 0, 10), (2, 10, 10), (3, 10, 20)],
            &[(0, 1, 10.0), (1, 2, 10.0), (2, 3, 10.0)],
        );

        let path = shortest_path(&map, 0, 3);
        assert_eq!(path.len(), 3);
        for pair in path.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
    }

    #[test]
    fn test_unreachable_returns_empty() {
        // Vertex 2 has no edges at all
        let map = map(&[(0, 0, 0), (1, 0, 10), (2, 50, 50)], &[(0, 1, 10.0)]);

        assert!(shortest_path(&map, 0, 2).is_empty());
        assert!(shortest_path(&map, 1, 2).is_empty());
    }

    #[test]
    fn test_same_vertex_is_empty() {
        let map = map(&[(0, 0, 0), (1, 0, 10)], &[(0, 1, 10.0)]);
        assert!(shortest_path(&map, 0, 0).is_empty());
    }
}
