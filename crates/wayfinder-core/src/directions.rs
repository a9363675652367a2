//! Turn-by-turn instruction synthesis from a routed edge path
//!
//! Turns are detected with a 2D cross product, which only distinguishes
//! straight, left, and right. Floor plans are assumed rectilinear;
//! diagonal corridors are not representable.

use std::fmt;

use crate::map::{DirectedEdge, MapModel};
use crate::session::RouteError;

/// A single drive directive for the motor controller.
///
/// Angles are signed degrees, positive clockwise: 90 is right, -90 left,
/// 180 reverse. Distances are non-negative map units travelled straight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    Angle(i32),
    Distance(f64),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Angle(90) => write!(f, "Turn right."),
            Instruction::Angle(-90) => write!(f, "Turn left."),
            Instruction::Angle(180) => write!(f, "Turn around."),
            Instruction::Angle(deg) => write!(f, "Turn {} degrees.", deg),
            Instruction::Distance(d) => write!(f, "Move {} meters.", d),
        }
    }
}

/// Convert a routed edge path into executable instructions.
///
/// The robot is assumed to face "north" (+Y) at the first request; the
/// accumulated heading in `heading` carries the facing across legs and is
/// reconciled back to 0 at the end of every route, so each request starts
/// from the same reference. Colinear legs merge into one distance; every
/// detected turn flushes the accumulated distance before the angle.
pub(crate) fn synthesize(
    map: &MapModel,
    path: &[DirectedEdge],
    heading: &mut i32,
) -> Result<Vec<Instruction>, RouteError> {
    let mut instructions = Vec::new();
    if path.is_empty() {
        return Ok(instructions);
    }

    let mut distance = 0.0;
    let mut prev: Option<(i32, i32)> = None;

    for (i, edge) in path.iter().enumerate() {
        let from = map
            .vertex(edge.from)
            .ok_or(RouteError::MissingVertex(edge.from))?;
        let to = map
            .vertex(edge.to)
            .ok_or(RouteError::MissingVertex(edge.to))?;

        if i == 0 {
            // First leg: facing north, the coordinate deltas alone decide
            // the initial turn. X takes precedence over Y.
            let dx = to.x - from.x;
            let dy = to.y - from.y;
            if dx > 0 {
                instructions.push(Instruction::Angle(90));
                *heading += 90;
            } else if dx < 0 {
                instructions.push(Instruction::Angle(-90));
                *heading -= 90;
            } else if dy < 0 {
                instructions.push(Instruction::Angle(180));
                *heading += 180;
            }
        } else if let Some((px, py)) = prev {
            let in_dx = from.x - px;
            let in_dy = from.y - py;
            let out_dx = to.x - from.x;
            let out_dy = to.y - from.y;
            // Z component of the cross product of the incoming and
            // outgoing leg vectors: zero is straight ahead
            let cross = in_dx * out_dy - in_dy * out_dx;
            if cross != 0 {
                instructions.push(Instruction::Distance(distance));
                distance = 0.0;
                if cross > 0 {
                    instructions.push(Instruction::Angle(-90));
                    *heading -= 90;
                } else {
                    instructions.push(Instruction::Angle(90));
                    *heading += 90;
                }
            }
        }

        distance += edge.weight;
        prev = Some((from.x, from.y));
    }

    instructions.push(Instruction::Distance(distance));
    instructions.extend(reconcile_heading(heading));
    Ok(instructions)
}

/// Re-face the "north" reference after a route so the next request starts
/// from a known heading. Rotations longer than a half turn wrap to the
/// shorter direction.
fn reconcile_heading(heading: &mut i32) -> Option<Instruction> {
    let mut h = *heading % 360;
    *heading = 0;
    if h == 0 {
        None
    } else if h % 180 == 0 {
        Some(Instruction::Angle(180))
    } else {
        if h > 180 {
            h = 360 - h;
        } else if h < -180 {
            h = -360 - h;
        } else {
            h = -h;
        }
        Some(Instruction::Angle(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::floorplan::{ConnectionRecord, FloorPlan, NodeRecord};
    use crate::map::MapModel;

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

    fn edges(map: &MapModel, route: &[u32]) -> Vec<DirectedEdge> {
        route
            .windows(2)
            .map(|w| {
                *map.outgoing(w[0])
                    .iter()
                    .find(|e| e.to == w[1])
                    .expect("edge missing from fixture")
            })
            .collect()
    }

    fn run(map: &MapModel, route: &[u32]) -> Vec<Instruction> {
        let mut heading = 0;
        let out = synthesize(map, &edges(map, route), &mut heading).unwrap();
        assert_eq!(heading, 0, "heading must reconcile to north");
        out
    }

    #[test]
    fn test_straight_corridor_merges_legs() {
        let map = map(
            &[(0, 0, 0), (1, 0, 10), (2, 0, 20)],
            &[(0, 1, 10.0), (1, 2, 10.0)],
        );

        // Two colinear legs, no initial turn, no correction
        assert_eq!(run(&map, &[0, 1, 2]), vec![Instruction::Distance(20.0)]);
    }

    #[test]
    fn test_right_angle_turn() {
        let map = map(
            &[(0, 0, 0), (1, 0, 10), (2, 10, 10)],
            &[(0, 1, 10.0), (1, 2, 10.0)],
        );

        assert_eq!(
            run(&map, &[0, 1, 2]),
            vec![
                Instruction::Distance(10.0),
                Instruction::Angle(90),
                Instruction::Distance(10.0),
                Instruction::Angle(-90),
            ]
        );
    }

    #[test]
    fn test_left_turn() {
        let map = map(
            &[(0, 0, 0), (1, 0, 10), (2, -10, 10)],
            &[(0, 1, 10.0), (1, 2, 10.0)],
        );

        assert_eq!(
            run(&map, &[0, 1, 2]),
            vec![
                Instruction::Distance(10.0),
                Instruction::Angle(-90),
                Instruction::Distance(10.0),
                Instruction::Angle(90),
            ]
        );
    }

    #[test]
    fn test_initial_turn_east() {
        let map = map(&[(0, 0, 0), (1, 10, 0)], &[(0, 1, 10.0)]);

        assert_eq!(
            run(&map, &[0, 1]),
            vec![
                Instruction::Angle(90),
                Instruction::Distance(10.0),
                Instruction::Angle(-90),
            ]
        );
    }

    #[test]
    fn test_initial_turn_west() {
        let map = map(&[(0, 0, 0), (1, -10, 0)], &[(0, 1, 10.0)]);

        assert_eq!(
            run(&map, &[0, 1]),
            vec![
                Instruction::Angle(-90),
                Instruction::Distance(10.0),
                Instruction::Angle(90),
            ]
        );
    }

    #[test]
    fn test_initial_turn_around() {
        let map = map(&[(0, 0, 0), (1, 0, -10)], &[(0, 1, 10.0)]);

        // Heading ends at 180, the correction is another half turn
        assert_eq!(
            run(&map, &[0, 1]),
            vec![
                Instruction::Angle(180),
                Instruction::Distance(10.0),
                Instruction::Angle(180),
            ]
        );
    }

    #[test]
    fn test_reconcile_wraps_long_rotation() {
        // Three right turns: east, south, west. Heading accumulates 270,
        // which wraps to a single 90-degree correction.
        let map = map(
            &[(0, 0, 0), (1, 10, 0), (2, 10, -10), (3, 0, -10)],
            &[(0, 1, 10.0), (1, 2, 10.0), (2, 3, 10.0)],
        );

        assert_eq!(
            run(&map, &[0, 1, 2, 3]),
            vec![
                Instruction::Angle(90),
                Instruction::Distance(10.0),
                Instruction::Angle(90),
                Instruction::Distance(10.0),
                Instruction::Angle(90),
                Instruction::Distance(10.0),
                Instruction::Angle(90),
            ]
        );
    }

    #[test]
    fn test_single_edge_route() {
        let map = map(&[(0, 0, 0), (1, 0, 7)], &[(0, 1, 7.0)]);

        assert_eq!(run(&map, &[0, 1]), vec![Instruction::Distance(7.0)]);
    }

    #[test]
    fn test_empty_path_no_instructions() {
        let map = map(&[(0, 0, 0)], &[]);
        let mut heading = 0;
        assert!(synthesize(&map, &[], &mut heading).unwrap().is_empty());
        assert_eq!(heading, 0);
    }

    #[test]
    fn test_display_wording() {
        assert_eq!(Instruction::Angle(90).to_string(), "Turn right.");
        assert_eq!(Instruction::Angle(-90).to_string(), "Turn left.");
        assert_eq!(Instruction::Angle(180).to_string(), "Turn around.");
        assert_eq!(Instruction::Angle(45).to_string(), "Turn 45 degrees.");
        assert_eq!(Instruction::Distance(12.5).to_string(), "Move 12.5 meters.");
    }
}
