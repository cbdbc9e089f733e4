//! Arrow routing over containment trees.
//!
//! Each parent's edge is divided into equal sections, one per child routed
//! out of that edge, and each child gets the midpoint of its section as the
//! arrow's start. Children are ordered along the edge by their own position
//! so arrows do not cross. The arrow's end sits on the child's facing edge.
//!
//! When a child also routes its own children out of the edge the incoming
//! arrow arrives on, that edge reserves one extra section for the incoming
//! arrow so the two never share a point.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use serde::{Deserialize, Serialize};

use crate::config::CanvasConfig;
use crate::geom::{Point, Rect, Size};
use crate::page::PageId;
use crate::tree::{ContainmentForest, ContainmentTree, Direction};

/// One end of an arrow, on the boundary of a page's frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowEndpoint {
    pub point: Point,
    /// The side of the page the point sits on.
    pub edge: Direction,
    pub page: PageId,
}

/// A routed connector from a parent page to one of its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub start: ArrowEndpoint,
    pub end: ArrowEndpoint,
}

/// Incoming arrow waiting for a reserved section on the child's edge.
#[derive(Debug, Clone, Copy)]
struct Incoming {
    arrow: usize,
    edge: Direction,
    cross: f64,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Child(usize),
    Incoming(usize),
}

/// Route every arrow in the forest, parents before children.
#[must_use]
pub fn route_arrows(forest: &ContainmentForest) -> Vec<Arrow> {
    let mut arrows = Vec::new();
    for tree in forest.trees() {
        route_tree(tree, &mut arrows);
    }
    arrows
}

fn route_tree(tree: &ContainmentTree, arrows: &mut Vec<Arrow>) {
    let mut stack: Vec<(usize, Option<Incoming>)> = vec![(0, None)];

    while let Some((index, incoming)) = stack.pop() {
        let Some(node) = tree.node(index) else {
            continue;
        };
        let mut next = Vec::new();

        for edge in Direction::ALL {
            let children = node.children(edge);
            if children.is_empty() {
                continue;
            }

            let mut slots: Vec<(f64, Slot)> = children
                .iter()
                .filter_map(|&child| Some((cross(tree.node(child)?.frame.mid(), edge), Slot::Child(child))))
                .collect();
            if let Some(reserved) = incoming.filter(|inc| inc.edge == edge) {
                slots.push((reserved.cross, Slot::Incoming(reserved.arrow)));
            }
            slots.sort_by(|a, b| a.0.total_cmp(&b.0));

            let count = slots.len();
            for (section, (_, slot)) in slots.into_iter().enumerate() {
                let point = section_midpoint(node.frame, edge, section, count);
                match slot {
                    Slot::Child(child_index) => {
                        let Some(child) = tree.node(child_index) else {
                            continue;
                        };
                        let facing = edge.opposite();
                        arrows.push(Arrow {
                            start: ArrowEndpoint { point, edge, page: node.page },
                            end: ArrowEndpoint { point: project(point, child.frame, facing), edge: facing, page: child.page },
                        });
                        let pending = Incoming { arrow: arrows.len() - 1, edge: facing, cross: cross(point, edge) };
                        next.push((child_index, Some(pending)));
                    }
                    Slot::Incoming(arrow) => {
                        if let Some(pending) = arrows.get_mut(arrow) {
                            pending.end.point = point;
                        }
                    }
                }
            }
        }

        // Reversed so children are visited in bucket order.
        stack.extend(next.into_iter().rev());
    }
}

/// Position along `edge`: y for left/right edges, x for top/bottom edges.
fn cross(point: Point, edge: Direction) -> f64 {
    if edge.is_vertical_edge() { point.y } else { point.x }
}

/// Midpoint of section `section` out of `count` equal sections of `frame`'s `edge`.
fn section_midpoint(frame: Rect, edge: Direction, section: usize, count: usize) -> Point {
    #[allow(clippy::cast_precision_loss)]
    let t = (section as f64 + 0.5) / count as f64;
    match edge {
        Direction::Left => Point::new(frame.min_x(), frame.min_y() + t * frame.height()),
        Direction::Right => Point::new(frame.max_x(), frame.min_y() + t * frame.height()),
        Direction::Top => Point::new(frame.min_x() + t * frame.width(), frame.min_y()),
        Direction::Bottom => Point::new(frame.min_x() + t * frame.width(), frame.max_y()),
    }
}

/// `point` projected onto `frame`'s `edge`, clamped to the edge's extent.
fn project(point: Point, frame: Rect, edge: Direction) -> Point {
    let y = point.y.clamp(frame.min_y(), frame.max_y());
    let x = point.x.clamp(frame.min_x(), frame.max_x());
    match edge {
        Direction::Left => Point::new(frame.min_x(), y),
        Direction::Right => Point::new(frame.max_x(), y),
        Direction::Top => Point::new(x, frame.min_y()),
        Direction::Bottom => Point::new(x, frame.max_y()),
    }
}

/// Orthogonal polyline drawn for one arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowPath {
    /// Vertices from the start endpoint to the end endpoint.
    pub points: Vec<Point>,
    /// Requested elbow radius.
    pub corner_size: f64,
    pub line_width: f64,
}

impl ArrowPath {
    /// Build the path for `arrow`: a stub straight out of the start edge, one
    /// or two elbows, and a stub straight into the end edge.
    #[must_use]
    pub fn between(arrow: &Arrow, config: &CanvasConfig) -> Self {
        let stub = config.arrow_end_length;
        let start = arrow.start.point;
        let end = arrow.end.point;
        let start_out = start + arrow.start.edge.normal().scaled(stub);
        let end_out = end + arrow.end.edge.normal().scaled(stub);

        let mut points = vec![start, start_out];
        match (arrow.start.edge.is_vertical_edge(), arrow.end.edge.is_vertical_edge()) {
            (true, true) => {
                let mid_x = (start_out.x + end_out.x) / 2.0;
                points.push(Point::new(mid_x, start_out.y));
                points.push(Point::new(mid_x, end_out.y));
            }
            (false, false) => {
                let mid_y = (start_out.y + end_out.y) / 2.0;
                points.push(Point::new(start_out.x, mid_y));
                points.push(Point::new(end_out.x, mid_y));
            }
            (true, false) => points.push(Point::new(end_out.x, start_out.y)),
            (false, true) => points.push(Point::new(start_out.x, end_out.y)),
        }
        points.push(end_out);
        points.push(end);
        points.dedup();

        Self { points, corner_size: config.arrow_corner_size, line_width: config.arrow_line_width }
    }

    /// Elbow radius at vertex `index`: the corner size, limited to half of
    /// each adjacent segment. Zero at the two ends.
    #[must_use]
    pub fn corner_radius(&self, index: usize) -> f64 {
        if index == 0 || index + 1 >= self.points.len() {
            return 0.0;
        }
        let before = segment_length(self.points[index - 1], self.points[index]);
        let after = segment_length(self.points[index], self.points[index + 1]);
        self.corner_size.min(before / 2.0).min(after / 2.0)
    }

    /// Area touched by the stroked path.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.points
            .iter()
            .map(|p| Rect::from_origin_size(*p, Size::ZERO))
            .reduce(|acc, r| acc.union(&r))
            .unwrap_or(Rect::ZERO)
            .outset(self.line_width / 2.0)
    }
}

fn segment_length(a: Point, b: Point) -> f64 {
    let d = b - a;
    d.dx.hypot(d.dy)
}
