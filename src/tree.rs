//! Containment trees built from page links.
//!
//! Arrow routing needs to know, for every linked page, which side of its
//! parent it sits on. Starting from each declared root, the forest walks the
//! link graph breadth-first and files each child into one of four direction
//! buckets relative to its parent's frame. Nodes live in a flat `Vec` per
//! tree and refer to each other by index.

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::geom::{Rect, Vector};
use crate::page::PageId;

/// A side of a page frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Top,
    Right,
    Bottom,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Top, Direction::Right, Direction::Bottom];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
        }
    }

    /// Whether this is the left or right side, so positions along it vary in y.
    #[must_use]
    pub fn is_vertical_edge(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Unit vector pointing out of the frame through this side.
    #[must_use]
    pub fn normal(self) -> Vector {
        match self {
            Self::Left => Vector::new(-1.0, 0.0),
            Self::Top => Vector::new(0.0, -1.0),
            Self::Right => Vector::new(1.0, 0.0),
            Self::Bottom => Vector::new(0.0, 1.0),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Top => 1,
            Self::Right => 2,
            Self::Bottom => 3,
        }
    }
}

/// Which bucket of `parent` the frame `child` belongs in, judged by the child's midpoint.
#[must_use]
pub fn classify(parent: Rect, child: Rect) -> Direction {
    let mid = child.mid();
    let within_y = mid.y >= parent.min_y() && mid.y <= parent.max_y();
    let within_x = mid.x >= parent.min_x() && mid.x <= parent.max_x();

    if within_x && within_y {
        return if mid.x < parent.mid_x() { Direction::Left } else { Direction::Right };
    }
    if within_y {
        return if mid.x > parent.max_x() { Direction::Right } else { Direction::Left };
    }
    if within_x {
        return if mid.y > parent.max_y() { Direction::Bottom } else { Direction::Top };
    }

    // Diagonal quadrants: compare distance past the nearest corner on each axis.
    // Ties go to the horizontal side.
    let (horizontal, dx) = if mid.x < parent.min_x() {
        (Direction::Left, parent.min_x() - mid.x)
    } else {
        (Direction::Right, mid.x - parent.max_x())
    };
    let (vertical, dy) = if mid.y < parent.min_y() {
        (Direction::Top, parent.min_y() - mid.y)
    } else {
        (Direction::Bottom, mid.y - parent.max_y())
    };
    if dy > dx { vertical } else { horizontal }
}

/// Supplies each page's resolved link children.
pub trait LinkSource {
    /// Pages whose link originates at `page`, in link order.
    fn children(&self, page: &PageId) -> &[PageId];
}

impl LinkSource for HashMap<PageId, Vec<PageId>> {
    fn children(&self, page: &PageId) -> &[PageId] {
        self.get(page).map(Vec::as_slice).unwrap_or_default()
    }
}

/// One page in a containment tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub page: PageId,
    /// Frame used for classification and routing.
    pub frame: Rect,
    /// Index of the parent node; `None` for the root.
    pub parent: Option<usize>,
    children: [Vec<usize>; 4],
}

impl TreeNode {
    fn new(page: PageId, frame: Rect, parent: Option<usize>) -> Self {
        Self { page, frame, parent, children: Default::default() }
    }

    /// Indices of the children filed under `direction`, in link order.
    #[must_use]
    pub fn children(&self, direction: Direction) -> &[usize] {
        &self.children[direction.index()]
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Vec::is_empty)
    }
}

/// Tree rooted at one declared root. The root is always node 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentTree {
    nodes: Vec<TreeNode>,
}

impl ContainmentTree {
    #[must_use]
    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }

    /// The node at `index`, as stored in [`TreeNode::parent`] and the child buckets.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<&TreeNode> {
        self.nodes.get(index)
    }

    #[must_use]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Index of the node for `page`, if it is in this tree.
    #[must_use]
    pub fn find(&self, page: &PageId) -> Option<usize> {
        self.nodes.iter().position(|n| n.page == *page)
    }
}

/// Every containment tree built in one routing pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainmentForest {
    trees: Vec<ContainmentTree>,
}

impl ContainmentForest {
    /// Build one tree per root. `frame_of` resolves a page to the frame used
    /// for classification; pages it cannot resolve are left out.
    ///
    /// A page joins the tree of the first parent that reaches it. Later links
    /// to it, including cycles back to an ancestor, are ignored. A root that
    /// was already reached from an earlier root does not start a tree.
    pub fn build(roots: &[PageId], links: &impl LinkSource, frame_of: impl Fn(PageId) -> Option<Rect>) -> Self {
        let mut placed: HashSet<PageId> = HashSet::new();
        let mut trees = Vec::new();

        for root in roots {
            if placed.contains(root) {
                continue;
            }
            let Some(frame) = frame_of(*root) else {
                continue;
            };
            placed.insert(*root);

            let mut nodes = vec![TreeNode::new(*root, frame, None)];
            let mut queue = VecDeque::from([0]);
            while let Some(index) = queue.pop_front() {
                let (page, frame) = (nodes[index].page, nodes[index].frame);
                for child in links.children(&page) {
                    if placed.contains(child) {
                        tracing::warn!(%page, %child, "linked page already has a parent; link ignored");
                        continue;
                    }
                    let Some(child_frame) = frame_of(*child) else {
                        continue;
                    };
                    placed.insert(*child);

                    let direction = classify(frame, child_frame);
                    let child_index = nodes.len();
                    nodes.push(TreeNode::new(*child, child_frame, Some(index)));
                    nodes[index].children[direction.index()].push(child_index);
                    queue.push_back(child_index);
                }
            }
            trees.push(ContainmentTree { nodes });
        }

        Self { trees }
    }

    #[must_use]
    pub fn trees(&self) -> &[ContainmentTree] {
        &self.trees
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Whether `page` is in any tree.
    #[must_use]
    pub fn contains(&self, page: &PageId) -> bool {
        self.trees.iter().any(|t| t.find(page).is_some())
    }
}
