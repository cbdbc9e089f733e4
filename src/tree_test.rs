use uuid::Uuid;

use super::*;

const PARENT: Rect = Rect {
    origin: crate::geom::Point { x: 0.0, y: 0.0 },
    size: crate::geom::Size { width: 100.0, height: 100.0 },
};

/// A 20x20 frame centred on (x, y).
fn at(x: f64, y: f64) -> Rect {
    Rect::new(x - 10.0, y - 10.0, 20.0, 20.0)
}

// =============================================================
// Direction
// =============================================================

#[test]
fn opposite_pairs() {
    for d in Direction::ALL {
        assert_eq!(d.opposite().opposite(), d);
        assert_ne!(d.opposite(), d);
        assert_eq!(d.is_vertical_edge(), d.opposite().is_vertical_edge());
    }
}

#[test]
fn normals_point_outwards() {
    assert_eq!(Direction::Left.normal(), Vector::new(-1.0, 0.0));
    assert_eq!(Direction::Bottom.normal(), Vector::new(0.0, 1.0));
}

#[test]
fn direction_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Direction::Top).unwrap(), "\"top\"");
}

// =============================================================
// classify
// =============================================================

#[test]
fn directly_above_is_top_and_below_is_bottom() {
    assert_eq!(classify(PARENT, at(50.0, -80.0)), Direction::Top);
    assert_eq!(classify(PARENT, at(50.0, 180.0)), Direction::Bottom);
    assert_eq!(classify(PARENT, at(0.0, -1.0)), Direction::Top);
    assert_eq!(classify(PARENT, at(100.0, 101.0)), Direction::Bottom);
}

#[test]
fn beside_is_left_or_right() {
    assert_eq!(classify(PARENT, at(-50.0, 50.0)), Direction::Left);
    assert_eq!(classify(PARENT, at(150.0, 0.0)), Direction::Right);
    assert_eq!(classify(PARENT, at(101.0, 100.0)), Direction::Right);
}

#[test]
fn inside_splits_on_mid_x() {
    assert_eq!(classify(PARENT, at(30.0, 50.0)), Direction::Left);
    assert_eq!(classify(PARENT, at(50.0, 50.0)), Direction::Right);
    assert_eq!(classify(PARENT, at(70.0, 5.0)), Direction::Right);
}

#[test]
fn top_left_quadrant_splits_on_diagonal() {
    assert_eq!(classify(PARENT, at(-10.0, -50.0)), Direction::Top);
    assert_eq!(classify(PARENT, at(-50.0, -10.0)), Direction::Left);
    assert_eq!(classify(PARENT, at(-20.0, -20.0)), Direction::Left);
}

#[test]
fn other_quadrants_are_reflections() {
    assert_eq!(classify(PARENT, at(110.0, -50.0)), Direction::Top);
    assert_eq!(classify(PARENT, at(150.0, -10.0)), Direction::Right);
    assert_eq!(classify(PARENT, at(-10.0, 150.0)), Direction::Bottom);
    assert_eq!(classify(PARENT, at(-50.0, 110.0)), Direction::Left);
    assert_eq!(classify(PARENT, at(110.0, 150.0)), Direction::Bottom);
    assert_eq!(classify(PARENT, at(150.0, 110.0)), Direction::Right);
    assert_eq!(classify(PARENT, at(130.0, 130.0)), Direction::Right);
}

// =============================================================
// LinkSource
// =============================================================

#[test]
fn hashmap_link_source_defaults_to_empty() {
    let links: HashMap<PageId, Vec<PageId>> = HashMap::new();
    assert!(links.children(&Uuid::new_v4()).is_empty());
}

// =============================================================
// ContainmentForest
// =============================================================

struct Fixture {
    frames: HashMap<PageId, Rect>,
    links: HashMap<PageId, Vec<PageId>>,
}

impl Fixture {
    fn new() -> Self {
        Self { frames: HashMap::new(), links: HashMap::new() }
    }

    fn page(&mut self, frame: Rect) -> PageId {
        let id = Uuid::new_v4();
        self.frames.insert(id, frame);
        id
    }

    fn link(&mut self, parent: PageId, child: PageId) {
        self.links.entry(parent).or_default().push(child);
    }

    fn build(&self, roots: &[PageId]) -> ContainmentForest {
        ContainmentForest::build(roots, &self.links, |id| self.frames.get(&id).copied())
    }
}

#[test]
fn children_are_bucketed_by_direction() {
    let mut fx = Fixture::new();
    let root = fx.page(PARENT);
    let right = fx.page(at(300.0, 50.0));
    let top = fx.page(at(50.0, -300.0));
    let right2 = fx.page(at(300.0, 90.0));
    fx.link(root, right);
    fx.link(root, top);
    fx.link(root, right2);

    let forest = fx.build(&[root]);
    assert_eq!(forest.trees().len(), 1);
    let tree = &forest.trees()[0];
    assert_eq!(tree.root().unwrap().page, root);
    let right_pages: Vec<PageId> = tree.root().unwrap().children(Direction::Right).iter().map(|&i| tree.node(i).unwrap().page).collect();
    assert_eq!(right_pages, vec![right, right2]);
    assert_eq!(tree.root().unwrap().children(Direction::Top).len(), 1);
    assert!(tree.root().unwrap().children(Direction::Left).is_empty());
    assert!(tree.root().unwrap().children(Direction::Bottom).is_empty());
}

#[test]
fn nodes_keep_parent_back_references() {
    let mut fx = Fixture::new();
    let root = fx.page(PARENT);
    let child = fx.page(at(300.0, 50.0));
    let grandchild = fx.page(at(600.0, 50.0));
    fx.link(root, child);
    fx.link(child, grandchild);

    let forest = fx.build(&[root]);
    let tree = &forest.trees()[0];
    let g = tree.find(&grandchild).unwrap();
    let c = tree.node(g).unwrap().parent.unwrap();
    assert_eq!(tree.node(c).unwrap().page, child);
    assert_eq!(tree.node(c).unwrap().parent, Some(0));
    assert!(tree.root().unwrap().parent.is_none());
    assert!(tree.node(g).unwrap().is_leaf());
    assert!(!tree.root().unwrap().is_leaf());
}

#[test]
fn unreachable_pages_are_excluded() {
    let mut fx = Fixture::new();
    let root = fx.page(PARENT);
    let child = fx.page(at(300.0, 50.0));
    let orphan = fx.page(at(-300.0, 50.0));
    let orphan_child = fx.page(at(-600.0, 50.0));
    fx.link(root, child);
    fx.link(orphan, orphan_child);

    let forest = fx.build(&[root]);
    assert!(forest.contains(&child));
    assert!(!forest.contains(&orphan));
    assert!(!forest.contains(&orphan_child));
}

#[test]
fn second_parent_is_ignored() {
    let mut fx = Fixture::new();
    let root = fx.page(PARENT);
    let a = fx.page(at(300.0, 50.0));
    let b = fx.page(at(50.0, 300.0));
    let shared = fx.page(at(300.0, 300.0));
    fx.link(root, a);
    fx.link(root, b);
    fx.link(a, shared);
    fx.link(b, shared);

    let forest = fx.build(&[root]);
    let tree = &forest.trees()[0];
    assert_eq!(tree.nodes().len(), 4);
    let s = tree.find(&shared).unwrap();
    let parent = tree.node(s).unwrap().parent.unwrap();
    assert_eq!(tree.node(parent).unwrap().page, a);
}

#[test]
fn cycles_terminate() {
    let mut fx = Fixture::new();
    let root = fx.page(PARENT);
    let a = fx.page(at(300.0, 50.0));
    fx.link(root, a);
    fx.link(a, root);
    fx.link(a, a);

    let forest = fx.build(&[root]);
    assert_eq!(forest.trees()[0].nodes().len(), 2);
}

#[test]
fn pages_without_frames_are_skipped() {
    let mut fx = Fixture::new();
    let root = fx.page(PARENT);
    let ghost = Uuid::new_v4();
    fx.link(root, ghost);

    let forest = fx.build(&[root, Uuid::new_v4()]);
    assert_eq!(forest.trees().len(), 1);
    assert!(forest.trees()[0].root().unwrap().is_leaf());
}

#[test]
fn root_reached_earlier_does_not_start_a_tree() {
    let mut fx = Fixture::new();
    let root = fx.page(PARENT);
    let child = fx.page(at(300.0, 50.0));
    fx.link(root, child);

    let forest = fx.build(&[root, child, root]);
    assert_eq!(forest.trees().len(), 1);
}

#[test]
fn out_of_range_node_is_none() {
    let mut fx = Fixture::new();
    let root = fx.page(PARENT);
    let forest = fx.build(&[root]);
    let tree = &forest.trees()[0];
    assert!(tree.node(0).is_some());
    assert!(tree.node(1).is_none());
    assert!(tree.node(usize::MAX).is_none());
}

#[test]
fn no_roots_builds_empty_forest() {
    let fx = Fixture::new();
    assert!(fx.build(&[]).is_empty());
}
