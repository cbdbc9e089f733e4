#![allow(clippy::float_cmp)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::config::CanvasConfig;
use crate::geom::Vector;

fn page_at(x: f64, y: f64) -> Placement {
    Placement::with_new_id(Rect::new(x, y, 100.0, 100.0))
}

fn zero_margin_config() -> CanvasConfig {
    CanvasConfig {
        title_bar_height: 0.0,
        visual_inset: 0.0,
        content_border: 0.0,
        ..CanvasConfig::default()
    }
}

// =============================================================
// Placement
// =============================================================

#[test]
fn placement_starts_unselected() {
    let p = page_at(0.0, 0.0);
    assert!(!p.selected);
    assert_eq!(p.content_frame(), Rect::new(0.0, 0.0, 100.0, 100.0));
}

#[test]
fn placement_clamp_preserves_origin() {
    let mut p = page_at(0.0, 0.0);
    p.set_content_frame(Rect::new(30.0, 40.0, 5.0, 5.0), Size::new(60.0, 50.0));
    assert_eq!(p.content_frame(), Rect::new(30.0, 40.0, 60.0, 50.0));
}

#[test]
fn placement_serde_round_trip() {
    let p = page_at(12.0, 34.0);
    let json = serde_json::to_string(&p).unwrap();
    let back: Placement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

// =============================================================
// add / remove
// =============================================================

#[test]
fn new_set_is_empty() {
    let set = PageSet::new();
    assert!(set.is_empty());
    assert_eq!(set.len(), 0);
    assert!(set.content_bounds().is_none());
}

#[test]
fn add_appends_in_order() {
    let mut set = PageSet::new();
    let a = page_at(0.0, 0.0);
    let b = page_at(10.0, 0.0);
    let (ida, idb) = (a.id, b.id);
    set.add([a, b]);
    assert_eq!(set.ids(), &[ida, idb]);
    assert_eq!(set.all().len(), 2);
}

#[test]
fn re_adding_replaces_in_place() {
    let mut set = PageSet::new();
    let a = page_at(0.0, 0.0);
    let b = page_at(10.0, 0.0);
    let (ida, idb) = (a.id, b.id);
    set.add([a, b]);
    set.add([Placement::new(ida, Rect::new(500.0, 500.0, 100.0, 100.0))]);
    assert_eq!(set.ids(), &[ida, idb]);
    assert_eq!(set.get(&ida).unwrap().content_frame().origin, Point::new(500.0, 500.0));
}

#[test]
fn remove_filters_ids_and_ignores_absent() {
    let mut set = PageSet::new();
    let a = page_at(0.0, 0.0);
    let b = page_at(10.0, 0.0);
    let c = page_at(20.0, 0.0);
    let (ida, idb, idc) = (a.id, b.id, c.id);
    set.add([a, b, c]);

    let removed = set.remove(&[idc, Uuid::new_v4(), ida]);
    assert_eq!(removed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![ida, idc]);
    assert_eq!(set.ids(), &[idb]);
    assert!(!set.contains(&ida));
}

#[test]
fn remove_from_empty_is_silent() {
    let mut set = PageSet::new();
    assert!(set.remove(&[Uuid::new_v4()]).is_empty());
}

#[test]
fn add_remove_sequences_match_model() {
    let mut rng = StdRng::seed_from_u64(42);
    let pool: Vec<PageId> = (0..12).map(|_| Uuid::new_v4()).collect();
    for _ in 0..50 {
        let mut set = PageSet::new();
        let mut model: Vec<PageId> = Vec::new();
        for _ in 0..60 {
            let id = pool[rng.random_range(0..pool.len())];
            if rng.random_bool(0.6) {
                set.add([Placement::new(id, Rect::new(0.0, 0.0, 10.0, 10.0))]);
                if !model.contains(&id) {
                    model.push(id);
                }
            } else {
                set.remove(&[id]);
                model.retain(|m| *m != id);
            }
            assert_eq!(set.ids(), model.as_slice());
            assert_eq!(set.len(), model.len());
        }
    }
}

// =============================================================
// Spatial queries
// =============================================================

#[test]
fn page_at_returns_topmost() {
    let cfg = zero_margin_config();
    let geo = PageGeometry::new(&cfg, Vector::ZERO);
    let mut set = PageSet::new();
    let a = page_at(0.0, 0.0);
    let b = page_at(50.0, 50.0);
    let (ida, idb) = (a.id, b.id);
    set.add([a, b]);

    assert_eq!(set.page_at(Point::new(75.0, 75.0), &geo), Some(idb));
    assert_eq!(set.page_at(Point::new(10.0, 10.0), &geo), Some(ida));
    assert_eq!(set.page_at(Point::new(500.0, 500.0), &geo), None);
}

#[test]
fn page_at_uses_canvas_space() {
    let cfg = zero_margin_config();
    let geo = PageGeometry::new(&cfg, Vector::new(1000.0, 1000.0));
    let mut set = PageSet::new();
    let a = page_at(0.0, 0.0);
    let ida = a.id;
    set.add([a]);
    assert_eq!(set.page_at(Point::new(1050.0, 1050.0), &geo), Some(ida));
    assert_eq!(set.page_at(Point::new(50.0, 50.0), &geo), None);
}

#[test]
fn pages_in_returns_intersecting_in_z_order() {
    let cfg = zero_margin_config();
    let geo = PageGeometry::new(&cfg, Vector::ZERO);
    let mut set = PageSet::new();
    let a = page_at(0.0, 0.0);
    let b = page_at(300.0, 0.0);
    let c = page_at(150.0, 0.0);
    let (ida, idc) = (a.id, c.id);
    set.add([a, b, c]);
    let hits = set.pages_in(Rect::new(50.0, 50.0, 150.0, 10.0), &geo);
    assert_eq!(hits, vec![ida, idc]);
}

#[test]
fn bring_to_front_moves_to_end() {
    let cfg = zero_margin_config();
    let geo = PageGeometry::new(&cfg, Vector::ZERO);
    let mut set = PageSet::new();
    let a = page_at(0.0, 0.0);
    let b = page_at(50.0, 50.0);
    let (ida, idb) = (a.id, b.id);
    set.add([a, b]);

    assert!(set.bring_to_front(&ida));
    assert_eq!(set.ids(), &[idb, ida]);
    assert_eq!(set.page_at(Point::new(75.0, 75.0), &geo), Some(ida));
}

#[test]
fn bring_to_front_absent_is_noop() {
    let mut set = PageSet::new();
    let a = page_at(0.0, 0.0);
    let ida = a.id;
    set.add([a]);
    assert!(!set.bring_to_front(&Uuid::new_v4()));
    assert_eq!(set.ids(), &[ida]);
}

// =============================================================
// Bounds / selection
// =============================================================

#[test]
fn content_bounds_unions_integral_frames() {
    let mut set = PageSet::new();
    set.add([
        Placement::with_new_id(Rect::new(0.0, 0.0, 100.0, 100.0)),
        Placement::with_new_id(Rect::new(200.0, 0.0, 100.0, 100.0)),
        Placement::with_new_id(Rect::new(100.0, 300.0, 100.0, 100.0)),
    ]);
    assert_eq!(set.content_bounds(), Some(Rect::new(0.0, 0.0, 300.0, 400.0)));
}

#[test]
fn content_bounds_rounds_fractional_frames() {
    let mut set = PageSet::new();
    set.add([Placement::with_new_id(Rect::new(0.5, 0.5, 10.0, 10.0))]);
    assert_eq!(set.content_bounds(), Some(Rect::new(0.0, 0.0, 11.0, 11.0)));
}

#[test]
fn set_selection_selects_exactly() {
    let mut set = PageSet::new();
    let a = page_at(0.0, 0.0);
    let b = page_at(10.0, 0.0);
    let (ida, idb) = (a.id, b.id);
    set.add([a, b]);
    set.set_selection(&HashSet::from([idb]));
    assert_eq!(set.selected(), vec![idb]);
    set.set_selection(&HashSet::from([ida, idb]));
    assert_eq!(set.selected(), vec![ida, idb]);
    set.set_selection(&HashSet::new());
    assert!(set.selected().is_empty());
}
