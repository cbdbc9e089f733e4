#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn new_space_is_identity() {
    let space = CoordinateSpace::new();
    assert_eq!(space.offset(), Vector::ZERO);
    assert_eq!(space.size(), Size::ZERO);
    assert_eq!(space.to_canvas(Point::new(3.0, 4.0)), Point::new(3.0, 4.0));
}

#[test]
fn empty_canvas_is_border_around_zero_rect() {
    let mut space = CoordinateSpace::new();
    let change = space.fit(None, 1000.0, None);
    assert_eq!(space.offset(), Vector::new(1000.0, 1000.0));
    assert_eq!(space.size(), Size::new(2000.0, 2000.0));
    assert!(change.size_changed);
    assert_eq!(change.offset_delta, Some(Vector::new(1000.0, 1000.0)));
}

#[test]
fn empty_canvas_ignores_viewport() {
    let mut space = CoordinateSpace::new();
    space.fit(None, 10.0, Some(Rect::new(-500.0, -500.0, 2000.0, 2000.0)));
    assert_eq!(space.size(), Size::new(20.0, 20.0));
}

#[test]
fn three_page_scenario() {
    let mut space = CoordinateSpace::new();
    let content = Rect::new(0.0, 0.0, 300.0, 400.0);
    space.fit(Some(content), 1000.0, None);
    assert_eq!(space.offset(), Vector::new(1000.0, 1000.0));
    assert_eq!(space.size(), Size::new(2300.0, 2400.0));
}

#[test]
fn conversions_are_inverse() {
    let mut space = CoordinateSpace::new();
    space.fit(Some(Rect::new(-40.0, 25.0, 10.0, 10.0)), 5.0, None);
    let p = Point::new(17.5, -3.25);
    assert_eq!(space.to_page(space.to_canvas(p)), p);
    let r = Rect::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(space.rect_to_page(space.rect_to_canvas(r)), r);
}

#[test]
fn content_lands_at_non_negative_canvas_coordinates() {
    let mut space = CoordinateSpace::new();
    let content = Rect::new(-350.0, -20.0, 100.0, 100.0);
    space.fit(Some(content), 50.0, None);
    let canvas = space.rect_to_canvas(content);
    assert_eq!(canvas.origin, Point::new(50.0, 50.0));
}

#[test]
fn viewport_extends_bounds() {
    let mut space = CoordinateSpace::new();
    let content = Rect::new(0.0, 0.0, 100.0, 100.0);
    space.fit(Some(content), 10.0, None);
    // Offset is now (10, 10); a viewport reaching to canvas (500, 500) is page (490, 490).
    let change = space.fit(Some(content), 10.0, Some(Rect::new(0.0, 0.0, 500.0, 500.0)));
    assert_eq!(space.size(), Size::new(500.0, 500.0));
    assert_eq!(change.offset_delta, Some(Vector::ZERO));
    assert!(change.size_changed);
}

#[test]
fn viewport_left_of_content_shifts_offset() {
    let mut space = CoordinateSpace::new();
    let content = Rect::new(0.0, 0.0, 100.0, 100.0);
    space.fit(Some(content), 0.0, None);
    let change = space.fit(Some(content), 0.0, Some(Rect::new(-50.0, 0.0, 100.0, 100.0)));
    assert_eq!(space.offset(), Vector::new(50.0, 0.0));
    assert_eq!(change.offset_delta, Some(Vector::new(50.0, 0.0)));
}

#[test]
fn refit_without_changes_reports_zero_delta() {
    let mut space = CoordinateSpace::new();
    let content = Some(Rect::new(5.0, 5.0, 50.0, 50.0));
    space.fit(content, 100.0, None);
    let change = space.fit(content, 100.0, None);
    assert!(!change.size_changed);
    assert_eq!(change.offset_delta, Some(Vector::ZERO));
}

#[test]
fn redraw_carries_no_claims() {
    let change = LayoutChange::redraw();
    assert!(!change.size_changed);
    assert!(change.offset_delta.is_none());
}
