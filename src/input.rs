//! Input model: modifier keys and the gesture state machine.
//!
//! A gesture is one pointer-down, any number of drags, and a pointer-up. At
//! pointer-down the engine picks exactly one [`Gesture`] variant (rubber-band
//! selection, moving pages, or resizing a page) and holds it in
//! [`InputState::Active`] until pointer-up, when it is finalized and dropped.
//! Each variant carries the context it needs to turn the current pointer
//! position into frame or selection changes without accumulating drift.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::HashSet;

use crate::geom::{Point, Rect, Size, Vector};
use crate::geometry::PageGeometry;
use crate::hit::ResizeAnchor;
use crate::page::{PageId, PageSet};

/// Keyboard modifier keys held during a pointer event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held. Extends the selection instead of replacing it.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    #[must_use]
    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// What a gesture produced when it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A rubber-band selection was committed; carries the selected ids in z-order.
    SelectionCommitted(Vec<PageId>),
    /// These pages' frames changed during the gesture.
    FinishedModifying(Vec<PageId>),
    /// The gesture ended without changing anything.
    Unchanged,
}

/// Whether the engine is between gestures or tracking one.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Exactly one gesture is being tracked.
    Active(Gesture),
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn gesture(&self) -> Option<&Gesture> {
        match self {
            Self::Idle => None,
            Self::Active(gesture) => Some(gesture),
        }
    }
}

/// One in-flight pointer gesture.
#[derive(Debug, Clone)]
pub enum Gesture {
    /// Dragging a selection rectangle across empty canvas.
    RectSelect(RectSelect),
    /// Dragging one or more pages by their title bars.
    Move(MovePages),
    /// Dragging one resize handle of a single page.
    Resize(ResizePage),
}

/// Rubber-band selection context.
#[derive(Debug, Clone)]
pub struct RectSelect {
    /// Canvas point where the drag started.
    anchor: Point,
    /// Selection kept regardless of the rectangle (the snapshot when extending, otherwise empty).
    base: HashSet<PageId>,
    /// The current rectangle, once the pointer has moved.
    current: Option<Rect>,
}

/// Page-move context.
#[derive(Debug, Clone)]
pub struct MovePages {
    /// Canvas point where the drag started.
    start: Point,
    /// Page-space origin of every moved page when the drag started.
    origins: Vec<(PageId, Point)>,
    /// Displacement applied by the latest drag.
    delta: Vector,
}

/// Page-resize context.
#[derive(Debug, Clone)]
pub struct ResizePage {
    /// Id of the page being resized.
    id: PageId,
    /// Which corner/edge handle is being dragged.
    anchor: ResizeAnchor,
    /// Canvas point where the drag started.
    start: Point,
    /// Content frame at the start of the resize.
    orig: Rect,
    /// Content frame after the latest drag.
    current: Rect,
}

impl Gesture {
    /// Begin a rubber-band selection. `snapshot` is the selection at pointer-down;
    /// it is kept only when `extend` is set.
    #[must_use]
    pub fn rect_select(anchor: Point, snapshot: Vec<PageId>, extend: bool) -> Self {
        let base = if extend { snapshot.into_iter().collect() } else { HashSet::new() };
        Self::RectSelect(RectSelect { anchor, base, current: None })
    }

    /// Begin moving `ids`. Ids that are not in `pages` are skipped.
    #[must_use]
    pub fn move_pages(start: Point, ids: &[PageId], pages: &PageSet) -> Self {
        let origins = ids
            .iter()
            .filter_map(|id| pages.get(id).map(|page| (*id, page.content_frame().origin)))
            .collect();
        Self::Move(MovePages { start, origins, delta: Vector::ZERO })
    }

    /// Begin resizing `id` by `anchor`. Returns `None` if the page is not in `pages`.
    #[must_use]
    pub fn resize(start: Point, id: PageId, anchor: ResizeAnchor, pages: &PageSet) -> Option<Self> {
        let orig = pages.get(&id)?.content_frame();
        Some(Self::Resize(ResizePage { id, anchor, start, orig, current: orig }))
    }

    /// Short name used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RectSelect(_) => "rect_select",
            Self::Move(_) => "move",
            Self::Resize(_) => "resize",
        }
    }

    /// The pending selection rectangle in canvas space, while rubber-banding.
    #[must_use]
    pub fn selection_rect(&self) -> Option<Rect> {
        match self {
            Self::RectSelect(select) => select.current,
            Self::Move(_) | Self::Resize(_) => None,
        }
    }

    /// Apply the pointer position to the pages or the pending selection.
    pub fn dragged(&mut self, point: Point, pages: &mut PageSet, geometry: &PageGeometry<'_>) {
        match self {
            Self::RectSelect(select) => {
                let rect = Rect::from_corners(select.anchor, point);
                let mut selection = select.base.clone();
                selection.extend(pages.pages_in(rect, geometry));
                pages.set_selection(&selection);
                select.current = Some(rect);
            }
            Self::Move(moving) => {
                moving.delta = point - moving.start;
                for (id, origin) in &moving.origins {
                    if let Some(page) = pages.get_mut(id) {
                        let frame = Rect::from_origin_size(*origin + moving.delta, page.content_frame().size);
                        geometry.set_content_frame(page, frame);
                    }
                }
            }
            Self::Resize(resize) => {
                let min = geometry.config().min_content_size;
                resize.current = resized_frame(resize.orig, resize.anchor, point - resize.start, min);
                if let Some(page) = pages.get_mut(&resize.id) {
                    geometry.set_content_frame(page, resize.current);
                }
            }
        }
    }

    /// Re-anchor the canvas-space points after the page→canvas offset moved
    /// by `delta`, so later pointer positions are measured against the same
    /// page-space start.
    pub fn offset_moved(&mut self, delta: Vector) {
        match self {
            Self::RectSelect(select) => {
                select.anchor = select.anchor + delta;
                select.current = select.current.map(|rect| rect.translate(delta));
            }
            Self::Move(moving) => moving.start = moving.start + delta,
            Self::Resize(resize) => resize.start = resize.start + delta,
        }
    }

    /// Abandon the gesture, restoring every frame it changed to its state at
    /// pointer-down and the selection to its state after pointer-down.
    /// Returns whether any frame was restored.
    pub fn cancel(self, pages: &mut PageSet, geometry: &PageGeometry<'_>) -> bool {
        match self {
            Self::RectSelect(select) => {
                pages.set_selection(&select.base);
                false
            }
            Self::Move(moving) => {
                if moving.delta.is_zero() {
                    return false;
                }
                for (id, origin) in &moving.origins {
                    if let Some(page) = pages.get_mut(id) {
                        let frame = Rect::from_origin_size(*origin, page.content_frame().size);
                        geometry.set_content_frame(page, frame);
                    }
                }
                true
            }
            Self::Resize(resize) => {
                if resize.current == resize.orig {
                    return false;
                }
                if let Some(page) = pages.get_mut(&resize.id) {
                    geometry.set_content_frame(page, resize.orig);
                }
                true
            }
        }
    }

    /// Apply the final pointer position and report what the gesture did.
    pub fn up(mut self, point: Point, pages: &mut PageSet, geometry: &PageGeometry<'_>) -> GestureOutcome {
        self.dragged(point, pages, geometry);
        match self {
            Self::RectSelect(_) => GestureOutcome::SelectionCommitted(pages.selected()),
            Self::Move(moving) => {
                let ids: Vec<PageId> = moving
                    .origins
                    .iter()
                    .map(|(id, _)| *id)
                    .filter(|id| pages.contains(id))
                    .collect();
                if moving.delta.is_zero() || ids.is_empty() {
                    GestureOutcome::Unchanged
                } else {
                    GestureOutcome::FinishedModifying(ids)
                }
            }
            Self::Resize(resize) => {
                if resize.current == resize.orig || !pages.contains(&resize.id) {
                    GestureOutcome::Unchanged
                } else {
                    GestureOutcome::FinishedModifying(vec![resize.id])
                }
            }
        }
    }
}

/// New content frame after dragging `anchor` by `delta`. The sides the
/// handle does not move stay fixed, and the size never drops below `min`.
#[must_use]
pub fn resized_frame(orig: Rect, anchor: ResizeAnchor, delta: Vector, min: Size) -> Rect {
    let (mut min_x, mut max_x) = (orig.min_x(), orig.max_x());
    let (mut min_y, mut max_y) = (orig.min_y(), orig.max_y());
    if anchor.moves_min_x() {
        min_x = (min_x + delta.dx).min(max_x - min.width);
    }
    if anchor.moves_max_x() {
        max_x = (max_x + delta.dx).max(min_x + min.width);
    }
    if anchor.moves_min_y() {
        min_y = (min_y + delta.dy).min(max_y - min.height);
    }
    if anchor.moves_max_y() {
        max_y = (max_y + delta.dy).max(min_y + min.height);
    }
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}
