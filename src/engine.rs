use std::collections::HashSet;

use crate::config::{CanvasConfig, ConfigError};
use crate::geom::{Point, Rect, Size, Vector};
use crate::geometry::PageGeometry;
use crate::hit::{HitPart, hit_test};
use crate::input::{Gesture, GestureOutcome, InputState, Modifiers};
use crate::page::{PageId, PageSet, Placement};
use crate::route::{Arrow, ArrowPath, route_arrows};
use crate::space::{CoordinateSpace, LayoutChange};
use crate::tree::{ContainmentForest, LinkSource};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The canvas needs redrawing; may also carry a new size or offset.
    LayoutChanged(LayoutChange),
    /// The selection changed; carries the selected ids in z-order.
    SelectionChanged(Vec<PageId>),
    /// A gesture changed these pages' frames. Sent once, at pointer-up.
    FinishedModifying(Vec<PageId>),
}

/// Engine state: pages, the coordinate offset, the viewport and the gesture
/// in progress. Free of any view-layer types so it can be driven from tests.
#[derive(Debug, Clone)]
pub struct CanvasEngine {
    config: CanvasConfig,
    pages: PageSet,
    space: CoordinateSpace,
    viewport: Option<Rect>,
    input: InputState,
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl CanvasEngine {
    /// Create an empty engine. The config is normalized first.
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        let mut engine = Self {
            config: config.normalized(),
            pages: PageSet::new(),
            space: CoordinateSpace::new(),
            viewport: None,
            input: InputState::default(),
        };
        engine.recompute();
        engine
    }

    /// Create an engine from a JSON config object.
    ///
    /// # Errors
    ///
    /// Whatever [`CanvasConfig::from_json`] rejects.
    pub fn from_json_config(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(CanvasConfig::from_json(raw)?))
    }

    // --- Data inputs ---

    /// Register pages on top of the stack, clamping each frame to the
    /// minimum size, and recompute the canvas. A gesture in progress is
    /// re-anchored to the new offset.
    pub fn add_pages(&mut self, pages: impl IntoIterator<Item = Placement>) -> LayoutChange {
        let min = self.config.min_content_size;
        self.pages.add(pages.into_iter().map(|mut page| {
            page.set_content_frame(page.content_frame(), min);
            page
        }));
        self.recompute()
    }

    /// Unregister pages and recompute the canvas. Absent ids are ignored.
    pub fn remove_pages(&mut self, ids: &[PageId]) -> LayoutChange {
        let removed = self.pages.remove(ids);
        tracing::debug!(requested = ids.len(), removed = removed.len(), "pages removed");
        self.recompute()
    }

    /// Replace one page's content frame from outside a gesture. Returns
    /// `None` if the page is not registered.
    pub fn set_content_frame(&mut self, id: &PageId, frame: Rect) -> Option<LayoutChange> {
        let geometry = PageGeometry::for_space(&self.config, &self.space);
        geometry.set_content_frame(self.pages.get_mut(id)?, frame);
        Some(self.recompute())
    }

    /// Record the host's visible rect, in canvas space. Recomputes only
    /// while no gesture is in progress.
    pub fn viewport_changed(&mut self, viewport: Rect) -> Vec<Action> {
        self.viewport = Some(viewport);
        if !self.input.is_idle() {
            tracing::trace!("viewport change deferred until gesture ends");
            return vec![];
        }
        vec![Action::LayoutChanged(self.recompute())]
    }

    // --- Selection ---

    /// Select exactly `ids`.
    pub fn select_only(&mut self, ids: &[PageId]) -> Vec<Action> {
        self.apply_selection(&ids.iter().copied().collect()).into_iter().collect()
    }

    pub fn select_all(&mut self) -> Vec<Action> {
        let all = self.pages.ids().iter().copied().collect();
        self.apply_selection(&all).into_iter().collect()
    }

    pub fn deselect_all(&mut self) -> Vec<Action> {
        self.apply_selection(&HashSet::new()).into_iter().collect()
    }

    fn apply_selection(&mut self, ids: &HashSet<PageId>) -> Option<Action> {
        let before = self.pages.selected();
        self.pages.set_selection(ids);
        let after = self.pages.selected();
        (before != after).then_some(Action::SelectionChanged(after))
    }

    // --- Input events ---

    /// Pointer pressed at a canvas point. Starts a new gesture; a gesture
    /// still in progress is rolled back first.
    pub fn down(&mut self, point: Point, modifiers: Modifiers) -> Vec<Action> {
        let (mut actions, shift) = self.cancel_gesture();
        let point = point + shift;

        let geometry = PageGeometry::for_space(&self.config, &self.space);
        let Some(hit) = hit_test(point, &self.pages, &geometry) else {
            let snapshot = self.pages.selected();
            if !modifiers.shift && !snapshot.is_empty() {
                actions.extend(self.apply_selection(&HashSet::new()));
            }
            tracing::debug!(x = point.x, y = point.y, extend = modifiers.shift, "rect select started");
            self.input = InputState::Active(Gesture::rect_select(point, snapshot, modifiers.shift));
            return actions;
        };

        let id = hit.page_id;
        self.pages.bring_to_front(&id);
        actions.push(Action::LayoutChanged(LayoutChange::redraw()));
        actions.extend(self.click_select(id, modifiers));

        let gesture = match hit.part {
            Some(HitPart::TitleBar) => Some(Gesture::move_pages(point, &self.pages.selected(), &self.pages)),
            Some(HitPart::ResizeHandle(anchor)) => Gesture::resize(point, id, anchor, &self.pages),
            None => None,
        };
        match gesture {
            Some(gesture) => {
                tracing::debug!(kind = gesture.kind(), %id, part = ?hit.part, "gesture started");
                self.input = InputState::Active(gesture);
            }
            None => tracing::debug!(%id, "content clicked"),
        }
        actions
    }

    /// Pointer moved with the button held.
    pub fn dragged(&mut self, point: Point, _modifiers: Modifiers) -> Vec<Action> {
        let InputState::Active(gesture) = &mut self.input else {
            return vec![];
        };
        let geometry = PageGeometry::for_space(&self.config, &self.space);
        gesture.dragged(point, &mut self.pages, &geometry);
        vec![Action::LayoutChanged(LayoutChange::redraw())]
    }

    /// Pointer released. Finishes the gesture, recomputes the canvas and
    /// returns to idle.
    pub fn up(&mut self, point: Point, _modifiers: Modifiers) -> Vec<Action> {
        let InputState::Active(gesture) = std::mem::take(&mut self.input) else {
            return vec![];
        };
        let kind = gesture.kind();
        let geometry = PageGeometry::for_space(&self.config, &self.space);
        let outcome = gesture.up(point, &mut self.pages, &geometry);
        tracing::debug!(kind, ?outcome, "gesture ended");

        let mut actions = match outcome {
            GestureOutcome::SelectionCommitted(ids) => vec![Action::SelectionChanged(ids)],
            GestureOutcome::FinishedModifying(ids) => vec![Action::FinishedModifying(ids)],
            GestureOutcome::Unchanged => vec![],
        };
        actions.push(Action::LayoutChanged(self.recompute()));
        actions
    }

    /// Roll back a gesture that never saw its pointer-up. Returns the
    /// resulting actions and how far the offset moved.
    fn cancel_gesture(&mut self) -> (Vec<Action>, Vector) {
        let InputState::Active(stale) = std::mem::take(&mut self.input) else {
            return (vec![], Vector::ZERO);
        };
        let kind = stale.kind();
        let before = self.pages.selected();
        let geometry = PageGeometry::for_space(&self.config, &self.space);
        let restored = stale.cancel(&mut self.pages, &geometry);
        tracing::debug!(kind, restored, "gesture replaced before pointer-up");

        let mut actions = vec![];
        let after = self.pages.selected();
        if before != after {
            actions.push(Action::SelectionChanged(after));
        }
        let mut shift = Vector::ZERO;
        if restored {
            let change = self.recompute();
            shift = change.offset_delta.unwrap_or_default();
            actions.push(Action::LayoutChanged(change));
        }
        (actions, shift)
    }

    /// Selection update for a pointer-down on a page. Shift adds the page;
    /// otherwise an unselected page becomes the only selection. Clicking an
    /// already-selected page keeps the selection so it can be dragged as a group.
    fn click_select(&mut self, id: PageId, modifiers: Modifiers) -> Option<Action> {
        if self.pages.get(&id)?.selected {
            return None;
        }
        let mut ids: HashSet<PageId> = if modifiers.shift {
            self.pages.selected().into_iter().collect()
        } else {
            HashSet::new()
        };
        ids.insert(id);
        self.apply_selection(&ids)
    }

    // --- Layout ---

    fn recompute(&mut self) -> LayoutChange {
        let change = self.space.fit(self.pages.content_bounds(), self.config.canvas_border, self.viewport);
        // The host scroll-compensates by the delta; keep the viewport and any
        // gesture anchored to the same page-space positions.
        if let Some(delta) = change.offset_delta {
            self.viewport = self.viewport.map(|viewport| viewport.translate(delta));
            if let InputState::Active(gesture) = &mut self.input {
                gesture.offset_moved(delta);
            }
        }
        change
    }

    // --- Routing ---

    /// Build containment trees from `roots` and route every arrow between
    /// visual frames, in canvas space.
    #[must_use]
    pub fn route_arrows(&self, roots: &[PageId], links: &impl LinkSource) -> Vec<Arrow> {
        let geometry = self.geometry();
        let forest = ContainmentForest::build(roots, links, |id| {
            self.pages.get(&id).map(|page| geometry.visual_frame_in_canvas(page))
        });
        route_arrows(&forest)
    }

    /// Drawable paths for routed arrows.
    #[must_use]
    pub fn arrow_paths(&self, arrows: &[Arrow]) -> Vec<ArrowPath> {
        arrows.iter().map(|arrow| ArrowPath::between(arrow, &self.config)).collect()
    }

    // --- Queries ---

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Registered pages in z-order.
    #[must_use]
    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    #[must_use]
    pub fn page(&self, id: &PageId) -> Option<&Placement> {
        self.pages.get(id)
    }

    /// Geometry calculator for the current offset.
    #[must_use]
    pub fn geometry(&self) -> PageGeometry<'_> {
        PageGeometry::for_space(&self.config, &self.space)
    }

    /// Selected page ids in z-order.
    #[must_use]
    pub fn selection(&self) -> Vec<PageId> {
        self.pages.selected()
    }

    /// The rubber-band rectangle in canvas space while a rect select is in progress.
    #[must_use]
    pub fn selection_rect(&self) -> Option<Rect> {
        self.input.gesture().and_then(Gesture::selection_rect)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.input.is_idle()
    }

    /// The gesture in progress, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&Gesture> {
        self.input.gesture()
    }

    /// Last viewport reported by the host, in canvas space.
    #[must_use]
    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    #[must_use]
    pub fn offset(&self) -> Vector {
        self.space.offset()
    }

    #[must_use]
    pub fn canvas_size(&self) -> Size {
        self.space.size()
    }

    #[must_use]
    pub fn to_canvas(&self, page: Point) -> Point {
        self.space.to_canvas(page)
    }

    #[must_use]
    pub fn to_page(&self, canvas: Point) -> Point {
        self.space.to_page(canvas)
    }

    #[must_use]
    pub fn rect_to_canvas(&self, page: Rect) -> Rect {
        self.space.rect_to_canvas(page)
    }

    #[must_use]
    pub fn rect_to_page(&self, canvas: Rect) -> Rect {
        self.space.rect_to_page(canvas)
    }
}
