//! Page placements and the z-ordered page set.
//!
//! A [`Placement`] is the engine's view of one page: an id, its content frame
//! in page space, and whether it is selected. Placements are created and
//! destroyed by the host's model layer and registered here. [`PageSet`]
//! owns the records, keyed by id, plus a separate list of ids giving the
//! stacking order: the last id is drawn on top and wins hit-tests.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{Point, Rect, Size};
use crate::geometry::PageGeometry;

/// Unique identifier for a page.
pub type PageId = Uuid;

/// Where one page sits on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Identifier shared with the host's model layer.
    pub id: PageId,
    /// Content frame in page space. Always at least the configured minimum once registered.
    content_frame: Rect,
    /// Whether the page is part of the current selection.
    pub selected: bool,
}

impl Placement {
    /// A new, unselected placement. The frame is clamped when registered with an engine.
    #[must_use]
    pub fn new(id: PageId, content_frame: Rect) -> Self {
        Self { id, content_frame, selected: false }
    }

    /// A placement with a freshly generated id.
    #[must_use]
    pub fn with_new_id(content_frame: Rect) -> Self {
        Self::new(Uuid::new_v4(), content_frame)
    }

    #[must_use]
    pub fn content_frame(&self) -> Rect {
        self.content_frame
    }

    /// Replace the content frame, growing its size up to `min` if needed.
    /// The origin is always kept.
    pub fn set_content_frame(&mut self, frame: Rect, min: Size) {
        self.content_frame = Rect::from_origin_size(frame.origin, frame.size.max(min));
    }
}

/// Z-ordered collection of placements.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    records: HashMap<PageId, Placement>,
    order: Vec<PageId>,
}

impl PageSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append pages on top of the stack. A page whose id is already present
    /// replaces the existing record and keeps its position.
    pub fn add(&mut self, pages: impl IntoIterator<Item = Placement>) {
        for page in pages {
            let id = page.id;
            if self.records.insert(id, page).is_none() {
                self.order.push(id);
            }
        }
    }

    /// Remove every page whose id is in `ids`, returning the removed records
    /// in stacking order. Ids that are not present are ignored.
    pub fn remove(&mut self, ids: &[PageId]) -> Vec<Placement> {
        let doomed: HashSet<&PageId> = ids.iter().collect();
        let mut removed = Vec::new();
        self.order.retain(|id| {
            if !doomed.contains(id) {
                return true;
            }
            if let Some(page) = self.records.remove(id) {
                removed.push(page);
            }
            false
        });
        removed
    }

    #[must_use]
    pub fn get(&self, id: &PageId) -> Option<&Placement> {
        self.records.get(id)
    }

    pub fn get_mut(&mut self, id: &PageId) -> Option<&mut Placement> {
        self.records.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &PageId) -> bool {
        self.records.contains_key(id)
    }

    /// Page ids from bottom to top.
    #[must_use]
    pub fn ids(&self) -> &[PageId] {
        &self.order
    }

    /// Every placement from bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Placement> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Every placement from bottom to top, collected.
    #[must_use]
    pub fn all(&self) -> Vec<&Placement> {
        self.iter().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The topmost page whose layout frame contains the canvas point.
    #[must_use]
    pub fn page_at(&self, point: Point, geometry: &PageGeometry<'_>) -> Option<PageId> {
        self.iter()
            .rev()
            .find(|page| geometry.layout_frame(page).contains(point))
            .map(|page| page.id)
    }

    /// Every page whose layout frame intersects the canvas rect, bottom to top.
    #[must_use]
    pub fn pages_in(&self, rect: Rect, geometry: &PageGeometry<'_>) -> Vec<PageId> {
        self.iter()
            .filter(|page| geometry.layout_frame(page).intersects(&rect))
            .map(|page| page.id)
            .collect()
    }

    /// Move a page to the top of the stack. Returns `false` if it is not present.
    pub fn bring_to_front(&mut self, id: &PageId) -> bool {
        let Some(index) = self.order.iter().position(|p| p == id) else {
            return false;
        };
        let id = self.order.remove(index);
        self.order.push(id);
        true
    }

    /// Union of all content frames in page space, each snapped to whole units
    /// first. `None` when the set is empty.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.iter()
            .map(|page| page.content_frame().integral())
            .reduce(|acc, frame| acc.union(&frame))
    }

    /// Ids of the selected pages, bottom to top.
    #[must_use]
    pub fn selected(&self) -> Vec<PageId> {
        self.iter().filter(|page| page.selected).map(|page| page.id).collect()
    }

    /// Select exactly the pages in `ids`; every other page is deselected.
    pub fn set_selection(&mut self, ids: &HashSet<PageId>) {
        for page in self.records.values_mut() {
            page.selected = ids.contains(&page.id);
        }
    }
}
