//! Page space ↔ canvas space bookkeeping.
//!
//! Page frames are stored in page space, which is unbounded in every
//! direction. The view scrolls a canvas whose coordinates start at zero, so
//! the engine keeps a single offset that maps page space onto canvas space
//! and recomputes it whenever the pages or the viewport change. The recompute
//! reports how far the offset moved so the view can compensate its scroll
//! position without a visual jump.

#[cfg(test)]
#[path = "space_test.rs"]
mod space_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Point, Rect, Size, Vector};

/// Notification sent to the host whenever the canvas layout changes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutChange {
    /// The scrollable canvas size differs from before.
    pub size_changed: bool,
    /// How far the page→canvas offset moved, when it was recomputed.
    pub offset_delta: Option<Vector>,
}

impl LayoutChange {
    /// Generic "something moved, redraw" notification with no size or offset claims.
    #[must_use]
    pub fn redraw() -> Self {
        Self::default()
    }
}

/// The page→canvas offset and the current canvas size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateSpace {
    offset: Vector,
    size: Size,
}

impl CoordinateSpace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Vector added to page-space coordinates to obtain canvas-space coordinates.
    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }

    /// Size of the scrollable canvas.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub fn to_canvas(&self, page: Point) -> Point {
        page + self.offset
    }

    #[must_use]
    pub fn to_page(&self, canvas: Point) -> Point {
        canvas - self.offset
    }

    #[must_use]
    pub fn rect_to_canvas(&self, page: Rect) -> Rect {
        page.translate(self.offset)
    }

    #[must_use]
    pub fn rect_to_page(&self, canvas: Rect) -> Rect {
        Rect::from_origin_size(canvas.origin - self.offset, canvas.size)
    }

    /// Recompute the offset and size so that `content` (the union of all
    /// page frames, or `None` for an empty canvas) outset by `border`, plus
    /// the viewport when one is known and the canvas is not empty, lies
    /// entirely at non-negative canvas coordinates.
    ///
    /// `viewport` is in canvas space under the offset in effect before the call.
    pub fn fit(&mut self, content: Option<Rect>, border: f64, viewport: Option<Rect>) -> LayoutChange {
        let mut bounds = content.unwrap_or(Rect::ZERO).outset(border);
        if let (Some(_), Some(viewport)) = (content, viewport) {
            bounds = bounds.union(&self.rect_to_page(viewport));
        }

        let old_offset = self.offset;
        let old_size = self.size;
        self.offset = -Vector::new(bounds.min_x(), bounds.min_y());
        self.size = bounds.size;

        let change = LayoutChange {
            size_changed: self.size != old_size,
            offset_delta: Some(self.offset - old_offset),
        };
        tracing::trace!(
            offset_x = self.offset.dx,
            offset_y = self.offset.dy,
            width = self.size.width,
            height = self.size.height,
            delta_x = self.offset.dx - old_offset.dx,
            delta_y = self.offset.dy - old_offset.dy,
            size_changed = change.size_changed,
            "canvas size recomputed"
        );
        change
    }
}
