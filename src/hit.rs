#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::config::CanvasConfig;
use crate::geom::{Point, Rect, Size};
use crate::geometry::{PageGeometry, title_bar_frame};
use crate::page::{PageId, PageSet};

/// Which interactive zone of a page was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitPart {
    ResizeHandle(ResizeAnchor),
    TitleBar,
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    /// Hit-test priority: corners first, then edges.
    pub const PRIORITY: [ResizeAnchor; 8] = [
        ResizeAnchor::Nw,
        ResizeAnchor::Ne,
        ResizeAnchor::Sw,
        ResizeAnchor::Se,
        ResizeAnchor::N,
        ResizeAnchor::S,
        ResizeAnchor::W,
        ResizeAnchor::E,
    ];

    #[must_use]
    pub fn is_corner(self) -> bool {
        matches!(self, Self::Ne | Self::Se | Self::Sw | Self::Nw)
    }

    /// Dragging this handle moves the left edge.
    #[must_use]
    pub fn moves_min_x(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Dragging this handle moves the right edge.
    #[must_use]
    pub fn moves_max_x(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Dragging this handle moves the top edge.
    #[must_use]
    pub fn moves_min_y(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Dragging this handle moves the bottom edge.
    #[must_use]
    pub fn moves_max_y(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// The handle on the far side of the frame, which stays fixed while this one is dragged.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::N => Self::S,
            Self::Ne => Self::Sw,
            Self::E => Self::W,
            Self::Se => Self::Nw,
            Self::S => Self::N,
            Self::Sw => Self::Ne,
            Self::W => Self::E,
            Self::Nw => Self::Se,
        }
    }
}

/// Result of a hit test against the page set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub page_id: PageId,
    /// `None` when the point lands on the page but outside every handle and the title bar.
    pub part: Option<HitPart>,
}

/// Zone of `part` for a layout frame of `layout_size`, in layout-local coordinates.
#[must_use]
pub fn rect_for(part: HitPart, layout_size: Size, config: &CanvasConfig) -> Rect {
    let HitPart::ResizeHandle(anchor) = part else {
        return title_bar_frame(layout_size, config);
    };

    let (w, h) = (layout_size.width, layout_size.height);
    let c = config.corner_handle_size;
    let e = config.edge_handle_size;
    let span_x = (w - 2.0 * c).max(0.0);
    let span_y = (h - 2.0 * c).max(0.0);
    match anchor {
        ResizeAnchor::Nw => Rect::new(0.0, 0.0, c, c),
        ResizeAnchor::Ne => Rect::new(w - c, 0.0, c, c),
        ResizeAnchor::Sw => Rect::new(0.0, h - c, c, c),
        ResizeAnchor::Se => Rect::new(w - c, h - c, c, c),
        ResizeAnchor::N => Rect::new(c, 0.0, span_x, e),
        ResizeAnchor::S => Rect::new(c, h - e, span_x, e),
        ResizeAnchor::W => Rect::new(0.0, c, e, span_y),
        ResizeAnchor::E => Rect::new(w - e, c, e, span_y),
    }
}

/// Which zone contains `local_pt` (layout-local coordinates). Handles are
/// tested before the title bar so they win where the two overlap.
#[must_use]
pub fn component_at(local_pt: Point, layout_size: Size, config: &CanvasConfig) -> Option<HitPart> {
    ResizeAnchor::PRIORITY
        .iter()
        .map(|&anchor| HitPart::ResizeHandle(anchor))
        .chain(std::iter::once(HitPart::TitleBar))
        .find(|&part| rect_for(part, layout_size, config).contains(local_pt))
}

/// The topmost page under the canvas point and the zone of it that was hit.
#[must_use]
pub fn hit_test(canvas_pt: Point, pages: &PageSet, geometry: &PageGeometry<'_>) -> Option<Hit> {
    let page_id = pages.page_at(canvas_pt, geometry)?;
    let page = pages.get(&page_id)?;
    let layout = geometry.layout_frame(page);
    let local = Point::ZERO + (canvas_pt - layout.origin);
    Some(Hit { page_id, part: component_at(local, layout.size, geometry.config()) })
}
