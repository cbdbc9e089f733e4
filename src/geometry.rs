//! Derived per-page frames.
//!
//! Every frame here is a pure function of one placement's content frame, the
//! shared [`CanvasConfig`] and the current page→canvas offset. Nothing is
//! cached: callers recompute on every access.
//!
//! ```text
//! layout frame (canvas space)
//! ┌──────────────────────────────┐
//! │ visual inset                 │
//! │  ┌────────────────────────┐  │
//! │  │ title bar              │  │
//! │  ├────────────────────────┤  │
//! │  │ content sub-frame      │  │
//! │  │  ┌──────────────────┐  │  │
//! │  │  │ content frame    │  │  │
//! │  │  └──────────────────┘  │  │
//! │  └────────────────────────┘  │
//! └──────────────────────────────┘
//! ```
//!
//! The visual, title bar and content sub-frames are in the layout frame's
//! local coordinates (origin at its top-left corner).

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::config::CanvasConfig;
use crate::geom::{Point, Rect, Size, Vector};
use crate::page::Placement;
use crate::space::CoordinateSpace;

/// Geometry calculator bound to one configuration and offset.
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry<'a> {
    config: &'a CanvasConfig,
    offset: Vector,
}

impl<'a> PageGeometry<'a> {
    #[must_use]
    pub fn new(config: &'a CanvasConfig, offset: Vector) -> Self {
        Self { config, offset }
    }

    #[must_use]
    pub fn for_space(config: &'a CanvasConfig, space: &CoordinateSpace) -> Self {
        Self::new(config, space.offset())
    }

    #[must_use]
    pub fn config(&self) -> &'a CanvasConfig {
        self.config
    }

    /// Replace the content frame, clamping its size up to the configured minimum.
    pub fn set_content_frame(&self, page: &mut Placement, frame: Rect) {
        page.set_content_frame(frame, self.config.min_content_size);
    }

    /// Content frame mapped to canvas space and grown by the layout margins.
    #[must_use]
    pub fn layout_frame(&self, page: &Placement) -> Rect {
        page.content_frame().translate(self.offset).outset_by(self.config.layout_margins())
    }

    /// Inverse of [`Self::layout_frame`]: shrink by the margins, map back to
    /// page space and store the result as the content frame.
    pub fn set_layout_frame(&self, page: &mut Placement, layout: Rect) {
        let content = layout.inset_by(self.config.layout_margins()).translate(-self.offset);
        self.set_content_frame(page, content);
    }

    /// The drawn page outline, in layout-local coordinates.
    #[must_use]
    pub fn visual_frame(&self, page: &Placement) -> Rect {
        visual_frame(self.layout_frame(page).size, self.config)
    }

    /// The title strip at the top of the visual frame, in layout-local coordinates.
    #[must_use]
    pub fn title_bar_frame(&self, page: &Placement) -> Rect {
        title_bar_frame(self.layout_frame(page).size, self.config)
    }

    /// The visual frame below the title bar, in layout-local coordinates.
    #[must_use]
    pub fn content_sub_frame(&self, page: &Placement) -> Rect {
        content_sub_frame(self.layout_frame(page).size, self.config)
    }

    /// The visual frame in canvas space. Arrows attach to this outline.
    #[must_use]
    pub fn visual_frame_in_canvas(&self, page: &Placement) -> Rect {
        let layout = self.layout_frame(page);
        visual_frame(layout.size, self.config).translate(layout.origin - Point::ZERO)
    }
}

/// Visual frame for a layout frame of the given size.
#[must_use]
pub fn visual_frame(layout_size: Size, config: &CanvasConfig) -> Rect {
    Rect::from_origin_size(Point::ZERO, layout_size).inset(config.visual_inset)
}

/// Title bar for a layout frame of the given size.
#[must_use]
pub fn title_bar_frame(layout_size: Size, config: &CanvasConfig) -> Rect {
    let visual = visual_frame(layout_size, config);
    let height = config.title_bar_height.min(visual.height());
    Rect::from_origin_size(visual.origin, Size::new(visual.width(), height))
}

/// Content sub-frame for a layout frame of the given size.
#[must_use]
pub fn content_sub_frame(layout_size: Size, config: &CanvasConfig) -> Rect {
    let visual = visual_frame(layout_size, config);
    let title = title_bar_frame(layout_size, config);
    Rect::new(visual.min_x(), title.max_y(), visual.width(), visual.max_y() - title.max_y())
}
