//! Default numeric constants for the canvas crate.

// ── Page chrome ─────────────────────────────────────────────────

/// Smallest content width a page may be resized to, in page units.
pub const MIN_CONTENT_WIDTH: f64 = 120.0;

/// Smallest content height a page may be resized to, in page units.
pub const MIN_CONTENT_HEIGHT: f64 = 80.0;

/// Height of the draggable title strip at the top of every page.
pub const TITLE_BAR_HEIGHT: f64 = 22.0;

/// Side length of the four square corner resize handles.
pub const CORNER_HANDLE_SIZE: f64 = 14.0;

/// Thickness of the four edge resize handles.
pub const EDGE_HANDLE_SIZE: f64 = 6.0;

/// Gap between the layout frame and the drawn page outline.
pub const VISUAL_INSET: f64 = 6.0;

/// Border drawn around the content area inside the page outline.
pub const CONTENT_BORDER: f64 = 1.0;

// ── Canvas ──────────────────────────────────────────────────────

/// Empty margin kept around the union of all pages.
pub const CANVAS_BORDER: f64 = 1000.0;

// ── Arrows ──────────────────────────────────────────────────────

/// Length of the straight stub leaving and entering a page edge.
pub const ARROW_END_LENGTH: f64 = 16.0;

/// Radius of the rounded elbows in a connector path.
pub const ARROW_CORNER_SIZE: f64 = 6.0;

/// Stroke width of connector arrows.
pub const ARROW_LINE_WIDTH: f64 = 1.5;
