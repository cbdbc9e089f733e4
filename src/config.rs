//! Shared geometry configuration.
//!
//! One [`CanvasConfig`] value is shared by every geometry, hit-testing and
//! routing computation. It is read-only once the engine is built; functions
//! that need it take it as an explicit parameter.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ARROW_CORNER_SIZE, ARROW_END_LENGTH, ARROW_LINE_WIDTH, CANVAS_BORDER, CONTENT_BORDER, CORNER_HANDLE_SIZE,
    EDGE_HANDLE_SIZE, MIN_CONTENT_HEIGHT, MIN_CONTENT_WIDTH, TITLE_BAR_HEIGHT, VISUAL_INSET,
};
use crate::geom::{Insets, Size};

/// Error returned by [`CanvasConfig::from_json`] and [`CanvasConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not a JSON object with the expected field types.
    #[error("failed to parse canvas config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a negative or non-finite value.
    #[error("invalid canvas config value for {field}: {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Constants shared by all page geometry, hit-testing and arrow routing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Smallest size a page's content frame may have.
    pub min_content_size: Size,
    /// Height of the title strip at the top of the visual frame.
    pub title_bar_height: f64,
    /// Side length of the square corner handles.
    pub corner_handle_size: f64,
    /// Thickness of the edge handles.
    pub edge_handle_size: f64,
    /// Gap between the layout frame and the visual frame.
    pub visual_inset: f64,
    /// Border between the visual frame and the content frame.
    pub content_border: f64,
    /// Empty margin kept around the union of all pages on the canvas.
    pub canvas_border: f64,
    /// Length of the straight stub at each end of an arrow.
    pub arrow_end_length: f64,
    /// Radius of arrow elbows.
    pub arrow_corner_size: f64,
    /// Arrow stroke width.
    pub arrow_line_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_content_size: Size::new(MIN_CONTENT_WIDTH, MIN_CONTENT_HEIGHT),
            title_bar_height: TITLE_BAR_HEIGHT,
            corner_handle_size: CORNER_HANDLE_SIZE,
            edge_handle_size: EDGE_HANDLE_SIZE,
            visual_inset: VISUAL_INSET,
            content_border: CONTENT_BORDER,
            canvas_border: CANVAS_BORDER,
            arrow_end_length: ARROW_END_LENGTH,
            arrow_corner_size: ARROW_CORNER_SIZE,
            arrow_line_width: ARROW_LINE_WIDTH,
        }
    }
}

impl CanvasConfig {
    /// Parse a config from a JSON object. Missing fields take their defaults.
    ///
    /// The result is validated but not normalized; see [`Self::normalized`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, [`ConfigError::Invalid`]
    /// for a negative or non-finite value.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject negative or non-finite values.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("min_content_size.width", self.min_content_size.width),
            ("min_content_size.height", self.min_content_size.height),
            ("title_bar_height", self.title_bar_height),
            ("corner_handle_size", self.corner_handle_size),
            ("edge_handle_size", self.edge_handle_size),
            ("visual_inset", self.visual_inset),
            ("content_border", self.content_border),
            ("canvas_border", self.canvas_border),
            ("arrow_end_length", self.arrow_end_length),
            ("arrow_corner_size", self.arrow_corner_size),
            ("arrow_line_width", self.arrow_line_width),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid { field, value });
            }
        }
        Ok(())
    }

    /// Distances from the content frame out to the layout frame.
    ///
    /// Every side carries the visual inset plus the content border; the top
    /// additionally carries the title bar.
    #[must_use]
    pub fn layout_margins(&self) -> Insets {
        let side = self.visual_inset + self.content_border;
        Insets::new(side + self.title_bar_height, side, side, side)
    }

    /// Smallest layout frame size a page can have.
    #[must_use]
    pub fn min_layout_size(&self) -> Size {
        let margins = self.layout_margins();
        Size::new(
            self.min_content_size.width + margins.horizontal(),
            self.min_content_size.height + margins.vertical(),
        )
    }

    /// Raise the minimum content size so that the minimum layout frame fits
    /// two corner handles in each axis.
    #[must_use]
    pub fn normalized(self) -> Self {
        let margins = self.layout_margins();
        let needed = 2.0 * self.corner_handle_size;
        let min = Size::new(
            self.min_content_size.width.max(needed - margins.horizontal()),
            self.min_content_size.height.max(needed - margins.vertical()),
        );
        if min == self.min_content_size {
            return self;
        }
        tracing::warn!(
            width = min.width,
            height = min.height,
            corner_handle_size = self.corner_handle_size,
            "minimum content size raised to fit corner handles"
        );
        Self { min_content_size: min, ..self }
    }
}
