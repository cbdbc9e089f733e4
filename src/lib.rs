//! Spatial layout engine for an infinite canvas of linked pages.
//!
//! Pages are scattered freely across an unbounded 2-D surface. This crate owns
//! the bookkeeping that keeps that surface addressable with finite,
//! non-negative coordinates, the per-page geometry used for drawing and
//! hit-testing, the pointer-gesture state machine that moves and resizes
//! pages, and the tree-based router that lays out connector arrows between
//! linked pages. The host view layer is responsible only for wiring pointer
//! events to the engine, drawing what it reports, and persisting the
//! resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::CanvasEngine`] and the actions it emits |
//! | [`page`] | Page placements and the z-ordered [`page::PageSet`] |
//! | [`space`] | Page-space ↔ canvas-space offset and size recompute |
//! | [`geometry`] | Derived per-page frames (layout, visual, title bar, content) |
//! | [`hit`] | Resize handles, title bar and hit-testing |
//! | [`input`] | Modifier keys and the select/move/resize gesture contexts |
//! | [`tree`] | Containment trees built from page links |
//! | [`route`] | Arrow endpoint allocation and connector paths |
//! | [`geom`] | Points, vectors, sizes and rectangles |
//! | [`config`] | Shared geometry configuration |
//! | [`consts`] | Default numeric constants |

pub mod config;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod page;
pub mod route;
pub mod space;
pub mod tree;

pub use config::{CanvasConfig, ConfigError};
pub use engine::{Action, CanvasEngine};
pub use geom::{Insets, Point, Rect, Size, Vector};
pub use page::{PageId, PageSet, Placement};
