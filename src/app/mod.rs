//! Frontend-facing input types.
//!
//! The crate has no window loop of its own. A frontend forwards pointer and
//! keyboard events as [`PointerEvent`] and [`Key`] and calls the per-frame
//! entry points of the editor or showcase driver.

pub mod input;

pub use input::{Key, PointerEvent, Viewport};
