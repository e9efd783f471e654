//! Cursor-position queries for editor tooling.
//!
//! Pure functions over the semantic model: a buffer snapshot and a byte
//! offset in, symbols out. No editor types appear here; hosts convert
//! their positions with [`crate::base::LineIndex`] and shape the
//! returned symbols into their own completion items.

mod completion;

pub use completion::{element_for_completion, symbols_at};
