//! Foundation types shared by the rest of the crate:
//! - [`TextRange`], [`TextSize`] - byte positions in source text
//! - [`LineCol`], [`LineIndex`] - line/column conversion for editor callers
//!
//! This module has no dependencies on other gdscope modules.

mod span;

pub use span::{LineCol, LineIndex};

// Re-export the text-size types; rowan ranges use the same crate.
pub use text_size::{TextRange, TextSize};
