//! The GDScript syntax-tree abstraction consumed by the semantic model.
//!
//! Trees are rowan green/red trees over the [`SyntaxKind`] vocabulary.
//! The crate never parses GDScript itself: a host-provided
//! [`ScriptParser`] produces trees, typically by adapting a tree-sitter
//! grammar through [`TreeBuilder`].

mod build;
mod kind;
pub mod walk;

pub use build::TreeBuilder;
pub use kind::{GdScriptLanguage, SyntaxKind};

/// A syntax node (named grammar production) in a GDScript tree.
pub type SyntaxNode = rowan::SyntaxNode<GdScriptLanguage>;
/// A syntax token (leaf with text).
pub type SyntaxToken = rowan::SyntaxToken<GdScriptLanguage>;
/// Either a node or a token.
pub type SyntaxElement = rowan::SyntaxElement<GdScriptLanguage>;

/// The external parser collaborator.
///
/// Implementations turn script source into a [`SyntaxNode`] root of kind
/// [`SyntaxKind::Source`], or `None` when no tree can be produced at all.
/// Partial input should still yield a tree, with [`SyntaxKind::Error`]
/// nodes covering the unparseable stretches; the ide layer's error
/// recovery depends on that.
pub trait ScriptParser {
    fn parse(&self, text: &str) -> Option<SyntaxNode>;
}
