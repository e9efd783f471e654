//! Tree construction for parser adapters.

use rowan::GreenNodeBuilder;

use super::{GdScriptLanguage, SyntaxKind, SyntaxNode};

/// Builds GDScript syntax trees event-by-event.
///
/// Parser adapters (and test fixtures) drive this the usual rowan way:
/// `start_node`/`token`/`finish_node` in document order, then [`finish`]
/// for the root. Token texts must concatenate back to the exact source
/// text so that node ranges line up with buffer offsets.
///
/// [`finish`]: TreeBuilder::finish
pub struct TreeBuilder {
    builder: GreenNodeBuilder<'static>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self { builder: GreenNodeBuilder::new() }
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    pub fn token(&mut self, kind: SyntaxKind, text: &str) {
        self.builder.token(kind.into(), text);
    }

    pub fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Completes the tree and returns its root node.
    pub fn finish(self) -> SyntaxNode {
        rowan::SyntaxNode::<GdScriptLanguage>::new_root(self.builder.finish())
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
