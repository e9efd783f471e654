//! Tree traversal helpers used by the structurer and the queries.

use super::{SyntaxElement, SyntaxKind, SyntaxNode};

/// An explicit, resettable cursor over sibling/child structure.
///
/// The class structurer drives this instead of recursing so that deeply
/// nested class bodies cannot exhaust the call stack; it resets the
/// cursor to a saved node when it pops a work-stack frame.
pub struct TreeCursor {
    node: SyntaxNode,
}

impl TreeCursor {
    pub fn new(node: SyntaxNode) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &SyntaxNode {
        &self.node
    }

    pub fn kind(&self) -> SyntaxKind {
        self.node.kind()
    }

    pub fn reset(&mut self, node: SyntaxNode) {
        self.node = node;
    }

    pub fn goto_first_child(&mut self) -> bool {
        match self.node.first_child() {
            Some(child) => {
                self.node = child;
                true
            }
            None => false,
        }
    }

    pub fn goto_next_sibling(&mut self) -> bool {
        match self.node.next_sibling() {
            Some(sibling) => {
                self.node = sibling;
                true
            }
            None => false,
        }
    }
}

/// Iterator over a node and everything lexically before it: previous
/// siblings first, then the parent, then the parent's previous siblings,
/// and so on up to the root.
///
/// Callers apply their own stop predicates (function and class
/// boundaries) by breaking out of the loop; the iterator itself carries
/// no state beyond the current node, so a walk can be restarted anywhere.
pub fn preceding(node: SyntaxNode) -> impl Iterator<Item = SyntaxNode> {
    std::iter::successors(Some(node), |current| {
        current.prev_sibling().or_else(|| current.parent())
    })
}

/// First child node of the given kind.
pub fn child_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|child| child.kind() == kind)
}

/// The `name` child of a declaration node.
pub fn node_name(node: &SyntaxNode) -> Option<SyntaxNode> {
    child_of_kind(node, SyntaxKind::Name)
}

/// Text of a declaration's `name` child, or empty.
pub fn node_name_text(node: &SyntaxNode) -> String {
    text_of(node_name(node).as_ref())
}

/// The body of a class or function definition. Bodies sit at the end of
/// their definition, so search from the back.
pub fn node_body(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children().filter(|child| child.kind() == SyntaxKind::Body).last()
}

/// Text of an optional node, or empty when absent.
pub fn text_of(node: Option<&SyntaxNode>) -> String {
    node.map(|n| n.text().to_string()).unwrap_or_default()
}

/// Text of the first child of the given kind, or empty.
pub fn child_text_of_kind(node: Option<&SyntaxNode>, kind: SyntaxKind) -> String {
    text_of(node.and_then(|n| child_of_kind(n, kind)).as_ref())
}

/// First descendant (including `node` itself) of the given kind.
pub fn descendant_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.descendants().find(|n| n.kind() == kind)
}

/// Nearest ancestor (including `node` itself) of the given kind.
pub fn ancestor_of_kind(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.ancestors().find(|n| n.kind() == kind)
}

/// Last child element that is not trivia. Used for literal value text,
/// where the value is whatever trails the declaration.
pub fn last_child_ignoring_trivia(node: &SyntaxNode) -> Option<SyntaxElement> {
    node.children_with_tokens()
        .filter(|element| !element.kind().is_trivia())
        .last()
}

/// Whether the subtree rooted at `node` contains an error production.
pub fn has_error(node: &SyntaxNode) -> bool {
    node.descendants().any(|n| n.kind() == SyntaxKind::Error)
}
