//! Completion-oriented queries: locate the syntax element at the cursor
//! (recovering from mid-typing input) and enumerate the symbols to offer
//! there.

use text_size::TextSize;
use tracing::debug;

use crate::hir::Symbol;
use crate::project::ProjectIndex;
use crate::syntax::{walk, ScriptParser, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// The syntax element at `offset`, the byte offset of the character the
/// query is about, typically one before the cursor.
///
/// A trailing accessor dot is the common mid-typing shape (`foo.` at the
/// end of a block) and parses into an error production. Recovery:
/// splice a one-character placeholder identifier after the dot, re-parse
/// through the same parser, and locate the element in the recovered
/// tree, which now carries a well-formed attribute chain up to the dot.
pub fn element_for_completion(
    parser: &dyn ScriptParser,
    text: &str,
    offset: TextSize,
) -> Option<SyntaxElement> {
    let root = parser.parse(text)?;
    let token = token_at(&root, offset)?;

    if token.kind() == SyntaxKind::Dot
        && token.parent().is_some_and(|parent| walk::has_error(&parent))
    {
        debug!("recovering from trailing accessor dot");
        let end: usize = token.text_range().end().into();
        let mut patched = String::with_capacity(text.len() + 1);
        patched.push_str(&text[..end]);
        patched.push('a');
        patched.push_str(&text[end..]);

        let root = parser.parse(&patched)?;
        let token = token_at(&root, offset)?;
        return Some(element_of(token));
    }

    Some(element_of(token))
}

fn token_at(root: &SyntaxNode, offset: TextSize) -> Option<SyntaxToken> {
    match root.token_at_offset(offset) {
        rowan::TokenAtOffset::None => None,
        single_or_between => single_or_between.right_biased(),
    }
}

/// Identifier-ish tokens stand for their wrapping node; punctuation
/// stays a bare token (the attribute walk compares against it).
fn element_of(token: SyntaxToken) -> SyntaxElement {
    match token.parent() {
        Some(parent)
            if matches!(
                parent.kind(),
                SyntaxKind::Identifier
                    | SyntaxKind::Name
                    | SyntaxKind::Type
                    | SyntaxKind::SelfExpr
            ) =>
        {
            SyntaxElement::Node(parent)
        }
        _ => SyntaxElement::Token(token),
    }
}

/// The symbols to offer at `offset` in `text`.
///
/// Rebuilds the temporary scopes for the position, then dispatches on
/// where the cursor sits: inside an attribute chain, on a bare
/// identifier (prefix-filtered through the scope chain plus the
/// enclosing class's ancestry), on an `extends`/type position (all
/// class symbols), or on the bare name of an errored-out function
/// header (overridable methods of the script's parent class;
/// `script_name` is the key the current script was indexed under).
pub fn symbols_at(
    project: &mut ProjectIndex,
    text: &str,
    offset: TextSize,
    prefix: &str,
    script_name: &str,
) -> Vec<Symbol> {
    let Some(element) = element_for_completion(project.parser(), text, offset) else {
        return Vec::new();
    };
    let node = match &element {
        SyntaxElement::Node(node) => Some(node.clone()),
        SyntaxElement::Token(token) => token.parent(),
    };
    let Some(node) = node else {
        return Vec::new();
    };

    project.index_local_scope(Some(&node));

    if let Some(attribute) = walk::ancestor_of_kind(&node, SyntaxKind::Attribute) {
        return project.get_symbols_for_attribute(&attribute, &element);
    }

    match node.kind() {
        SyntaxKind::Identifier => {
            let resolver = project.resolver();
            let mut results = Vec::new();
            if let Some(self_class) = project.former().form_self_class_symbol(&node) {
                results.extend(resolver.ancestry_symbols(&self_class));
            }
            results.extend(project.index().find(prefix));
            results
        }
        SyntaxKind::ExtendsStatement | SyntaxKind::Type => project.resolver().all_class_symbols(),
        SyntaxKind::Name => {
            // A `name` with no class definition around it means the
            // function header is errored out mid-typing; offer the
            // parent class's methods for overriding.
            if walk::ancestor_of_kind(&node, SyntaxKind::ClassDefinition).is_some() {
                return Vec::new();
            }
            let resolver = project.resolver();
            let Some(script) = project.index().lookup(script_name) else {
                return Vec::new();
            };
            let Some(parent) = resolver.parent_of(&script) else {
                return Vec::new();
            };
            resolver.ancestry_methods(&parent)
        }
        _ => Vec::new(),
    }
}
