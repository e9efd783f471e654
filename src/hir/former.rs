//! The tree structurer: syntax nodes in, symbol structures out.
//!
//! [`TreeFormer`] converts one classified syntax node into one
//! [`Structure`], assembles whole class symbols from (sub)trees with an
//! explicit work stack, reconstructs the enclosing class for a cursor
//! node, and builds the stack of lexically-visible local scopes by
//! walking backward from a cursor node.

use smol_str::SmolStr;

use crate::syntax::{walk, SyntaxElement, SyntaxKind, SyntaxNode};

use super::scope::Scope;
use super::symbols::{
    ArgumentInfo, ClassInfo, ConstantInfo, MemberInfo, MethodInfo, ReturnInfo, SignalInfo,
    Structure, Symbol, DEFAULT_INHERITANCE,
};

/// GDScript accepts both quote styles; inheritance keys are normalized to
/// single quotes so `extends "res://a.gd"` and `extends 'res://a.gd'`
/// land in the same key space.
fn normalize_quotes(text: &str) -> String {
    text.replace('"', "'")
}

fn element_text(element: &SyntaxElement) -> String {
    match element {
        SyntaxElement::Node(node) => node.text().to_string(),
        SyntaxElement::Token(token) => token.text().to_string(),
    }
}

/// Converts syntax (sub)trees into symbol structures.
#[derive(Debug, Default)]
pub struct TreeFormer;

impl TreeFormer {
    pub fn new() -> Self {
        Self
    }

    /// The inherited type declared by an `extends` statement: every
    /// non-trivia token after the keyword, concatenated and
    /// quote-normalized. Anything that is not an extends statement means
    /// the default parent type.
    pub fn inheriting_type_from_extends(&self, node: Option<&SyntaxNode>) -> SmolStr {
        let Some(node) = node.filter(|n| n.kind() == SyntaxKind::ExtendsStatement) else {
            return SmolStr::new_static(DEFAULT_INHERITANCE);
        };
        let mut inheritance = String::new();
        for element in node.children_with_tokens() {
            if element.kind() == SyntaxKind::ExtendsKw || element.kind().is_trivia() {
                continue;
            }
            inheritance.push_str(&element_text(&element));
        }
        SmolStr::new(normalize_quotes(&inheritance))
    }

    /// The inherited type of a class definition (or a source root),
    /// read from its extends statement when present.
    pub fn inheriting_type_of(&self, node: &SyntaxNode) -> SmolStr {
        self.inheriting_type_from_extends(
            walk::child_of_kind(node, SyntaxKind::ExtendsStatement).as_ref(),
        )
    }

    /// The global name declared by a `class_name` statement.
    pub fn class_name_of(&self, node: &SyntaxNode) -> Option<SmolStr> {
        if node.kind() != SyntaxKind::ClassNameStatement {
            return None;
        }
        walk::node_name(node).map(|name| SmolStr::new(name.text().to_string()))
    }

    /// Maps one declaration node to its structure. Non-declaration nodes
    /// yield `None`.
    pub fn structure(&self, node: &SyntaxNode) -> Option<Structure> {
        let name = SmolStr::new(walk::node_name_text(node));
        let structure = match node.kind() {
            SyntaxKind::ClassDefinition => Structure::Class(ClassInfo {
                name,
                inherits: self.inheriting_type_of(node),
                ..ClassInfo::default()
            }),
            SyntaxKind::FunctionDefinition => {
                let mut arguments = Vec::new();
                if let Some(params) = walk::child_of_kind(node, SyntaxKind::Parameters) {
                    for (index, param) in params.children().enumerate() {
                        arguments.push(ArgumentInfo {
                            index: index as u32,
                            name: SmolStr::new(
                                walk::child_of_kind(&param, SyntaxKind::Identifier)
                                    .map(|ident| ident.text().to_string())
                                    .unwrap_or_else(|| param.text().to_string()),
                            ),
                            ty: SmolStr::new(walk::child_text_of_kind(
                                Some(&param),
                                SyntaxKind::Type,
                            )),
                            ..ArgumentInfo::default()
                        });
                    }
                }
                let return_node = walk::child_of_kind(node, SyntaxKind::ReturnType);
                Structure::Method(MethodInfo {
                    name,
                    arguments,
                    return_ty: ReturnInfo {
                        ty: SmolStr::new(walk::child_text_of_kind(
                            return_node.as_ref(),
                            SyntaxKind::Type,
                        )),
                        ..ReturnInfo::default()
                    },
                    ..MethodInfo::default()
                })
            }
            kind if kind.is_variable_statement() => {
                let setget = walk::descendant_of_kind(node, SyntaxKind::Setget);
                Structure::Member(MemberInfo {
                    name,
                    ty: SmolStr::new(walk::child_text_of_kind(Some(node), SyntaxKind::Type)),
                    setter: SmolStr::new(walk::child_text_of_kind(
                        setget.as_ref(),
                        SyntaxKind::Setter,
                    )),
                    getter: SmolStr::new(walk::child_text_of_kind(
                        setget.as_ref(),
                        SyntaxKind::Getter,
                    )),
                    ..MemberInfo::default()
                })
            }
            SyntaxKind::ConstStatement => Structure::Constant(ConstantInfo {
                name,
                value: walk::last_child_ignoring_trivia(node)
                    .map(|element| element_text(&element))
                    .unwrap_or_default(),
                ..ConstantInfo::default()
            }),
            SyntaxKind::SignalStatement => {
                let mut arguments = Vec::new();
                if let Some(list) = node
                    .children()
                    .last()
                    .filter(|child| child.kind() == SyntaxKind::IdentifierList)
                {
                    for (index, identifier) in list.children().enumerate() {
                        arguments.push(ArgumentInfo {
                            index: index as u32,
                            name: SmolStr::new(identifier.text().to_string()),
                            ..ArgumentInfo::default()
                        });
                    }
                }
                Structure::Signal(SignalInfo { name, arguments, ..SignalInfo::default() })
            }
            _ => return None,
        };
        Some(structure)
    }

    /// Builds a full class symbol from a (sub)tree. The node is treated
    /// as a class container: a `source` root, or the body of a class
    /// definition.
    pub fn form_class_symbol(&self, node: &SyntaxNode) -> Symbol {
        Symbol::class(self.class_info_from_node(node))
    }

    /// The class structure for a container node, fully populated in one
    /// pre-order pass.
    ///
    /// Runs on an explicit work stack of in-progress classes instead of
    /// recursing: entering a nested `class_definition` pushes a frame and
    /// walks into its body; exhausting a body's siblings pops the frame
    /// and attaches the completed nested class to its parent.
    pub fn class_info_from_node(&self, node: &SyntaxNode) -> ClassInfo {
        let mut stack: Vec<(ClassInfo, SyntaxNode)> =
            vec![(ClassInfo::default(), node.clone())];
        let mut cursor = walk::TreeCursor::new(node.clone());

        let finish = |mut stack: Vec<(ClassInfo, SyntaxNode)>| {
            stack.pop().expect("root frame always present").0
        };

        if !cursor.goto_first_child() {
            return finish(stack);
        }

        loop {
            match cursor.kind() {
                SyntaxKind::ClassDefinition => {
                    if let Some(Structure::Class(info)) = self.structure(cursor.node()) {
                        let class_node = cursor.node().clone();
                        match walk::node_body(&class_node).and_then(|body| body.first_child()) {
                            Some(first_statement) => {
                                stack.push((info, class_node));
                                cursor.reset(first_statement);
                                // Skip the sibling advance so the body's
                                // first statement is processed next.
                                continue;
                            }
                            None => {
                                // Empty body: attach without opening a frame.
                                let top = stack.last_mut().expect("root frame always present");
                                top.0.classes.insert(info.name.clone(), Symbol::class(info));
                            }
                        }
                    }
                }
                SyntaxKind::SignalStatement => {
                    if let Some(Structure::Signal(info)) = self.structure(cursor.node()) {
                        let top = stack.last_mut().expect("root frame always present");
                        top.0
                            .signals
                            .insert(info.name.clone(), Symbol::new(Structure::Signal(info)));
                    }
                }
                SyntaxKind::FunctionDefinition => {
                    if let Some(Structure::Method(info)) = self.structure(cursor.node()) {
                        let top = stack.last_mut().expect("root frame always present");
                        top.0
                            .methods
                            .insert(info.name.clone(), Symbol::new(Structure::Method(info)));
                    }
                }
                kind if kind.is_variable_statement() => {
                    if let Some(Structure::Member(info)) = self.structure(cursor.node()) {
                        let top = stack.last_mut().expect("root frame always present");
                        top.0
                            .members
                            .insert(info.name.clone(), Symbol::new(Structure::Member(info)));
                    }
                }
                SyntaxKind::ConstStatement => {
                    if let Some(Structure::Constant(info)) = self.structure(cursor.node()) {
                        let top = stack.last_mut().expect("root frame always present");
                        top.0
                            .constants
                            .insert(info.name.clone(), Symbol::new(Structure::Constant(info)));
                    }
                }
                SyntaxKind::ExtendsStatement => {
                    let inherits = self.inheriting_type_from_extends(Some(cursor.node()));
                    stack.last_mut().expect("root frame always present").0.inherits = inherits;
                }
                SyntaxKind::ClassNameStatement => {
                    let class_name = self.class_name_of(cursor.node());
                    stack.last_mut().expect("root frame always present").0.class_name =
                        class_name;
                }
                _ => {}
            }

            // Advance to the next sibling; when a body runs out, pop the
            // class frame, attach it, and resume at the definition node.
            while !cursor.goto_next_sibling() {
                if stack.len() > 1 {
                    let (info, class_node) = stack.pop().expect("length checked");
                    let top = stack.last_mut().expect("root frame always present");
                    top.0.classes.insert(info.name.clone(), Symbol::class(info));
                    cursor.reset(class_node);
                } else {
                    return finish(stack);
                }
            }
        }
    }

    /// Reconstructs the class enclosing `node`: the nearest
    /// `class_definition` ancestor, or the file root. This answers
    /// "what class am I inside of" for `self` and unqualified lookups.
    pub fn form_self_class_symbol(&self, node: &SyntaxNode) -> Option<Symbol> {
        for ancestor in node.ancestors() {
            match ancestor.kind() {
                SyntaxKind::ClassDefinition => {
                    let body = walk::node_body(&ancestor)?;
                    let mut info = self.class_info_from_node(&body);
                    info.inherits = self.inheriting_type_of(&ancestor);
                    info.name = SmolStr::new(walk::node_name_text(&ancestor));
                    return Some(Symbol::class(info));
                }
                SyntaxKind::Source => return Some(self.form_class_symbol(&ancestor)),
                _ => {}
            }
        }
        None
    }

    /// Builds the stack of local scopes visible at `node`, innermost
    /// first, by walking backward and upward from the cursor.
    ///
    /// Every crossed `body` opens a new (outer) scope. Variable and
    /// const declarations land in the scope current when they are
    /// passed. Signals are declarations, not lexically referenceable
    /// values, and stay out. Reaching the enclosing function injects its
    /// parameters and stops the walk; the function's surroundings are
    /// covered by the separately-computed self class. Reaching the
    /// enclosing class stops the walk: outer-class locals are not
    /// visible from inner classes.
    pub fn form_local_scopes(&self, node: &SyntaxNode) -> Vec<Scope> {
        let mut scopes = vec![Scope::new()];
        for prev in walk::preceding(node.clone()) {
            match prev.kind() {
                SyntaxKind::Body => scopes.push(Scope::new()),
                SyntaxKind::SignalStatement => {}
                SyntaxKind::FunctionDefinition => {
                    if prev.text_range().contains_range(node.text_range()) {
                        if let Some(Structure::Method(method)) = self.structure(&prev) {
                            let scope = scopes.last_mut().expect("scope stack is never empty");
                            for argument in method.arguments {
                                scope.add(Symbol::new(Structure::Argument(argument)));
                            }
                        }
                        break;
                    }
                }
                SyntaxKind::ClassDefinition => {
                    if prev.text_range().contains_range(node.text_range()) {
                        break;
                    }
                }
                _ => {
                    if let Some(structure) = self.structure(&prev) {
                        scopes
                            .last_mut()
                            .expect("scope stack is never empty")
                            .add(Symbol::new(structure));
                    }
                }
            }
        }
        scopes
    }
}
