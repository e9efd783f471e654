//! Shared fixtures: a map-backed parser stand-in and a builder that
//! assembles GDScript syntax trees whose token text reconstructs the
//! source exactly (so offsets and ranges line up in position queries).

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gdscope::syntax::{ScriptParser, SyntaxKind, SyntaxNode, TreeBuilder};

/// A parser collaborator backed by pre-built trees, keyed by exact
/// source text. Clones share the registry, so trees can be added after
/// the parser has been handed to a `ProjectIndex`.
#[derive(Clone, Default)]
pub struct FixtureParser {
    trees: Rc<RefCell<HashMap<String, SyntaxNode>>>,
}

impl FixtureParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tree under its own text and returns that text.
    pub fn register(&self, root: SyntaxNode) -> String {
        let text = root.text().to_string();
        self.trees.borrow_mut().insert(text.clone(), root);
        text
    }
}

impl ScriptParser for FixtureParser {
    fn parse(&self, text: &str) -> Option<SyntaxNode> {
        self.trees.borrow().get(text).cloned()
    }
}

/// One link of an attribute-chain expression.
pub enum Link<'a> {
    This,
    Ident(&'a str),
    Call(&'a str),
}

/// Assembles source trees statement by statement. Statements are
/// newline-separated; nesting (classes, functions) is explicit via
/// begin/end pairs.
pub struct ScriptBuilder {
    b: TreeBuilder,
    at_start: bool,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        let mut b = TreeBuilder::new();
        b.start_node(SyntaxKind::Source);
        Self { b, at_start: true }
    }

    fn sep(&mut self) {
        if !self.at_start {
            self.b.token(SyntaxKind::Whitespace, "\n");
        }
        self.at_start = false;
    }

    fn name(&mut self, name: &str) {
        self.b.start_node(SyntaxKind::Name);
        self.b.token(SyntaxKind::Ident, name);
        self.b.finish_node();
    }

    fn type_node(&mut self, ty: &str) {
        self.b.start_node(SyntaxKind::Type);
        self.b.token(SyntaxKind::Ident, ty);
        self.b.finish_node();
    }

    fn identifier(&mut self, name: &str) {
        self.b.start_node(SyntaxKind::Identifier);
        self.b.token(SyntaxKind::Ident, name);
        self.b.finish_node();
    }

    pub fn extends(&mut self, target: &str) {
        self.sep();
        self.b.start_node(SyntaxKind::ExtendsStatement);
        self.b.token(SyntaxKind::ExtendsKw, "extends");
        self.b.token(SyntaxKind::Whitespace, " ");
        if target.starts_with('"') || target.starts_with('\'') {
            self.b.token(SyntaxKind::StringLit, target);
        } else {
            self.b.token(SyntaxKind::Ident, target);
        }
        self.b.finish_node();
    }

    pub fn class_name(&mut self, name: &str) {
        self.sep();
        self.b.start_node(SyntaxKind::ClassNameStatement);
        self.b.token(SyntaxKind::ClassNameKw, "class_name");
        self.b.token(SyntaxKind::Whitespace, " ");
        self.name(name);
        self.b.finish_node();
    }

    pub fn signal(&mut self, name: &str, args: &[&str]) {
        self.sep();
        self.b.start_node(SyntaxKind::SignalStatement);
        self.b.token(SyntaxKind::SignalKw, "signal");
        self.b.token(SyntaxKind::Whitespace, " ");
        self.name(name);
        if !args.is_empty() {
            self.b.token(SyntaxKind::LParen, "(");
            self.b.start_node(SyntaxKind::IdentifierList);
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    self.b.token(SyntaxKind::Comma, ",");
                    self.b.token(SyntaxKind::Whitespace, " ");
                }
                self.identifier(arg);
            }
            self.b.finish_node();
            self.b.token(SyntaxKind::RParen, ")");
        }
        self.b.finish_node();
    }

    pub fn var_(&mut self, name: &str, ty: Option<&str>) {
        self.var_full(SyntaxKind::VariableStatement, name, ty, None);
    }

    pub fn export_var(&mut self, name: &str, ty: Option<&str>) {
        self.var_full(SyntaxKind::ExportVariableStatement, name, ty, None);
    }

    pub fn var_setget(&mut self, name: &str, ty: Option<&str>, setter: &str, getter: &str) {
        self.var_full(SyntaxKind::VariableStatement, name, ty, Some((setter, getter)));
    }

    fn var_full(
        &mut self,
        kind: SyntaxKind,
        name: &str,
        ty: Option<&str>,
        setget: Option<(&str, &str)>,
    ) {
        self.sep();
        self.b.start_node(kind);
        if kind == SyntaxKind::ExportVariableStatement {
            self.b.token(SyntaxKind::ExportKw, "export");
            self.b.token(SyntaxKind::Whitespace, " ");
        }
        self.b.token(SyntaxKind::VarKw, "var");
        self.b.token(SyntaxKind::Whitespace, " ");
        self.name(name);
        if let Some(ty) = ty {
            self.b.token(SyntaxKind::Colon, ":");
            self.b.token(SyntaxKind::Whitespace, " ");
            self.type_node(ty);
        }
        if let Some((setter, getter)) = setget {
            self.b.token(SyntaxKind::Whitespace, " ");
            self.b.start_node(SyntaxKind::Setget);
            self.b.token(SyntaxKind::SetgetKw, "setget");
            self.b.token(SyntaxKind::Whitespace, " ");
            self.b.start_node(SyntaxKind::Setter);
            self.b.token(SyntaxKind::Ident, setter);
            self.b.finish_node();
            self.b.token(SyntaxKind::Comma, ",");
            self.b.token(SyntaxKind::Whitespace, " ");
            self.b.start_node(SyntaxKind::Getter);
            self.b.token(SyntaxKind::Ident, getter);
            self.b.finish_node();
            self.b.finish_node();
        }
        self.b.finish_node();
    }

    pub fn const_(&mut self, name: &str, value: &str) {
        self.sep();
        self.b.start_node(SyntaxKind::ConstStatement);
        self.b.token(SyntaxKind::ConstKw, "const");
        self.b.token(SyntaxKind::Whitespace, " ");
        self.name(name);
        self.b.token(SyntaxKind::Whitespace, " ");
        self.b.token(SyntaxKind::Eq, "=");
        self.b.token(SyntaxKind::Whitespace, " ");
        self.b.token(SyntaxKind::Literal, value);
        self.b.finish_node();
    }

    pub fn begin_class(&mut self, name: &str, extends: Option<&str>) {
        self.sep();
        self.b.start_node(SyntaxKind::ClassDefinition);
        self.b.token(SyntaxKind::ClassKw, "class");
        self.b.token(SyntaxKind::Whitespace, " ");
        self.name(name);
        if let Some(target) = extends {
            self.b.token(SyntaxKind::Whitespace, " ");
            self.b.start_node(SyntaxKind::ExtendsStatement);
            self.b.token(SyntaxKind::ExtendsKw, "extends");
            self.b.token(SyntaxKind::Whitespace, " ");
            if target.starts_with('"') || target.starts_with('\'') {
                self.b.token(SyntaxKind::StringLit, target);
            } else {
                self.b.token(SyntaxKind::Ident, target);
            }
            self.b.finish_node();
        }
        self.b.token(SyntaxKind::Colon, ":");
        self.b.token(SyntaxKind::Whitespace, "\n");
        self.b.start_node(SyntaxKind::Body);
        self.at_start = true;
    }

    pub fn end_class(&mut self) {
        self.b.finish_node(); // body
        self.b.finish_node(); // class definition
        self.at_start = false;
    }

    pub fn begin_func(&mut self, name: &str, params: &[(&str, Option<&str>)], ret: Option<&str>) {
        self.sep();
        self.b.start_node(SyntaxKind::FunctionDefinition);
        self.b.token(SyntaxKind::FuncKw, "func");
        self.b.token(SyntaxKind::Whitespace, " ");
        self.name(name);
        self.b.start_node(SyntaxKind::Parameters);
        self.b.token(SyntaxKind::LParen, "(");
        for (i, (param, ty)) in params.iter().enumerate() {
            if i > 0 {
                self.b.token(SyntaxKind::Comma, ",");
                self.b.token(SyntaxKind::Whitespace, " ");
            }
            self.b.start_node(SyntaxKind::Parameter);
            self.identifier(param);
            if let Some(ty) = ty {
                self.b.token(SyntaxKind::Colon, ":");
                self.b.token(SyntaxKind::Whitespace, " ");
                self.type_node(ty);
            }
            self.b.finish_node();
        }
        self.b.token(SyntaxKind::RParen, ")");
        self.b.finish_node();
        if let Some(ty) = ret {
            self.b.token(SyntaxKind::Whitespace, " ");
            self.b.start_node(SyntaxKind::ReturnType);
            self.b.token(SyntaxKind::Arrow, "->");
            self.b.token(SyntaxKind::Whitespace, " ");
            self.type_node(ty);
            self.b.finish_node();
        }
        self.b.token(SyntaxKind::Colon, ":");
        self.b.token(SyntaxKind::Whitespace, "\n");
        self.b.start_node(SyntaxKind::Body);
        self.at_start = true;
    }

    pub fn end_func(&mut self) {
        self.b.finish_node(); // body
        self.b.finish_node(); // function definition
        self.at_start = false;
    }

    /// A bare identifier in expression position.
    pub fn expr_ident(&mut self, name: &str) {
        self.sep();
        self.b.start_node(SyntaxKind::ExpressionStatement);
        self.identifier(name);
        self.b.finish_node();
    }

    /// An attribute-chain expression such as `self.y.z` or `a.b()`.
    pub fn attr_expr(&mut self, links: &[Link<'_>]) {
        self.sep();
        self.b.start_node(SyntaxKind::ExpressionStatement);
        self.b.start_node(SyntaxKind::Attribute);
        for (i, link) in links.iter().enumerate() {
            if i > 0 {
                self.b.token(SyntaxKind::Dot, ".");
            }
            match link {
                Link::This => {
                    self.b.start_node(SyntaxKind::SelfExpr);
                    self.b.token(SyntaxKind::SelfKw, "self");
                    self.b.finish_node();
                }
                Link::Ident(name) => self.identifier(name),
                Link::Call(name) => {
                    self.b.start_node(SyntaxKind::AttributeCall);
                    self.identifier(name);
                    self.b.token(SyntaxKind::LParen, "(");
                    self.b.token(SyntaxKind::RParen, ")");
                    self.b.finish_node();
                }
            }
        }
        self.b.finish_node();
        self.b.finish_node();
    }

    pub fn finish(self) -> SyntaxNode {
        let mut b = self.b;
        b.finish_node();
        b.finish()
    }
}

impl Default for ScriptBuilder {
    fn default() -> Self {
        Self::new()
    }
}
