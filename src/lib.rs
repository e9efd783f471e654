//! # gdscope
//!
//! Core library for GDScript symbol indexing, scope resolution, and type
//! solving. Editor integrations hand this crate parsed syntax trees (plus a
//! builtin-class description table and project configuration data) and get
//! back the symbols visible at a cursor position or reachable through an
//! attribute chain such as `a.b.c()`.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide      → cursor-position queries, trailing-dot error recovery
//!   ↓
//! project  → project indexer, builtin docs, project-config consumption
//!   ↓
//! hir      → symbols, scopes, scope chain, tree structurer, resolver
//!   ↓
//! syntax   → GDScript syntax-tree abstraction (rowan), builder, walks
//!   ↓
//! base     → primitives (text positions, line index)
//! ```
//!
//! Parsing is not implemented here. A host supplies an implementation of
//! [`syntax::ScriptParser`] (typically backed by a tree-sitter grammar)
//! that produces trees through [`syntax::TreeBuilder`].
//!
//! The crate is single-threaded by design: every indexing and query
//! operation runs to completion on the caller's thread, and the persistent
//! scopes are mutated in place. Hosts with more than one logical thread
//! must serialize access to a [`project::ProjectIndex`] themselves.

/// Foundation types: text positions, line/column conversion.
pub mod base;

/// Syntax-tree abstraction: kinds, builder, traversal helpers.
pub mod syntax;

/// Semantic model: symbols, scopes, the scope chain, and resolution.
pub mod hir;

/// Project indexing: scripts, builtin docs, project configuration.
pub mod project;

/// Cursor-position queries for editor tooling.
pub mod ide;

pub use base::{LineCol, LineIndex};
pub use hir::{
    Index, Resolver, Scope, ScopeId, Structure, Symbol, SymbolKind, TreeFormer,
};
pub use project::{BuiltinDocs, ProjectConfig, ProjectError, ProjectIndex};
pub use syntax::{ScriptParser, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TreeBuilder};
