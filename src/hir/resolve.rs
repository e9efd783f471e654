//! Type resolution — from any symbol to the class that describes its
//! members.
//!
//! [`Resolver`] runs the class-resolution state machine (alias → target,
//! method → return type, member/argument/return → declared type, class is
//! terminal), walks attribute chains link by link, and enumerates
//! inheritance ancestries. All failures degrade to `None`/empty and are
//! reported through `tracing`; nothing here panics on malformed input.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::syntax::{walk, SyntaxElement, SyntaxKind, SyntaxNode};

use super::former::TreeFormer;
use super::scope::Index;
use super::symbols::{Structure, Symbol, SymbolKind};

/// The lookup key of one attribute-chain link: the base identifier for
/// calls and subscripts, the raw text otherwise.
fn link_term(node: &SyntaxNode) -> String {
    match node.kind() {
        SyntaxKind::AttributeCall | SyntaxKind::AttributeSubscript | SyntaxKind::Call => {
            walk::child_text_of_kind(Some(node), SyntaxKind::Identifier)
        }
        _ => node.text().to_string(),
    }
}

/// Query-time resolution over a scope chain.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    index: &'a Index,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a Index) -> Self {
        Self { index }
    }

    /// Resolves a symbol to a class symbol by repeatedly looking up its
    /// declared type name, or reports why it cannot.
    ///
    /// The shadow guard: when the lookup of a declared type name hands
    /// back the very symbol being resolved (a local declaration shadowing
    /// a class of the same name), the scan resumes past the scope that
    /// produced it, deliberately skipping the shadow. A visited set
    /// bounds the machine against longer alias cycles.
    pub fn resolve_class(&self, symbol: Symbol) -> Option<Symbol> {
        let mut visited = FxHashSet::default();
        let mut current = symbol;
        loop {
            visited.insert(current.addr());
            let type_name: SmolStr = match current.structure() {
                Structure::Class(_) => return Some(current),
                Structure::Alias(alias) => alias.target.clone(),
                Structure::Method(method) => method.return_ty.ty.clone(),
                Structure::Member(member) => member.ty.clone(),
                Structure::Argument(argument) => argument.ty.clone(),
                Structure::Return(ret) => ret.ty.clone(),
                Structure::Constant(_) | Structure::Signal(_) => {
                    warn!(
                        kind = %current.kind(),
                        name = current.name(),
                        "symbol kind cannot resolve to a class"
                    );
                    return None;
                }
            };
            if type_name.is_empty() {
                debug!(name = current.name(), "symbol has no declared type");
                return None;
            }

            let Some((found, scope_id)) = self.index.term_scope_info(&type_name, None) else {
                warn!(%type_name, "declared type is not indexed");
                return None;
            };

            current = if found.ptr_eq(&current) {
                match self.index.lookup_after_scope(&type_name, scope_id) {
                    Some(next) if !visited.contains(&next.addr()) => next,
                    _ => {
                        warn!(%type_name, "type name only resolves to its own shadowing declaration");
                        return None;
                    }
                }
            } else if visited.contains(&found.addr()) {
                warn!(%type_name, "cycle while resolving declared type");
                return None;
            } else {
                found
            };
        }
    }

    /// The resolved parent class of a class symbol, or `None` at the
    /// inheritance root (or when the parent type is not indexed).
    pub fn parent_of(&self, class_symbol: &Symbol) -> Option<Symbol> {
        let info = class_symbol.as_class()?;
        if info.inherits.is_empty() {
            return None;
        }
        let found = self.index.lookup(&info.inherits).or_else(|| {
            // Path inheritance keys carry normalized quotes; scripts are
            // indexed under the bare path.
            let trimmed = info.inherits.trim_matches('\'');
            if trimmed == info.inherits.as_str() {
                None
            } else {
                self.index.lookup(trimmed)
            }
        })?;
        if found.kind() == SymbolKind::Class {
            Some(found)
        } else {
            self.resolve_class(found)
        }
    }

    /// A class symbol's own children: constants, methods, members,
    /// nested classes, in that order, each map in insertion order.
    pub fn own_symbols(&self, class_symbol: &Symbol) -> Vec<Symbol> {
        let Some(info) = class_symbol.as_class() else {
            return Vec::new();
        };
        info.constants
            .values()
            .chain(info.methods.values())
            .chain(info.members.values())
            .chain(info.classes.values())
            .cloned()
            .collect()
    }

    /// Everything reachable on a class and its transitive parents. An
    /// inheritance cycle is reported and terminates the walk.
    pub fn ancestry_symbols(&self, class_symbol: &Symbol) -> Vec<Symbol> {
        let mut results = Vec::new();
        let mut visited = FxHashSet::default();
        let mut current = Some(class_symbol.clone());
        while let Some(symbol) = current {
            if !visited.insert(symbol.addr()) {
                warn!(name = symbol.name(), "inheritance cycle detected");
                break;
            }
            results.extend(self.own_symbols(&symbol));
            current = self.parent_of(&symbol);
        }
        results
    }

    /// First hit for `term` on a class or any of its ancestors.
    pub fn lookup_in_ancestry(&self, class_symbol: &Symbol, term: &str) -> Option<Symbol> {
        let mut visited = FxHashSet::default();
        let mut current = Some(class_symbol.clone());
        while let Some(symbol) = current {
            if !visited.insert(symbol.addr()) {
                warn!(name = symbol.name(), "inheritance cycle detected");
                break;
            }
            if let Some(hit) = symbol.lookup(term) {
                return Some(hit);
            }
            current = self.parent_of(&symbol);
        }
        None
    }

    /// Method symbols across a class's ancestry, for override listings.
    pub fn ancestry_methods(&self, class_symbol: &Symbol) -> Vec<Symbol> {
        self.ancestry_symbols(class_symbol)
            .into_iter()
            .filter(|symbol| symbol.kind() == SymbolKind::Method)
            .collect()
    }

    /// Every class and alias symbol across the whole scope chain, in
    /// chain order.
    pub fn all_class_symbols(&self) -> Vec<Symbol> {
        self.index
            .scopes()
            .flat_map(|scope| scope.symbols())
            .filter(|symbol| {
                matches!(symbol.kind(), SymbolKind::Class | SymbolKind::Alias)
            })
            .cloned()
            .collect()
    }

    /// Resolves an attribute chain (`a.b.c()`) link by link, stopping at
    /// (not including) the `to` element, and returns the class the chain
    /// denotes there.
    ///
    /// The first link resolves through the scope chain: `self` becomes
    /// the enclosing class, and an identifier that misses the chain falls
    /// back to the enclosing class's ancestry. Every later link is looked
    /// up on the previously resolved class, and each hop re-runs the
    /// class-resolution state machine.
    pub fn solve_attribute(
        &self,
        former: &TreeFormer,
        attribute: &SyntaxNode,
        to: &SyntaxElement,
    ) -> Option<Symbol> {
        let mut resolved: Option<Symbol> = None;
        for element in attribute.children_with_tokens() {
            if element == *to || element.text_range().contains_range(to.text_range()) {
                break;
            }
            let SyntaxElement::Node(link) = element else {
                // Accessor dots and other punctuation.
                continue;
            };
            let term = link_term(&link);
            if term.is_empty() {
                debug!(kind = ?link.kind(), "attribute link has no lookup key");
                return None;
            }

            let next = match &resolved {
                None => {
                    if link.kind() == SyntaxKind::SelfExpr || term == "self" {
                        former.form_self_class_symbol(attribute)?
                    } else {
                        match self.index.lookup(&term) {
                            Some(symbol) => symbol,
                            None => {
                                let self_class = former.form_self_class_symbol(attribute)?;
                                self.lookup_in_ancestry(&self_class, &term)?
                            }
                        }
                    }
                }
                Some(class_symbol) => self.lookup_in_ancestry(class_symbol, &term)?,
            };
            resolved = Some(self.resolve_class(next)?);
        }
        resolved
    }
}
