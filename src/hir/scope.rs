//! Scopes and the ordered scope chain.
//!
//! A [`Scope`] is one namespace: an insertion-ordered name→symbol map.
//! The [`Index`] holds the chain of all currently-active scopes, the
//! per-query temporary scopes (innermost first) followed by the four
//! long-lived persistent scopes in registration order, and performs the
//! linear, short-circuiting lookups everything else builds on.

use std::sync::atomic::{AtomicU32, Ordering};

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::symbols::Symbol;

static NEXT_SCOPE_ID: AtomicU32 = AtomicU32::new(0);

/// Process-unique identity of a scope, independent of its position in
/// the chain. Continuation lookups resume after a given id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

/// One namespace of symbols.
///
/// Lookup is by exact name; iteration follows insertion order, which is
/// what symbol enumeration (autocomplete listings) relies on. Adding a
/// symbol under an existing name overwrites: last declared wins.
#[derive(Debug)]
pub struct Scope {
    id: ScopeId,
    symbols: IndexMap<SmolStr, Symbol>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            id: ScopeId(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed)),
            symbols: IndexMap::new(),
        }
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn add(&mut self, symbol: Symbol) {
        self.symbols.insert(SmolStr::new(symbol.name()), symbol);
    }

    /// Removes the symbol stored under `name`, preserving the order of
    /// the remaining entries.
    pub fn remove(&mut self, name: &str) -> Option<Symbol> {
        self.symbols.shift_remove(name)
    }

    pub fn lookup(&self, term: &str) -> Option<Symbol> {
        self.symbols.get(term).cloned()
    }

    pub fn find(&self, prefix: &str) -> Vec<Symbol> {
        self.symbols
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(_, symbol)| symbol.clone())
            .collect()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

/// The ordered scope chain.
///
/// Lookup precedence is chain order: every temporary scope (innermost,
/// i.e. most recently added, first) before every persistent scope, and
/// persistent scopes in the order they were registered. Registration
/// order is fixed at construction time and consumers rely on it.
#[derive(Debug, Default)]
pub struct Index {
    /// Temporary scopes in registration order; the chain consults them
    /// newest-first, so the most recently added is the innermost.
    temporaries: Vec<Scope>,
    persistents: Vec<(SmolStr, Scope)>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Persistent scopes

    pub fn add_persistent_scope(&mut self, name: impl Into<SmolStr>, scope: Scope) {
        self.persistents.push((name.into(), scope));
    }

    /// Registers one empty persistent scope per name, in call order.
    pub fn make_persistent_scopes(&mut self, names: &[&str]) {
        for name in names {
            self.add_persistent_scope(*name, Scope::new());
        }
    }

    pub fn persistent_scope(&self, name: &str) -> Option<&Scope> {
        self.persistents
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, scope)| scope)
    }

    pub fn persistent_scope_mut(&mut self, name: &str) -> Option<&mut Scope> {
        self.persistents
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, scope)| scope)
    }

    // -- Temporary scopes

    /// Adds a temporary scope as the new innermost: it takes precedence
    /// over every previously-added temporary.
    pub fn add_temporary_scope(&mut self, scope: Scope) {
        self.temporaries.push(scope);
    }

    pub fn make_temporary_scope(&mut self) -> &mut Scope {
        self.temporaries.push(Scope::new());
        self.temporaries.last_mut().expect("scope was just pushed")
    }

    /// Drops every temporary scope. Safe to call with none active.
    pub fn clear_temporary_scopes(&mut self) {
        self.temporaries.clear();
    }

    /// Temporary scopes in chain order (innermost first).
    pub fn temporary_scopes(&self) -> impl Iterator<Item = &Scope> {
        self.temporaries.iter().rev()
    }

    /// Every scope in chain order.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.temporaries
            .iter()
            .rev()
            .chain(self.persistents.iter().map(|(_, scope)| scope))
    }

    // -- Lookup

    /// Exact-name lookup over the chain; first hit wins.
    pub fn lookup(&self, term: &str) -> Option<Symbol> {
        self.scan(term, None).map(|(symbol, _)| symbol)
    }

    /// Prefix search over the chain; the first scope with any match
    /// supplies the whole result.
    pub fn find(&self, prefix: &str) -> Vec<Symbol> {
        for scope in self.scopes() {
            let results = scope.find(prefix);
            if !results.is_empty() {
                return results;
            }
        }
        Vec::new()
    }

    /// Like [`lookup`](Index::lookup), but also reports which scope
    /// supplied the symbol. `from` restricts the scan to scopes strictly
    /// after the given one in chain order; `None`, or an id not present
    /// in the chain, scans from the start (explicit policy, documented
    /// so callers can rely on it).
    pub fn term_scope_info(&self, term: &str, from: Option<ScopeId>) -> Option<(Symbol, ScopeId)> {
        self.scan(term, from)
    }

    /// Continuation lookup: resumes the scan strictly after `from`.
    pub fn lookup_after_scope(&self, term: &str, from: ScopeId) -> Option<Symbol> {
        self.scan(term, Some(from)).map(|(symbol, _)| symbol)
    }

    fn scan(&self, term: &str, from: Option<ScopeId>) -> Option<(Symbol, ScopeId)> {
        let mut skipping = match from {
            Some(id) => self.scopes().any(|scope| scope.id() == id),
            None => false,
        };
        for scope in self.scopes() {
            if skipping {
                if Some(scope.id()) == from {
                    skipping = false;
                }
                continue;
            }
            if let Some(symbol) = scope.lookup(term) {
                return Some((symbol, scope.id()));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::symbols::{ConstantInfo, MemberInfo, Structure, SymbolKind};

    fn constant(name: &str) -> Symbol {
        Symbol::new(Structure::Constant(ConstantInfo {
            name: name.into(),
            ..ConstantInfo::default()
        }))
    }

    fn member(name: &str) -> Symbol {
        Symbol::new(Structure::Member(MemberInfo {
            name: name.into(),
            ..MemberInfo::default()
        }))
    }

    fn scope_with(symbols: &[Symbol]) -> Scope {
        let mut scope = Scope::new();
        for symbol in symbols {
            scope.add(symbol.clone());
        }
        scope
    }

    #[test]
    fn scope_overwrites_on_name_collision() {
        let mut scope = Scope::new();
        scope.add(constant("x"));
        scope.add(member("x"));
        assert_eq!(scope.len(), 1);
        assert_eq!(scope.lookup("x").unwrap().kind(), SymbolKind::Member);
    }

    #[test]
    fn scope_iterates_in_insertion_order() {
        let scope = scope_with(&[constant("b"), constant("a"), constant("c")]);
        let names: Vec<_> = scope.symbols().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn scope_remove_keeps_order() {
        let mut scope = scope_with(&[constant("a"), constant("b"), constant("c")]);
        assert!(scope.remove("b").is_some());
        let names: Vec<_> = scope.symbols().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["a", "c"]);
        assert!(scope.remove("b").is_none());
    }

    #[test]
    fn temporaries_shadow_persistents() {
        let mut index = Index::new();
        index.make_persistent_scopes(&["userScripts"]);
        let persistent = constant("x");
        index
            .persistent_scope_mut("userScripts")
            .unwrap()
            .add(persistent.clone());

        let temp = member("x");
        index.add_temporary_scope(scope_with(std::slice::from_ref(&temp)));

        assert!(index.lookup("x").unwrap().ptr_eq(&temp));
    }

    #[test]
    fn later_temporary_is_innermost() {
        let mut index = Index::new();
        let a = constant("x");
        let b = member("x");
        index.add_temporary_scope(scope_with(std::slice::from_ref(&a)));
        index.add_temporary_scope(scope_with(std::slice::from_ref(&b)));

        assert!(index.lookup("x").unwrap().ptr_eq(&b));
    }

    #[test]
    fn persistent_registration_order_is_precedence() {
        let mut index = Index::new();
        index.make_persistent_scopes(&["userScripts", "builtins"]);
        let script = constant("Node");
        let builtin = member("Node");
        index.persistent_scope_mut("userScripts").unwrap().add(script.clone());
        index.persistent_scope_mut("builtins").unwrap().add(builtin);

        assert!(index.lookup("Node").unwrap().ptr_eq(&script));
    }

    #[test]
    fn clear_temporaries_is_idempotent_and_complete() {
        let mut index = Index::new();
        index.make_persistent_scopes(&["builtins"]);
        index.persistent_scope_mut("builtins").unwrap().add(constant("stay"));
        index.add_temporary_scope(scope_with(&[constant("gone")]));

        assert!(index.lookup("gone").is_some());
        index.clear_temporary_scopes();
        assert!(index.lookup("gone").is_none());
        assert!(index.lookup("stay").is_some());
        index.clear_temporary_scopes();
        assert!(index.lookup("stay").is_some());
    }

    #[test]
    fn find_short_circuits_on_first_scope_with_matches() {
        let mut index = Index::new();
        index.make_persistent_scopes(&["userScripts", "builtins"]);
        index
            .persistent_scope_mut("userScripts")
            .unwrap()
            .add(constant("get_node"));
        index
            .persistent_scope_mut("builtins")
            .unwrap()
            .add(constant("get_parent"));

        let results = index.find("get_");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "get_node");
    }

    #[test]
    fn lookup_after_scope_skips_the_shadowing_scope() {
        let mut index = Index::new();
        index.make_persistent_scopes(&["builtins"]);
        let outer = constant("String");
        index.persistent_scope_mut("builtins").unwrap().add(outer.clone());

        let shadow = member("String");
        index.add_temporary_scope(scope_with(std::slice::from_ref(&shadow)));

        let (found, scope_id) = index.term_scope_info("String", None).unwrap();
        assert!(found.ptr_eq(&shadow));

        let continued = index.lookup_after_scope("String", scope_id).unwrap();
        assert!(continued.ptr_eq(&outer));
    }

    #[test]
    fn lookup_after_unknown_scope_scans_from_start() {
        let mut index = Index::new();
        index.make_persistent_scopes(&["builtins"]);
        let symbol = constant("x");
        index.persistent_scope_mut("builtins").unwrap().add(symbol.clone());

        // A scope never added to this chain.
        let foreign = Scope::new();
        assert!(index.lookup_after_scope("x", foreign.id()).unwrap().ptr_eq(&symbol));
    }
}
