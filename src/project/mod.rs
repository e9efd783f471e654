//! Project indexing — the orchestrating layer editor glue talks to.
//!
//! [`ProjectIndex`] owns the scope chain, the tree structurer, and the
//! parser collaborator. It indexes scripts into the persistent scopes,
//! rebuilds the temporary scopes per cursor query, manages global
//! aliases, and exposes the symbol queries.
//!
//! Everything here is single-threaded by contract: persistent scopes are
//! mutated in place with no transactional isolation, so a multi-threaded
//! host must wrap the whole `ProjectIndex` in its own single-writer lock.

mod config;
mod docs;

use std::path::{Path, PathBuf};

use smol_str::SmolStr;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::hir::{AliasInfo, Index, Resolver, Structure, Symbol, TreeFormer};
use crate::syntax::{ScriptParser, SyntaxElement, SyntaxNode};

pub use config::{GlobalClass, ProjectConfig};
pub use docs::{
    BuiltinDocs, DocArgument, DocClass, DocConstant, DocMember, DocMethod, DocReturn, DocSignal,
};

/// Names of the persistent scopes, in their fixed registration (and
/// therefore precedence) order.
pub mod scopes {
    pub const USER_GLOBALS: &str = "userGlobals";
    pub const USER_SCRIPTS: &str = "userScripts";
    pub const BUILTIN_GLOBALS: &str = "builtinGlobals";
    pub const BUILTINS: &str = "builtins";

    /// Registration order for [`ProjectIndex`](super::ProjectIndex)
    /// construction.
    pub const REGISTRATION_ORDER: [&str; 4] =
        [USER_GLOBALS, USER_SCRIPTS, BUILTIN_GLOBALS, BUILTINS];
}

/// Failures of script indexing. Queries never return these; only the
/// file-reading entry points do.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read script {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse script {path}")]
    Parse { path: PathBuf },
}

/// The semantic index of one project.
pub struct ProjectIndex {
    resource_path: PathBuf,
    parser: Box<dyn ScriptParser>,
    former: TreeFormer,
    index: Index,
}

impl ProjectIndex {
    /// Creates an index rooted at the project's resource directory. The
    /// four persistent scopes are registered here, once, in the order
    /// consumers rely on.
    pub fn new(resource_path: impl Into<PathBuf>, parser: Box<dyn ScriptParser>) -> Self {
        let mut index = Index::new();
        index.make_persistent_scopes(&scopes::REGISTRATION_ORDER);
        Self {
            resource_path: resource_path.into(),
            parser,
            former: TreeFormer::new(),
            index,
        }
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn former(&self) -> &TreeFormer {
        &self.former
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.index)
    }

    pub(crate) fn parser(&self) -> &dyn ScriptParser {
        &*self.parser
    }

    // -- Script indexing

    /// Indexes an already-parsed tree under `name` (conventionally the
    /// script's `res://` path), replacing any previous symbol for that
    /// name while carrying its alias back-link over, so a global class
    /// name survives re-indexing.
    pub fn index_tree(&mut self, root: &SyntaxNode, name: &str) {
        let mut info = self.former.class_info_from_node(root);
        info.name = SmolStr::new(name);

        let previous_alias = self
            .index
            .persistent_scope(scopes::USER_SCRIPTS)
            .and_then(|scope| scope.lookup(name))
            .and_then(|old| old.as_class().and_then(|class| class.alias()));
        if previous_alias.is_some() {
            info.set_alias(previous_alias);
        }

        let class_name = info.class_name.clone();
        let symbol = Symbol::class(info);
        if let Some(scope) = self.index.persistent_scope_mut(scopes::USER_SCRIPTS) {
            scope.add(symbol);
        }
        debug!(name, "indexed script symbol");

        if let Some(class_name) = class_name {
            self.add_user_global_alias(&class_name, name);
        }
    }

    /// Parses and indexes script source under `name`. An unparseable
    /// source indexes nothing (reported, not fatal).
    pub fn index_source(&mut self, text: &str, name: &str) {
        match self.parser.parse(text) {
            Some(root) => self.index_tree(&root, name),
            None => debug!(name, "parser produced no tree; nothing to index"),
        }
    }

    /// Reads, parses, and indexes a script file. The index key is the
    /// path as given.
    pub fn index_script(&mut self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ProjectError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root = self
            .parser
            .parse(&text)
            .ok_or_else(|| ProjectError::Parse { path: path.to_path_buf() })?;
        self.index_tree(&root, &path.to_string_lossy());
        Ok(())
    }

    /// Rebuilds the temporary scopes for a cursor position. Passing
    /// `None` just clears them.
    ///
    /// The structurer hands back scopes innermost first; they are
    /// registered outermost first so the innermost ends up as the
    /// most-recently-added, highest-precedence, temporary.
    pub fn index_local_scope(&mut self, node: Option<&SyntaxNode>) {
        self.index.clear_temporary_scopes();
        let Some(node) = node else { return };
        for scope in self.former.form_local_scopes(node).into_iter().rev() {
            self.index.add_temporary_scope(scope);
        }
    }

    // -- Project configuration

    /// Seeds global aliases from project configuration: script-backed
    /// global classes and autoload singletons. Scene autoloads are
    /// skipped, as are classes in other languages. Individual script
    /// failures are reported and do not abort the rest.
    pub fn index_project_config(&mut self, config: &ProjectConfig) {
        for global_class in &config.global_classes {
            if global_class.language != "GDScript" {
                continue;
            }
            let path = self.resolve_resource_path(&global_class.path);
            let name = path.to_string_lossy().to_string();
            if let Err(error) = self.index_script(&path) {
                warn!(%error, "skipping global class script");
                continue;
            }
            self.add_user_global_alias(&global_class.class, &name);
        }

        for (autoload_name, autoload_path) in &config.autoloads {
            // Scene autoloads carry no script symbol of their own.
            if autoload_path.contains(".tscn") {
                continue;
            }
            // A leading `*` marks the autoload as enabled.
            let trimmed = autoload_path.strip_prefix('*').unwrap_or(autoload_path);
            let path = self.resolve_resource_path(trimmed);
            let name = path.to_string_lossy().to_string();
            if let Err(error) = self.index_script(&path) {
                warn!(%error, "skipping autoload script");
                continue;
            }
            self.add_user_global_alias(autoload_name, &name);
        }
        info!("project configuration indexed");
    }

    fn resolve_resource_path(&self, resource: &str) -> PathBuf {
        let relative = resource.strip_prefix("res://").unwrap_or(resource);
        self.resource_path.join(relative)
    }

    // -- Alias management

    /// Binds a global name to the class symbol indexed under `target`.
    ///
    /// At most one alias per class: the previous alias entry for the same
    /// target is removed from `userGlobals` first, and the class symbol's
    /// back-link is rebound. A target that is not indexed yet is a no-op;
    /// re-indexing triggers re-registration.
    pub fn add_user_global_alias(&mut self, name: &str, target: &str) {
        let Some(class_symbol) = self.index.lookup(target) else {
            debug!(name, target, "alias target not indexed yet");
            return;
        };
        let Some(class_info) = class_symbol.as_class() else {
            warn!(name, target, "alias target is not a class symbol");
            return;
        };

        let stale_alias = class_info.alias();
        class_info.set_alias(Some(SmolStr::new(name)));

        let alias_symbol = Symbol::new(Structure::Alias(AliasInfo {
            name: name.into(),
            target: target.into(),
        }));
        if let Some(user_globals) = self.index.persistent_scope_mut(scopes::USER_GLOBALS) {
            if let Some(stale) = stale_alias {
                user_globals.remove(&stale);
            }
            user_globals.add(alias_symbol);
        }
    }

    // -- Symbol queries

    /// The symbols offerable for a bare identifier at `node`: every
    /// class and alias symbol across the chain, everything reachable in
    /// the enclosing class's ancestry, and the contents of the current
    /// temporary scopes.
    pub fn get_symbols_for_identifier(&self, node: &SyntaxNode) -> Vec<Symbol> {
        let resolver = self.resolver();
        let mut results = resolver.all_class_symbols();

        if let Some(self_class) = self.former.form_self_class_symbol(node) {
            results.extend(resolver.ancestry_symbols(&self_class));
        }

        for scope in self.index.temporary_scopes() {
            results.extend(scope.symbols().cloned());
        }
        results
    }

    /// The member symbols offerable inside an attribute chain: the chain
    /// up to `to` is resolved to a class, and that class's full ancestry
    /// listing comes back. An unresolvable chain yields an empty list.
    pub fn get_symbols_for_attribute(
        &self,
        attribute: &SyntaxNode,
        to: &SyntaxElement,
    ) -> Vec<Symbol> {
        let resolver = self.resolver();
        match resolver.solve_attribute(&self.former, attribute, to) {
            Some(class_symbol) => resolver.ancestry_symbols(&class_symbol),
            None => Vec::new(),
        }
    }

    /// Resolves any symbol to the class describing its members, through
    /// aliases, declared types, and return types.
    pub fn resolve_symbol_type(&self, symbol: Symbol) -> Option<Symbol> {
        self.resolver().resolve_class(symbol)
    }

    // -- Builtin documentation

    /// One-time load of the builtin class description table.
    ///
    /// `@GlobalScope` members are hoisted directly into the
    /// `builtinGlobals` scope and `@GDScript` members into `builtins`;
    /// every other entry registers as a single class symbol in
    /// `builtins`. Each entry is transformed into fresh structures; the
    /// input table is never mutated.
    pub fn init_documentation(&mut self, docs: &BuiltinDocs) {
        for (class_name, doc_class) in docs.classes() {
            let info = docs::class_info_from_doc(class_name, doc_class);
            let scope_name = if class_name == "@GlobalScope" {
                scopes::BUILTIN_GLOBALS
            } else {
                scopes::BUILTINS
            };
            let Some(scope) = self.index.persistent_scope_mut(scope_name) else {
                continue;
            };
            if class_name == "@GDScript" || class_name == "@GlobalScope" {
                // Pseudo-classes: their members are global names, not
                // `Something.member` accesses.
                for symbol in info
                    .methods
                    .values()
                    .chain(info.members.values())
                    .chain(info.constants.values())
                {
                    scope.add(symbol.clone());
                }
            } else {
                scope.add(Symbol::class(info));
            }
        }
        info!("builtin documentation indexed");
    }
}

impl std::fmt::Debug for ProjectIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectIndex")
            .field("resource_path", &self.resource_path)
            .finish_non_exhaustive()
    }
}
