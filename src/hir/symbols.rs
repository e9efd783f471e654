//! Symbol structures — one tagged record per declared entity.
//!
//! Every declaration the index knows about (a class, a method, a member
//! variable, a constant, a signal, a method argument, a return slot, or a
//! global alias) is a [`Structure`] variant with fixed fields, wrapped in
//! a cheaply clonable [`Symbol`] handle. Class structures own their
//! children as name-keyed, insertion-ordered maps; everything else is
//! terminal for lookup purposes.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use smol_str::SmolStr;

/// Parent type assumed when a script or inner class has no `extends`.
pub const DEFAULT_INHERITANCE: &str = "Reference";

// ============================================================================
// KINDS
// ============================================================================

/// Discriminant of a [`Structure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Class,
    Method,
    Member,
    Constant,
    Signal,
    Argument,
    Return,
    Alias,
}

impl SymbolKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Method => "method",
            SymbolKind::Member => "member",
            SymbolKind::Constant => "constant",
            SymbolKind::Signal => "signal",
            SymbolKind::Argument => "argument",
            SymbolKind::Return => "return",
            SymbolKind::Alias => "alias",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// STRUCTURES
// ============================================================================

/// A positional method or signal argument.
#[derive(Clone, Debug, Default)]
pub struct ArgumentInfo {
    pub index: u32,
    pub name: SmolStr,
    pub ty: SmolStr,
    pub default: Option<SmolStr>,
    pub description: String,
}

/// A method's return slot.
#[derive(Clone, Debug, Default)]
pub struct ReturnInfo {
    pub ty: SmolStr,
    pub description: String,
}

#[derive(Clone, Debug, Default)]
pub struct MethodInfo {
    pub name: SmolStr,
    pub arguments: Vec<ArgumentInfo>,
    pub return_ty: ReturnInfo,
    /// Space-separated qualifier flags from the builtin docs, e.g.
    /// `"vararg"` or `"const"`.
    pub qualifiers: SmolStr,
    pub description: String,
}

impl MethodInfo {
    pub fn is_vararg(&self) -> bool {
        self.qualifiers.contains("vararg")
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemberInfo {
    pub name: SmolStr,
    pub ty: SmolStr,
    pub setter: SmolStr,
    pub getter: SmolStr,
    pub description: String,
}

#[derive(Clone, Debug, Default)]
pub struct ConstantInfo {
    pub name: SmolStr,
    /// Literal value text as written in source or docs.
    pub value: String,
    /// Enum the constant belongs to, when the docs say so.
    pub enum_name: SmolStr,
    pub description: String,
}

#[derive(Clone, Debug, Default)]
pub struct SignalInfo {
    pub name: SmolStr,
    pub arguments: Vec<ArgumentInfo>,
    pub description: String,
}

/// A global name bound to another class's storage location: a
/// `class_name` declaration or an autoload singleton.
#[derive(Clone, Debug, Default)]
pub struct AliasInfo {
    pub name: SmolStr,
    /// Script path (or class name) the alias points at.
    pub target: SmolStr,
}

/// A class: a whole script, a nested `class`, or a builtin.
#[derive(Debug)]
pub struct ClassInfo {
    pub name: SmolStr,
    /// Parent type name; a quote-normalized script path for
    /// `extends "res://..."` inheritance.
    pub inherits: SmolStr,
    /// Declared `class_name`, when present.
    pub class_name: Option<SmolStr>,
    /// Back-link to the global alias currently naming this class.
    /// Rebound in place by alias management while the symbol is already
    /// stored in a scope, hence the lock; read through
    /// [`alias`](ClassInfo::alias).
    pub alias: RwLock<Option<SmolStr>>,
    pub classes: IndexMap<SmolStr, Symbol>,
    pub methods: IndexMap<SmolStr, Symbol>,
    pub members: IndexMap<SmolStr, Symbol>,
    pub constants: IndexMap<SmolStr, Symbol>,
    pub signals: IndexMap<SmolStr, Symbol>,
    pub brief_description: String,
    pub description: String,
}

impl Default for ClassInfo {
    fn default() -> Self {
        Self {
            name: SmolStr::default(),
            inherits: SmolStr::new_static(DEFAULT_INHERITANCE),
            class_name: None,
            alias: RwLock::new(None),
            classes: IndexMap::new(),
            methods: IndexMap::new(),
            members: IndexMap::new(),
            constants: IndexMap::new(),
            signals: IndexMap::new(),
            brief_description: String::new(),
            description: String::new(),
        }
    }
}

impl ClassInfo {
    pub fn alias(&self) -> Option<SmolStr> {
        self.alias.read().clone()
    }

    pub fn set_alias(&self, alias: Option<SmolStr>) {
        *self.alias.write() = alias;
    }
}

/// One declared entity, tagged by kind.
#[derive(Debug)]
pub enum Structure {
    Class(ClassInfo),
    Method(MethodInfo),
    Member(MemberInfo),
    Constant(ConstantInfo),
    Signal(SignalInfo),
    Argument(ArgumentInfo),
    Return(ReturnInfo),
    Alias(AliasInfo),
}

impl Structure {
    pub fn kind(&self) -> SymbolKind {
        match self {
            Structure::Class(_) => SymbolKind::Class,
            Structure::Method(_) => SymbolKind::Method,
            Structure::Member(_) => SymbolKind::Member,
            Structure::Constant(_) => SymbolKind::Constant,
            Structure::Signal(_) => SymbolKind::Signal,
            Structure::Argument(_) => SymbolKind::Argument,
            Structure::Return(_) => SymbolKind::Return,
            Structure::Alias(_) => SymbolKind::Alias,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Structure::Class(c) => &c.name,
            Structure::Method(m) => &m.name,
            Structure::Member(m) => &m.name,
            Structure::Constant(c) => &c.name,
            Structure::Signal(s) => &s.name,
            Structure::Argument(a) => &a.name,
            Structure::Return(_) => "",
            Structure::Alias(a) => &a.name,
        }
    }
}

// ============================================================================
// SYMBOL HANDLE
// ============================================================================

/// A shared handle to one [`Structure`].
///
/// Clones share the underlying record; pointer identity ([`Symbol::ptr_eq`])
/// is what the resolver's cycle guard keys on.
#[derive(Clone, Debug)]
pub struct Symbol {
    data: Arc<Structure>,
}

impl Symbol {
    pub fn new(structure: Structure) -> Self {
        Self { data: Arc::new(structure) }
    }

    pub fn class(info: ClassInfo) -> Self {
        Self::new(Structure::Class(info))
    }

    pub fn kind(&self) -> SymbolKind {
        self.data.kind()
    }

    pub fn name(&self) -> &str {
        self.data.name()
    }

    pub fn structure(&self) -> &Structure {
        &self.data
    }

    pub fn as_class(&self) -> Option<&ClassInfo> {
        match &*self.data {
            Structure::Class(info) => Some(info),
            _ => None,
        }
    }

    /// Whether two handles share one underlying structure.
    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Stable address for visited sets.
    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.data) as *const () as usize
    }

    /// Exact-name lookup among a class symbol's children, in the fixed
    /// priority order constants, methods, members, nested classes.
    /// Non-class symbols are terminal and always miss.
    pub fn lookup(&self, term: &str) -> Option<Symbol> {
        let class = self.as_class()?;
        class
            .constants
            .get(term)
            .or_else(|| class.methods.get(term))
            .or_else(|| class.members.get(term))
            .or_else(|| class.classes.get(term))
            .cloned()
    }

    /// Prefix search among a class symbol's children: all matches from
    /// the same four categories, concatenated in priority order.
    pub fn find(&self, prefix: &str) -> Vec<Symbol> {
        let Some(class) = self.as_class() else {
            return Vec::new();
        };
        [&class.constants, &class.methods, &class.members, &class.classes]
            .into_iter()
            .flat_map(|map| {
                map.iter()
                    .filter(|(name, _)| name.starts_with(prefix))
                    .map(|(_, symbol)| symbol.clone())
            })
            .collect()
    }

    /// The description carried by the structure, for completion UIs.
    pub fn description(&self) -> &str {
        match &*self.data {
            Structure::Class(c) => &c.description,
            Structure::Method(m) => &m.description,
            Structure::Member(m) => &m.description,
            Structure::Constant(c) => &c.description,
            Structure::Signal(s) => &s.description,
            Structure::Argument(a) => &a.description,
            Structure::Return(r) => &r.description,
            Structure::Alias(_) => "",
        }
    }
}
