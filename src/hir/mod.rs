//! The semantic model: symbol structures, scopes, the scope chain, the
//! tree structurer, and the type resolver.

mod former;
mod resolve;
mod scope;
mod symbols;

pub use former::TreeFormer;
pub use resolve::Resolver;
pub use scope::{Index, Scope, ScopeId};
pub use symbols::{
    AliasInfo, ArgumentInfo, ClassInfo, ConstantInfo, MemberInfo, MethodInfo, ReturnInfo,
    SignalInfo, Structure, Symbol, SymbolKind, DEFAULT_INHERITANCE,
};
