//! Syntax kinds for the GDScript grammar vocabulary.

/// One kind tag per grammar production and token the index cares about.
///
/// The set mirrors the tree-sitter GDScript grammar names (snake_case
/// there, CamelCase here); parser adapters map grammar nodes onto these
/// when building trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    Whitespace,
    Comment,
    Ident,
    Literal,
    StringLit,
    Dot,
    Comma,
    Colon,
    Eq,
    Arrow,
    LParen,
    RParen,
    ExtendsKw,
    ClassKw,
    ClassNameKw,
    FuncKw,
    VarKw,
    ConstKw,
    SignalKw,
    ExportKw,
    OnreadyKw,
    SetgetKw,
    SelfKw,

    // Nodes
    Source,
    Body,
    ClassDefinition,
    FunctionDefinition,
    Parameters,
    Parameter,
    ReturnType,
    Type,
    Name,
    VariableStatement,
    ExportVariableStatement,
    OnreadyVariableStatement,
    ConstStatement,
    SignalStatement,
    ExtendsStatement,
    ClassNameStatement,
    Setget,
    Setter,
    Getter,
    IdentifierList,
    Identifier,
    SelfExpr,
    Attribute,
    AttributeCall,
    AttributeSubscript,
    Call,
    Arguments,
    ExpressionStatement,
    ReturnStatement,
    PassStatement,

    /// An error production covering unparseable input.
    Error,
}

impl SyntaxKind {
    /// Trivia never participates in structure extraction.
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Comment)
    }

    /// The three variable-statement flavors share one structure mapping.
    pub fn is_variable_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::VariableStatement
                | SyntaxKind::ExportVariableStatement
                | SyntaxKind::OnreadyVariableStatement
        )
    }

    fn from_raw(raw: u16) -> SyntaxKind {
        assert!(raw <= SyntaxKind::Error as u16, "invalid SyntaxKind: {raw}");
        // Safety: repr(u16) enum with contiguous discriminants, bounds
        // checked above.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) }
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

/// Rowan language marker for GDScript trees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GdScriptLanguage {}

impl rowan::Language for GdScriptLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn raw_round_trip() {
        for kind in [
            SyntaxKind::Whitespace,
            SyntaxKind::Source,
            SyntaxKind::ClassDefinition,
            SyntaxKind::Error,
        ] {
            let raw = GdScriptLanguage::kind_to_raw(kind);
            assert_eq!(GdScriptLanguage::kind_from_raw(raw), kind);
        }
    }

    #[test]
    fn classification() {
        assert!(SyntaxKind::Whitespace.is_trivia());
        assert!(!SyntaxKind::Ident.is_trivia());
        assert!(SyntaxKind::OnreadyVariableStatement.is_variable_statement());
        assert!(!SyntaxKind::ConstStatement.is_variable_statement());
    }
}
