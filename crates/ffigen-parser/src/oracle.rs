//! The AST oracle seam.
//!
//! Everything the extractor knows about a translation unit comes through
//! [`AstOracle`]. Node and type handles are opaque to the extractor; it only
//! inspects them through the oracle, which is passed down the traversal
//! explicitly. Two oracles ship with the crate: the libclang-backed
//! `ClangOracle` and the in-memory `SyntheticTu`.

use ffigen_core::{Qualifiers, SymbolIdentity};

/// Node kinds the extractor dispatches on. Everything else is `Other` and
/// is described by [`AstOracle::node_kind_spelling`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    TranslationUnit,
    FunctionDecl,
    VarDecl,
    StructDecl,
    UnionDecl,
    EnumDecl,
    TypedefDecl,
    FieldDecl,
    ParmDecl,
    EnumConstantDecl,
    MacroDefinition,
    IntegerLiteral,
    FloatingLiteral,
    StringLiteral,
    Other,
}

/// Type kinds the renderer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Void,
    Bool,
    CharU,
    CharS,
    UChar,
    SChar,
    WChar,
    Char16,
    Char32,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Int128,
    UInt128,
    Float,
    Double,
    LongDouble,
    Pointer,
    ConstantArray,
    FunctionProto,
    FunctionNoProto,
    /// Kind the oracle could not classify further.
    Unexposed,
    /// Types that usually carry a declaration (records, enums, typedefs,
    /// elaborated names) and anything else without a dedicated arm.
    Other,
}

/// ABI tag of a function type as reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Abi {
    /// Platform default, or no convention reported.
    Default,
    C,
    X86StdCall,
    X86FastCall,
    X86ThisCall,
    X86Pascal,
    Aapcs,
    AapcsVfp,
    Other,
}

/// Linkage as reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkageKind {
    Invalid,
    NoLinkage,
    Internal,
    UniqueExternal,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Punctuation,
    Keyword,
    Identifier,
    Literal,
    Comment,
}

/// One token of a macro definition's source extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: String,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, spelling: impl Into<String>) -> Self {
        Self {
            kind,
            spelling: spelling.into(),
        }
    }

    #[must_use]
    pub fn identifier(spelling: impl Into<String>) -> Self {
        Self::new(TokenKind::Identifier, spelling)
    }

    #[must_use]
    pub fn literal(spelling: impl Into<String>) -> Self {
        Self::new(TokenKind::Literal, spelling)
    }

    #[must_use]
    pub fn punctuation(spelling: impl Into<String>) -> Self {
        Self::new(TokenKind::Punctuation, spelling)
    }

    #[must_use]
    pub fn comment(spelling: impl Into<String>) -> Self {
        Self::new(TokenKind::Comment, spelling)
    }
}

/// Read-only view of a parsed translation unit.
///
/// Methods returning `Option` yield `None` where the underlying library
/// reports an invalid handle.
pub trait AstOracle {
    type Node: Clone;
    type Type: Clone;

    /// The translation unit node whose children are the top-level nodes.
    fn root(&self) -> Self::Node;

    /// Immediate children in source order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn node_kind(&self, node: &Self::Node) -> NodeKind;

    /// Human-readable node kind, used by diagnostic fallbacks.
    fn node_kind_spelling(&self, node: &Self::Node) -> String;

    /// Bare spelling (the declared name); empty for anonymous nodes.
    fn spelling(&self, node: &Self::Node) -> String;

    /// Display spelling, e.g. a function name with its parameter list.
    fn display_name(&self, node: &Self::Node) -> String;

    /// Stable identity; empty when the node has none.
    fn identity(&self, node: &Self::Node) -> SymbolIdentity;

    fn node_type(&self, node: &Self::Node) -> Option<Self::Type>;

    fn typedef_underlying_type(&self, node: &Self::Node) -> Option<Self::Type>;

    fn linkage(&self, node: &Self::Node) -> LinkageKind;

    fn enum_constant_value(&self, node: &Self::Node) -> Option<i64>;

    /// Tokens covering the node's source extent.
    fn tokens(&self, node: &Self::Node) -> Vec<Token>;

    fn type_kind(&self, ty: &Self::Type) -> TypeKind;

    /// Human-readable type kind, used for `unknown` type nodes.
    fn type_kind_spelling(&self, ty: &Self::Type) -> String;

    fn qualifiers(&self, ty: &Self::Type) -> Qualifiers;

    fn pointee(&self, ty: &Self::Type) -> Option<Self::Type>;

    fn element(&self, ty: &Self::Type) -> Option<Self::Type>;

    /// Element count of a constant-size array.
    fn array_length(&self, ty: &Self::Type) -> Option<u64>;

    /// Result type of a function type; `None` for anything else.
    fn result_type(&self, ty: &Self::Type) -> Option<Self::Type>;

    fn calling_convention(&self, ty: &Self::Type) -> Abi;

    fn argument_types(&self, ty: &Self::Type) -> Vec<Self::Type>;

    /// The declaration a type names, if any.
    fn declaration(&self, ty: &Self::Type) -> Option<Self::Node>;
}
