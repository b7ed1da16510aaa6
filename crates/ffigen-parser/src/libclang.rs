//! [`AstOracle`] over libclang, via the `clang` crate.
//!
//! libclang is loaded at runtime, so building this crate does not require
//! it; [`Session::open`] fails with `ParserError::LibclangUnavailable` when
//! the shared library cannot be found.

use std::path::Path;

use clang::{
    CallingConvention, Clang, Entity, EntityKind, Index, Linkage, TranslationUnit, Type,
    TypeKind as ClangTypeKind, diagnostic::Severity,
};
use ffigen_core::{Qualifiers, SymbolIdentity};
use serde::Serialize;
use tracing::debug;

use crate::error::ParserError;
use crate::oracle::{Abi, AstOracle, LinkageKind, NodeKind, Token, TokenKind, TypeKind};

/// Fragment of the `clang` crate's error when an instance already exists.
const ACTIVE_SESSION_MARKER: &str = "already exists";

/// A loaded libclang instance.
pub struct Session {
    clang: Clang,
}

impl Session {
    /// Load libclang.
    ///
    /// Only one session may be alive per process. Callers that extract
    /// from several threads must serialize their sessions.
    ///
    /// # Errors
    /// Returns `ParserError::SessionActive` if another session is still
    /// open, and `ParserError::LibclangUnavailable` if the library cannot
    /// be loaded.
    pub fn open() -> Result<Self, ParserError> {
        let clang = Clang::new().map_err(|message| {
            if message.contains(ACTIVE_SESSION_MARKER) {
                ParserError::SessionActive
            } else {
                ParserError::LibclangUnavailable(message)
            }
        })?;
        Ok(Self { clang })
    }

    /// Parse `source` with `arguments` and run `visit` over the result.
    ///
    /// The translation unit only lives for the duration of the call; the
    /// closure receives the oracle and the unit's diagnostics.
    ///
    /// # Errors
    /// Returns `ParserError::ParseFailed` if libclang produced no
    /// translation unit.
    pub fn with_unit<R>(
        &self,
        source: &Path,
        arguments: &[String],
        visit: impl FnOnce(&ClangOracle<'_>, Vec<Diagnostic>) -> R,
    ) -> Result<R, ParserError> {
        let index = Index::new(&self.clang, false, false);
        debug!(source = %source.display(), ?arguments, "parsing translation unit");
        let unit = index
            .parser(source)
            .arguments(arguments)
            .detailed_preprocessing_record(true)
            .parse()
            .map_err(|error| ParserError::ParseFailed {
                path: source.display().to_string(),
                message: error.to_string(),
            })?;

        let diagnostics = collect_diagnostics(&unit);
        let oracle = ClangOracle::new(&unit);
        Ok(visit(&oracle, diagnostics))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    Ignored,
    Note,
    Warning,
    Error,
    Fatal,
}

/// One compiler diagnostic, formatted the way clang prints it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
}

fn collect_diagnostics(unit: &TranslationUnit<'_>) -> Vec<Diagnostic> {
    unit.get_diagnostics()
        .iter()
        .map(|diagnostic| Diagnostic {
            severity: match diagnostic.get_severity() {
                Severity::Ignored => DiagnosticSeverity::Ignored,
                Severity::Note => DiagnosticSeverity::Note,
                Severity::Warning => DiagnosticSeverity::Warning,
                Severity::Error => DiagnosticSeverity::Error,
                Severity::Fatal => DiagnosticSeverity::Fatal,
            },
            message: diagnostic.formatter().format(),
        })
        .collect()
}

/// Oracle over one parsed translation unit.
pub struct ClangOracle<'tu> {
    root: Entity<'tu>,
}

impl<'tu> ClangOracle<'tu> {
    #[must_use]
    pub fn new(unit: &'tu TranslationUnit<'tu>) -> Self {
        Self {
            root: unit.get_entity(),
        }
    }
}

impl<'tu> AstOracle for ClangOracle<'tu> {
    type Node = Entity<'tu>;
    type Type = Type<'tu>;

    fn root(&self) -> Entity<'tu> {
        self.root
    }

    fn children(&self, node: &Entity<'tu>) -> Vec<Entity<'tu>> {
        node.get_children()
    }

    fn node_kind(&self, node: &Entity<'tu>) -> NodeKind {
        match node.get_kind() {
            EntityKind::TranslationUnit => NodeKind::TranslationUnit,
            EntityKind::FunctionDecl => NodeKind::FunctionDecl,
            EntityKind::VarDecl => NodeKind::VarDecl,
            EntityKind::StructDecl => NodeKind::StructDecl,
            EntityKind::UnionDecl => NodeKind::UnionDecl,
            EntityKind::EnumDecl => NodeKind::EnumDecl,
            EntityKind::TypedefDecl => NodeKind::TypedefDecl,
            EntityKind::FieldDecl => NodeKind::FieldDecl,
            EntityKind::ParmDecl => NodeKind::ParmDecl,
            EntityKind::EnumConstantDecl => NodeKind::EnumConstantDecl,
            EntityKind::MacroDefinition => NodeKind::MacroDefinition,
            EntityKind::IntegerLiteral => NodeKind::IntegerLiteral,
            EntityKind::FloatingLiteral => NodeKind::FloatingLiteral,
            EntityKind::StringLiteral => NodeKind::StringLiteral,
            _ => NodeKind::Other,
        }
    }

    fn node_kind_spelling(&self, node: &Entity<'tu>) -> String {
        format!("{:?}", node.get_kind())
    }

    fn spelling(&self, node: &Entity<'tu>) -> String {
        node.get_name().unwrap_or_default()
    }

    fn display_name(&self, node: &Entity<'tu>) -> String {
        node.get_display_name().unwrap_or_default()
    }

    fn identity(&self, node: &Entity<'tu>) -> SymbolIdentity {
        node.get_usr()
            .map_or_else(SymbolIdentity::anonymous, |usr| SymbolIdentity::new(usr.0))
    }

    fn node_type(&self, node: &Entity<'tu>) -> Option<Type<'tu>> {
        node.get_type()
    }

    fn typedef_underlying_type(&self, node: &Entity<'tu>) -> Option<Type<'tu>> {
        node.get_typedef_underlying_type()
    }

    fn linkage(&self, node: &Entity<'tu>) -> LinkageKind {
        match node.get_linkage() {
            Some(Linkage::Automatic) => LinkageKind::NoLinkage,
            Some(Linkage::Internal) => LinkageKind::Internal,
            Some(Linkage::UniqueExternal) => LinkageKind::UniqueExternal,
            Some(Linkage::External) => LinkageKind::External,
            None => LinkageKind::Invalid,
        }
    }

    fn enum_constant_value(&self, node: &Entity<'tu>) -> Option<i64> {
        node.get_enum_constant_value().map(|(signed, _)| signed)
    }

    fn tokens(&self, node: &Entity<'tu>) -> Vec<Token> {
        let Some(range) = node.get_range() else {
            return Vec::new();
        };
        range
            .tokenize()
            .iter()
            .map(|token| {
                let kind = match token.get_kind() {
                    clang::token::TokenKind::Punctuation => TokenKind::Punctuation,
                    clang::token::TokenKind::Keyword => TokenKind::Keyword,
                    clang::token::TokenKind::Identifier => TokenKind::Identifier,
                    clang::token::TokenKind::Literal => TokenKind::Literal,
                    clang::token::TokenKind::Comment => TokenKind::Comment,
                };
                Token::new(kind, token.get_spelling())
            })
            .collect()
    }

    fn type_kind(&self, ty: &Type<'tu>) -> TypeKind {
        match ty.get_kind() {
            ClangTypeKind::Void => TypeKind::Void,
            ClangTypeKind::Bool => TypeKind::Bool,
            ClangTypeKind::CharU => TypeKind::CharU,
            ClangTypeKind::CharS => TypeKind::CharS,
            ClangTypeKind::UChar => TypeKind::UChar,
            ClangTypeKind::SChar => TypeKind::SChar,
            ClangTypeKind::WChar => TypeKind::WChar,
            ClangTypeKind::Char16 => TypeKind::Char16,
            ClangTypeKind::Char32 => TypeKind::Char32,
            ClangTypeKind::Short => TypeKind::Short,
            ClangTypeKind::UShort => TypeKind::UShort,
            ClangTypeKind::Int => TypeKind::Int,
            ClangTypeKind::UInt => TypeKind::UInt,
            ClangTypeKind::Long => TypeKind::Long,
            ClangTypeKind::ULong => TypeKind::ULong,
            ClangTypeKind::LongLong => TypeKind::LongLong,
            ClangTypeKind::ULongLong => TypeKind::ULongLong,
            ClangTypeKind::Int128 => TypeKind::Int128,
            ClangTypeKind::UInt128 => TypeKind::UInt128,
            ClangTypeKind::Float => TypeKind::Float,
            ClangTypeKind::Double => TypeKind::Double,
            ClangTypeKind::LongDouble => TypeKind::LongDouble,
            ClangTypeKind::Pointer => TypeKind::Pointer,
            ClangTypeKind::ConstantArray => TypeKind::ConstantArray,
            ClangTypeKind::FunctionPrototype => TypeKind::FunctionProto,
            ClangTypeKind::FunctionNoPrototype => TypeKind::FunctionNoProto,
            ClangTypeKind::Unexposed => TypeKind::Unexposed,
            _ => TypeKind::Other,
        }
    }

    fn type_kind_spelling(&self, ty: &Type<'tu>) -> String {
        format!("{:?}", ty.get_kind())
    }

    fn qualifiers(&self, ty: &Type<'tu>) -> Qualifiers {
        Qualifiers {
            is_volatile: ty.is_volatile_qualified(),
            is_const: ty.is_const_qualified(),
            is_restrict: ty.is_restrict_qualified(),
        }
    }

    fn pointee(&self, ty: &Type<'tu>) -> Option<Type<'tu>> {
        ty.get_pointee_type()
    }

    fn element(&self, ty: &Type<'tu>) -> Option<Type<'tu>> {
        ty.get_element_type()
    }

    fn array_length(&self, ty: &Type<'tu>) -> Option<u64> {
        ty.get_size().and_then(|size| u64::try_from(size).ok())
    }

    fn result_type(&self, ty: &Type<'tu>) -> Option<Type<'tu>> {
        ty.get_result_type()
    }

    fn calling_convention(&self, ty: &Type<'tu>) -> Abi {
        match ty.get_calling_convention() {
            Some(CallingConvention::Cdecl) => Abi::C,
            Some(CallingConvention::Stdcall) => Abi::X86StdCall,
            Some(CallingConvention::Fastcall) => Abi::X86FastCall,
            Some(CallingConvention::Thiscall) => Abi::X86ThisCall,
            Some(CallingConvention::Pascal) => Abi::X86Pascal,
            Some(CallingConvention::Aapcs) => Abi::Aapcs,
            Some(CallingConvention::AapcsVfp) => Abi::AapcsVfp,
            None => Abi::Default,
            Some(_) => Abi::Other,
        }
    }

    fn argument_types(&self, ty: &Type<'tu>) -> Vec<Type<'tu>> {
        ty.get_argument_types().unwrap_or_default()
    }

    fn declaration(&self, ty: &Type<'tu>) -> Option<Entity<'tu>> {
        ty.get_declaration()
    }
}
