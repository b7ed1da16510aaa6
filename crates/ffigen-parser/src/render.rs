//! Type rendering.
//!
//! Converts an oracle type into a [`TypeNode`]. Named declarations are never
//! expanded: any type that has a declaration becomes a `ref` to that
//! declaration's identity, so recursive types render finitely.

use ffigen_core::{CallingConvention, TypeNode};

use crate::oracle::{Abi, AstOracle, TypeKind};

/// Builtin kinds and their C spellings.
pub const PRIMITIVES: [(TypeKind, &str); 22] = [
    (TypeKind::Void, "void"),
    (TypeKind::Bool, "bool"),
    (TypeKind::CharU, "char"),
    (TypeKind::CharS, "char"),
    (TypeKind::UChar, "unsigned char"),
    (TypeKind::SChar, "signed char"),
    (TypeKind::WChar, "wchar_t"),
    (TypeKind::Char16, "char16_t"),
    (TypeKind::Char32, "char32_t"),
    (TypeKind::Short, "short"),
    (TypeKind::UShort, "unsigned short"),
    (TypeKind::Int, "int"),
    (TypeKind::UInt, "unsigned int"),
    (TypeKind::Long, "long"),
    (TypeKind::ULong, "unsigned long"),
    (TypeKind::LongLong, "long long"),
    (TypeKind::ULongLong, "unsigned long long"),
    (TypeKind::Int128, "__int128"),
    (TypeKind::UInt128, "unsigned __int128"),
    (TypeKind::Float, "float"),
    (TypeKind::Double, "double"),
    (TypeKind::LongDouble, "long double"),
];

/// Spelling of the `unknown` node emitted when the oracle has no type at all.
pub const INVALID_KIND: &str = "Invalid";

/// C spelling of a builtin type kind.
#[must_use]
pub fn primitive_name(kind: TypeKind) -> Option<&'static str> {
    PRIMITIVES
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, name)| *name)
}

/// Wire name of an ABI tag. The platform default and unlisted ABIs have none.
#[must_use]
pub const fn calling_convention(abi: Abi) -> Option<CallingConvention> {
    match abi {
        Abi::C => Some(CallingConvention::Cdecl),
        Abi::X86StdCall => Some(CallingConvention::Stdcall),
        Abi::X86FastCall => Some(CallingConvention::Fastcall),
        Abi::X86ThisCall => Some(CallingConvention::Thiscall),
        Abi::X86Pascal => Some(CallingConvention::Pascal),
        Abi::Aapcs => Some(CallingConvention::Aapcs),
        Abi::AapcsVfp => Some(CallingConvention::AapcsVfp),
        Abi::Default | Abi::Other => None,
    }
}

/// Placeholder for a missing type.
#[must_use]
pub fn invalid_type() -> TypeNode {
    TypeNode::unknown(INVALID_KIND)
}

/// Render an optional type, falling back to [`invalid_type`].
pub fn render_or_invalid<O: AstOracle>(oracle: &O, ty: Option<&O::Type>) -> TypeNode {
    ty.map_or_else(invalid_type, |ty| render(oracle, ty))
}

/// Render a type into its wire tree.
pub fn render<O: AstOracle>(oracle: &O, ty: &O::Type) -> TypeNode {
    let qualifiers = oracle.qualifiers(ty);
    render_shape(oracle, ty).with_qualifiers(qualifiers)
}

fn render_shape<O: AstOracle>(oracle: &O, ty: &O::Type) -> TypeNode {
    let kind = oracle.type_kind(ty);

    // libclang reports some function types (attributed prototypes, for one)
    // as unexposed while still answering result-type queries.
    let has_result = matches!(kind, TypeKind::Unexposed) && oracle.result_type(ty).is_some();

    match kind {
        TypeKind::Pointer => TypeNode::pointer(render_or_invalid(oracle, oracle.pointee(ty).as_ref())),
        TypeKind::ConstantArray => TypeNode::array(
            render_or_invalid(oracle, oracle.element(ty).as_ref()),
            oracle.array_length(ty).unwrap_or_default(),
        ),
        TypeKind::FunctionProto | TypeKind::FunctionNoProto => render_function(oracle, ty),
        TypeKind::Unexposed if has_result => render_function(oracle, ty),
        _ => render_named(oracle, ty, kind),
    }
}

fn render_function<O: AstOracle>(oracle: &O, ty: &O::Type) -> TypeNode {
    let returns = render_or_invalid(oracle, oracle.result_type(ty).as_ref());
    let arguments = oracle
        .argument_types(ty)
        .iter()
        .map(|argument| render(oracle, argument))
        .collect();
    TypeNode::function(
        returns,
        calling_convention(oracle.calling_convention(ty)),
        arguments,
    )
}

fn render_named<O: AstOracle>(oracle: &O, ty: &O::Type, kind: TypeKind) -> TypeNode {
    if let Some(declaration) = oracle.declaration(ty) {
        return TypeNode::reference(oracle.identity(&declaration));
    }
    primitive_name(kind).map_or_else(
        || TypeNode::unknown(oracle.type_kind_spelling(ty)),
        TypeNode::primitive,
    )
}

#[cfg(test)]
mod tests {
    use ffigen_core::{Qualifiers, TypeShape};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::synthetic::SyntheticTu;

    #[rstest]
    #[case(TypeKind::Int, "int")]
    #[case(TypeKind::CharS, "char")]
    #[case(TypeKind::CharU, "char")]
    #[case(TypeKind::LongLong, "long long")]
    #[case(TypeKind::ULongLong, "unsigned long long")]
    #[case(TypeKind::UInt128, "unsigned __int128")]
    #[case(TypeKind::Bool, "bool")]
    #[case(TypeKind::LongDouble, "long double")]
    fn builtin_kinds_render_as_primitives(#[case] kind: TypeKind, #[case] expected: &str) {
        let mut tu = SyntheticTu::new();
        let ty = tu.primitive(kind);
        assert_eq!(render(&tu, &ty), TypeNode::primitive(expected));
    }

    #[test]
    fn primitive_table_has_no_structural_kinds() {
        for kind in [
            TypeKind::Pointer,
            TypeKind::ConstantArray,
            TypeKind::FunctionProto,
            TypeKind::Unexposed,
            TypeKind::Other,
        ] {
            assert_eq!(primitive_name(kind), None, "{kind:?}");
        }
    }

    #[rstest]
    #[case(Abi::C, Some(CallingConvention::Cdecl))]
    #[case(Abi::X86StdCall, Some(CallingConvention::Stdcall))]
    #[case(Abi::X86FastCall, Some(CallingConvention::Fastcall))]
    #[case(Abi::X86ThisCall, Some(CallingConvention::Thiscall))]
    #[case(Abi::X86Pascal, Some(CallingConvention::Pascal))]
    #[case(Abi::Aapcs, Some(CallingConvention::Aapcs))]
    #[case(Abi::AapcsVfp, Some(CallingConvention::AapcsVfp))]
    #[case(Abi::Default, None)]
    #[case(Abi::Other, None)]
    fn calling_convention_mapping(#[case] abi: Abi, #[case] expected: Option<CallingConvention>) {
        assert_eq!(calling_convention(abi), expected);
    }

    #[test]
    fn const_char_pointer() {
        let mut tu = SyntheticTu::new();
        let char_ty = tu.primitive(TypeKind::CharS);
        let const_char = tu.qualified(char_ty, Qualifiers::constant());
        let pointer = tu.pointer_to(const_char);

        let value = serde_json::to_value(render(&tu, &pointer)).expect("serialize");
        assert_eq!(
            value,
            json!({
                "kind": "pointer",
                "pointee": {"const": true, "kind": "primitive", "primitive": "char"}
            })
        );
    }

    #[test]
    fn qualifier_keys_follow_volatile_const_restrict_order() {
        let mut tu = SyntheticTu::new();
        let int = tu.primitive(TypeKind::Int);
        let pointer = tu.pointer_to(int);
        let qualified = tu.qualified(
            pointer,
            Qualifiers {
                is_volatile: true,
                is_const: true,
                is_restrict: true,
            },
        );

        let text = serde_json::to_string(&render(&tu, &qualified)).expect("serialize");
        assert!(
            text.starts_with(r#"{"volatile":true,"const":true,"restrict":true,"kind":"pointer""#),
            "got {text}"
        );
    }

    #[test]
    fn constant_array_keeps_length() {
        let mut tu = SyntheticTu::new();
        let double = tu.primitive(TypeKind::Double);
        let array = tu.array_of(double, 16);
        assert_eq!(
            render(&tu, &array),
            TypeNode::array(TypeNode::primitive("double"), 16)
        );
    }

    #[test]
    fn declared_type_renders_as_reference() {
        let mut tu = SyntheticTu::new();
        let root = tu.root();
        let point = tu.struct_decl(root, "point", "c:@S@point");
        let point_ty = tu.declared(point);
        assert_eq!(render(&tu, &point_ty), TypeNode::reference("c:@S@point"));
    }

    #[test]
    fn function_without_calling_convention() {
        let mut tu = SyntheticTu::new();
        let int = tu.primitive(TypeKind::Int);
        let void = tu.primitive(TypeKind::Void);
        let function = tu.function(void, &[int], Abi::Default);

        let node = render(&tu, &function);
        let TypeShape::Function {
            calling_convention,
            arguments,
            returns,
        } = node.shape
        else {
            panic!("expected function shape, got {node:?}");
        };
        assert_eq!(calling_convention, None);
        assert_eq!(*returns, TypeNode::primitive("void"));
        assert_eq!(arguments, vec![TypeNode::primitive("int")]);
    }

    #[test]
    fn unexposed_type_with_result_is_treated_as_function() {
        let mut tu = SyntheticTu::new();
        let int = tu.primitive(TypeKind::Int);
        let function = tu.function(int, &[], Abi::C);
        let unexposed = tu.reclassified(function, TypeKind::Unexposed, "Unexposed");

        assert_eq!(
            render(&tu, &unexposed),
            TypeNode::function(TypeNode::primitive("int"), Some(CallingConvention::Cdecl), Vec::new())
        );
    }

    #[test]
    fn unexposed_type_without_result_is_unknown() {
        let mut tu = SyntheticTu::new();
        let opaque = tu.opaque(TypeKind::Unexposed, "Unexposed");
        assert_eq!(render(&tu, &opaque), TypeNode::unknown("Unexposed"));
    }

    #[test]
    fn unhandled_kind_without_declaration_is_unknown() {
        let mut tu = SyntheticTu::new();
        let vector = tu.opaque(TypeKind::Other, "Vector");
        assert_eq!(render(&tu, &vector), TypeNode::unknown("Vector"));
    }

    #[test]
    fn missing_type_is_invalid() {
        let tu = SyntheticTu::new();
        assert_eq!(render_or_invalid(&tu, None), TypeNode::unknown("Invalid"));
    }
}
