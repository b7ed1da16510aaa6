//! Struct, union, and enum layouts.

use ffigen_core::{CompositeRecord, DeclarationRecord, EnumRecord, EnumValue, FieldRecord};
use tracing::trace;

use crate::oracle::{AstOracle, NodeKind};
use crate::render::render_or_invalid;

/// Name and fields of a struct or union. The caller picks the variant.
pub(in crate::extractor) fn process_composite<O: AstOracle>(
    oracle: &O,
    node: &O::Node,
) -> CompositeRecord {
    let fields = oracle
        .children(node)
        .iter()
        .filter(|child| oracle.node_kind(child) == NodeKind::FieldDecl)
        .map(|field| FieldRecord {
            name: oracle.spelling(field),
            ty: render_or_invalid(oracle, oracle.node_type(field).as_ref()),
        })
        .collect();

    CompositeRecord {
        name: oracle.spelling(node),
        fields,
    }
}

pub(in crate::extractor) fn process_enum<O: AstOracle>(
    oracle: &O,
    node: &O::Node,
) -> DeclarationRecord {
    let values = oracle
        .children(node)
        .iter()
        .filter(|child| oracle.node_kind(child) == NodeKind::EnumConstantDecl)
        .map(|constant| {
            let name = oracle.spelling(constant);
            let value = oracle.enum_constant_value(constant).unwrap_or_else(|| {
                trace!(enumerator = %name, "no constant value reported, using 0");
                0
            });
            EnumValue {
                name,
                value,
                ty: render_or_invalid(oracle, oracle.node_type(constant).as_ref()),
            }
        })
        .collect();

    DeclarationRecord::Enum(EnumRecord {
        name: oracle.spelling(node),
        values,
    })
}
