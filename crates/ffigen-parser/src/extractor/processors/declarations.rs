//! Function and variable declarations.

use ffigen_core::{DeclarationRecord, FunctionRecord, VariableRecord};

use super::linkage_label;
use crate::oracle::{AstOracle, NodeKind};
use crate::render::render_or_invalid;

pub(in crate::extractor) fn process_function<O: AstOracle>(
    oracle: &O,
    node: &O::Node,
) -> DeclarationRecord {
    DeclarationRecord::Function(FunctionRecord {
        name: oracle.spelling(node),
        display_name: oracle.display_name(node),
        ty: render_or_invalid(oracle, oracle.node_type(node).as_ref()),
        argument_names: argument_names(oracle, node),
        linkage: linkage_label(oracle.linkage(node)),
    })
}

pub(in crate::extractor) fn process_variable<O: AstOracle>(
    oracle: &O,
    node: &O::Node,
) -> DeclarationRecord {
    DeclarationRecord::Variable(VariableRecord {
        name: oracle.spelling(node),
        display_name: oracle.display_name(node),
        ty: render_or_invalid(oracle, oracle.node_type(node).as_ref()),
        linkage: linkage_label(oracle.linkage(node)),
    })
}

/// Parameter spellings from the immediate children, `None` when unnamed.
/// Default-value literals and the body are not parameters and are skipped.
fn argument_names<O: AstOracle>(oracle: &O, node: &O::Node) -> Vec<Option<String>> {
    oracle
        .children(node)
        .iter()
        .filter(|child| oracle.node_kind(child) == NodeKind::ParmDecl)
        .map(|param| Some(oracle.spelling(param)).filter(|name| !name.is_empty()))
        .collect()
}
