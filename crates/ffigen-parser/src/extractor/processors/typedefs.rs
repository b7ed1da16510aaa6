use ffigen_core::{DeclarationRecord, TypedefRecord};

use crate::oracle::AstOracle;
use crate::render::render_or_invalid;

pub(in crate::extractor) fn process_typedef<O: AstOracle>(
    oracle: &O,
    node: &O::Node,
) -> DeclarationRecord {
    DeclarationRecord::Typedef(TypedefRecord {
        name: oracle.spelling(node),
        ty: render_or_invalid(oracle, oracle.typedef_underlying_type(node).as_ref()),
    })
}
