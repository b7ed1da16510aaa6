//! Macro definitions.

use ffigen_core::{DeclarationRecord, MacroRecord};

use crate::macros::classify_macro;
use crate::oracle::AstOracle;

pub(in crate::extractor) fn process_macro<O: AstOracle>(
    oracle: &O,
    node: &O::Node,
) -> DeclarationRecord {
    let name = oracle.spelling(node);
    let value = classify_macro(&name, &oracle.tokens(node));
    DeclarationRecord::Macro(MacroRecord { name, value })
}
