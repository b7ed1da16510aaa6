//! Declaration extraction.
//!
//! Walks a translation unit depth-first through an [`AstOracle`], turning
//! each node into at most one [`DeclarationRecord`] and folding the records
//! into a [`ProgramDocument`]. The document is the only accumulator: it is
//! moved into every walk step and handed back out.
//!
//! Each node yields a [`Visit`]: the record it produced (if any) and whether
//! its children should be walked too. Structs, unions, and typedefs descend
//! so nested and anonymous declarations inside them are picked up; every
//! other node is a leaf for the top-level walk.

use ffigen_core::{DeclarationRecord, ProgramDocument, SymbolIdentity};
use tracing::{debug, trace};

use crate::oracle::{AstOracle, NodeKind};

mod processors;

#[cfg(test)]
mod tests;

use processors::{
    process_composite, process_enum, process_function, process_macro, process_typedef,
    process_unrecognized, process_variable,
};

/// Whether the walk continues into a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    Children,
    Skip,
}

/// Outcome of visiting one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub record: Option<DeclarationRecord>,
    pub descend: Descend,
}

impl Visit {
    const fn leaf(record: DeclarationRecord) -> Self {
        Self {
            record: Some(record),
            descend: Descend::Skip,
        }
    }

    const fn branch(record: DeclarationRecord) -> Self {
        Self {
            record: Some(record),
            descend: Descend::Children,
        }
    }

    const fn ignored() -> Self {
        Self {
            record: None,
            descend: Descend::Skip,
        }
    }
}

/// Extract every declaration reachable from the oracle's root.
pub fn extract<O: AstOracle>(oracle: &O) -> ProgramDocument {
    let document = walk(oracle, &oracle.root(), ProgramDocument::new());
    debug!(
        named = document.len(),
        anonymous = document.anonymous().len(),
        "extraction finished"
    );
    document
}

/// Visit every child of `parent` in source order, folding records into
/// `document` and descending where the visit asks for it.
pub fn walk<O: AstOracle>(
    oracle: &O,
    parent: &O::Node,
    mut document: ProgramDocument,
) -> ProgramDocument {
    for child in oracle.children(parent) {
        let visit = visit_node(oracle, &child);
        if let Some(record) = visit.record {
            document = assemble(document, oracle.identity(&child), record);
        }
        if visit.descend == Descend::Children {
            document = walk(oracle, &child, document);
        }
    }
    document
}

/// Produce the record and recursion directive for a single node.
pub fn visit_node<O: AstOracle>(oracle: &O, node: &O::Node) -> Visit {
    let kind = oracle.node_kind(node);
    trace!(?kind, spelling = %oracle.spelling(node), "visiting node");

    match kind {
        NodeKind::FunctionDecl => Visit::leaf(process_function(oracle, node)),
        NodeKind::VarDecl => Visit::leaf(process_variable(oracle, node)),
        NodeKind::StructDecl => Visit::branch(DeclarationRecord::Struct(process_composite(
            oracle, node,
        ))),
        NodeKind::UnionDecl => Visit::branch(DeclarationRecord::Union(process_composite(
            oracle, node,
        ))),
        NodeKind::EnumDecl => Visit::leaf(process_enum(oracle, node)),
        NodeKind::TypedefDecl => Visit::branch(process_typedef(oracle, node)),
        NodeKind::MacroDefinition => Visit::leaf(process_macro(oracle, node)),
        // Fields are captured by their enclosing struct or union.
        NodeKind::FieldDecl => Visit::ignored(),
        _ => Visit::leaf(process_unrecognized(oracle, node)),
    }
}

/// Fold one record into the document under `identity`.
///
/// Empty identities append to the anonymous list; a repeated identity
/// replaces the earlier record in place.
pub fn assemble(
    mut document: ProgramDocument,
    identity: SymbolIdentity,
    record: DeclarationRecord,
) -> ProgramDocument {
    if identity.is_empty() {
        trace!(kind = %record.kind(), "anonymous record");
        document.insert(identity, record);
        return document;
    }

    let label = identity.to_string();
    if let Some(previous) = document.insert(identity, record) {
        debug!(
            identity = %label,
            previous = %previous.kind(),
            "identity seen again, keeping the later record"
        );
    }
    document
}
