//! Per-kind record builders used by the extractor's dispatcher.

use ffigen_core::{DeclarationRecord, Linkage, UnrecognizedRecord};

use crate::oracle::{AstOracle, LinkageKind};
use crate::render::render_or_invalid;

mod aggregates;
mod declarations;
mod preproc;
mod typedefs;

pub(super) use aggregates::{process_composite, process_enum};
pub(super) use declarations::{process_function, process_variable};
pub(super) use preproc::process_macro;
pub(super) use typedefs::process_typedef;

/// Wire linkage; ordinary external linkage is not written.
pub(super) const fn linkage_label(linkage: LinkageKind) -> Option<Linkage> {
    match linkage {
        LinkageKind::External => None,
        LinkageKind::Internal => Some(Linkage::Static),
        LinkageKind::UniqueExternal => Some(Linkage::Anonymous),
        LinkageKind::Invalid | LinkageKind::NoLinkage => Some(Linkage::Unknown),
    }
}

/// Fallback for node kinds without a dedicated record.
pub(super) fn process_unrecognized<O: AstOracle>(oracle: &O, node: &O::Node) -> DeclarationRecord {
    DeclarationRecord::Unrecognized(UnrecognizedRecord {
        name: oracle.spelling(node),
        ty: render_or_invalid(oracle, oracle.node_type(node).as_ref()),
        detail: oracle.node_kind_spelling(node),
    })
}
