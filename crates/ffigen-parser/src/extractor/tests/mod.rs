use ffigen_core::{DeclarationRecord, ProgramDocument, TypeNode};

use super::*;
use crate::oracle::{Abi, LinkageKind, NodeKind, Token, TypeKind};
use crate::synthetic::{NodeId, NodeSpec, SyntheticTu, TypeId};


fn record<'a>(document: &'a ProgramDocument, identity: &str) -> &'a DeclarationRecord {
    document.get(identity).unwrap_or_else(|| {
        let available: Vec<String> = document
            .iter()
            .map(|(id, record)| format!("{}: {id}", record.kind()))
            .collect();
        panic!(
            "identity {identity:?} not found. Available records:\n{}",
            available.join("\n")
        );
    })
}

fn int(tu: &mut SyntheticTu) -> TypeId {
    tu.primitive(TypeKind::Int)
}

fn to_value(document: &ProgramDocument) -> serde_json::Value {
    serde_json::to_value(document).expect("document should serialize")
}

/// `struct <name> { <fields> };` at the top level.
fn struct_with_fields(
    tu: &mut SyntheticTu,
    name: &str,
    identity: &str,
    fields: &[(&str, TypeId)],
) -> NodeId {
    let root = tu.root();
    let node = tu.struct_decl(root, name, identity);
    for (field, ty) in fields {
        tu.field(node, field, *ty);
    }
    node
}
