//! Core data types for rendered C types and extracted declarations.

mod calling_convention;
mod linkage;
mod record;
mod record_kind;
mod type_node;

pub use calling_convention::CallingConvention;
pub use linkage::Linkage;
pub use record::{
    CompositeRecord, DeclarationRecord, EnumRecord, EnumValue, FieldRecord, FunctionRecord,
    MacroRecord, MacroValue, TypedefRecord, UnrecognizedRecord, VariableRecord,
};
pub use record_kind::RecordKind;
pub use type_node::{Qualifiers, TypeNode, TypeShape};
