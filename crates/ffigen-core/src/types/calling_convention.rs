use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Calling convention recorded on a function type.
///
/// Only conventions a binding generator can act on are named here; the
/// platform default and anything exotic are represented by omitting the
/// field on the function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CallingConvention {
    Cdecl,
    Stdcall,
    Fastcall,
    Thiscall,
    Pascal,
    Aapcs,
    AapcsVfp,
}

impl std::fmt::Display for CallingConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Cdecl => "cdecl",
            Self::Stdcall => "stdcall",
            Self::Fastcall => "fastcall",
            Self::Thiscall => "thiscall",
            Self::Pascal => "pascal",
            Self::Aapcs => "aapcs",
            Self::AapcsVfp => "aapcs-vfp",
        };
        write!(f, "{s}")
    }
}
