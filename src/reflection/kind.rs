//! Reflection kinds.
//!
//! Kinds are bit-valued so groups of kinds can be tested against the masks
//! in [`kind_masks`] with a single AND.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a reflection describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u32)]
pub enum ReflectionKind {
    Project = 0x1,
    Module = 0x2,
    Namespace = 0x4,
    Enum = 0x8,
    EnumMember = 0x10,
    Variable = 0x20,
    Function = 0x40,
    Class = 0x80,
    Interface = 0x100,
    Constructor = 0x200,
    Property = 0x400,
    Method = 0x800,
    CallSignature = 0x1000,
    IndexSignature = 0x2000,
    ConstructorSignature = 0x4000,
    Parameter = 0x8000,
    TypeLiteral = 0x1_0000,
    TypeParameter = 0x2_0000,
    Accessor = 0x4_0000,
    GetSignature = 0x8_0000,
    SetSignature = 0x10_0000,
    TypeAlias = 0x20_0000,
    Reference = 0x40_0000,
}

/// Kind groups.
pub mod kind_masks {
    use super::ReflectionKind as K;

    /// Kinds that own an ordered child list.
    pub const CONTAINER: u32 = K::Project as u32
        | K::Module as u32
        | K::Namespace as u32
        | K::Enum as u32
        | K::Class as u32
        | K::Interface as u32
        | K::TypeLiteral as u32
        | K::Function as u32
        | K::Variable as u32;

    /// Kinds whose children are attached at module scope, making a
    /// re-export of one of their members meaningful.
    pub const MODULE_CONTAINER: u32 =
        K::Project as u32 | K::Module as u32 | K::Namespace as u32;

    /// The signature kinds.
    pub const SIGNATURES: u32 = K::CallSignature as u32
        | K::IndexSignature as u32
        | K::ConstructorSignature as u32
        | K::GetSignature as u32
        | K::SetSignature as u32;

    /// Kinds participating in extends/implements hierarchies.
    pub const CLASS_OR_INTERFACE: u32 = K::Class as u32 | K::Interface as u32;
}

impl ReflectionKind {
    pub fn is(self, mask: u32) -> bool {
        (self as u32) & mask != 0
    }

    pub fn is_container(self) -> bool {
        self.is(kind_masks::CONTAINER)
    }

    pub fn is_signature(self) -> bool {
        self.is(kind_masks::SIGNATURES)
    }

    /// Singular display name, as shown to humans.
    pub fn name(self) -> &'static str {
        match self {
            ReflectionKind::Project => "Project",
            ReflectionKind::Module => "Module",
            ReflectionKind::Namespace => "Namespace",
            ReflectionKind::Enum => "Enumeration",
            ReflectionKind::EnumMember => "Enumeration Member",
            ReflectionKind::Variable => "Variable",
            ReflectionKind::Function => "Function",
            ReflectionKind::Class => "Class",
            ReflectionKind::Interface => "Interface",
            ReflectionKind::Constructor => "Constructor",
            ReflectionKind::Property => "Property",
            ReflectionKind::Method => "Method",
            ReflectionKind::CallSignature => "Call Signature",
            ReflectionKind::IndexSignature => "Index Signature",
            ReflectionKind::ConstructorSignature => "Constructor Signature",
            ReflectionKind::Parameter => "Parameter",
            ReflectionKind::TypeLiteral => "Type Literal",
            ReflectionKind::TypeParameter => "Type Parameter",
            ReflectionKind::Accessor => "Accessor",
            ReflectionKind::GetSignature => "Get Signature",
            ReflectionKind::SetSignature => "Set Signature",
            ReflectionKind::TypeAlias => "Type Alias",
            ReflectionKind::Reference => "Reference",
        }
    }
}

impl fmt::Display for ReflectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
