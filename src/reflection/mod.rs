//! Reflection model - the entity graph of the documentation model.
//!
//! Reflections live in an arena owned by [`ProjectReflection`]; entities
//! refer to each other by [`ReflectionId`]. Ownership (parent/children) is
//! tree-shaped and acyclic; type values may refer back into the tree
//! freely, which is how cyclic types close without cyclic ownership.

pub mod flags;
pub mod kind;
pub mod project;

pub use flags::{ReflectionFlags, reflection_flags};
pub use kind::{ReflectionKind, kind_masks};
pub use project::ProjectReflection;

use crate::comments::Comment;
use crate::types::{ReferenceTarget, Type};
use serde::{Deserialize, Serialize};

/// Project-scoped reflection identity. The project root is id 0; arena
/// entities count up from 1. Ids are unique and stable for one run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReflectionId(pub u32);

impl ReflectionId {
    /// The project root.
    pub const PROJECT: ReflectionId = ReflectionId(0);
    /// Sentinel for "no reflection".
    pub const NONE: ReflectionId = ReflectionId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == ReflectionId::NONE
    }
}

/// Data every reflection carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionBase {
    pub id: ReflectionId,
    pub name: String,
    pub kind: ReflectionKind,
    /// Owning parent; [`ReflectionId::PROJECT`] for top-level entities.
    pub parent: ReflectionId,
    #[serde(default, skip_serializing_if = "is_default_flags")]
    pub flags: ReflectionFlags,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub comment: Option<Comment>,
}

fn is_default_flags(flags: &ReflectionFlags) -> bool {
    flags.0 == 0
}

impl ReflectionBase {
    pub fn new(name: impl Into<String>, kind: ReflectionKind, parent: ReflectionId) -> Self {
        ReflectionBase {
            id: ReflectionId::NONE,
            name: name.into(),
            kind,
            parent,
            flags: ReflectionFlags::default(),
            comment: None,
        }
    }
}

/// One level of a computed extends-chain: the types at this level, whether
/// this level is the reflection the chain was built for, and the next
/// level down.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeHierarchy {
    pub types: Vec<Type>,
    #[serde(default)]
    pub is_target: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next: Option<Box<TypeHierarchy>>,
}

/// A documented declaration. Doubles as the container entity: children is
/// meaningful exactly when the kind is a container kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    /// Ordered owned children.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<ReflectionId>,
    /// Call/constructor signatures of functions, methods, constructors.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub signatures: Vec<ReflectionId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub get_signature: Option<ReflectionId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub set_signature: Option<ReflectionId>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub index_signatures: Vec<ReflectionId>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub type_parameters: Vec<ReflectionId>,
    /// Declared or inferred type of variables, properties, aliases.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub type_: Option<Type>,
    /// Initializer text of variables, properties, enum members.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub extended_types: Vec<Type>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub implemented_types: Vec<Type>,
    /// Inverse edges, filled by the resolution pass.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub extended_by: Vec<Type>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub implemented_by: Vec<Type>,
    /// Ordered extends-chain, computed by the resolution pass for classes
    /// and interfaces.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hierarchy: Option<TypeHierarchy>,
}

impl DeclarationReflection {
    pub fn new(name: impl Into<String>, kind: ReflectionKind, parent: ReflectionId) -> Self {
        DeclarationReflection {
            base: ReflectionBase::new(name, kind, parent),
            children: Vec::new(),
            signatures: Vec::new(),
            get_signature: None,
            set_signature: None,
            index_signatures: Vec::new(),
            type_parameters: Vec::new(),
            type_: None,
            default_value: None,
            extended_types: Vec::new(),
            implemented_types: Vec::new(),
            extended_by: Vec::new(),
            implemented_by: Vec::new(),
            hierarchy: None,
        }
    }
}

/// A call, construct, accessor, or index signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    /// Ordered parameters.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<ReflectionId>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub type_parameters: Vec<ReflectionId>,
    #[serde(rename = "type")]
    pub return_type: Type,
}

impl SignatureReflection {
    pub fn new(name: impl Into<String>, kind: ReflectionKind, parent: ReflectionId) -> Self {
        SignatureReflection {
            base: ReflectionBase::new(name, kind, parent),
            parameters: Vec::new(),
            type_parameters: Vec::new(),
            return_type: Type::intrinsic("any"),
        }
    }
}

/// A formal parameter of one signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    #[serde(rename = "type")]
    pub type_: Type,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<String>,
}

/// A declared type parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameterReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub constraint: Option<Type>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<Type>,
}

/// A lightweight alias entity pointing at another reflection without
/// owning it; produced for re-exports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceReflection {
    #[serde(flatten)]
    pub base: ReflectionBase,
    pub target: ReferenceTarget,
}

/// Any reflection in the project arena.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "camelCase")]
pub enum Reflection {
    Declaration(DeclarationReflection),
    Signature(SignatureReflection),
    Parameter(ParameterReflection),
    TypeParameter(TypeParameterReflection),
    Reference(ReferenceReflection),
}

impl Reflection {
    pub fn base(&self) -> &ReflectionBase {
        match self {
            Reflection::Declaration(d) => &d.base,
            Reflection::Signature(s) => &s.base,
            Reflection::Parameter(p) => &p.base,
            Reflection::TypeParameter(t) => &t.base,
            Reflection::Reference(r) => &r.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut ReflectionBase {
        match self {
            Reflection::Declaration(d) => &mut d.base,
            Reflection::Signature(s) => &mut s.base,
            Reflection::Parameter(p) => &mut p.base,
            Reflection::TypeParameter(t) => &mut t.base,
            Reflection::Reference(r) => &mut r.base,
        }
    }

    pub fn as_declaration(&self) -> Option<&DeclarationReflection> {
        match self {
            Reflection::Declaration(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_declaration_mut(&mut self) -> Option<&mut DeclarationReflection> {
        match self {
            Reflection::Declaration(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_signature(&self) -> Option<&SignatureReflection> {
        match self {
            Reflection::Signature(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ReferenceReflection> {
        match self {
            Reflection::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Whether this entity is a primary (non-reference) reflection.
    pub fn is_primary(&self) -> bool {
        !matches!(self, Reflection::Reference(_))
    }
}

