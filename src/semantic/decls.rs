//! Declaration nodes - the syntax positions behind each symbol.
//!
//! The semantic graph keeps one node per declaration site, carrying the
//! modifier flags and the declaration-shaped payload the converter needs
//! (extends clauses, signatures, type annotations, initializer text).
//! These are deliberately not a full AST; they are the slice of syntax the
//! documentation model consumes.

use crate::semantic::{SymbolId, TypeId, TypeNodeId};
use crate::types::LiteralValue;
use serde::{Deserialize, Serialize};

/// Index of a declaration node in a [`DeclArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

/// Modifier flags on a declaration node.
pub mod node_flags {
    pub const NONE: u32 = 0;
    pub const EXPORT: u32 = 1 << 0;
    pub const DEFAULT: u32 = 1 << 1;
    pub const DECLARE: u32 = 1 << 2;
    pub const PRIVATE: u32 = 1 << 3;
    pub const PROTECTED: u32 = 1 << 4;
    pub const PUBLIC: u32 = 1 << 5;
    pub const STATIC: u32 = 1 << 6;
    pub const READONLY: u32 = 1 << 7;
    pub const ABSTRACT: u32 = 1 << 8;
    pub const OPTIONAL: u32 = 1 << 9;
    pub const CONST: u32 = 1 << 10;
    /// Property introduced by a constructor parameter modifier.
    pub const PARAMETER_PROPERTY: u32 = 1 << 11;

    /// Anything narrower than public visibility.
    pub const NON_PUBLIC: u32 = PRIVATE | PROTECTED;
}

/// A formal parameter inside a signature.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamNode {
    pub name: String,
    /// Modifier flags (visibility bits mark parameter properties).
    #[serde(default)]
    pub flags: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub type_node: Option<TypeNodeId>,
    /// Resolved parameter type when the annotation is absent or inferred.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub resolved_type: Option<TypeId>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub rest: bool,
    /// Source text of the default value expression.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_value: Option<String>,
}

impl ParamNode {
    pub fn new(name: impl Into<String>) -> Self {
        ParamNode {
            name: name.into(),
            ..ParamNode::default()
        }
    }
}

/// A declared type parameter (`<T extends C = D>`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParamNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub constraint: Option<TypeNodeId>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<TypeNodeId>,
}

impl TypeParamNode {
    pub fn new(name: impl Into<String>) -> Self {
        TypeParamNode {
            name: name.into(),
            ..TypeParamNode::default()
        }
    }
}

/// A call/construct/accessor/index signature as declared.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureNode {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub type_params: Vec<TypeParamNode>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub params: Vec<ParamNode>,
    /// Declared return type annotation.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub return_node: Option<TypeNodeId>,
    /// Resolved return type (always present for inferred returns).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub return_type: Option<TypeId>,
}

/// Declaration-shaped payload of one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeclData {
    Class {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        extends: Option<TypeNodeId>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        implements: Vec<TypeNodeId>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        type_params: Vec<TypeParamNode>,
        /// Declared constructor overloads; empty means the default
        /// constructor.
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        constructors: Vec<SignatureNode>,
    },
    Interface {
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        extends: Vec<TypeNodeId>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        type_params: Vec<TypeParamNode>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        call_signatures: Vec<SignatureNode>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        index_signatures: Vec<SignatureNode>,
    },
    Enum,
    EnumMember {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        value: Option<LiteralValue>,
    },
    Function {
        signature: SignatureNode,
    },
    Method {
        signature: SignatureNode,
    },
    GetAccessor {
        signature: SignatureNode,
    },
    SetAccessor {
        signature: SignatureNode,
    },
    Property {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        type_node: Option<TypeNodeId>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        initializer: Option<String>,
    },
    Variable {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        type_node: Option<TypeNodeId>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        initializer: Option<String>,
    },
    TypeAlias {
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        type_params: Vec<TypeParamNode>,
        type_node: TypeNodeId,
    },
    /// Namespace/module body; children live in the symbol's exports.
    Module,
    /// A call signature declared on an object-literal type's symbol.
    CallSignature {
        signature: SignatureNode,
    },
    ConstructSignature {
        signature: SignatureNode,
    },
    IndexSignature {
        signature: SignatureNode,
    },
    /// The declaration site of a re-export alias.
    ExportSpecifier {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        target: Option<SymbolId>,
    },
}

/// One declaration site: modifiers plus payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclNode {
    /// Modifier bits from [`node_flags`].
    pub flags: u32,
    pub data: DeclData,
}

impl DeclNode {
    pub fn new(flags: u32, data: DeclData) -> Self {
        DeclNode { flags, data }
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    /// Whether this declaration looks like a method rather than a data
    /// property (used when stripping the property category from symbols
    /// whose every declaration is function-shaped).
    pub fn is_method_shaped(&self) -> bool {
        matches!(
            self.data,
            DeclData::Method { .. } | DeclData::Function { .. }
        )
    }
}

/// Arena for declaration nodes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclArena {
    decls: Vec<DeclNode>,
}

impl DeclArena {
    pub fn new() -> Self {
        DeclArena { decls: Vec::new() }
    }

    pub fn alloc(&mut self, decl: DeclNode) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    pub fn get(&self, id: DeclId) -> Option<&DeclNode> {
        self.decls.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}
