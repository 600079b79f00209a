//! Resolved structural types.
//!
//! These are the engine's answers: what a written annotation (or an
//! unannotated expression) actually means after resolution. The converter
//! falls back to them when no syntax exists, pairs them with syntax when it
//! does, and never computes them itself.
//!
//! Union members are stored checker-flattened: a union never directly
//! contains another union. Graph builders uphold this; the union conversion
//! rules rely on it.

use crate::semantic::SymbolId;
use crate::types::LiteralValue;
use serde::{Deserialize, Serialize};

/// Index of a resolved type in a [`TypeArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

/// One element of a resolved tuple type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleElementData {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub rest: bool,
    /// Per-element type; for rest elements this is the element type, not
    /// the array wrapped around it.
    pub element: TypeId,
}

/// A resolved type's structural category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeData {
    Intrinsic { name: String },
    Literal { value: LiteralValue },
    /// Flattened member list; see the module invariant.
    Union { members: Vec<TypeId> },
    Intersection { members: Vec<TypeId> },
    /// Instantiation of a named class/interface/alias.
    Reference {
        target: SymbolId,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        type_args: Vec<TypeId>,
    },
    /// Anonymous object or callable shape; structure lives on the bound
    /// symbol (members plus signature-bearing declarations).
    Object {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        symbol: Option<SymbolId>,
    },
    TypeParameter { symbol: SymbolId },
    Array { element: TypeId },
    Tuple { elements: Vec<TupleElementData> },
    Conditional {
        check: TypeId,
        extends: TypeId,
        true_type: TypeId,
        false_type: TypeId,
    },
    IndexedAccess { object: TypeId, index: TypeId },
    TemplateLiteral {
        head: String,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        spans: Vec<(TypeId, String)>,
    },
    /// An engine shape this model has no category for; carries the
    /// engine's own rendering.
    Unsupported { text: String },
}

impl TypeData {
    /// Member count a value of this type contributes when spliced into a
    /// flattened union (1 for everything that is not a union).
    pub fn union_width(&self) -> usize {
        match self {
            TypeData::Union { members } => members.len(),
            _ => 1,
        }
    }
}

/// Arena for resolved types.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeArena {
    types: Vec<TypeData>,
}

impl TypeArena {
    pub fn new() -> Self {
        TypeArena { types: Vec::new() }
    }

    pub fn alloc(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(data);
        id
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeData> {
        self.types.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
