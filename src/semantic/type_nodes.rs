//! Syntax-level type nodes.
//!
//! Where a type annotation was written out, the converter prefers the
//! syntax over the resolved type because syntax preserves source intent
//! (`Foo` stays a reference instead of expanding to its structure). These
//! nodes mirror written type expressions; resolved structural types live in
//! [`crate::semantic::types`].

use crate::semantic::{SignatureNode, SymbolId};
use crate::types::LiteralValue;
use serde::{Deserialize, Serialize};

/// Index of a type node in a [`TypeNodeArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeNodeId(pub u32);

/// `+?` / `-?` / `+readonly` / `-readonly` inside a mapped type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MappedModifier {
    Add,
    Remove,
}

/// `keyof T`, `unique symbol`, `readonly T[]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeOperatorKind {
    KeyOf,
    Unique,
    ReadOnly,
}

impl TypeOperatorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeOperatorKind::KeyOf => "keyof",
            TypeOperatorKind::Unique => "unique",
            TypeOperatorKind::ReadOnly => "readonly",
        }
    }
}

/// One element of a tuple type node, with its wrapper syntax.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TupleElementNode {
    /// Label of a named tuple member (`[x: string]`).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub rest: bool,
    pub element: TypeNodeId,
}

impl TupleElementNode {
    pub fn plain(element: TypeNodeId) -> Self {
        TupleElementNode {
            name: None,
            optional: false,
            rest: false,
            element,
        }
    }
}

/// A written type expression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeNode {
    /// `string`, `number`, `any`, `void`, ...
    Intrinsic { name: String },
    /// `"lit"`, `42`, `true`, `123n`, `null`
    Literal { value: LiteralValue },
    /// `Foo`, `Foo<T>`; `target` is the symbol the name resolved to, when
    /// the engine could resolve it at all.
    Reference {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        target: Option<SymbolId>,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        type_args: Vec<TypeNodeId>,
    },
    Union { members: Vec<TypeNodeId> },
    Intersection { members: Vec<TypeNodeId> },
    Array { element: TypeNodeId },
    Tuple { elements: Vec<TupleElementNode> },
    Conditional {
        check: TypeNodeId,
        extends: TypeNodeId,
        true_type: TypeNodeId,
        false_type: TypeNodeId,
    },
    IndexedAccess {
        object: TypeNodeId,
        index: TypeNodeId,
    },
    /// `infer X extends C`
    Infer {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        constraint: Option<TypeNodeId>,
    },
    Mapped {
        parameter: String,
        parameter_constraint: TypeNodeId,
        template: TypeNodeId,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        optional_modifier: Option<MappedModifier>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        readonly_modifier: Option<MappedModifier>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        name_type: Option<TypeNodeId>,
    },
    /// `x is T` / `asserts x is T` / `asserts x`
    Predicate {
        parameter: String,
        #[serde(default)]
        asserts: bool,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        target: Option<TypeNodeId>,
    },
    /// `typeof X`
    Query {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        target: Option<SymbolId>,
    },
    /// `` `a${T}b` ``
    TemplateLiteral {
        head: String,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        spans: Vec<(TypeNodeId, String)>,
    },
    Operator {
        operator: TypeOperatorKind,
        target: TypeNodeId,
    },
    /// `{ a: string; (): void }` - members live on the bound symbol.
    ObjectLiteral { symbol: SymbolId },
    /// `(a: T) => U`
    FunctionLiteral { signature: SignatureNode },
    /// `new (a: T) => U`
    ConstructorLiteral { signature: SignatureNode },
}

/// Arena for type nodes.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeNodeArena {
    nodes: Vec<TypeNode>,
}

impl TypeNodeArena {
    pub fn new() -> Self {
        TypeNodeArena { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, node: TypeNode) -> TypeNodeId {
        let id = TypeNodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn get(&self, id: TypeNodeId) -> Option<&TypeNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
