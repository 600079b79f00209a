//! The semantic graph consumed by the converter.
//!
//! This is the concrete realization of the external semantic-analysis
//! engine's surface: symbols and their merged category flags, declaration
//! nodes with modifiers, written type syntax, and resolved structural
//! types. The converter holds the graph behind a shared reference and
//! never mutates it.

pub mod decls;
pub mod graph;
pub mod symbols;
pub mod type_nodes;
pub mod types;

pub use decls::{
    DeclArena, DeclData, DeclId, DeclNode, ParamNode, SignatureNode, TypeParamNode, node_flags,
};
pub use graph::SemanticGraph;
pub use symbols::{Symbol, SymbolArena, SymbolId, SymbolTable, symbol_flags};
pub use type_nodes::{
    MappedModifier, TupleElementNode, TypeNode, TypeNodeArena, TypeNodeId, TypeOperatorKind,
};
pub use types::{TupleElementData, TypeArena, TypeData, TypeId};
