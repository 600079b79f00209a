//! Symbols - the identifier-table entries of the semantic graph.
//!
//! A symbol is the merged meaning of one declared name: several
//! declarations sharing a name combine into one symbol spanning several
//! category flags (declaration merging). The converter consumes symbols
//! read-only; nothing in this crate creates or mutates them after the graph
//! is built.

use crate::semantic::{DeclId, TypeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Index of a symbol in a [`SymbolArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

impl SymbolId {
    /// Sentinel for "no symbol".
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == SymbolId::NONE
    }
}

/// Symbol category flags.
///
/// A symbol may carry several of these simultaneously because of
/// declaration merging (e.g. a class merged with a namespace of statics
/// carries `CLASS | MODULE`).
pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const CLASS: u32 = 1 << 0;
    pub const INTERFACE: u32 = 1 << 1;
    pub const ENUM: u32 = 1 << 2;
    pub const ENUM_MEMBER: u32 = 1 << 3;
    pub const FUNCTION: u32 = 1 << 4;
    pub const METHOD: u32 = 1 << 5;
    pub const PROPERTY: u32 = 1 << 6;
    pub const VARIABLE: u32 = 1 << 7;
    pub const GET_ACCESSOR: u32 = 1 << 8;
    pub const SET_ACCESSOR: u32 = 1 << 9;
    pub const CONSTRUCTOR: u32 = 1 << 10;
    pub const TYPE_ALIAS: u32 = 1 << 11;
    pub const MODULE: u32 = 1 << 12;
    pub const ALIAS: u32 = 1 << 13;
    pub const TYPE_PARAMETER: u32 = 1 << 14;

    pub const ACCESSOR: u32 = GET_ACCESSOR | SET_ACCESSOR;

    /// Every flag a converter exists for. Bits outside this mask are
    /// reported as unhandled categories.
    pub const KNOWN: u32 = CLASS
        | INTERFACE
        | ENUM
        | ENUM_MEMBER
        | FUNCTION
        | METHOD
        | PROPERTY
        | VARIABLE
        | ACCESSOR
        | CONSTRUCTOR
        | TYPE_ALIAS
        | MODULE
        | ALIAS;
}

/// Ordered name → symbol table.
///
/// Ordering is the declaration order of the source program; the converter
/// relies on it for stable output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    entries: IndexMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            entries: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, id: SymbolId) {
        self.entries.insert(name.into(), id);
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.entries.get(name).copied()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SymbolId)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One merged declared name.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symbol {
    pub name: String,
    /// Category bits from [`symbol_flags`].
    pub flags: u32,
    /// All declaration sites contributing to this symbol, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub declarations: Vec<DeclId>,
    /// Instance-side members (class instance members, interface members,
    /// object-literal properties).
    #[serde(skip_serializing_if = "SymbolTable::is_empty", default)]
    pub members: SymbolTable,
    /// Static-side / container exports (class statics, namespace and module
    /// exports, enum members).
    #[serde(skip_serializing_if = "SymbolTable::is_empty", default)]
    pub exports: SymbolTable,
    /// Resolved type of the value this name binds, if it binds one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value_type: Option<TypeId>,
    /// Resolved type the name denotes in type positions
    /// (interface/alias/type-parameter instance type).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub declared_type: Option<TypeId>,
    /// For `ALIAS` symbols: the aliased symbol.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub alias_target: Option<SymbolId>,
    /// Lexical parent symbol (containing class/namespace/module).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent: Option<SymbolId>,
    /// Declared outside the documented surface (an external library).
    #[serde(default)]
    pub is_external: bool,
}

impl Symbol {
    pub fn new(name: impl Into<String>, flags: u32) -> Self {
        Symbol {
            name: name.into(),
            flags,
            declarations: Vec::new(),
            members: SymbolTable::new(),
            exports: SymbolTable::new(),
            value_type: None,
            declared_type: None,
            alias_target: None,
            parent: None,
            is_external: false,
        }
    }

    /// Check whether any of the given category bits are present.
    pub fn has_flags(&self, flags: u32) -> bool {
        self.flags & flags != 0
    }
}

/// Arena for symbol storage.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        SymbolArena {
            symbols: Vec::new(),
        }
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId(i as u32), s))
    }
}
