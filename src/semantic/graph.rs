//! The semantic graph - the read-only oracle the converter consumes.
//!
//! A host front end populates the arenas and entry points; from then on the
//! graph is only read. Accessors taking an id panic on an out-of-range
//! index: ids are only ever minted by the arenas themselves, so a bad id is
//! a caller bug, not bad input.

use crate::comments::Comment;
use crate::limits;
use crate::semantic::{
    DeclArena, DeclData, DeclId, DeclNode, SignatureNode, Symbol, SymbolArena, SymbolId,
    TypeArena, TypeData, TypeId, TypeNode, TypeNodeArena, TypeNodeId, symbol_flags,
};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// The complete semantic surface of one program.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticGraph {
    pub symbols: SymbolArena,
    pub decls: DeclArena,
    pub type_nodes: TypeNodeArena,
    pub types: TypeArena,
    /// Module symbols to document, in documentation order.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub entry_points: Vec<SymbolId>,
    /// Pre-parsed documentation comments by symbol.
    #[serde(skip_serializing_if = "FxHashMap::is_empty", default)]
    pub comments: FxHashMap<SymbolId, Comment>,
}

impl SemanticGraph {
    pub fn new() -> Self {
        SemanticGraph::default()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        self.symbols
            .get(id)
            .unwrap_or_else(|| panic!("invalid symbol id {}", id.0))
    }

    pub fn decl(&self, id: DeclId) -> &DeclNode {
        self.decls
            .get(id)
            .unwrap_or_else(|| panic!("invalid decl id {}", id.0))
    }

    pub fn type_node(&self, id: TypeNodeId) -> &TypeNode {
        self.type_nodes
            .get(id)
            .unwrap_or_else(|| panic!("invalid type node id {}", id.0))
    }

    pub fn type_data(&self, id: TypeId) -> &TypeData {
        self.types
            .get(id)
            .unwrap_or_else(|| panic!("invalid type id {}", id.0))
    }

    pub fn comment(&self, id: SymbolId) -> Option<&Comment> {
        self.comments.get(&id)
    }

    /// Follow an alias symbol to its final target. Bounded; a malformed
    /// alias cycle yields the last symbol reached.
    pub fn alias_resolved(&self, id: SymbolId) -> SymbolId {
        let mut current = id;
        for _ in 0..limits::MAX_ANCESTRY_WALK {
            let symbol = self.symbol(current);
            match symbol.alias_target {
                Some(next) if symbol.has_flags(symbol_flags::ALIAS) && next != current => {
                    current = next;
                }
                _ => return current,
            }
        }
        current
    }

    /// OR of the modifier flags across every declaration of a symbol.
    pub fn decl_flags(&self, symbol: &Symbol) -> u32 {
        symbol
            .declarations
            .iter()
            .fold(0, |acc, &d| acc | self.decl(d).flags)
    }

    /// Whether every declaration of the symbol is method-shaped.
    pub fn every_decl_method_shaped(&self, symbol: &Symbol) -> bool {
        !symbol.declarations.is_empty()
            && symbol
                .declarations
                .iter()
                .all(|&d| self.decl(d).is_method_shaped())
    }

    /// Call signatures declared on a symbol (object-literal call members or
    /// function overloads).
    pub fn call_signatures(&self, symbol: &Symbol) -> Vec<&SignatureNode> {
        symbol
            .declarations
            .iter()
            .filter_map(|&d| match &self.decl(d).data {
                DeclData::CallSignature { signature } | DeclData::Function { signature } => {
                    Some(signature)
                }
                _ => None,
            })
            .collect()
    }

    /// Construct signatures declared on a symbol.
    pub fn construct_signatures(&self, symbol: &Symbol) -> Vec<&SignatureNode> {
        symbol
            .declarations
            .iter()
            .filter_map(|&d| match &self.decl(d).data {
                DeclData::ConstructSignature { signature } => Some(signature),
                DeclData::Class { constructors, .. } => constructors.first(),
                _ => None,
            })
            .collect()
    }

    /// Whether a value of this type is callable and nothing else - the
    /// implicit "function" shape of an unannotated variable.
    pub fn is_call_signature_only(&self, type_id: TypeId) -> bool {
        match self.type_data(type_id) {
            TypeData::Object { symbol: Some(s) } => {
                let symbol = self.symbol(*s);
                symbol.members.is_empty()
                    && !self.call_signatures(symbol).is_empty()
                    && self.construct_signatures(symbol).is_empty()
            }
            _ => false,
        }
    }

    /// Whether a value of this type can be constructed (`new`-able).
    pub fn is_constructible(&self, type_id: TypeId) -> bool {
        match self.type_data(type_id) {
            TypeData::Object { symbol: Some(s) } => {
                !self.construct_signatures(self.symbol(*s)).is_empty()
            }
            TypeData::Reference { target, .. } => {
                self.symbol(*target).has_flags(symbol_flags::CLASS)
            }
            _ => false,
        }
    }

    /// Best-effort textual rendering of a resolved type, used for the
    /// `Unknown` fallback and circular-expansion placeholders.
    pub fn type_to_string(&self, id: TypeId) -> String {
        self.render_type(id, 0)
    }

    fn render_type(&self, id: TypeId, depth: u32) -> String {
        if depth > limits::MAX_TYPE_CONVERSION_DEPTH {
            return "...".to_string();
        }
        match self.type_data(id) {
            TypeData::Intrinsic { name } => name.clone(),
            TypeData::Literal { value } => value.to_source(),
            TypeData::Union { members } => self.render_list(members, " | ", depth),
            TypeData::Intersection { members } => self.render_list(members, " & ", depth),
            TypeData::Reference { target, type_args } => {
                let name = self.symbol(*target).name.clone();
                if type_args.is_empty() {
                    name
                } else {
                    format!("{}<{}>", name, self.render_list(type_args, ", ", depth))
                }
            }
            TypeData::Object { symbol } => match symbol {
                Some(s) if !self.symbol(*s).name.starts_with("__") => {
                    self.symbol(*s).name.clone()
                }
                _ => "Object".to_string(),
            },
            TypeData::TypeParameter { symbol } => self.symbol(*symbol).name.clone(),
            TypeData::Array { element } => {
                format!("{}[]", self.render_type(*element, depth + 1))
            }
            TypeData::Tuple { elements } => {
                let parts: Vec<String> = elements
                    .iter()
                    .map(|e| self.render_type(e.element, depth + 1))
                    .collect();
                format!("[{}]", parts.join(", "))
            }
            TypeData::Conditional {
                check,
                extends,
                true_type,
                false_type,
            } => format!(
                "{} extends {} ? {} : {}",
                self.render_type(*check, depth + 1),
                self.render_type(*extends, depth + 1),
                self.render_type(*true_type, depth + 1),
                self.render_type(*false_type, depth + 1)
            ),
            TypeData::IndexedAccess { object, index } => format!(
                "{}[{}]",
                self.render_type(*object, depth + 1),
                self.render_type(*index, depth + 1)
            ),
            TypeData::TemplateLiteral { head, spans } => {
                let mut out = format!("`{head}");
                for (ty, text) in spans {
                    out.push_str("${");
                    out.push_str(&self.render_type(*ty, depth + 1));
                    out.push('}');
                    out.push_str(text);
                }
                out.push('`');
                out
            }
            TypeData::Unsupported { text } => text.clone(),
        }
    }

    fn render_list(&self, ids: &[TypeId], separator: &str, depth: u32) -> String {
        let parts: Vec<String> = ids
            .iter()
            .map(|&m| self.render_type(m, depth + 1))
            .collect();
        parts.join(separator)
    }

    /// Textual rendering of a type node, for placeholders where expansion
    /// was cut off.
    pub fn type_node_to_string(&self, id: TypeNodeId) -> String {
        match self.type_node(id) {
            TypeNode::Intrinsic { name } => name.clone(),
            TypeNode::Literal { value } => value.to_source(),
            TypeNode::Reference { name, type_args, .. } => {
                if type_args.is_empty() {
                    name.clone()
                } else {
                    let parts: Vec<String> = type_args
                        .iter()
                        .map(|&a| self.type_node_to_string(a))
                        .collect();
                    format!("{}<{}>", name, parts.join(", "))
                }
            }
            TypeNode::Query { name, .. } => format!("typeof {name}"),
            TypeNode::Array { element } => format!("{}[]", self.type_node_to_string(*element)),
            _ => "Object".to_string(),
        }
    }
}
