//! The project aggregate.
//!
//! Owns the reflection arena, the symbol↔reflection registry, and the id
//! counter (implicit in the arena length). These are explicit fields, not
//! globals, so independent conversion runs cannot leak state into each
//! other.

use crate::limits;
use crate::reflection::{
    DeclarationReflection, Reflection, ReflectionId, ReflectionKind, kind_masks,
};
use crate::semantic::SymbolId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Root container of one converted program.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReflection {
    pub name: String,
    /// Arena of all reflections; `ReflectionId(n)` lives at index `n - 1`
    /// (id 0 is the project itself).
    reflections: Vec<Reflection>,
    /// Top-level children.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<ReflectionId>,
    /// Each distinct merged-symbol identity maps to at most one primary
    /// (non-reference) reflection. Conversion-time state, rebuilt rather
    /// than serialized.
    #[serde(skip)]
    symbol_to_reflection: FxHashMap<SymbolId, ReflectionId>,
    #[serde(skip)]
    reflection_to_symbol: FxHashMap<ReflectionId, SymbolId>,
}

impl ProjectReflection {
    pub fn new(name: impl Into<String>) -> Self {
        ProjectReflection {
            name: name.into(),
            reflections: Vec::with_capacity(limits::INITIAL_REFLECTION_CAPACITY),
            children: Vec::new(),
            symbol_to_reflection: FxHashMap::default(),
            reflection_to_symbol: FxHashMap::default(),
        }
    }

    /// Store a reflection and assign its id.
    pub fn alloc(&mut self, mut reflection: Reflection) -> ReflectionId {
        let id = ReflectionId(self.reflections.len() as u32 + 1);
        reflection.base_mut().id = id;
        self.reflections.push(reflection);
        id
    }

    pub fn get(&self, id: ReflectionId) -> Option<&Reflection> {
        if id == ReflectionId::PROJECT || id.is_none() {
            return None;
        }
        self.reflections.get(id.0 as usize - 1)
    }

    pub fn get_mut(&mut self, id: ReflectionId) -> Option<&mut Reflection> {
        if id == ReflectionId::PROJECT || id.is_none() {
            return None;
        }
        self.reflections.get_mut(id.0 as usize - 1)
    }

    pub fn decl(&self, id: ReflectionId) -> Option<&DeclarationReflection> {
        self.get(id).and_then(Reflection::as_declaration)
    }

    pub fn decl_mut(&mut self, id: ReflectionId) -> Option<&mut DeclarationReflection> {
        self.get_mut(id).and_then(Reflection::as_declaration_mut)
    }

    /// Number of reflections (excluding the project root).
    pub fn len(&self) -> usize {
        self.reflections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reflections.is_empty()
    }

    /// Every reflection id, in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ReflectionId> + use<> {
        (1..=self.reflections.len() as u32).map(ReflectionId)
    }

    /// Record the primary reflection for a symbol.
    ///
    /// # Panics
    ///
    /// Registering a second primary for one symbol is a converter bug, not
    /// bad input, and aborts the run.
    pub fn register_primary(&mut self, symbol: SymbolId, id: ReflectionId) {
        if let Some(existing) = self.symbol_to_reflection.insert(symbol, id) {
            panic!(
                "symbol {} already has primary reflection {} (attempted {})",
                symbol.0, existing.0, id.0
            );
        }
        self.reflection_to_symbol.insert(id, symbol);
    }

    pub fn primary_for(&self, symbol: SymbolId) -> Option<ReflectionId> {
        self.symbol_to_reflection.get(&symbol).copied()
    }

    pub fn symbol_for(&self, id: ReflectionId) -> Option<SymbolId> {
        self.reflection_to_symbol.get(&id).copied()
    }

    /// Kind of a reflection, with the project root handled.
    pub fn kind_of(&self, id: ReflectionId) -> Option<ReflectionKind> {
        if id == ReflectionId::PROJECT {
            return Some(ReflectionKind::Project);
        }
        self.get(id).map(|r| r.base().kind)
    }

    /// Whether a reflection can own declaration children.
    pub fn is_container(&self, id: ReflectionId) -> bool {
        self.kind_of(id)
            .map(|k| k.is_container())
            .unwrap_or(false)
    }

    /// Whether the reflection sits at module scope (project, module, or
    /// namespace), where re-exports produce reference reflections.
    pub fn is_module_container(&self, id: ReflectionId) -> bool {
        self.kind_of(id)
            .map(|k| k.is(kind_masks::MODULE_CONTAINER))
            .unwrap_or(false)
    }

    /// Append a child to a container's ordered child list. Does nothing if
    /// the parent is not a container.
    pub fn add_child(&mut self, parent: ReflectionId, child: ReflectionId) {
        if parent == ReflectionId::PROJECT {
            self.children.push(child);
            return;
        }
        if !self.is_container(parent) {
            return;
        }
        if let Some(decl) = self.decl_mut(parent) {
            decl.children.push(child);
        }
    }

    /// Children of a container (empty for non-containers).
    pub fn children_of(&self, id: ReflectionId) -> &[ReflectionId] {
        if id == ReflectionId::PROJECT {
            return &self.children;
        }
        self.decl(id).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    /// Find a child of a container by name.
    pub fn child_by_name(&self, container: ReflectionId, name: &str) -> Option<ReflectionId> {
        self.children_of(container)
            .iter()
            .copied()
            .find(|&c| self.get(c).map(|r| r.base().name == name).unwrap_or(false))
    }

    /// Dotted path of a reflection, for diagnostics.
    pub fn full_name(&self, id: ReflectionId) -> String {
        let mut parts = Vec::new();
        let mut current = id;
        for _ in 0..limits::MAX_ANCESTRY_WALK {
            match self.get(current) {
                Some(reflection) => {
                    parts.push(reflection.base().name.clone());
                    current = reflection.base().parent;
                }
                None => break,
            }
        }
        parts.reverse();
        parts.join(".")
    }
}
