//! Lifecycle notification hooks.
//!
//! An explicit, ordered set of typed observer callbacks per lifecycle
//! stage, registered at composition time. Listeners receive the project
//! and the entity just produced and may mutate reflections in place; they
//! must not introduce new top-level symbols after construction ends.
//!
//! Stage order over one run:
//! begin, declaration-created*, signature-created*, parameter-created*,
//! type-parameter-created*, resolve-begin, reflection-resolved*,
//! resolve-end, end.

use crate::reflection::{ProjectReflection, ReflectionId};

/// Callback observing the whole project at a stage boundary.
pub type ProjectHook = Box<dyn Fn(&mut ProjectReflection)>;

/// Callback observing one just-produced entity.
pub type ReflectionHook = Box<dyn Fn(&mut ProjectReflection, ReflectionId)>;

/// The registered listeners of one converter.
#[derive(Default)]
pub struct ConverterHooks {
    pub(crate) begin: Vec<ProjectHook>,
    pub(crate) declaration_created: Vec<ReflectionHook>,
    pub(crate) signature_created: Vec<ReflectionHook>,
    pub(crate) parameter_created: Vec<ReflectionHook>,
    pub(crate) type_parameter_created: Vec<ReflectionHook>,
    pub(crate) resolve_begin: Vec<ProjectHook>,
    pub(crate) reflection_resolved: Vec<ReflectionHook>,
    pub(crate) resolve_end: Vec<ProjectHook>,
    pub(crate) end: Vec<ProjectHook>,
}

impl ConverterHooks {
    pub fn new() -> Self {
        ConverterHooks::default()
    }

    pub fn on_begin(&mut self, hook: impl Fn(&mut ProjectReflection) + 'static) {
        self.begin.push(Box::new(hook));
    }

    pub fn on_declaration_created(
        &mut self,
        hook: impl Fn(&mut ProjectReflection, ReflectionId) + 'static,
    ) {
        self.declaration_created.push(Box::new(hook));
    }

    pub fn on_signature_created(
        &mut self,
        hook: impl Fn(&mut ProjectReflection, ReflectionId) + 'static,
    ) {
        self.signature_created.push(Box::new(hook));
    }

    pub fn on_parameter_created(
        &mut self,
        hook: impl Fn(&mut ProjectReflection, ReflectionId) + 'static,
    ) {
        self.parameter_created.push(Box::new(hook));
    }

    pub fn on_type_parameter_created(
        &mut self,
        hook: impl Fn(&mut ProjectReflection, ReflectionId) + 'static,
    ) {
        self.type_parameter_created.push(Box::new(hook));
    }

    pub fn on_resolve_begin(&mut self, hook: impl Fn(&mut ProjectReflection) + 'static) {
        self.resolve_begin.push(Box::new(hook));
    }

    pub fn on_reflection_resolved(
        &mut self,
        hook: impl Fn(&mut ProjectReflection, ReflectionId) + 'static,
    ) {
        self.reflection_resolved.push(Box::new(hook));
    }

    pub fn on_resolve_end(&mut self, hook: impl Fn(&mut ProjectReflection) + 'static) {
        self.resolve_end.push(Box::new(hook));
    }

    pub fn on_end(&mut self, hook: impl Fn(&mut ProjectReflection) + 'static) {
        self.end.push(Box::new(hook));
    }
}

impl std::fmt::Debug for ConverterHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConverterHooks")
            .field("begin", &self.begin.len())
            .field("declaration_created", &self.declaration_created.len())
            .field("signature_created", &self.signature_created.len())
            .field("parameter_created", &self.parameter_created.len())
            .field("type_parameter_created", &self.type_parameter_created.len())
            .field("resolve_begin", &self.resolve_begin.len())
            .field("reflection_resolved", &self.reflection_resolved.len())
            .field("resolve_end", &self.resolve_end.len())
            .field("end", &self.end.len())
            .finish()
    }
}
