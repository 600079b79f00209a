//! Traversal context.
//!
//! The context threads the attachment scope and the conversion mode
//! through recursive descent. The mode is an immutable `Copy` value - a
//! child context gets its own copy, so sibling conversions cannot cross
//! talk through shared mutable flags.

use crate::comments::CommentSource;
use crate::convert::hooks::ConverterHooks;
use crate::diagnostics::DiagnosticBag;
use crate::options::ConverterOptions;
use crate::reflection::{
    DeclarationReflection, ProjectReflection, Reflection, ReflectionId, ReflectionKind,
    reflection_flags,
};
use crate::semantic::{SemanticGraph, SymbolId, node_flags};
use rustc_hash::FxHashSet;
use std::mem;
use tracing::debug;

/// Conversion-mode flags, copied into each child context.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversionMode {
    /// A declared type position is being rendered; registration of
    /// reflections created along the way is suppressed.
    pub converting_type_node: bool,
    /// Members are being converted inside a class or interface, coercing
    /// function/variable-shaped members into method/property kinds.
    pub converting_class_or_interface: bool,
    /// Members are being converted off the class's own binding rather
    /// than its instances.
    pub should_be_static: bool,
    /// Members are being copied down from a base type; copies never claim
    /// the primary registration for their symbol.
    pub converting_inherited: bool,
}

impl ConversionMode {
    pub fn type_node(mut self) -> Self {
        self.converting_type_node = true;
        self
    }

    pub fn class_or_interface(mut self) -> Self {
        self.converting_class_or_interface = true;
        self
    }

    pub fn static_members(mut self) -> Self {
        self.should_be_static = true;
        self
    }

    pub fn inherited(mut self) -> Self {
        self.converting_inherited = true;
        self
    }
}

/// Run-wide mutable state: the project being built, diagnostics, hooks,
/// and the type-converter guards. Owned by the converter entry point and
/// only ever touched through the single conversion thread.
pub struct ConverterState<'g> {
    pub graph: &'g SemanticGraph,
    pub comments: &'g dyn CommentSource,
    pub options: ConverterOptions,
    pub project: ProjectReflection,
    pub diagnostics: DiagnosticBag,
    pub hooks: ConverterHooks,
    /// Symbols whose structural expansion is in progress (cycle guard).
    pub active_type_symbols: FxHashSet<SymbolId>,
    /// Current type conversion depth.
    pub type_depth: u32,
}

impl<'g> ConverterState<'g> {
    pub fn new(
        graph: &'g SemanticGraph,
        comments: &'g dyn CommentSource,
        options: ConverterOptions,
        hooks: ConverterHooks,
        project_name: &str,
    ) -> Self {
        ConverterState {
            graph,
            comments,
            options,
            project: ProjectReflection::new(project_name),
            diagnostics: DiagnosticBag::new(),
            hooks,
            active_type_symbols: FxHashSet::default(),
            type_depth: 0,
        }
    }

    // Hook firing takes the listener list out for the duration of the
    // callbacks so they can receive the project mutably.

    pub fn fire_begin(&mut self) {
        let hooks = mem::take(&mut self.hooks.begin);
        for hook in &hooks {
            hook(&mut self.project);
        }
        self.hooks.begin = hooks;
    }

    pub fn fire_declaration_created(&mut self, id: ReflectionId) {
        let hooks = mem::take(&mut self.hooks.declaration_created);
        for hook in &hooks {
            hook(&mut self.project, id);
        }
        self.hooks.declaration_created = hooks;
    }

    pub fn fire_signature_created(&mut self, id: ReflectionId) {
        let hooks = mem::take(&mut self.hooks.signature_created);
        for hook in &hooks {
            hook(&mut self.project, id);
        }
        self.hooks.signature_created = hooks;
    }

    pub fn fire_parameter_created(&mut self, id: ReflectionId) {
        let hooks = mem::take(&mut self.hooks.parameter_created);
        for hook in &hooks {
            hook(&mut self.project, id);
        }
        self.hooks.parameter_created = hooks;
    }

    pub fn fire_type_parameter_created(&mut self, id: ReflectionId) {
        let hooks = mem::take(&mut self.hooks.type_parameter_created);
        for hook in &hooks {
            hook(&mut self.project, id);
        }
        self.hooks.type_parameter_created = hooks;
    }

    pub fn fire_resolve_begin(&mut self) {
        let hooks = mem::take(&mut self.hooks.resolve_begin);
        for hook in &hooks {
            hook(&mut self.project);
        }
        self.hooks.resolve_begin = hooks;
    }

    pub fn fire_reflection_resolved(&mut self, id: ReflectionId) {
        let hooks = mem::take(&mut self.hooks.reflection_resolved);
        for hook in &hooks {
            hook(&mut self.project, id);
        }
        self.hooks.reflection_resolved = hooks;
    }

    pub fn fire_resolve_end(&mut self) {
        let hooks = mem::take(&mut self.hooks.resolve_end);
        for hook in &hooks {
            hook(&mut self.project);
        }
        self.hooks.resolve_end = hooks;
    }

    pub fn fire_end(&mut self) {
        let hooks = mem::take(&mut self.hooks.end);
        for hook in &hooks {
            hook(&mut self.project);
        }
        self.hooks.end = hooks;
    }
}

/// The traversal context: shared run state plus the current attachment
/// scope and conversion mode.
pub struct Context<'a, 'g> {
    pub state: &'a mut ConverterState<'g>,
    /// Current attachment point; new reflections become its children when
    /// it is a container.
    pub scope: ReflectionId,
    pub mode: ConversionMode,
}

impl<'a, 'g> Context<'a, 'g> {
    pub fn new(state: &'a mut ConverterState<'g>) -> Self {
        Context {
            state,
            scope: ReflectionId::PROJECT,
            mode: ConversionMode::default(),
        }
    }

    /// The read-only semantic oracle. The returned reference is free of
    /// the context borrow, so it stays usable across mutations.
    pub fn graph(&self) -> &'g SemanticGraph {
        self.state.graph
    }

    pub fn comments(&self) -> &'g dyn CommentSource {
        self.state.comments
    }

    /// Child context targeting a new attachment point; registries and mode
    /// are shared/inherited.
    pub fn with_scope(&mut self, scope: ReflectionId) -> Context<'_, 'g> {
        Context {
            state: &mut *self.state,
            scope,
            mode: self.mode,
        }
    }

    /// Child context with a different conversion mode.
    pub fn with_mode(&mut self, mode: ConversionMode) -> Context<'_, 'g> {
        Context {
            state: &mut *self.state,
            scope: self.scope,
            mode,
        }
    }

    /// Build and register a declaration reflection for a symbol, attach
    /// its comment (preferring the export alias's comment over the
    /// symbol's own), set its flags, and append it to the scope if the
    /// scope is a container.
    pub fn create_declaration(
        &mut self,
        kind: ReflectionKind,
        symbol_id: SymbolId,
        export_symbol: Option<SymbolId>,
        name_override: Option<String>,
    ) -> ReflectionId {
        let graph = self.graph();
        let symbol = graph.symbol(symbol_id);
        let name = name_override
            .or_else(|| export_symbol.map(|e| graph.symbol(e).name.clone()))
            .unwrap_or_else(|| symbol.name.clone());
        let decl_flags = graph.decl_flags(symbol);

        let mut reflection = DeclarationReflection::new(name, kind, self.scope);
        let flags = &mut reflection.base.flags;
        flags.set(
            reflection_flags::EXPORTED,
            export_symbol.is_some() || decl_flags & node_flags::EXPORT != 0,
        );
        flags.set(
            reflection_flags::PRIVATE,
            decl_flags & node_flags::PRIVATE != 0,
        );
        flags.set(
            reflection_flags::PROTECTED,
            decl_flags & node_flags::PROTECTED != 0,
        );
        flags.set(
            reflection_flags::PUBLIC,
            decl_flags & node_flags::PUBLIC != 0,
        );
        flags.set(
            reflection_flags::STATIC,
            self.mode.should_be_static || decl_flags & node_flags::STATIC != 0,
        );
        flags.set(
            reflection_flags::READONLY,
            decl_flags & node_flags::READONLY != 0,
        );
        flags.set(
            reflection_flags::ABSTRACT,
            decl_flags & node_flags::ABSTRACT != 0,
        );
        flags.set(
            reflection_flags::OPTIONAL,
            decl_flags & node_flags::OPTIONAL != 0,
        );
        flags.set(reflection_flags::CONST, decl_flags & node_flags::CONST != 0);
        flags.set(reflection_flags::EXTERNAL, symbol.is_external);

        reflection.base.comment = export_symbol
            .and_then(|e| self.comments().comment_for_symbol(graph, e))
            .filter(|c| !c.is_empty())
            .or_else(|| self.comments().comment_for_symbol(graph, symbol_id));

        let id = self.state.project.alloc(Reflection::Declaration(reflection));
        self.state.project.add_child(self.scope, id);

        // Registration is suppressed for reflections reached while
        // rendering a declared type position and for inherited copies;
        // the first conversion of a symbol stays its primary.
        if !self.mode.converting_type_node
            && !self.mode.converting_inherited
            && self.state.project.primary_for(symbol_id).is_none()
        {
            self.state.project.register_primary(symbol_id, id);
        }

        debug!(
            id = id.0,
            kind = %kind,
            name = %self.state.project.get(id).map(|r| r.base().name.as_str()).unwrap_or(""),
            "created declaration"
        );
        id
    }

    /// Build a declaration reflection with no backing symbol (synthesized
    /// constructors, anonymous type literals).
    pub fn create_synthetic_declaration(
        &mut self,
        kind: ReflectionKind,
        name: impl Into<String>,
    ) -> ReflectionId {
        let mut reflection = DeclarationReflection::new(name, kind, self.scope);
        reflection
            .base
            .flags
            .set(reflection_flags::STATIC, self.mode.should_be_static);
        let id = self.state.project.alloc(Reflection::Declaration(reflection));
        self.state.project.add_child(self.scope, id);
        id
    }

    /// Fire the creation lifecycle notification for a finished
    /// declaration.
    pub fn finalize_declaration(&mut self, id: ReflectionId) {
        self.state.fire_declaration_created(id);
    }

    /// Shorthand for the project under construction.
    pub fn project(&mut self) -> &mut ProjectReflection {
        &mut self.state.project
    }
}
