//! Symbol converter.
//!
//! A symbol may carry several overlapping categories simultaneously
//! because of declaration merging (a class merged with a namespace of
//! statics carries both bits). Categories form a closed enum; a fixed
//! priority order drives conversion, and each converter may return a mask
//! of further categories to skip for that symbol so merges produce one
//! reflection instead of duplicates.
//!
//! The category/order equality check is enforced at compile time: adding
//! a [`Category`] variant breaks the exhaustive matches in
//! [`Category::flag`], [`order_index`], and [`convert_category`] until the
//! order table is extended.

use crate::convert::context::Context;
use crate::convert::signatures::{
    SignatureSlot, convert_signature, convert_type_parameters,
};
use crate::convert::types::convert_type;
use crate::diagnostics::codes;
use crate::limits;
use crate::reflection::{
    Reflection, ReflectionBase, ReflectionId, ReflectionKind, ReferenceReflection,
    reflection_flags,
};
use crate::semantic::{
    DeclData, SemanticGraph, SignatureNode, Symbol, SymbolId, TypeData, TypeNode, node_flags,
    symbol_flags,
};
use crate::types::{ReferenceTarget, Type};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::collections::VecDeque;
use tracing::{debug, warn};

// =============================================================================
// Categories
// =============================================================================

/// One conversion category of a symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Class,
    Interface,
    Enum,
    EnumMember,
    TypeAlias,
    Function,
    Method,
    Constructor,
    Property,
    Accessor,
    Variable,
    Namespace,
    Alias,
}

impl Category {
    /// The symbol flag bits this category covers.
    pub const fn flag(self) -> u32 {
        match self {
            Category::Class => symbol_flags::CLASS,
            Category::Interface => symbol_flags::INTERFACE,
            Category::Enum => symbol_flags::ENUM,
            Category::EnumMember => symbol_flags::ENUM_MEMBER,
            Category::TypeAlias => symbol_flags::TYPE_ALIAS,
            Category::Function => symbol_flags::FUNCTION,
            Category::Method => symbol_flags::METHOD,
            Category::Constructor => symbol_flags::CONSTRUCTOR,
            Category::Property => symbol_flags::PROPERTY,
            Category::Accessor => symbol_flags::ACCESSOR,
            Category::Variable => symbol_flags::VARIABLE,
            Category::Namespace => symbol_flags::MODULE,
            Category::Alias => symbol_flags::ALIAS,
        }
    }
}

/// Fixed conversion priority. Converters for earlier entries run first
/// and may mask out later ones for the same symbol.
pub const CONVERSION_ORDER: [Category; 13] = [
    Category::Class,
    Category::Interface,
    Category::Enum,
    Category::EnumMember,
    Category::TypeAlias,
    Category::Function,
    Category::Method,
    Category::Constructor,
    Category::Property,
    Category::Accessor,
    Category::Variable,
    Category::Namespace,
    Category::Alias,
];

/// Position of a category in [`CONVERSION_ORDER`]. Exhaustive on purpose:
/// a category the order table does not enumerate cannot compile.
pub const fn order_index(category: Category) -> usize {
    match category {
        Category::Class => 0,
        Category::Interface => 1,
        Category::Enum => 2,
        Category::EnumMember => 3,
        Category::TypeAlias => 4,
        Category::Function => 5,
        Category::Method => 6,
        Category::Constructor => 7,
        Category::Property => 8,
        Category::Accessor => 9,
        Category::Variable => 10,
        Category::Namespace => 11,
        Category::Alias => 12,
    }
}

// =============================================================================
// Entry point
// =============================================================================

/// Convert one symbol into reflections attached to the context scope.
///
/// Returns the first reflection produced, or `None` when the symbol was
/// skipped entirely.
pub fn convert_symbol(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<ReflectionId> {
    let graph = ctx.graph();
    let mut symbol_id = symbol_id;
    let mut export_symbol = export_symbol;
    let mut name_override = name_override;

    // Aliases convert their target, keeping the alias as the export
    // symbol so its name and comment win.
    {
        let symbol = graph.symbol(symbol_id);
        if symbol.has_flags(symbol_flags::ALIAS) {
            let target = graph.alias_resolved(symbol_id);
            if target == symbol_id {
                ctx.state.diagnostics.error(
                    &symbol.name,
                    "alias does not resolve to a target symbol",
                    codes::UNRESOLVED_REFERENCE,
                );
                return None;
            }
            if name_override.is_none() {
                name_override = Some(symbol.name.clone());
            }
            export_symbol = Some(symbol_id);
            symbol_id = target;
        }
    }
    let symbol = graph.symbol(symbol_id);

    // Re-export fan-in: a symbol that already has a primary reflection at
    // module scope yields a lightweight reference instead of converting
    // again. Inherited copies are exempt - they always materialize anew on
    // the subtype.
    if let Some(primary) = ctx
        .state
        .project
        .primary_for(symbol_id)
        .filter(|_| !ctx.mode.converting_inherited)
    {
        let parent = ctx
            .state
            .project
            .get(primary)
            .map(|r| r.base().parent)
            .unwrap_or(ReflectionId::PROJECT);
        if ctx.state.project.is_module_container(parent) {
            let name = name_override.unwrap_or_else(|| {
                export_symbol
                    .map(|e| graph.symbol(e).name.clone())
                    .unwrap_or_else(|| symbol.name.clone())
            });
            return Some(create_reference_reflection(
                ctx,
                name,
                ReferenceTarget::Resolved(primary),
            ));
        }
        return Some(primary);
    }

    // Strip mutually exclusive categories before dispatch.
    let mut flags = symbol.flags & !(symbol_flags::ALIAS | symbol_flags::TYPE_PARAMETER);
    if flags & symbol_flags::CLASS != 0 {
        flags &= !(symbol_flags::INTERFACE | symbol_flags::FUNCTION);
    }
    if flags & symbol_flags::ENUM != 0 {
        flags &= !symbol_flags::VARIABLE;
    }
    if flags & symbol_flags::PROPERTY != 0 && graph.every_decl_method_shaped(symbol) {
        flags = (flags & !symbol_flags::PROPERTY) | symbol_flags::METHOD;
    }

    let mut skip = 0u32;
    let mut produced: Option<ReflectionId> = None;
    let mut handled: SmallVec<[Category; 4]> = SmallVec::new();
    for category in CONVERSION_ORDER {
        let bit = category.flag();
        if flags & bit == 0 || skip & bit != 0 {
            continue;
        }
        skip |= bit;
        if let Some((id, extra_skip)) = convert_category(
            ctx,
            category,
            symbol_id,
            export_symbol,
            name_override.clone(),
        ) {
            produced = produced.or(Some(id));
            skip |= extra_skip;
            handled.push(category);
        }
    }
    debug!(name = %symbol.name, ?handled, "converted symbol");

    let unhandled = flags & !skip;
    if unhandled != 0 {
        warn!(
            name = %symbol.name,
            categories = format!("{unhandled:#x}"),
            "unhandled symbol categories"
        );
        ctx.state.diagnostics.warning(
            &symbol.name,
            format!("unhandled symbol categories {unhandled:#x}"),
            codes::UNHANDLED_CATEGORY,
        );
    }
    produced
}

/// Dispatch one category. Returns the produced reflection plus the mask
/// of further categories the converter already covered.
fn convert_category(
    ctx: &mut Context,
    category: Category,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    match category {
        Category::Class => convert_class(ctx, symbol_id, export_symbol, name_override),
        Category::Interface => convert_interface(ctx, symbol_id, export_symbol, name_override),
        Category::Enum => convert_enum(ctx, symbol_id, export_symbol, name_override),
        Category::EnumMember => convert_enum_member(ctx, symbol_id, export_symbol, name_override),
        Category::TypeAlias => convert_type_alias(ctx, symbol_id, export_symbol, name_override),
        Category::Function | Category::Method => {
            convert_function_like(ctx, symbol_id, export_symbol, name_override)
        }
        Category::Constructor => convert_constructor(ctx, symbol_id, export_symbol, name_override),
        Category::Property => convert_property(ctx, symbol_id, export_symbol, name_override),
        Category::Accessor => convert_accessor(ctx, symbol_id, export_symbol, name_override),
        Category::Variable => convert_variable(ctx, symbol_id, export_symbol, name_override),
        Category::Namespace => convert_namespace(ctx, symbol_id, export_symbol, name_override),
        Category::Alias => {
            // Aliases are followed before dispatch; a stray alias bit on a
            // target symbol has nothing left to convert.
            debug!(symbol = symbol_id.0, "alias category reached dispatch");
            None
        }
    }
}

fn create_reference_reflection(
    ctx: &mut Context,
    name: String,
    target: ReferenceTarget,
) -> ReflectionId {
    let mut base = ReflectionBase::new(name, ReflectionKind::Reference, ctx.scope);
    base.flags.set(reflection_flags::EXPORTED, true);
    let id = ctx
        .state
        .project
        .alloc(Reflection::Reference(ReferenceReflection { base, target }));
    ctx.state.project.add_child(ctx.scope, id);
    ctx.state.fire_declaration_created(id);
    id
}

// =============================================================================
// Member helpers
// =============================================================================

fn should_skip_member(ctx: &mut Context, member: SymbolId) -> bool {
    let graph = ctx.graph();
    let symbol = graph.symbol(member);
    let flags = graph.decl_flags(symbol);
    if ctx.state.options.exclude_private && flags & node_flags::PRIVATE != 0 {
        return true;
    }
    if ctx.state.options.exclude_protected && flags & node_flags::PROTECTED != 0 {
        return true;
    }
    if ctx.state.options.exclude_not_documented {
        let documented = ctx
            .comments()
            .comment_for_symbol(graph, member)
            .map(|c| !c.is_empty())
            .unwrap_or(false);
        if !documented {
            return true;
        }
    }
    false
}

/// Stable conversion order for a container's exports: direct exports
/// before re-export aliases, exports literally named `default` last
/// within each group, declaration order otherwise.
pub(crate) fn sorted_exports(graph: &SemanticGraph, symbol: &Symbol) -> Vec<SymbolId> {
    let mut entries: Vec<(bool, bool, usize, SymbolId)> = symbol
        .exports
        .iter()
        .enumerate()
        .map(|(idx, (name, id))| {
            (
                graph.symbol(id).has_flags(symbol_flags::ALIAS),
                name == "default",
                idx,
                id,
            )
        })
        .collect();
    entries.sort_by_key(|&(alias, default, idx, _)| (alias, default, idx));
    entries.into_iter().map(|(_, _, _, id)| id).collect()
}

/// Convert a module/namespace body into children of the current scope.
pub(crate) fn convert_module_members(ctx: &mut Context, module_symbol: SymbolId) {
    let graph = ctx.graph();
    let symbol = graph.symbol(module_symbol);
    for member in sorted_exports(graph, symbol) {
        if should_skip_member(ctx, member) {
            continue;
        }
        convert_symbol(ctx, member, None, None);
    }
}

/// Base class/interface symbols named in a symbol's extends clauses.
fn heritage_targets(graph: &SemanticGraph, symbol_id: SymbolId) -> SmallVec<[SymbolId; 2]> {
    let mut out = SmallVec::new();
    let symbol = graph.symbol(symbol_id);
    for &decl_id in &symbol.declarations {
        let nodes: SmallVec<[_; 2]> = match &graph.decl(decl_id).data {
            DeclData::Class {
                extends: Some(e), ..
            } => SmallVec::from_slice(&[*e]),
            DeclData::Interface { extends, .. } => SmallVec::from_slice(extends),
            _ => SmallVec::new(),
        };
        for node in nodes {
            if let TypeNode::Reference {
                target: Some(t), ..
            } = graph.type_node(node)
            {
                out.push(graph.alias_resolved(*t));
            }
        }
    }
    out
}

/// Copy inherited members down onto a subtype. A member declared
/// non-public on the base is dropped rather than duplicated, except
/// constructor-parameter-promoted properties. Copies never claim primary
/// registration.
fn convert_inherited_members(ctx: &mut Context, owner: ReflectionId, symbol_id: SymbolId) {
    let graph = ctx.graph();
    let mut seen: FxHashSet<String> = graph
        .symbol(symbol_id)
        .members
        .iter()
        .map(|(name, _)| name.to_string())
        .collect();
    let mut visited: FxHashSet<SymbolId> = FxHashSet::default();
    let mut queue: VecDeque<SymbolId> = heritage_targets(graph, symbol_id).into_iter().collect();
    let mut steps = 0usize;

    while let Some(base) = queue.pop_front() {
        steps += 1;
        if steps > limits::MAX_INHERITANCE_WALK || !visited.insert(base) {
            break;
        }
        for (name, member) in graph.symbol(base).members.iter() {
            if seen.contains(name) {
                continue;
            }
            seen.insert(name.to_string());
            let flags = graph.decl_flags(graph.symbol(member));
            if flags & node_flags::NON_PUBLIC != 0
                && flags & node_flags::PARAMETER_PROPERTY == 0
            {
                continue;
            }
            if should_skip_member(ctx, member) {
                continue;
            }
            let mut child = ctx.with_scope(owner);
            child.mode = child.mode.class_or_interface().inherited();
            convert_symbol(&mut child, member, None, None);
        }
        queue.extend(heritage_targets(graph, base));
    }
}

// =============================================================================
// Category converters
// =============================================================================

fn convert_class(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let class_data = symbol.declarations.iter().find_map(|&d| {
        match &graph.decl(d).data {
            DeclData::Class {
                extends,
                implements,
                type_params,
                constructors,
            } => Some((extends, implements, type_params, constructors)),
            _ => None,
        }
    });

    let id = ctx.create_declaration(ReflectionKind::Class, symbol_id, export_symbol, name_override);

    let constructors: &[SignatureNode] = match class_data {
        Some((extends, implements, type_params, constructors)) => {
            let type_parameters = {
                let mut child = ctx.with_scope(id);
                convert_type_parameters(&mut child, id, type_params)
            };
            let (extended, implemented) = {
                let mut child = ctx.with_scope(id);
                child.mode = child.mode.type_node();
                let extended: Vec<Type> = extends
                    .iter()
                    .map(|&e| convert_type(&mut child, Some(e), None))
                    .collect();
                let implemented: Vec<Type> = implements
                    .iter()
                    .map(|&i| convert_type(&mut child, Some(i), None))
                    .collect();
                (extended, implemented)
            };
            if let Some(decl) = ctx.state.project.decl_mut(id) {
                decl.type_parameters = type_parameters;
                decl.extended_types = extended;
                decl.implemented_types = implemented;
            }
            constructors
        }
        None => &[],
    };

    convert_constructor_child(ctx, id, symbol_id, constructors);

    // Static side: members declared on the class's own binding, including
    // merged namespace exports.
    {
        let mut child = ctx.with_scope(id);
        child.mode = child.mode.static_members().class_or_interface();
        for (_, member) in graph.symbol(symbol_id).exports.iter() {
            if should_skip_member(&mut child, member) {
                continue;
            }
            convert_symbol(&mut child, member, None, None);
        }
    }

    // Instance side.
    {
        let mut child = ctx.with_scope(id);
        child.mode = child.mode.class_or_interface();
        for (_, member) in graph.symbol(symbol_id).members.iter() {
            if should_skip_member(&mut child, member) {
                continue;
            }
            convert_symbol(&mut child, member, None, None);
        }
    }

    convert_inherited_members(ctx, id, symbol_id);
    ctx.finalize_declaration(id);
    Some((id, symbol_flags::MODULE))
}

/// Synthesize the constructor child of a class.
fn convert_constructor_child(
    ctx: &mut Context,
    class_id: ReflectionId,
    class_symbol: SymbolId,
    constructors: &[SignatureNode],
) {
    let class_name = ctx.graph().symbol(class_symbol).name.clone();
    let mut child = ctx.with_scope(class_id);
    let ctor = child.create_synthetic_declaration(ReflectionKind::Constructor, "constructor");

    let default_signature = SignatureNode::default();
    let signatures: &[SignatureNode] = if constructors.is_empty() {
        std::slice::from_ref(&default_signature)
    } else {
        constructors
    };
    for signature in signatures {
        let sig_id = convert_signature(
            &mut child,
            ctor,
            ReflectionKind::ConstructorSignature,
            format!("new {class_name}"),
            signature,
            SignatureSlot::Call,
        );
        // Construct signatures return the class instance.
        if let Some(Reflection::Signature(sig)) = child.state.project.get_mut(sig_id) {
            sig.return_type = Type::Reference {
                name: class_name.clone(),
                target: ReferenceTarget::Pending(class_symbol),
                type_arguments: Vec::new(),
            };
        }
    }
    child.finalize_declaration(ctor);
}

fn convert_interface(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let interface_data = symbol.declarations.iter().find_map(|&d| {
        match &graph.decl(d).data {
            DeclData::Interface {
                extends,
                type_params,
                call_signatures,
                index_signatures,
            } => Some((extends, type_params, call_signatures, index_signatures)),
            _ => None,
        }
    });

    let id = ctx.create_declaration(
        ReflectionKind::Interface,
        symbol_id,
        export_symbol,
        name_override,
    );
    let name = symbol.name.clone();

    if let Some((extends, type_params, call_signatures, index_signatures)) = interface_data {
        let type_parameters = {
            let mut child = ctx.with_scope(id);
            convert_type_parameters(&mut child, id, type_params)
        };
        let extended: Vec<Type> = {
            let mut child = ctx.with_scope(id);
            child.mode = child.mode.type_node();
            extends
                .iter()
                .map(|&e| convert_type(&mut child, Some(e), None))
                .collect()
        };
        if let Some(decl) = ctx.state.project.decl_mut(id) {
            decl.type_parameters = type_parameters;
            decl.extended_types = extended;
        }
        for signature in call_signatures {
            let mut child = ctx.with_scope(id);
            convert_signature(
                &mut child,
                id,
                ReflectionKind::CallSignature,
                name.clone(),
                signature,
                SignatureSlot::Call,
            );
        }
        for signature in index_signatures {
            let mut child = ctx.with_scope(id);
            convert_signature(
                &mut child,
                id,
                ReflectionKind::IndexSignature,
                "__index",
                signature,
                SignatureSlot::Index,
            );
        }
    }

    {
        let mut child = ctx.with_scope(id);
        child.mode = child.mode.class_or_interface();
        for (_, member) in graph.symbol(symbol_id).members.iter() {
            if should_skip_member(&mut child, member) {
                continue;
            }
            convert_symbol(&mut child, member, None, None);
        }
    }

    convert_inherited_members(ctx, id, symbol_id);
    ctx.finalize_declaration(id);
    Some((id, symbol_flags::FUNCTION))
}

fn convert_enum(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let id = ctx.create_declaration(ReflectionKind::Enum, symbol_id, export_symbol, name_override);

    let mut child = ctx.with_scope(id);
    for (_, member) in graph.symbol(symbol_id).exports.iter() {
        if graph.symbol(member).has_flags(symbol_flags::ENUM_MEMBER) {
            convert_enum_member(&mut child, member, None, None);
        } else if !should_skip_member(&mut child, member) {
            // Namespace merged into the enum.
            convert_symbol(&mut child, member, None, None);
        }
    }
    drop(child);

    ctx.finalize_declaration(id);
    Some((id, symbol_flags::MODULE))
}

fn convert_enum_member(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let value = symbol.declarations.iter().find_map(|&d| {
        match &graph.decl(d).data {
            DeclData::EnumMember { value } => value.clone(),
            _ => None,
        }
    });

    let id = ctx.create_declaration(
        ReflectionKind::EnumMember,
        symbol_id,
        export_symbol,
        name_override,
    );
    if let Some(value) = value {
        if let Some(decl) = ctx.state.project.decl_mut(id) {
            decl.default_value = Some(value.to_source());
            decl.type_ = Some(Type::Literal { value });
        }
    }
    ctx.finalize_declaration(id);
    Some((id, 0))
}

fn convert_type_alias(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let alias_data = symbol.declarations.iter().find_map(|&d| {
        match &graph.decl(d).data {
            DeclData::TypeAlias {
                type_params,
                type_node,
            } => Some((type_params, *type_node)),
            _ => None,
        }
    });

    let id = ctx.create_declaration(
        ReflectionKind::TypeAlias,
        symbol_id,
        export_symbol,
        name_override,
    );
    if let Some((type_params, type_node)) = alias_data {
        let type_parameters = {
            let mut child = ctx.with_scope(id);
            convert_type_parameters(&mut child, id, type_params)
        };
        let ty = {
            let mut child = ctx.with_scope(id);
            child.mode = child.mode.type_node();
            convert_type(&mut child, Some(type_node), symbol.declared_type)
        };
        if let Some(decl) = ctx.state.project.decl_mut(id) {
            decl.type_parameters = type_parameters;
            decl.type_ = Some(ty);
        }
    }
    ctx.finalize_declaration(id);
    Some((id, 0))
}

/// Functions and methods share a converter; the class-or-interface mode
/// decides the kind.
fn convert_function_like(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let kind = if ctx.mode.converting_class_or_interface {
        ReflectionKind::Method
    } else {
        ReflectionKind::Function
    };

    let id = ctx.create_declaration(kind, symbol_id, export_symbol, name_override);
    let name = symbol.name.clone();
    for &decl_id in &symbol.declarations {
        if let DeclData::Function { signature } | DeclData::Method { signature } =
            &graph.decl(decl_id).data
        {
            let mut child = ctx.with_scope(id);
            convert_signature(
                &mut child,
                id,
                ReflectionKind::CallSignature,
                name.clone(),
                signature,
                SignatureSlot::Call,
            );
        }
    }

    // A namespace merged into the function contributes children.
    if !symbol.exports.is_empty() {
        let mut child = ctx.with_scope(id);
        convert_module_members(&mut child, symbol_id);
    }

    ctx.finalize_declaration(id);
    Some((id, symbol_flags::MODULE))
}

fn convert_constructor(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let parent_name = symbol
        .parent
        .map(|p| graph.symbol(p).name.clone())
        .unwrap_or_else(|| "this".to_string());

    let id = ctx.create_declaration(
        ReflectionKind::Constructor,
        symbol_id,
        export_symbol,
        name_override.or_else(|| Some("constructor".to_string())),
    );
    let signatures: Vec<SignatureNode> = graph
        .construct_signatures(symbol)
        .into_iter()
        .cloned()
        .collect();
    for signature in &signatures {
        let mut child = ctx.with_scope(id);
        let sig_id = convert_signature(
            &mut child,
            id,
            ReflectionKind::ConstructorSignature,
            format!("new {parent_name}"),
            signature,
            SignatureSlot::Call,
        );
        if let Some(parent) = symbol.parent {
            if let Some(Reflection::Signature(sig)) = child.state.project.get_mut(sig_id) {
                sig.return_type = Type::Reference {
                    name: parent_name.clone(),
                    target: ReferenceTarget::Pending(parent),
                    type_arguments: Vec::new(),
                };
            }
        }
    }
    ctx.finalize_declaration(id);
    Some((id, 0))
}

fn convert_property(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let kind = if ctx.mode.converting_class_or_interface {
        ReflectionKind::Property
    } else {
        ReflectionKind::Variable
    };
    let data = symbol.declarations.iter().find_map(|&d| {
        match &graph.decl(d).data {
            DeclData::Property {
                type_node,
                initializer,
            }
            | DeclData::Variable {
                type_node,
                initializer,
            } => Some((*type_node, initializer.clone())),
            _ => None,
        }
    });

    let id = ctx.create_declaration(kind, symbol_id, export_symbol, name_override);
    let (type_node, initializer) = data.unwrap_or((None, None));
    let ty = {
        let mut child = ctx.with_scope(id);
        child.mode = child.mode.type_node();
        convert_type(&mut child, type_node, symbol.value_type)
    };
    if let Some(decl) = ctx.state.project.decl_mut(id) {
        decl.type_ = Some(ty);
        decl.default_value = initializer;
    }
    ctx.finalize_declaration(id);
    Some((id, 0))
}

fn convert_accessor(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let id = ctx.create_declaration(
        ReflectionKind::Accessor,
        symbol_id,
        export_symbol,
        name_override,
    );
    let name = symbol.name.clone();
    for &decl_id in &symbol.declarations {
        match &graph.decl(decl_id).data {
            DeclData::GetAccessor { signature } => {
                let mut child = ctx.with_scope(id);
                convert_signature(
                    &mut child,
                    id,
                    ReflectionKind::GetSignature,
                    name.clone(),
                    signature,
                    SignatureSlot::Get,
                );
            }
            DeclData::SetAccessor { signature } => {
                let mut child = ctx.with_scope(id);
                convert_signature(
                    &mut child,
                    id,
                    ReflectionKind::SetSignature,
                    name.clone(),
                    signature,
                    SignatureSlot::Set,
                );
            }
            _ => {}
        }
    }
    ctx.finalize_declaration(id);
    Some((id, 0))
}

fn convert_namespace(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let kind = if graph.entry_points.contains(&symbol_id) {
        ReflectionKind::Module
    } else {
        ReflectionKind::Namespace
    };
    let id = ctx.create_declaration(kind, symbol_id, export_symbol, name_override);
    {
        let mut child = ctx.with_scope(id);
        convert_module_members(&mut child, symbol_id);
    }
    ctx.finalize_declaration(id);
    Some((id, 0))
}

// =============================================================================
// Variable heuristics
// =============================================================================

/// Convert a plain value symbol. Fixed priority: `@enum` tag >
/// `@namespace` tag > `@class` tag > implicit call-signature-only shape >
/// plain variable.
fn convert_variable(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let comment = export_symbol
        .and_then(|e| ctx.comments().comment_for_symbol(graph, e))
        .or_else(|| ctx.comments().comment_for_symbol(graph, symbol_id));

    if let Some(comment) = &comment {
        if comment.has_modifier("@enum") {
            return convert_variable_as_enum(ctx, symbol_id, export_symbol, name_override);
        }
        if comment.has_modifier("@namespace") {
            return convert_variable_as_namespace(ctx, symbol_id, export_symbol, name_override);
        }
        if comment.has_modifier("@class") {
            return convert_variable_as_class(ctx, symbol_id, export_symbol, name_override);
        }
    }
    if let Some(value_type) = symbol.value_type {
        if graph.is_call_signature_only(value_type) {
            return convert_variable_as_function(
                ctx,
                symbol_id,
                export_symbol,
                name_override,
                value_type,
            );
        }
    }

    convert_property(ctx, symbol_id, export_symbol, name_override)
}

/// The object symbol behind a variable's value type, if any.
fn value_object_symbol(graph: &SemanticGraph, symbol: &Symbol) -> Option<SymbolId> {
    symbol.value_type.and_then(|t| match graph.type_data(t) {
        TypeData::Object { symbol } => *symbol,
        _ => None,
    })
}

fn convert_variable_as_enum(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let Some(object) = value_object_symbol(graph, symbol) else {
        ctx.state.diagnostics.error(
            &symbol.name,
            "enum tag used on a value without an object shape",
            codes::UNSUPPORTED_TYPE_SHAPE,
        );
        return None;
    };

    let id = ctx.create_declaration(ReflectionKind::Enum, symbol_id, export_symbol, name_override);
    let mut child = ctx.with_scope(id);
    for (_, member) in graph.symbol(object).members.iter() {
        let member_symbol = graph.symbol(member);
        let literal = member_symbol.value_type.and_then(|t| {
            match graph.type_data(t) {
                TypeData::Literal { value } => Some(value.clone()),
                _ => None,
            }
        });
        let member_id = child.create_declaration(ReflectionKind::EnumMember, member, None, None);
        if let Some(value) = literal {
            if let Some(decl) = child.state.project.decl_mut(member_id) {
                decl.default_value = Some(value.to_source());
                decl.type_ = Some(Type::Literal { value });
            }
        }
        child.finalize_declaration(member_id);
    }
    drop(child);
    ctx.finalize_declaration(id);
    Some((id, 0))
}

fn convert_variable_as_namespace(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let Some(object) = value_object_symbol(graph, symbol) else {
        ctx.state.diagnostics.error(
            &symbol.name,
            "namespace tag used on a value without an object shape",
            codes::UNSUPPORTED_TYPE_SHAPE,
        );
        return None;
    };

    let id = ctx.create_declaration(
        ReflectionKind::Namespace,
        symbol_id,
        export_symbol,
        name_override,
    );
    {
        let mut child = ctx.with_scope(id);
        for (_, member) in graph.symbol(object).members.iter() {
            if should_skip_member(&mut child, member) {
                continue;
            }
            convert_symbol(&mut child, member, None, None);
        }
    }
    ctx.finalize_declaration(id);
    Some((id, 0))
}

fn convert_variable_as_class(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let constructible = symbol
        .value_type
        .map(|t| graph.is_constructible(t))
        .unwrap_or(false);
    if !constructible {
        ctx.state.diagnostics.error(
            &symbol.name,
            "class tag used without a constructible value",
            codes::NOT_CONSTRUCTIBLE,
        );
        return None;
    }

    let id = ctx.create_declaration(ReflectionKind::Class, symbol_id, export_symbol, name_override);
    if let Some(object) = value_object_symbol(graph, symbol) {
        let constructors: Vec<SignatureNode> = graph
            .construct_signatures(graph.symbol(object))
            .into_iter()
            .cloned()
            .collect();
        convert_constructor_child(ctx, id, symbol_id, &constructors);

        // Properties on the constructor value are the static side.
        let mut child = ctx.with_scope(id);
        child.mode = child.mode.static_members();
        for (_, member) in graph.symbol(object).members.iter() {
            if should_skip_member(&mut child, member) {
                continue;
            }
            convert_symbol(&mut child, member, None, None);
        }
    } else {
        convert_constructor_child(ctx, id, symbol_id, &[]);
    }
    ctx.finalize_declaration(id);
    Some((id, 0))
}

fn convert_variable_as_function(
    ctx: &mut Context,
    symbol_id: SymbolId,
    export_symbol: Option<SymbolId>,
    name_override: Option<String>,
    value_type: crate::semantic::TypeId,
) -> Option<(ReflectionId, u32)> {
    let graph = ctx.graph();
    let symbol = graph.symbol(symbol_id);
    let id = ctx.create_declaration(
        ReflectionKind::Function,
        symbol_id,
        export_symbol,
        name_override,
    );
    let name = symbol.name.clone();
    if let TypeData::Object { symbol: Some(o) } = graph.type_data(value_type) {
        let signatures: Vec<SignatureNode> = graph
            .call_signatures(graph.symbol(*o))
            .into_iter()
            .cloned()
            .collect();
        for signature in &signatures {
            let mut child = ctx.with_scope(id);
            convert_signature(
                &mut child,
                id,
                ReflectionKind::CallSignature,
                name.clone(),
                signature,
                SignatureSlot::Call,
            );
        }
    }
    ctx.finalize_declaration(id);
    Some((id, 0))
}
