//! Whole-project resolution pass.
//!
//! Runs once after every entry point finishes construction. No reflection
//! is resolved earlier because references may point forward to
//! declarations not yet built when first created.
//!
//! Per registered reflection the pass resolves pending reference values
//! (by symbol id, falling back to a name lookup through the reflection's
//! lexical ancestry), records inverse extended-by/implemented-by edges on
//! targets, builds the ordered extends-chain for classes and interfaces,
//! and fires the per-reflection resolve notification exactly once.

use crate::convert::context::ConverterState;
use crate::diagnostics::{DiagnosticBag, codes};
use crate::limits;
use crate::reflection::{
    ProjectReflection, Reflection, ReflectionId, TypeHierarchy, kind_masks,
};
use crate::types::{ReferenceTarget, Type};
use std::mem;
use tracing::{debug, trace};

/// Fix up every reference and compute hierarchy caches.
pub fn resolve_project(state: &mut ConverterState) {
    debug!(reflections = state.project.len(), "resolution pass");
    state.fire_resolve_begin();

    let ids: Vec<ReflectionId> = state.project.ids().collect();
    for &id in &ids {
        resolve_reflection_references(&mut state.project, &mut state.diagnostics, id);
    }
    for &id in &ids {
        record_inverse_edges(&mut state.project, id);
    }
    for &id in &ids {
        build_hierarchy(&mut state.project, id);
        state.fire_reflection_resolved(id);
    }

    state.fire_resolve_end();
}

// =============================================================================
// Reference resolution
// =============================================================================

/// Resolve every type-valued field of one reflection. Fields are taken
/// out, resolved against the project, and put back, so targets can be
/// looked up while the field is rewritten.
fn resolve_reflection_references(
    project: &mut ProjectReflection,
    diagnostics: &mut DiagnosticBag,
    id: ReflectionId,
) {
    let Some(reflection) = project.get_mut(id) else {
        return;
    };
    match reflection {
        Reflection::Declaration(decl) => {
            let mut type_ = decl.type_.take();
            let mut extended = mem::take(&mut decl.extended_types);
            let mut implemented = mem::take(&mut decl.implemented_types);

            if let Some(ty) = &mut type_ {
                resolve_type(project, diagnostics, id, ty);
            }
            for ty in &mut extended {
                resolve_type(project, diagnostics, id, ty);
            }
            for ty in &mut implemented {
                resolve_type(project, diagnostics, id, ty);
            }

            if let Some(decl) = project.decl_mut(id) {
                decl.type_ = type_;
                decl.extended_types = extended;
                decl.implemented_types = implemented;
            }
        }
        Reflection::Signature(sig) => {
            let mut return_type = mem::replace(
                &mut sig.return_type,
                Type::Unknown {
                    name: String::new(),
                },
            );
            resolve_type(project, diagnostics, id, &mut return_type);
            if let Some(Reflection::Signature(sig)) = project.get_mut(id) {
                sig.return_type = return_type;
            }
        }
        Reflection::Parameter(param) => {
            let mut type_ = mem::replace(
                &mut param.type_,
                Type::Unknown {
                    name: String::new(),
                },
            );
            resolve_type(project, diagnostics, id, &mut type_);
            if let Some(Reflection::Parameter(param)) = project.get_mut(id) {
                param.type_ = type_;
            }
        }
        Reflection::TypeParameter(tp) => {
            let mut constraint = tp.constraint.take();
            let mut default = tp.default.take();
            if let Some(ty) = &mut constraint {
                resolve_type(project, diagnostics, id, ty);
            }
            if let Some(ty) = &mut default {
                resolve_type(project, diagnostics, id, ty);
            }
            if let Some(Reflection::TypeParameter(tp)) = project.get_mut(id) {
                tp.constraint = constraint;
                tp.default = default;
            }
        }
        Reflection::Reference(reference) => {
            let name = reference.base.name.clone();
            let target = reference.target;
            if let ReferenceTarget::Pending(symbol) = target {
                let resolved = project
                    .primary_for(symbol)
                    .or_else(|| resolve_by_name(project, id, &name));
                let new_target = match resolved {
                    Some(target_id) => ReferenceTarget::Resolved(target_id),
                    None => {
                        diagnostics.warning(
                            &name,
                            "re-export target could not be resolved",
                            codes::UNRESOLVED_REFERENCE,
                        );
                        ReferenceTarget::Broken
                    }
                };
                if let Some(Reflection::Reference(reference)) = project.get_mut(id) {
                    reference.target = new_target;
                }
            }
        }
    }
}

/// Resolve pending references inside one type value. Embedded anonymous
/// declarations are separate arena entries and resolve on their own turn.
fn resolve_type(
    project: &ProjectReflection,
    diagnostics: &mut DiagnosticBag,
    owner: ReflectionId,
    ty: &mut Type,
) {
    match ty {
        Type::Reference {
            name,
            target,
            type_arguments,
        } => {
            if let ReferenceTarget::Pending(symbol) = *target {
                *target = match project
                    .primary_for(symbol)
                    .or_else(|| resolve_by_name(project, owner, name))
                {
                    Some(id) => {
                        trace!(name = %name, id = id.0, "resolved reference");
                        ReferenceTarget::Resolved(id)
                    }
                    None => {
                        diagnostics.warning(
                            name.clone(),
                            "reference target is outside the documented surface",
                            codes::UNRESOLVED_REFERENCE,
                        );
                        ReferenceTarget::Broken
                    }
                };
            }
            for arg in type_arguments {
                resolve_type(project, diagnostics, owner, arg);
            }
        }
        Type::Union { types } | Type::Intersection { types } | Type::Tuple { elements: types } => {
            for member in types {
                resolve_type(project, diagnostics, owner, member);
            }
        }
        Type::Array { element }
        | Type::NamedTupleMember { element, .. }
        | Type::Optional { element }
        | Type::Rest { element } => resolve_type(project, diagnostics, owner, element),
        Type::Conditional {
            check_type,
            extends_type,
            true_type,
            false_type,
        } => {
            resolve_type(project, diagnostics, owner, check_type);
            resolve_type(project, diagnostics, owner, extends_type);
            resolve_type(project, diagnostics, owner, true_type);
            resolve_type(project, diagnostics, owner, false_type);
        }
        Type::IndexedAccess {
            object_type,
            index_type,
        } => {
            resolve_type(project, diagnostics, owner, object_type);
            resolve_type(project, diagnostics, owner, index_type);
        }
        Type::Inferred { constraint, .. } => {
            if let Some(constraint) = constraint {
                resolve_type(project, diagnostics, owner, constraint);
            }
        }
        Type::Mapped {
            parameter_type,
            template_type,
            name_type,
            ..
        } => {
            resolve_type(project, diagnostics, owner, parameter_type);
            resolve_type(project, diagnostics, owner, template_type);
            if let Some(name_type) = name_type {
                resolve_type(project, diagnostics, owner, name_type);
            }
        }
        Type::Predicate { target_type, .. } => {
            if let Some(target_type) = target_type {
                resolve_type(project, diagnostics, owner, target_type);
            }
        }
        Type::Query { query_type } => resolve_type(project, diagnostics, owner, query_type),
        Type::TemplateLiteral { tail, .. } => {
            for (member, _) in tail {
                resolve_type(project, diagnostics, owner, member);
            }
        }
        Type::TypeOperator { target, .. } => resolve_type(project, diagnostics, owner, target),
        Type::Intrinsic { .. }
        | Type::Literal { .. }
        | Type::TypeParameter { .. }
        | Type::Reflection { .. }
        | Type::Unknown { .. } => {}
    }
}

/// Name fallback: walk the owner's lexical ancestry looking for a child
/// with the target name.
fn resolve_by_name(
    project: &ProjectReflection,
    owner: ReflectionId,
    name: &str,
) -> Option<ReflectionId> {
    let mut current = owner;
    for _ in 0..limits::MAX_ANCESTRY_WALK {
        if let Some(hit) = project.child_by_name(current, name) {
            if project.get(hit).map(|r| r.is_primary()).unwrap_or(false) {
                return Some(hit);
            }
        }
        if current == ReflectionId::PROJECT {
            return None;
        }
        current = project
            .get(current)
            .map(|r| r.base().parent)
            .unwrap_or(ReflectionId::PROJECT);
    }
    None
}

// =============================================================================
// Inverse edges
// =============================================================================

/// Push extended-by/implemented-by references onto the targets of this
/// reflection's heritage clauses.
fn record_inverse_edges(project: &mut ProjectReflection, id: ReflectionId) {
    let Some(decl) = project.decl(id) else { return };
    if !decl.base.kind.is(kind_masks::CLASS_OR_INTERFACE) {
        return;
    }
    let name = decl.base.name.clone();
    let extended: Vec<ReflectionId> = resolved_targets(&decl.extended_types);
    let implemented: Vec<ReflectionId> = resolved_targets(&decl.implemented_types);

    for target in extended {
        if let Some(target_decl) = project.decl_mut(target) {
            target_decl.extended_by.push(Type::Reference {
                name: name.clone(),
                target: ReferenceTarget::Resolved(id),
                type_arguments: Vec::new(),
            });
        }
    }
    for target in implemented {
        if let Some(target_decl) = project.decl_mut(target) {
            target_decl.implemented_by.push(Type::Reference {
                name: name.clone(),
                target: ReferenceTarget::Resolved(id),
                type_arguments: Vec::new(),
            });
        }
    }
}

fn resolved_targets(types: &[Type]) -> Vec<ReflectionId> {
    types
        .iter()
        .filter_map(|t| match t {
            Type::Reference {
                target: ReferenceTarget::Resolved(id),
                ..
            } => Some(*id),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Extends-chain
// =============================================================================

/// Build the ordered extends-chain of a class/interface: root ancestor
/// first, the target level marked, nearest descendants last. Skipped when
/// the reflection has no heritage edges at all.
fn build_hierarchy(project: &mut ProjectReflection, id: ReflectionId) {
    let Some(decl) = project.decl(id) else { return };
    if !decl.base.kind.is(kind_masks::CLASS_OR_INTERFACE) {
        return;
    }
    if decl.extended_types.is_empty() && decl.extended_by.is_empty() {
        return;
    }

    // Ancestor levels, nearest first.
    let mut up: Vec<Vec<Type>> = Vec::new();
    let mut cursor = id;
    for _ in 0..limits::MAX_INHERITANCE_WALK {
        let Some(current) = project.decl(cursor) else { break };
        if current.extended_types.is_empty() {
            break;
        }
        up.push(current.extended_types.clone());
        match resolved_targets(&current.extended_types).first() {
            Some(&next) if next != cursor => cursor = next,
            _ => break,
        }
    }

    // Assemble from the bottom: descendants, then the marked target, then
    // ancestors up to the root.
    let decl = match project.decl(id) {
        Some(d) => d,
        None => return,
    };
    let mut chain: Option<Box<TypeHierarchy>> = if decl.extended_by.is_empty() {
        None
    } else {
        Some(Box::new(TypeHierarchy {
            types: decl.extended_by.clone(),
            is_target: false,
            next: None,
        }))
    };
    chain = Some(Box::new(TypeHierarchy {
        types: vec![Type::Reference {
            name: decl.base.name.clone(),
            target: ReferenceTarget::Resolved(id),
            type_arguments: Vec::new(),
        }],
        is_target: true,
        next: chain,
    }));
    for level in up {
        chain = Some(Box::new(TypeHierarchy {
            types: level,
            is_target: false,
            next: chain,
        }));
    }

    if let Some(decl) = project.decl_mut(id) {
        decl.hierarchy = chain.map(|b| *b);
    }
}
