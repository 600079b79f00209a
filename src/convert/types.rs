//! Type converter.
//!
//! Maps a (syntax, resolved-type) pair to exactly one immutable [`Type`]
//! value through two dispatch paths: the syntax path is preferred because
//! it preserves source intent; the resolved path is the fallback when no
//! annotation exists (inferred returns, unannotated variables).
//!
//! Object/function/constructor literal shapes create and register an
//! anonymous type-literal declaration as a side effect; every other
//! conversion is pure.
//!
//! Cycle guard: a named type's symbol is marked in-progress before its
//! structure expands. References and arrays are safe shapes - they never
//! expand the symbol again - so re-entry can only happen through another
//! structural expansion, which is cut off with a textual placeholder. The
//! mark is released when the type finishes, so siblings may expand the
//! same symbol.

use crate::convert::context::Context;
use crate::convert::signatures::{SignatureSlot, convert_signature};
use crate::convert::symbols::convert_symbol;
use crate::diagnostics::codes;
use crate::reflection::ReflectionKind;
use crate::semantic::{
    DeclData, SemanticGraph, SignatureNode, SymbolId, TupleElementNode, TypeData, TypeId,
    TypeNode, TypeNodeId, symbol_flags,
};
use crate::types::{ReferenceTarget, Type};
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use tracing::{trace, warn};

/// The intrinsic type keywords the model recognizes.
static INTRINSIC_NAMES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "any", "unknown", "never", "void", "undefined", "null", "string", "number", "boolean",
        "bigint", "symbol", "object", "this", "intrinsic",
    ]
    .into_iter()
    .collect()
});

/// Convert a (syntax, resolved) pair into a type value.
///
/// Prefers the syntax; falls back to the resolved type; yields `Unknown`
/// when neither exists or the recursion limit is hit.
pub fn convert_type(
    ctx: &mut Context,
    node: Option<TypeNodeId>,
    resolved: Option<TypeId>,
) -> Type {
    ctx.state.type_depth += 1;
    let result = if ctx.state.type_depth > ctx.state.options.max_type_recursion {
        let graph = ctx.graph();
        let text = node
            .map(|n| graph.type_node_to_string(n))
            .or_else(|| resolved.map(|t| graph.type_to_string(t)))
            .unwrap_or_else(|| "unknown".to_string());
        ctx.state.diagnostics.warning(
            text.clone(),
            "type conversion exceeded the recursion limit",
            codes::TYPE_RECURSION_LIMIT,
        );
        Type::Unknown { name: text }
    } else {
        match (node, resolved) {
            (Some(n), _) => convert_type_node(ctx, n, resolved),
            (None, Some(t)) => convert_resolved_type(ctx, t),
            (None, None) => Type::Unknown {
                name: "unknown".to_string(),
            },
        }
    };
    ctx.state.type_depth -= 1;
    result
}

// =============================================================================
// Syntax dispatch
// =============================================================================

fn convert_type_node(ctx: &mut Context, id: TypeNodeId, resolved: Option<TypeId>) -> Type {
    let graph = ctx.graph();
    trace!(node = id.0, "converting type node");
    match graph.type_node(id) {
        TypeNode::Intrinsic { name } => convert_intrinsic(ctx, name),
        TypeNode::Literal { value } => Type::Literal {
            value: value.clone(),
        },
        TypeNode::Reference {
            name,
            target,
            type_args,
        } => convert_reference_node(ctx, name, *target, type_args, resolved),
        TypeNode::Union { members } => convert_union_node(ctx, members, resolved),
        TypeNode::Intersection { members } => {
            let resolved_members = resolved.and_then(|t| match graph.type_data(t) {
                TypeData::Intersection { members: r } if r.len() == members.len() => {
                    Some(r.as_slice())
                }
                _ => None,
            });
            let types = members
                .iter()
                .enumerate()
                .map(|(i, &m)| {
                    convert_type(ctx, Some(m), resolved_members.and_then(|r| r.get(i).copied()))
                })
                .collect();
            Type::Intersection { types }
        }
        TypeNode::Array { element } => {
            let resolved_element = resolved.and_then(|t| match graph.type_data(t) {
                TypeData::Array { element } => Some(*element),
                _ => None,
            });
            Type::array(convert_type(ctx, Some(*element), resolved_element))
        }
        TypeNode::Tuple { elements } => convert_tuple_node(ctx, elements, resolved),
        TypeNode::Conditional {
            check,
            extends,
            true_type,
            false_type,
        } => Type::Conditional {
            check_type: Box::new(convert_type(ctx, Some(*check), None)),
            extends_type: Box::new(convert_type(ctx, Some(*extends), None)),
            true_type: Box::new(convert_type(ctx, Some(*true_type), None)),
            false_type: Box::new(convert_type(ctx, Some(*false_type), None)),
        },
        TypeNode::IndexedAccess { object, index } => Type::IndexedAccess {
            object_type: Box::new(convert_type(ctx, Some(*object), None)),
            index_type: Box::new(convert_type(ctx, Some(*index), None)),
        },
        TypeNode::Infer { name, constraint } => Type::Inferred {
            name: name.clone(),
            constraint: constraint.map(|c| Box::new(convert_type(ctx, Some(c), None))),
        },
        TypeNode::Mapped {
            parameter,
            parameter_constraint,
            template,
            optional_modifier,
            readonly_modifier,
            name_type,
        } => Type::Mapped {
            parameter: parameter.clone(),
            parameter_type: Box::new(convert_type(ctx, Some(*parameter_constraint), None)),
            template_type: Box::new(convert_type(ctx, Some(*template), None)),
            optional_modifier: *optional_modifier,
            readonly_modifier: *readonly_modifier,
            name_type: name_type.map(|n| Box::new(convert_type(ctx, Some(n), None))),
        },
        TypeNode::Predicate {
            parameter,
            asserts,
            target,
        } => Type::Predicate {
            name: parameter.clone(),
            asserts: *asserts,
            target_type: target.map(|t| Box::new(convert_type(ctx, Some(t), None))),
        },
        TypeNode::Query { name, target } => {
            let reference = match target {
                Some(s) => Type::reference(
                    name.clone(),
                    ReferenceTarget::Pending(graph.alias_resolved(*s)),
                ),
                None => Type::reference(name.clone(), ReferenceTarget::Broken),
            };
            Type::Query {
                query_type: Box::new(reference),
            }
        }
        TypeNode::TemplateLiteral { head, spans } => {
            let tail = spans
                .iter()
                .map(|(node, text)| (convert_type(ctx, Some(*node), None), text.clone()))
                .collect();
            Type::TemplateLiteral {
                head: head.clone(),
                tail,
            }
        }
        TypeNode::Operator { operator, target } => Type::TypeOperator {
            operator: *operator,
            target: Box::new(convert_type(ctx, Some(*target), None)),
        },
        TypeNode::ObjectLiteral { symbol } => convert_object_shape(ctx, *symbol),
        TypeNode::FunctionLiteral { signature } => {
            convert_signature_shape(ctx, ReflectionKind::CallSignature, "__call", signature)
        }
        TypeNode::ConstructorLiteral { signature } => {
            convert_signature_shape(ctx, ReflectionKind::ConstructorSignature, "__new", signature)
        }
    }
}

fn convert_intrinsic(ctx: &mut Context, name: &str) -> Type {
    if INTRINSIC_NAMES.contains(name) {
        Type::intrinsic(name)
    } else {
        warn!(name, "unrecognized intrinsic keyword");
        ctx.state.diagnostics.warning(
            name,
            "unrecognized intrinsic type keyword",
            codes::UNSUPPORTED_TYPE_SHAPE,
        );
        Type::Unknown {
            name: name.to_string(),
        }
    }
}

fn convert_reference_node(
    ctx: &mut Context,
    name: &str,
    target: Option<SymbolId>,
    type_args: &[TypeNodeId],
    resolved: Option<TypeId>,
) -> Type {
    let graph = ctx.graph();
    match target {
        Some(s) => {
            if graph.symbol(s).has_flags(symbol_flags::TYPE_PARAMETER) {
                return Type::TypeParameter {
                    name: name.to_string(),
                };
            }
            let resolved_args = resolved.and_then(|t| match graph.type_data(t) {
                TypeData::Reference { type_args: r, .. } if r.len() == type_args.len() => {
                    Some(r.as_slice())
                }
                _ => None,
            });
            let type_arguments = type_args
                .iter()
                .enumerate()
                .map(|(i, &a)| {
                    convert_type(ctx, Some(a), resolved_args.and_then(|r| r.get(i).copied()))
                })
                .collect();
            Type::Reference {
                name: name.to_string(),
                target: ReferenceTarget::Pending(graph.alias_resolved(s)),
                type_arguments,
            }
        }
        None => {
            let type_arguments = type_args
                .iter()
                .map(|&a| convert_type(ctx, Some(a), None))
                .collect();
            Type::Reference {
                name: name.to_string(),
                target: ReferenceTarget::Broken,
                type_arguments,
            }
        }
    }
}

// =============================================================================
// Union conversion
// =============================================================================

/// Union members a node contributes after checker flattening: a reference
/// to an alias whose declared type is a k-member union contributes k.
fn node_union_width(graph: &SemanticGraph, node: TypeNodeId) -> usize {
    match graph.type_node(node) {
        TypeNode::Reference {
            target: Some(s), ..
        } => graph
            .symbol(*s)
            .declared_type
            .map(|t| graph.type_data(t).union_width())
            .unwrap_or(1),
        _ => 1,
    }
}

/// Splice a converted member into a flat union member list. A nested
/// union spreads in place, so a union of unions cannot occur and member
/// order keeps positional correspondence with the source syntax.
fn push_union_member(out: &mut Vec<Type>, ty: Type) {
    match ty {
        Type::Union { types } => out.extend(types),
        other => out.push(other),
    }
}

fn convert_union_node(
    ctx: &mut Context,
    members: &[TypeNodeId],
    resolved: Option<TypeId>,
) -> Type {
    let graph = ctx.graph();
    let resolved_members = resolved.and_then(|t| match graph.type_data(t) {
        TypeData::Union { members } => Some(members.as_slice()),
        _ => None,
    });

    let mut out: Vec<Type> = Vec::with_capacity(members.len());
    match resolved_members {
        // The checker flattened alias members into the union: walk the
        // syntax positionally and let each alias element consume its
        // share of the flattened list.
        Some(res) if res.len() != members.len() => {
            let mut cursor = 0usize;
            for &m in members {
                let width = node_union_width(graph, m);
                if width > 1 && cursor + width <= res.len() {
                    for &r in &res[cursor..cursor + width] {
                        push_union_member(&mut out, convert_type(ctx, None, Some(r)));
                    }
                } else {
                    let paired = if width == 1 { res.get(cursor).copied() } else { None };
                    push_union_member(&mut out, convert_type(ctx, Some(m), paired));
                }
                cursor += width;
            }
        }
        Some(res) => {
            for (i, &m) in members.iter().enumerate() {
                push_union_member(&mut out, convert_type(ctx, Some(m), res.get(i).copied()));
            }
        }
        None => {
            for &m in members {
                push_union_member(&mut out, convert_type(ctx, Some(m), None));
            }
        }
    }

    if out.len() == 1 {
        return out.remove(0);
    }
    Type::Union { types: out }
}

// =============================================================================
// Tuple conversion
// =============================================================================

/// Compose tuple wrapper types. A named element wraps `NamedTupleMember`
/// around whatever the element converted to (for a named rest element the
/// syntax is already an array, so Named ends up around Array around the
/// element type); unnamed elements get `Optional`/`Rest` wrappers.
fn wrap_tuple_element(name: Option<&str>, optional: bool, rest: bool, element: Type) -> Type {
    match name {
        Some(name) => Type::NamedTupleMember {
            name: name.to_string(),
            is_optional: optional,
            element: Box::new(element),
        },
        None if optional => Type::Optional {
            element: Box::new(element),
        },
        None if rest => Type::Rest {
            element: Box::new(element),
        },
        None => element,
    }
}

fn convert_tuple_node(
    ctx: &mut Context,
    elements: &[TupleElementNode],
    resolved: Option<TypeId>,
) -> Type {
    let graph = ctx.graph();
    let resolved_elements = resolved.and_then(|t| match graph.type_data(t) {
        TypeData::Tuple { elements: r } if r.len() == elements.len() => Some(r.as_slice()),
        _ => None,
    });

    let converted = elements
        .iter()
        .enumerate()
        .map(|(i, el)| {
            let paired = resolved_elements.and_then(|r| r.get(i)).map(|e| e.element);
            let element = convert_type(ctx, Some(el.element), paired);
            wrap_tuple_element(el.name.as_deref(), el.optional, el.rest, element)
        })
        .collect();
    Type::Tuple { elements: converted }
}

// =============================================================================
// Structural fallback dispatch
// =============================================================================

pub(crate) fn convert_resolved_type(ctx: &mut Context, id: TypeId) -> Type {
    let graph = ctx.graph();
    trace!(ty = id.0, "converting resolved type");
    match graph.type_data(id) {
        TypeData::Intrinsic { name } => convert_intrinsic(ctx, name),
        TypeData::Literal { value } => Type::Literal {
            value: value.clone(),
        },
        TypeData::Union { members } => {
            let mut out = Vec::with_capacity(members.len());
            for &m in members {
                push_union_member(&mut out, convert_type(ctx, None, Some(m)));
            }
            if out.len() == 1 {
                return out.remove(0);
            }
            Type::Union { types: out }
        }
        TypeData::Intersection { members } => Type::Intersection {
            types: members
                .iter()
                .map(|&m| convert_type(ctx, None, Some(m)))
                .collect(),
        },
        TypeData::Reference { target, type_args } => {
            let name = graph.symbol(*target).name.clone();
            let type_arguments = type_args
                .iter()
                .map(|&a| convert_type(ctx, None, Some(a)))
                .collect();
            Type::Reference {
                name,
                target: ReferenceTarget::Pending(graph.alias_resolved(*target)),
                type_arguments,
            }
        }
        TypeData::Object { symbol: Some(s) } => convert_object_shape(ctx, *s),
        TypeData::Object { symbol: None } => {
            let text = graph.type_to_string(id);
            ctx.state.diagnostics.warning(
                text.clone(),
                "anonymous object type without a symbol",
                codes::UNSUPPORTED_TYPE_SHAPE,
            );
            Type::Unknown { name: text }
        }
        TypeData::TypeParameter { symbol } => Type::TypeParameter {
            name: graph.symbol(*symbol).name.clone(),
        },
        TypeData::Array { element } => Type::array(convert_type(ctx, None, Some(*element))),
        TypeData::Tuple { elements } => {
            let converted = elements
                .iter()
                .map(|el| {
                    let mut element = convert_type(ctx, None, Some(el.element));
                    if el.rest {
                        // Resolved tuples store the per-element type; the
                        // rest wrapper composes around an array of it.
                        element = Type::array(element);
                    }
                    wrap_tuple_element(el.name.as_deref(), el.optional, el.rest, element)
                })
                .collect();
            Type::Tuple { elements: converted }
        }
        TypeData::Conditional {
            check,
            extends,
            true_type,
            false_type,
        } => Type::Conditional {
            check_type: Box::new(convert_type(ctx, None, Some(*check))),
            extends_type: Box::new(convert_type(ctx, None, Some(*extends))),
            true_type: Box::new(convert_type(ctx, None, Some(*true_type))),
            false_type: Box::new(convert_type(ctx, None, Some(*false_type))),
        },
        TypeData::IndexedAccess { object, index } => Type::IndexedAccess {
            object_type: Box::new(convert_type(ctx, None, Some(*object))),
            index_type: Box::new(convert_type(ctx, None, Some(*index))),
        },
        TypeData::TemplateLiteral { head, spans } => Type::TemplateLiteral {
            head: head.clone(),
            tail: spans
                .iter()
                .map(|(ty, text)| (convert_type(ctx, None, Some(*ty)), text.clone()))
                .collect(),
        },
        TypeData::Unsupported { text } => {
            ctx.state.diagnostics.warning(
                text.clone(),
                "type shape has no conversion category",
                codes::UNSUPPORTED_TYPE_SHAPE,
            );
            Type::Unknown { name: text.clone() }
        }
    }
}

// =============================================================================
// Anonymous shapes
// =============================================================================

/// Convert an object-literal shape by creating an anonymous type-literal
/// declaration holding its members and signatures. Guarded against
/// self-referential expansion.
pub(crate) fn convert_object_shape(ctx: &mut Context, symbol_id: SymbolId) -> Type {
    let graph = ctx.graph();
    if !ctx.state.active_type_symbols.insert(symbol_id) {
        let symbol = graph.symbol(symbol_id);
        let text = symbol
            .declared_type
            .or(symbol.value_type)
            .map(|t| graph.type_to_string(t))
            .unwrap_or_else(|| symbol.name.clone());
        ctx.state.diagnostics.warning(
            symbol.name.clone(),
            "circular type expansion cut off",
            codes::CIRCULAR_TYPE,
        );
        return Type::Unknown { name: text };
    }

    let mode = ctx.mode.type_node();
    let literal = {
        let mut child = ctx.with_mode(mode);
        let literal = child.create_synthetic_declaration(ReflectionKind::TypeLiteral, "__type");
        {
            let mut inner = child.with_scope(literal);
            inner.mode = mode.class_or_interface();
            for (_, member) in graph.symbol(symbol_id).members.iter() {
                convert_symbol(&mut inner, member, None, None);
            }
        }
        for &decl_id in &graph.symbol(symbol_id).declarations {
            let mut inner = child.with_scope(literal);
            match &graph.decl(decl_id).data {
                DeclData::CallSignature { signature } => {
                    convert_signature(
                        &mut inner,
                        literal,
                        ReflectionKind::CallSignature,
                        "__call",
                        signature,
                        SignatureSlot::Call,
                    );
                }
                DeclData::ConstructSignature { signature } => {
                    convert_signature(
                        &mut inner,
                        literal,
                        ReflectionKind::ConstructorSignature,
                        "__new",
                        signature,
                        SignatureSlot::Call,
                    );
                }
                DeclData::IndexSignature { signature } => {
                    convert_signature(
                        &mut inner,
                        literal,
                        ReflectionKind::IndexSignature,
                        "__index",
                        signature,
                        SignatureSlot::Index,
                    );
                }
                _ => {}
            }
        }
        child.finalize_declaration(literal);
        literal
    };

    ctx.state.active_type_symbols.remove(&symbol_id);
    Type::Reflection {
        declaration: literal,
    }
}

/// Convert a bare function/constructor literal type into a type literal
/// with one signature.
fn convert_signature_shape(
    ctx: &mut Context,
    kind: ReflectionKind,
    name: &str,
    signature: &SignatureNode,
) -> Type {
    let mode = ctx.mode.type_node();
    let mut child = ctx.with_mode(mode);
    let literal = child.create_synthetic_declaration(ReflectionKind::TypeLiteral, "__type");
    convert_signature(&mut child, literal, kind, name, signature, SignatureSlot::Call);
    child.finalize_declaration(literal);
    Type::Reflection {
        declaration: literal,
    }
}
