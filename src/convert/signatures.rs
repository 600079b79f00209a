//! Signature, parameter, and type-parameter conversion.
//!
//! Shared by the symbol converter (methods, functions, accessors) and the
//! type converter (function/constructor literals). Attachment here is
//! kind-checked hard: wiring a parameter to something that is not a
//! signature is a converter bug, not bad input, and panics.

use crate::convert::context::Context;
use crate::convert::types::convert_type;
use crate::reflection::{
    ParameterReflection, Reflection, ReflectionBase, ReflectionId, ReflectionKind,
    SignatureReflection, TypeParameterReflection, reflection_flags,
};
use crate::semantic::{ParamNode, SignatureNode, TypeParamNode, node_flags};
use tracing::trace;

/// Where a finished signature is recorded on its parent declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SignatureSlot {
    Call,
    Get,
    Set,
    Index,
}

/// Convert one declared signature into a `SignatureReflection` attached to
/// `parent`, converting type parameters, parameters, and the return type.
pub fn convert_signature(
    ctx: &mut Context,
    parent: ReflectionId,
    kind: ReflectionKind,
    name: impl Into<String>,
    node: &SignatureNode,
    slot: SignatureSlot,
) -> ReflectionId {
    assert!(kind.is_signature(), "{kind} is not a signature kind");
    if ctx.state.project.decl(parent).is_none() {
        panic!("cannot attach a signature to non-declaration reflection {}", parent.0);
    }

    let reflection = SignatureReflection::new(name, kind, parent);
    let id = ctx.state.project.alloc(Reflection::Signature(reflection));
    trace!(id = id.0, kind = %kind, "converting signature");

    let type_params = convert_type_parameters(ctx, id, &node.type_params);
    let mut parameters = Vec::with_capacity(node.params.len());
    for param in &node.params {
        parameters.push(create_parameter(ctx, id, param));
    }

    let return_type = {
        let mut child = ctx.with_scope(id);
        child.mode = child.mode.type_node();
        convert_type(&mut child, node.return_node, node.return_type)
    };

    if let Some(Reflection::Signature(sig)) = ctx.state.project.get_mut(id) {
        sig.type_parameters = type_params;
        sig.parameters = parameters;
        sig.return_type = return_type;
    }

    match slot {
        SignatureSlot::Call => {
            if let Some(decl) = ctx.state.project.decl_mut(parent) {
                decl.signatures.push(id);
            }
        }
        SignatureSlot::Get => {
            if let Some(decl) = ctx.state.project.decl_mut(parent) {
                decl.get_signature = Some(id);
            }
        }
        SignatureSlot::Set => {
            if let Some(decl) = ctx.state.project.decl_mut(parent) {
                decl.set_signature = Some(id);
            }
        }
        SignatureSlot::Index => {
            if let Some(decl) = ctx.state.project.decl_mut(parent) {
                decl.index_signatures.push(id);
            }
        }
    }

    ctx.state.fire_signature_created(id);
    id
}

/// Convert one formal parameter, attached to a signature.
///
/// # Panics
///
/// Attaching a parameter to anything but a signature aborts the run.
pub fn create_parameter(ctx: &mut Context, signature: ReflectionId, node: &ParamNode) -> ReflectionId {
    match ctx.state.project.get(signature) {
        Some(Reflection::Signature(_)) => {}
        _ => panic!(
            "cannot attach parameter {} to non-signature reflection {}",
            node.name, signature.0
        ),
    }

    let type_ = {
        let mut child = ctx.with_scope(signature);
        child.mode = child.mode.type_node();
        convert_type(&mut child, node.type_node, node.resolved_type)
    };

    let mut base = ReflectionBase::new(&node.name, ReflectionKind::Parameter, signature);
    base.flags.set(reflection_flags::OPTIONAL, node.optional);
    base.flags.set(reflection_flags::REST, node.rest);
    base.flags.set(
        reflection_flags::READONLY,
        node.flags & node_flags::READONLY != 0,
    );
    let reflection = ParameterReflection {
        base,
        type_,
        default_value: node.default_value.clone(),
    };

    let id = ctx.state.project.alloc(Reflection::Parameter(reflection));
    ctx.state.fire_parameter_created(id);
    id
}

/// Convert declared type parameters, attached to a declaration or
/// signature.
pub fn convert_type_parameters(
    ctx: &mut Context,
    owner: ReflectionId,
    nodes: &[TypeParamNode],
) -> Vec<ReflectionId> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let constraint = node.constraint.map(|c| {
            let mut child = ctx.with_scope(owner);
            child.mode = child.mode.type_node();
            convert_type(&mut child, Some(c), None)
        });
        let default = node.default.map(|d| {
            let mut child = ctx.with_scope(owner);
            child.mode = child.mode.type_node();
            convert_type(&mut child, Some(d), None)
        });

        let reflection = TypeParameterReflection {
            base: ReflectionBase::new(&node.name, ReflectionKind::TypeParameter, owner),
            constraint,
            default,
        };
        let id = ctx.state.project.alloc(Reflection::TypeParameter(reflection));
        ctx.state.fire_type_parameter_created(id);
        out.push(id);
    }
    out
}
