//! Tests for the symbol converter: declaration merging, re-export
//! fan-in, conversion order, class conversion, and variable heuristics.

use crate::comments::Comment;
use crate::diagnostics::codes;
use crate::options::ConverterOptions;
use crate::reflection::{ReflectionId, ReflectionKind, reflection_flags};
use crate::semantic::{DeclData, ParamNode, SignatureNode, node_flags, symbol_flags};
use crate::test_fixtures::{GraphBuilder, method, property};
use crate::types::{LiteralValue, Type};

fn find_child(
    result: &crate::convert::ConversionResult,
    name: &str,
) -> crate::reflection::ReflectionId {
    result
        .project
        .child_by_name(ReflectionId::PROJECT, name)
        .unwrap_or_else(|| panic!("no top-level reflection named {name}"))
}

#[test]
fn test_reexport_produces_one_primary_and_one_reference() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");
    let foo = b.class("Foo");
    b.export(module, foo);
    b.export_alias(module, "Bar", foo);

    let result = b.convert();

    let foo_id = find_child(&result, "Foo");
    assert_eq!(
        result.project.get(foo_id).map(|r| r.base().kind),
        Some(ReflectionKind::Class)
    );

    let bar_id = find_child(&result, "Bar");
    let bar = result.project.get(bar_id).and_then(|r| r.as_reference());
    assert!(bar.is_some(), "Bar should be a reference reflection");
    assert_eq!(
        bar.map(|r| r.target),
        Some(crate::types::ReferenceTarget::Resolved(foo_id))
    );

    // Exactly one primary for the symbol.
    let primaries = result
        .project
        .ids()
        .filter(|&id| {
            result
                .project
                .get(id)
                .map(|r| r.is_primary() && r.base().name == "Foo")
                .unwrap_or(false)
        })
        .count();
    assert_eq!(primaries, 1);
}

#[test]
fn test_two_entry_points_share_one_primary() {
    let mut b = GraphBuilder::new();
    let first = b.entry_module("first");
    let second = b.entry_module("second");
    let foo = b.class("Foo");
    b.export(first, foo);
    b.export_alias(second, "Foo", foo);

    let result = b.convert();

    // Two modules at the root.
    assert_eq!(result.project.children.len(), 2);
    let first_id = find_child(&result, "first");
    let second_id = find_child(&result, "second");

    let foo_primary = result
        .project
        .child_by_name(first_id, "Foo")
        .expect("Foo under first entry");
    assert!(result.project.decl(foo_primary).is_some());

    let foo_reference = result
        .project
        .child_by_name(second_id, "Foo")
        .expect("Foo under second entry");
    let reference = result
        .project
        .get(foo_reference)
        .and_then(|r| r.as_reference())
        .expect("second path is a reference");
    assert_eq!(
        reference.target,
        crate::types::ReferenceTarget::Resolved(foo_primary)
    );
}

#[test]
fn test_default_exports_sort_last_and_aliases_after_direct() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");
    let default = b.variable("default", None, None);
    let a = b.variable("a", None, None);
    let target = b.variable("hidden", None, None);
    b.export(module, default);
    b.export_alias(module, "z", target);
    b.export(module, a);

    let result = b.convert();
    let names: Vec<String> = result
        .project
        .children
        .iter()
        .filter_map(|&id| result.project.get(id).map(|r| r.base().name.clone()))
        .collect();
    // Direct exports in declaration order with `default` last, then the
    // re-export alias.
    assert_eq!(names, ["a", "default", "z"]);
}

#[test]
fn test_class_namespace_merge_yields_single_reflection() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let merged = b.symbol("Widget", symbol_flags::CLASS | symbol_flags::MODULE);
    b.add_decl(
        merged,
        0,
        DeclData::Class {
            extends: None,
            implements: Vec::new(),
            type_params: Vec::new(),
            constructors: Vec::new(),
        },
    );
    b.add_decl(merged, 0, DeclData::Module);
    let helper = b.variable("helper", None, None);
    b.add_static(merged, helper);
    b.export(module, merged);

    let result = b.convert();
    // One top-level reflection for the merged symbol, no duplicate from
    // the namespace category.
    assert_eq!(result.project.children.len(), 1);
    let widget = result.project.decl(find_child(&result, "Widget")).unwrap();
    assert_eq!(widget.base.kind, ReflectionKind::Class);

    // The merged namespace's value landed on the static side.
    let helper_id = result.project.child_by_name(widget.base.id, "helper").unwrap();
    let helper = result.project.get(helper_id).unwrap();
    assert!(helper.base().flags.is_static());
    assert_eq!(result.diagnostics.count_code(codes::UNHANDLED_CATEGORY), 0);
}

#[test]
fn test_class_synthesizes_constructor_and_statics() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let class = b.symbol("Point", symbol_flags::CLASS);
    let number_node = b.intrinsic_node("number");
    b.add_decl(
        class,
        0,
        DeclData::Class {
            extends: None,
            implements: Vec::new(),
            type_params: Vec::new(),
            constructors: vec![SignatureNode {
                params: vec![ParamNode {
                    name: "x".to_string(),
                    type_node: Some(number_node),
                    ..ParamNode::default()
                }],
                ..SignatureNode::default()
            }],
        },
    );
    let x = property(&mut b, "x", number_node);
    b.add_member(class, x);
    let origin = b.variable("origin", None, None);
    b.add_static(class, origin);
    b.export(module, class);

    let result = b.convert();
    let point = result.project.decl(find_child(&result, "Point")).unwrap();

    let ctor_id = result
        .project
        .child_by_name(point.base.id, "constructor")
        .expect("synthesized constructor");
    let ctor = result.project.decl(ctor_id).unwrap();
    assert_eq!(ctor.base.kind, ReflectionKind::Constructor);
    assert_eq!(ctor.signatures.len(), 1);
    let sig = result
        .project
        .get(ctor.signatures[0])
        .and_then(|r| r.as_signature())
        .unwrap();
    assert_eq!(sig.base.name, "new Point");
    assert_eq!(sig.parameters.len(), 1);
    // Construct signatures return the class instance.
    assert!(matches!(
        &sig.return_type,
        Type::Reference { name, .. } if name == "Point"
    ));

    let x_id = result.project.child_by_name(point.base.id, "x").unwrap();
    let x = result.project.get(x_id).unwrap();
    assert_eq!(x.base().kind, ReflectionKind::Property);
    assert!(!x.base().flags.is_static());

    let origin_id = result.project.child_by_name(point.base.id, "origin").unwrap();
    assert!(result.project.get(origin_id).unwrap().base().flags.is_static());
}

#[test]
fn test_inherited_non_public_members_are_dropped() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let number_node = b.intrinsic_node("number");
    let base = b.symbol("Base", symbol_flags::CLASS);
    b.add_decl(
        base,
        0,
        DeclData::Class {
            extends: None,
            implements: Vec::new(),
            type_params: Vec::new(),
            constructors: Vec::new(),
        },
    );
    let visible = property(&mut b, "visible", number_node);
    b.add_member(base, visible);
    let secret = b.symbol("secret", symbol_flags::PROPERTY);
    b.add_decl(
        secret,
        node_flags::PRIVATE,
        DeclData::Property {
            type_node: Some(number_node),
            initializer: None,
        },
    );
    b.add_member(base, secret);
    let promoted = b.symbol("promoted", symbol_flags::PROPERTY);
    b.add_decl(
        promoted,
        node_flags::PRIVATE | node_flags::PARAMETER_PROPERTY,
        DeclData::Property {
            type_node: Some(number_node),
            initializer: None,
        },
    );
    b.add_member(base, promoted);

    let base_ref = b.ref_node("Base", Some(base));
    let child = b.symbol("Child", symbol_flags::CLASS);
    b.add_decl(
        child,
        0,
        DeclData::Class {
            extends: Some(base_ref),
            implements: Vec::new(),
            type_params: Vec::new(),
            constructors: Vec::new(),
        },
    );
    b.export(module, base);
    b.export(module, child);

    let result = b.convert();
    let child_id = find_child(&result, "Child");
    assert!(result.project.child_by_name(child_id, "visible").is_some());
    // Declared private on the base: dropped on the subtype.
    assert!(result.project.child_by_name(child_id, "secret").is_none());
    // Constructor-parameter-promoted properties are the exception.
    assert!(result.project.child_by_name(child_id, "promoted").is_some());
}

#[test]
fn test_method_shaped_property_converts_as_method() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let class = b.class("Service");
    // Property-flagged symbol whose every declaration is method-shaped.
    let run = b.symbol("run", symbol_flags::PROPERTY);
    b.add_decl(
        run,
        0,
        DeclData::Method {
            signature: SignatureNode::default(),
        },
    );
    b.add_member(class, run);
    b.export(module, class);

    let result = b.convert();
    let class_id = find_child(&result, "Service");
    let run_id = result.project.child_by_name(class_id, "run").unwrap();
    assert_eq!(
        result.project.get(run_id).map(|r| r.base().kind),
        Some(ReflectionKind::Method)
    );
}

#[test]
fn test_enum_conversion_with_member_values() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let color = b.symbol("Color", symbol_flags::ENUM);
    b.add_decl(color, node_flags::CONST, DeclData::Enum);
    for (i, name) in ["Red", "Green"].iter().enumerate() {
        let member = b.symbol(name, symbol_flags::ENUM_MEMBER);
        b.add_decl(
            member,
            0,
            DeclData::EnumMember {
                value: Some(LiteralValue::Number(i as f64)),
            },
        );
        b.add_static(color, member);
    }
    b.export(module, color);

    let result = b.convert();
    let color_decl = result.project.decl(find_child(&result, "Color")).unwrap();
    assert_eq!(color_decl.base.kind, ReflectionKind::Enum);
    assert!(color_decl.base.flags.has(reflection_flags::CONST));
    assert_eq!(color_decl.children.len(), 2);

    let red = result
        .project
        .decl(result.project.child_by_name(color_decl.base.id, "Red").unwrap())
        .unwrap();
    assert_eq!(red.base.kind, ReflectionKind::EnumMember);
    assert_eq!(red.default_value.as_deref(), Some("0"));
}

#[test]
fn test_accessor_conversion() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let class = b.class("Box");
    let number_node = b.intrinsic_node("number");
    let size = b.symbol("size", symbol_flags::GET_ACCESSOR | symbol_flags::SET_ACCESSOR);
    b.add_decl(
        size,
        0,
        DeclData::GetAccessor {
            signature: SignatureNode {
                return_node: Some(number_node),
                ..SignatureNode::default()
            },
        },
    );
    b.add_decl(
        size,
        0,
        DeclData::SetAccessor {
            signature: SignatureNode {
                params: vec![ParamNode {
                    name: "value".to_string(),
                    type_node: Some(number_node),
                    ..ParamNode::default()
                }],
                ..SignatureNode::default()
            },
        },
    );
    b.add_member(class, size);
    b.export(module, class);

    let result = b.convert();
    let class_id = find_child(&result, "Box");
    let size_id = result.project.child_by_name(class_id, "size").unwrap();
    let size_decl = result.project.decl(size_id).unwrap();
    assert_eq!(size_decl.base.kind, ReflectionKind::Accessor);
    assert!(size_decl.get_signature.is_some());
    assert!(size_decl.set_signature.is_some());
}

#[test]
fn test_function_overloads_collect_into_one_reflection() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let string_node = b.intrinsic_node("string");
    let number_node = b.intrinsic_node("number");
    let f = b.symbol("parse", symbol_flags::FUNCTION);
    b.add_decl(
        f,
        0,
        DeclData::Function {
            signature: SignatureNode {
                return_node: Some(string_node),
                ..SignatureNode::default()
            },
        },
    );
    b.add_decl(
        f,
        0,
        DeclData::Function {
            signature: SignatureNode {
                return_node: Some(number_node),
                ..SignatureNode::default()
            },
        },
    );
    b.export(module, f);

    let result = b.convert();
    let decl = result.project.decl(find_child(&result, "parse")).unwrap();
    assert_eq!(decl.base.kind, ReflectionKind::Function);
    assert_eq!(decl.signatures.len(), 2);
}

#[test]
fn test_variable_enum_tag_heuristic() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let object = b.symbol("__object", symbol_flags::NONE);
    let up = b.symbol("Up", symbol_flags::PROPERTY);
    let up_type = b.literal_type(LiteralValue::Number(1.0));
    b.add_decl(
        up,
        0,
        DeclData::Property {
            type_node: None,
            initializer: None,
        },
    );
    b.symbol_mut(up).value_type = Some(up_type);
    b.add_member(object, up);
    let object_type = b.object_type(Some(object));

    let direction = b.variable("Direction", None, Some(object_type));
    let mut comment = Comment::from_summary("Directions.");
    comment.modifier_tags.insert("@enum".to_string());
    b.comment(direction, comment);
    b.export(module, direction);

    let result = b.convert();
    let decl = result.project.decl(find_child(&result, "Direction")).unwrap();
    assert_eq!(decl.base.kind, ReflectionKind::Enum);
    assert_eq!(decl.children.len(), 1);
    let up = result
        .project
        .decl(result.project.child_by_name(decl.base.id, "Up").unwrap())
        .unwrap();
    assert_eq!(up.base.kind, ReflectionKind::EnumMember);
    assert_eq!(up.default_value.as_deref(), Some("1"));
}

#[test]
fn test_variable_class_tag_without_constructor_is_recoverable() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let v = b.variable("NotAClass", None, None);
    let mut comment = Comment::from_summary("Pretends.");
    comment.modifier_tags.insert("@class".to_string());
    b.comment(v, comment);
    let ok = b.variable("ok", None, None);
    b.export(module, v);
    b.export(module, ok);

    let result = b.convert();
    // The tagged symbol is skipped with an error; the rest converts.
    assert!(result.project.child_by_name(ReflectionId::PROJECT, "NotAClass").is_none());
    assert!(result.project.child_by_name(ReflectionId::PROJECT, "ok").is_some());
    assert_eq!(result.diagnostics.count_code(codes::NOT_CONSTRUCTIBLE), 1);
}

#[test]
fn test_variable_callable_shape_converts_as_function() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let callable = b.symbol("__call_shape", symbol_flags::NONE);
    let void_node = b.intrinsic_node("void");
    b.add_decl(
        callable,
        0,
        DeclData::CallSignature {
            signature: SignatureNode {
                return_node: Some(void_node),
                ..SignatureNode::default()
            },
        },
    );
    let callable_type = b.object_type(Some(callable));
    let v = b.variable("go", None, Some(callable_type));
    b.export(module, v);

    let result = b.convert();
    let decl = result.project.decl(find_child(&result, "go")).unwrap();
    assert_eq!(decl.base.kind, ReflectionKind::Function);
    assert_eq!(decl.signatures.len(), 1);
}

#[test]
fn test_unhandled_category_logs_without_aborting() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let odd = b.symbol("odd", symbol_flags::VARIABLE | (1 << 20));
    b.add_decl(
        odd,
        0,
        DeclData::Variable {
            type_node: None,
            initializer: None,
        },
    );
    b.export(module, odd);

    let result = b.convert();
    assert!(result.project.child_by_name(ReflectionId::PROJECT, "odd").is_some());
    assert_eq!(result.diagnostics.count_code(codes::UNHANDLED_CATEGORY), 1);
}

#[test]
fn test_exclude_private_members() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let number_node = b.intrinsic_node("number");
    let class = b.class("Vault");
    let open = property(&mut b, "open", number_node);
    b.add_member(class, open);
    let hidden = b.symbol("hidden", symbol_flags::PROPERTY);
    b.add_decl(
        hidden,
        node_flags::PRIVATE,
        DeclData::Property {
            type_node: Some(number_node),
            initializer: None,
        },
    );
    b.add_member(class, hidden);
    b.export(module, class);

    let options = ConverterOptions {
        exclude_private: true,
        ..ConverterOptions::default()
    };
    let result = b.convert_with_options(options);
    let class_id = find_child(&result, "Vault");
    assert!(result.project.child_by_name(class_id, "open").is_some());
    assert!(result.project.child_by_name(class_id, "hidden").is_none());
}

#[test]
fn test_namespace_inside_module_keeps_namespace_kind() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let ns = b.symbol("utils", symbol_flags::MODULE);
    b.add_decl(ns, 0, DeclData::Module);
    let helper = method(&mut b, "noop", SignatureNode::default());
    // Namespace members live in exports.
    b.symbol_mut(helper).parent = Some(ns);
    b.symbol_mut(ns).exports.insert("noop".to_string(), helper);
    b.export(module, ns);

    let result = b.convert();
    let ns_decl = result.project.decl(find_child(&result, "utils")).unwrap();
    assert_eq!(ns_decl.base.kind, ReflectionKind::Namespace);
    let noop_id = result.project.child_by_name(ns_decl.base.id, "noop").unwrap();
    // Outside a class, function-shaped members stay functions.
    assert_eq!(
        result.project.get(noop_id).map(|r| r.base().kind),
        Some(ReflectionKind::Function)
    );
}

#[test]
#[should_panic(expected = "non-signature")]
fn test_parameter_attachment_to_declaration_is_fatal() {
    use crate::comments::GraphComments;
    use crate::convert::signatures::create_parameter;
    use crate::convert::{Context, ConverterHooks, ConverterState};
    use crate::semantic::SemanticGraph;

    let graph = SemanticGraph::new();
    let mut state = ConverterState::new(
        &graph,
        &GraphComments,
        ConverterOptions::default(),
        ConverterHooks::new(),
        "test",
    );
    let mut ctx = Context::new(&mut state);
    let class = ctx.create_synthetic_declaration(ReflectionKind::Class, "C");
    // A declaration is the wrong kind of scope for a parameter; this is a
    // converter bug, not bad input.
    create_parameter(&mut ctx, class, &ParamNode::new("x"));
}

#[test]
fn test_export_alias_comment_preferred() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let foo = b.class("Foo");
    b.comment(foo, Comment::from_summary("Original."));
    let alias = b.export_alias(module, "Renamed", foo);
    b.comment(alias, Comment::from_summary("Alias wins."));

    let result = b.convert();
    // Only export path is the alias, so the primary takes its name and
    // comment.
    let decl = result.project.decl(find_child(&result, "Renamed")).unwrap();
    assert_eq!(
        decl.base.comment.as_ref().map(|c| c.summary.as_str()),
        Some("Alias wins.")
    );
}
