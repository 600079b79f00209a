//! Tests for the type converter: syntax dispatch, resolved fallback,
//! union flattening, tuple wrappers, and the cycle guard.

use crate::diagnostics::codes;
use crate::options::ConverterOptions;
use crate::reflection::{ReflectionId, ReflectionKind};
use crate::semantic::{DeclData, SignatureNode, TupleElementNode, TypeNode, symbol_flags};
use crate::test_fixtures::{GraphBuilder, property};
use crate::types::{BigIntValue, LiteralValue, ReferenceTarget, Type};

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
fn test_intrinsic_and_literal_nodes() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");
    let node = b.intrinsic_node("string");
    let v = b.variable("s", Some(node), None);
    b.export(module, v);

    let lit_node = b.node(TypeNode::Literal {
        value: LiteralValue::Number(42.0),
    });
    let n = b.variable("n", Some(lit_node), None);
    b.export(module, n);

    let result = b.convert();
    let s = result.project.decl(find_child(&result, "s")).unwrap();
    assert_eq!(s.type_, Some(Type::intrinsic("string")));

    let n = result.project.decl(find_child(&result, "n")).unwrap();
    assert_eq!(
        n.type_,
        Some(Type::Literal {
            value: LiteralValue::Number(42.0)
        })
    );
}

#[test]
fn test_literal_values_round_trip_to_source() {
    assert_eq!(LiteralValue::Boolean(true).to_source(), "true");
    assert_eq!(LiteralValue::Number(42.0).to_source(), "42");
    assert_eq!(LiteralValue::Number(1.5).to_source(), "1.5");
    assert_eq!(
        LiteralValue::String("hi".to_string()).to_source(),
        "\"hi\""
    );
    assert_eq!(LiteralValue::Null.to_source(), "null");
    assert_eq!(
        LiteralValue::BigInt(BigIntValue::new("123n")).to_source(),
        "123n"
    );
    assert_eq!(
        LiteralValue::BigInt(BigIntValue::new("-00700")).to_source(),
        "-700n"
    );
    // Negative zero normalizes to plain zero.
    assert_eq!(
        LiteralValue::BigInt(BigIntValue::new("-0")).to_source(),
        "0n"
    );
}

#[test]
fn test_alias_union_flattens_with_positional_correspondence() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let string = b.intrinsic("string");
    let number = b.intrinsic("number");
    let boolean = b.intrinsic("boolean");

    // type A = string | number;
    let a_union = b.union_type(&[string, number]);
    let sn = b.intrinsic_node("string");
    let nn = b.intrinsic_node("number");
    let a_node = b.union_node(vec![sn, nn]);
    let a = b.type_alias("A", a_node, Some(a_union));
    b.export(module, a);

    // type B = A | boolean; the checker reports the flattened union.
    let b_union = b.union_type(&[a_union, boolean]);
    let a_ref = b.ref_node("A", Some(a));
    let bn = b.intrinsic_node("boolean");
    let b_node = b.union_node(vec![a_ref, bn]);
    let b_alias = b.type_alias("B", b_node, Some(b_union));
    b.export(module, b_alias);

    let result = b.convert();
    let b_decl = result.project.decl(find_child(&result, "B")).unwrap();
    let Some(Type::Union { types }) = &b_decl.type_ else {
        panic!("B should be a union, got {:?}", b_decl.type_);
    };
    // A single flattened union of exactly [string, number, boolean], in
    // source order - not a union of unions.
    let names: Vec<String> = types.iter().map(|t| t.to_string()).collect();
    assert_eq!(names, ["string", "number", "boolean"]);
    assert!(types.iter().all(|t| !matches!(t, Type::Union { .. })));
}

#[test]
fn test_union_without_flattening_keeps_references() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let iface = b.symbol("Foo", symbol_flags::INTERFACE);
    b.add_decl(
        iface,
        0,
        DeclData::Interface {
            extends: Vec::new(),
            type_params: Vec::new(),
            call_signatures: Vec::new(),
            index_signatures: Vec::new(),
        },
    );
    b.export(module, iface);

    let foo_ref = b.ref_node("Foo", Some(iface));
    let nn = b.intrinsic_node("number");
    let union = b.union_node(vec![foo_ref, nn]);
    let v = b.variable("v", Some(union), None);
    b.export(module, v);

    let result = b.convert();
    let v_decl = result.project.decl(find_child(&result, "v")).unwrap();
    let Some(Type::Union { types }) = &v_decl.type_ else {
        panic!("expected union");
    };
    assert_eq!(types.len(), 2);
    assert!(matches!(
        &types[0],
        Type::Reference {
            name,
            target: ReferenceTarget::Resolved(_),
            ..
        } if name == "Foo"
    ));
}

#[test]
fn test_tuple_wrapper_composition() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let sn = b.intrinsic_node("string");
    let nn = b.intrinsic_node("number");
    let bn = b.intrinsic_node("boolean");
    let sn2 = b.intrinsic_node("string");
    let rest_array = b.node(TypeNode::Array { element: sn2 });
    let sn3 = b.intrinsic_node("string");
    let named_rest_array = b.node(TypeNode::Array { element: sn3 });

    let tuple = b.node(TypeNode::Tuple {
        elements: vec![
            TupleElementNode::plain(sn),
            TupleElementNode {
                name: None,
                optional: true,
                rest: false,
                element: nn,
            },
            TupleElementNode {
                name: None,
                optional: false,
                rest: true,
                element: rest_array,
            },
            TupleElementNode {
                name: Some("x".to_string()),
                optional: false,
                rest: false,
                element: bn,
            },
            TupleElementNode {
                name: Some("rest".to_string()),
                optional: false,
                rest: true,
                element: named_rest_array,
            },
        ],
    });
    let v = b.variable("t", Some(tuple), None);
    b.export(module, v);

    let result = b.convert();
    let decl = result.project.decl(find_child(&result, "t")).unwrap();
    let Some(Type::Tuple { elements }) = &decl.type_ else {
        panic!("expected tuple");
    };
    assert_eq!(elements.len(), 5);
    assert!(matches!(&elements[0], Type::Intrinsic { name } if name == "string"));
    assert!(matches!(&elements[1], Type::Optional { .. }));
    // Unnamed rest wraps Rest around the array written in source.
    let Type::Rest { element } = &elements[2] else {
        panic!("expected rest");
    };
    assert!(matches!(**element, Type::Array { .. }));
    assert!(matches!(
        &elements[3],
        Type::NamedTupleMember { name, is_optional: false, .. } if name == "x"
    ));
    // A rest-named element wraps Named around an Array around the element
    // type.
    let Type::NamedTupleMember { name, element, .. } = &elements[4] else {
        panic!("expected named rest member");
    };
    assert_eq!(name, "rest");
    assert!(matches!(**element, Type::Array { .. }));
}

#[test]
fn test_self_referential_alias_closes_with_reference() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    // type T = { next: T };
    let literal_symbol = b.symbol("__type", symbol_flags::NONE);
    let t = b.symbol("T", symbol_flags::TYPE_ALIAS);
    let t_ref = b.ref_node("T", Some(t));
    let next = property(&mut b, "next", t_ref);
    b.add_member(literal_symbol, next);
    let literal_node = b.node(TypeNode::ObjectLiteral {
        symbol: literal_symbol,
    });
    b.add_decl(
        t,
        0,
        DeclData::TypeAlias {
            type_params: Vec::new(),
            type_node: literal_node,
        },
    );
    b.export(module, t);

    let result = b.convert();
    let t_id = find_child(&result, "T");
    let t_decl = result.project.decl(t_id).unwrap();
    let Some(Type::Reflection { declaration }) = &t_decl.type_ else {
        panic!("expected a reflection type");
    };

    // The literal's `next` member closes the graph with a reference back
    // to T rather than expanding forever.
    let literal = result.project.decl(*declaration).unwrap();
    assert_eq!(literal.base.kind, ReflectionKind::TypeLiteral);
    let next_id = literal.children[0];
    let next_decl = result.project.decl(next_id).unwrap();
    assert!(matches!(
        next_decl.type_,
        Some(Type::Reference {
            target: ReferenceTarget::Resolved(id),
            ..
        }) if id == t_id
    ));
}

#[test]
fn test_circular_structural_expansion_is_cut_off() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    // An inferred object type whose member is the same object type again;
    // no syntax anywhere, so expansion must go through the guard.
    let object_symbol = b.symbol("__object", symbol_flags::NONE);
    let object_type = b.object_type(Some(object_symbol));
    let own = b.symbol("self", symbol_flags::PROPERTY);
    b.add_decl(
        own,
        0,
        DeclData::Property {
            type_node: None,
            initializer: None,
        },
    );
    b.symbol_mut(own).value_type = Some(object_type);
    b.add_member(object_symbol, own);

    let v = b.variable("v", None, Some(object_type));
    b.export(module, v);

    let result = b.convert();
    assert!(result.diagnostics.count_code(codes::CIRCULAR_TYPE) >= 1);
    // The outer conversion still produced a type literal.
    let decl = result.project.decl(find_child(&result, "v")).unwrap();
    assert!(matches!(decl.type_, Some(Type::Reflection { .. })));
}

#[test]
fn test_function_literal_creates_anonymous_signature() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let rn = b.intrinsic_node("void");
    let fn_node = b.node(TypeNode::FunctionLiteral {
        signature: SignatureNode {
            return_node: Some(rn),
            ..SignatureNode::default()
        },
    });
    let v = b.variable("handler", Some(fn_node), None);
    b.export(module, v);

    let result = b.convert();
    let decl = result.project.decl(find_child(&result, "handler")).unwrap();
    let Some(Type::Reflection { declaration }) = &decl.type_ else {
        panic!("expected reflection type");
    };
    let literal = result.project.decl(*declaration).unwrap();
    assert_eq!(literal.base.kind, ReflectionKind::TypeLiteral);
    assert_eq!(literal.signatures.len(), 1);
    let sig = result
        .project
        .get(literal.signatures[0])
        .and_then(|r| r.as_signature())
        .unwrap();
    assert_eq!(sig.base.kind, ReflectionKind::CallSignature);
    assert_eq!(sig.return_type, Type::intrinsic("void"));
}

#[test]
fn test_recursion_limit_degrades_to_unknown() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let mut node = b.intrinsic_node("string");
    for _ in 0..10 {
        node = b.node(TypeNode::Array { element: node });
    }
    let v = b.variable("deep", Some(node), None);
    b.export(module, v);

    let options = ConverterOptions {
        max_type_recursion: 3,
        ..ConverterOptions::default()
    };
    let result = b.convert_with_options(options);
    assert!(result.diagnostics.count_code(codes::TYPE_RECURSION_LIMIT) >= 1);
}

#[test]
fn test_unsupported_shape_becomes_unknown() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");

    let odd = b.type_data(crate::semantic::TypeData::Unsupported {
        text: "WeirdShape<1>".to_string(),
    });
    let v = b.variable("w", None, Some(odd));
    b.export(module, v);

    let result = b.convert();
    let decl = result.project.decl(find_child(&result, "w")).unwrap();
    assert_eq!(
        decl.type_,
        Some(Type::Unknown {
            name: "WeirdShape<1>".to_string()
        })
    );
    assert!(result.diagnostics.count_code(codes::UNSUPPORTED_TYPE_SHAPE) >= 1);
}

#[test]
fn test_type_rendering() {
    let union = Type::Union {
        types: vec![Type::intrinsic("string"), Type::intrinsic("number")],
    };
    assert_eq!(union.to_string(), "string | number");
    assert_eq!(Type::array(union).to_string(), "(string | number)[]");

    let keyof = Type::TypeOperator {
        operator: crate::semantic::TypeOperatorKind::KeyOf,
        target: Box::new(Type::reference("Foo", ReferenceTarget::Broken)),
    };
    assert_eq!(keyof.to_string(), "keyof Foo");

    let predicate = Type::Predicate {
        name: "x".to_string(),
        asserts: true,
        target_type: Some(Box::new(Type::intrinsic("string"))),
    };
    assert_eq!(predicate.to_string(), "asserts x is string");

    let template = Type::TemplateLiteral {
        head: "id-".to_string(),
        tail: vec![(Type::intrinsic("string"), "!".to_string())],
    };
    assert_eq!(template.to_string(), "`id-${string}!`");
}
