//! Round-trip tests for the serialization contract: serializing then
//! reconstructing any type or reflection yields an equal value under its
//! defined equality.

use crate::reflection::ReflectionId;
use crate::semantic::{MappedModifier, TypeOperatorKind};
use crate::serialization::{
    project_from_json, project_to_json_string, type_from_json, type_to_json,
};
use crate::test_fixtures::GraphBuilder;
use crate::types::{BigIntValue, LiteralValue, ReferenceTarget, Type};

fn round_trip(ty: &Type) -> Type {
    let json = type_to_json(ty).expect("serialize");
    type_from_json(&json).expect("deserialize")
}

fn assert_round_trips(ty: Type) {
    let back = round_trip(&ty);
    assert!(
        ty.same_type(&back),
        "round trip changed the value: {ty:?} vs {back:?}"
    );
}

#[test]
fn test_every_type_variant_round_trips() {
    assert_round_trips(Type::intrinsic("string"));
    assert_round_trips(Type::Literal {
        value: LiteralValue::String("abc".to_string()),
    });
    assert_round_trips(Type::Literal {
        value: LiteralValue::Number(1.5),
    });
    assert_round_trips(Type::Literal {
        value: LiteralValue::Boolean(false),
    });
    assert_round_trips(Type::Literal {
        value: LiteralValue::BigInt(BigIntValue::new("-9007199254740993")),
    });
    assert_round_trips(Type::Literal {
        value: LiteralValue::Null,
    });
    assert_round_trips(Type::Reference {
        name: "Foo".to_string(),
        target: ReferenceTarget::Resolved(ReflectionId(7)),
        type_arguments: vec![Type::intrinsic("number")],
    });
    assert_round_trips(Type::Reference {
        name: "Gone".to_string(),
        target: ReferenceTarget::Broken,
        type_arguments: Vec::new(),
    });
    assert_round_trips(Type::Union {
        types: vec![Type::intrinsic("string"), Type::intrinsic("number")],
    });
    assert_round_trips(Type::Intersection {
        types: vec![
            Type::reference("A", ReferenceTarget::Broken),
            Type::reference("B", ReferenceTarget::Broken),
        ],
    });
    assert_round_trips(Type::array(Type::intrinsic("string")));
    assert_round_trips(Type::Tuple {
        elements: vec![
            Type::intrinsic("string"),
            Type::Optional {
                element: Box::new(Type::intrinsic("number")),
            },
            Type::Rest {
                element: Box::new(Type::array(Type::intrinsic("boolean"))),
            },
            Type::NamedTupleMember {
                name: "x".to_string(),
                is_optional: true,
                element: Box::new(Type::intrinsic("string")),
            },
        ],
    });
    assert_round_trips(Type::Conditional {
        check_type: Box::new(Type::TypeParameter {
            name: "T".to_string(),
        }),
        extends_type: Box::new(Type::intrinsic("string")),
        true_type: Box::new(Type::intrinsic("number")),
        false_type: Box::new(Type::intrinsic("never")),
    });
    assert_round_trips(Type::IndexedAccess {
        object_type: Box::new(Type::reference("Foo", ReferenceTarget::Broken)),
        index_type: Box::new(Type::Literal {
            value: LiteralValue::String("key".to_string()),
        }),
    });
    assert_round_trips(Type::Inferred {
        name: "U".to_string(),
        constraint: Some(Box::new(Type::intrinsic("string"))),
    });
    assert_round_trips(Type::Mapped {
        parameter: "K".to_string(),
        parameter_type: Box::new(Type::TypeOperator {
            operator: TypeOperatorKind::KeyOf,
            target: Box::new(Type::reference("T", ReferenceTarget::Broken)),
        }),
        template_type: Box::new(Type::intrinsic("boolean")),
        optional_modifier: Some(MappedModifier::Add),
        readonly_modifier: Some(MappedModifier::Remove),
        name_type: None,
    });
    assert_round_trips(Type::Predicate {
        name: "value".to_string(),
        asserts: false,
        target_type: Some(Box::new(Type::intrinsic("string"))),
    });
    assert_round_trips(Type::Query {
        query_type: Box::new(Type::reference("config", ReferenceTarget::Pending(
            crate::semantic::SymbolId(3),
        ))),
    });
    assert_round_trips(Type::TemplateLiteral {
        head: "v".to_string(),
        tail: vec![(Type::intrinsic("number"), ".x".to_string())],
    });
    assert_round_trips(Type::TypeOperator {
        operator: TypeOperatorKind::ReadOnly,
        target: Box::new(Type::array(Type::intrinsic("string"))),
    });
    assert_round_trips(Type::TypeParameter {
        name: "T".to_string(),
    });
    assert_round_trips(Type::Reflection {
        declaration: ReflectionId(12),
    });
    assert_round_trips(Type::Unknown {
        name: "some & weird".to_string(),
    });
}

#[test]
fn test_union_equality_is_order_insensitive() {
    let a = Type::Union {
        types: vec![Type::intrinsic("string"), Type::intrinsic("number")],
    };
    let b = Type::Union {
        types: vec![Type::intrinsic("number"), Type::intrinsic("string")],
    };
    assert!(a.same_type(&b));

    let c = Type::Union {
        types: vec![Type::intrinsic("number"), Type::intrinsic("boolean")],
    };
    assert!(!a.same_type(&c));
}

#[test]
fn test_tuple_equality_is_order_sensitive() {
    let a = Type::Tuple {
        elements: vec![Type::intrinsic("string"), Type::intrinsic("number")],
    };
    let b = Type::Tuple {
        elements: vec![Type::intrinsic("number"), Type::intrinsic("string")],
    };
    assert!(!a.same_type(&b));
    assert!(a.same_type(&a.clone()));
}

#[test]
fn test_number_literal_equality_uses_bit_pattern() {
    let nan = LiteralValue::Number(f64::NAN);
    assert_eq!(nan, LiteralValue::Number(f64::NAN));
    assert_ne!(LiteralValue::Number(0.0), LiteralValue::Number(-0.0));
}

#[test]
fn test_project_round_trips_through_json() {
    let mut b = GraphBuilder::new();
    let module = b.entry_module("index");
    let base = b.class("Base");
    let string_node = b.intrinsic_node("string");
    let v = b.variable("label", Some(string_node), None);
    b.export(module, base);
    b.export(module, v);

    let result = b.convert();
    let json = project_to_json_string(&result.project).expect("serialize project");
    let back = project_from_json(&json).expect("deserialize project");

    assert_eq!(back.name, result.project.name);
    assert_eq!(back.len(), result.project.len());
    assert_eq!(back.children, result.project.children);
    for id in result.project.ids() {
        let original = result.project.get(id).unwrap();
        let restored = back.get(id).unwrap();
        assert_eq!(original.base().name, restored.base().name);
        assert_eq!(original.base().kind, restored.base().kind);
        assert_eq!(original.base().parent, restored.base().parent);
    }

    // The label variable keeps an equal type value.
    let label_id = result
        .project
        .child_by_name(ReflectionId::PROJECT, "label")
        .unwrap();
    let original = result.project.decl(label_id).unwrap();
    let restored = back.decl(label_id).unwrap();
    match (&original.type_, &restored.type_) {
        (Some(a), Some(b)) => assert!(a.same_type(b)),
        other => panic!("type lost in round trip: {other:?}"),
    }
}

#[test]
fn test_serialized_form_is_stable_camel_case() {
    let ty = Type::NamedTupleMember {
        name: "x".to_string(),
        is_optional: true,
        element: Box::new(Type::intrinsic("string")),
    };
    let json = type_to_json(&ty).unwrap();
    assert_eq!(json["type"], "namedTupleMember");
    assert_eq!(json["isOptional"], true);
    assert_eq!(json["element"]["type"], "intrinsic");
    assert_eq!(json["element"]["name"], "string");
}
