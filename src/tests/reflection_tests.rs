//! Tests for the reflection model: registry invariants, kind masks, flag
//! handling, and the conversion-order table.

use crate::convert::{CONVERSION_ORDER, order_index};
use crate::reflection::{
    DeclarationReflection, ProjectReflection, Reflection, ReflectionId, ReflectionKind,
    kind_masks, reflection_flags,
};
use crate::semantic::SymbolId;

fn declaration(name: &str, kind: ReflectionKind, parent: ReflectionId) -> Reflection {
    Reflection::Declaration(DeclarationReflection::new(name, kind, parent))
}

#[test]
fn test_ids_are_unique_and_stable() {
    let mut project = ProjectReflection::new("test");
    let a = project.alloc(declaration("a", ReflectionKind::Class, ReflectionId::PROJECT));
    let b = project.alloc(declaration("b", ReflectionKind::Class, ReflectionId::PROJECT));
    assert_ne!(a, b);
    assert_eq!(project.get(a).unwrap().base().id, a);
    assert_eq!(project.get(b).unwrap().base().id, b);
    assert_eq!(project.len(), 2);
}

#[test]
fn test_registry_maps_one_primary_per_symbol() {
    let mut project = ProjectReflection::new("test");
    let a = project.alloc(declaration("a", ReflectionKind::Class, ReflectionId::PROJECT));
    project.register_primary(SymbolId(1), a);
    assert_eq!(project.primary_for(SymbolId(1)), Some(a));
    assert_eq!(project.symbol_for(a), Some(SymbolId(1)));
    assert_eq!(project.primary_for(SymbolId(2)), None);
}

#[test]
#[should_panic(expected = "already has primary reflection")]
fn test_double_primary_registration_is_fatal() {
    let mut project = ProjectReflection::new("test");
    let a = project.alloc(declaration("a", ReflectionKind::Class, ReflectionId::PROJECT));
    let b = project.alloc(declaration("b", ReflectionKind::Class, ReflectionId::PROJECT));
    project.register_primary(SymbolId(1), a);
    project.register_primary(SymbolId(1), b);
}

#[test]
fn test_children_attach_only_to_containers() {
    let mut project = ProjectReflection::new("test");
    let class = project.alloc(declaration(
        "C",
        ReflectionKind::Class,
        ReflectionId::PROJECT,
    ));
    let prop = project.alloc(declaration("p", ReflectionKind::Property, class));
    project.add_child(class, prop);
    assert_eq!(project.children_of(class), &[prop]);

    // A property is not a container; the append is ignored.
    let stray = project.alloc(declaration("q", ReflectionKind::Property, prop));
    project.add_child(prop, stray);
    assert!(project.children_of(prop).is_empty());
}

#[test]
fn test_kind_masks() {
    assert!(ReflectionKind::Project.is_container());
    assert!(ReflectionKind::Namespace.is_container());
    assert!(ReflectionKind::Class.is_container());
    assert!(!ReflectionKind::Property.is_container());
    assert!(!ReflectionKind::CallSignature.is_container());

    assert!(ReflectionKind::CallSignature.is_signature());
    assert!(ReflectionKind::GetSignature.is_signature());
    assert!(!ReflectionKind::Method.is_signature());

    assert!(ReflectionKind::Class.is(kind_masks::CLASS_OR_INTERFACE));
    assert!(ReflectionKind::Interface.is(kind_masks::CLASS_OR_INTERFACE));
    assert!(!ReflectionKind::Enum.is(kind_masks::CLASS_OR_INTERFACE));

    assert!(ReflectionKind::Module.is(kind_masks::MODULE_CONTAINER));
    assert!(!ReflectionKind::Class.is(kind_masks::MODULE_CONTAINER));
}

#[test]
fn test_conversion_order_table_is_complete() {
    // The priority order and the set of handled categories must agree:
    // order_index is exhaustive over Category, and the table position of
    // each category is its own index.
    for (index, &category) in CONVERSION_ORDER.iter().enumerate() {
        assert_eq!(
            order_index(category),
            index,
            "category {category:?} is out of order"
        );
    }
    // No duplicates.
    for (i, a) in CONVERSION_ORDER.iter().enumerate() {
        for b in &CONVERSION_ORDER[i + 1..] {
            assert_ne!(a, b);
        }
    }
    // Category flags are disjoint.
    let mut seen = 0u32;
    for category in CONVERSION_ORDER {
        assert_eq!(seen & category.flag(), 0);
        seen |= category.flag();
    }
}

#[test]
fn test_flags_serialize_as_bits() {
    let mut flags = crate::reflection::ReflectionFlags::default();
    flags.set(reflection_flags::EXPORTED, true);
    flags.set(reflection_flags::READONLY, true);
    let json = serde_json::to_value(flags).unwrap();
    assert_eq!(
        json,
        serde_json::json!(reflection_flags::EXPORTED | reflection_flags::READONLY)
    );
}

#[test]
fn test_full_name_walks_ownership() {
    let mut project = ProjectReflection::new("test");
    let module = project.alloc(declaration(
        "mod",
        ReflectionKind::Module,
        ReflectionId::PROJECT,
    ));
    let class = project.alloc(declaration("C", ReflectionKind::Class, module));
    let prop = project.alloc(declaration("p", ReflectionKind::Property, class));
    assert_eq!(project.full_name(prop), "mod.C.p");
}
