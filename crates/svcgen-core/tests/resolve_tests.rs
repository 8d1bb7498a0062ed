use svcgen_core::error::ResolveError;
use svcgen_core::parse;
use svcgen_core::parse::ref_resolve::Resolver;
use svcgen_core::parse::schema::{Schema, SchemaOrRef};

const TASKS: &str = include_str!("fixtures/tasks.json");
const CYCLIC: &str = include_str!("fixtures/cyclic.json");

fn ref_to(pointer: &str) -> SchemaOrRef {
    SchemaOrRef::Ref {
        ref_path: pointer.to_string(),
    }
}

/// Walk a schema and panic on any remaining reference node.
fn assert_no_refs(schema: &Schema) {
    fn check(node: &SchemaOrRef) {
        match node {
            SchemaOrRef::Ref { ref_path } => panic!("unexpected $ref left behind: {ref_path}"),
            SchemaOrRef::Schema(s) => assert_no_refs(s),
        }
    }
    for prop in schema.properties.values() {
        check(prop);
    }
    if let Some(ref items) = schema.items {
        check(items);
    }
    for sub in &schema.all_of {
        check(sub);
    }
}

#[test]
fn dereference_leaves_no_refs() {
    let doc = parse::from_json(TASKS).unwrap();
    let mut resolver = Resolver::new(&doc);

    let result = resolver
        .dereference(&ref_to("#/components/schemas/CreateUserReq"))
        .unwrap();

    assert_no_refs(&result);

    // the nested reference was substituted by its full target
    match &result.properties["address"] {
        SchemaOrRef::Schema(address) => {
            assert!(address.properties.contains_key("city"));
            assert!(address.properties.contains_key("zip"));
        }
        SchemaOrRef::Ref { .. } => panic!("address should be inlined"),
    }
}

#[test]
fn dereference_is_idempotent() {
    let doc = parse::from_json(TASKS).unwrap();
    let mut resolver = Resolver::new(&doc);

    let once = resolver
        .dereference(&ref_to("#/components/schemas/CreateUserReq"))
        .unwrap();
    let twice = resolver
        .dereference(&SchemaOrRef::Schema(Box::new(once.clone())))
        .unwrap();

    assert_eq!(once, twice);
}

#[test]
fn dereference_rejects_cycles() {
    let doc = parse::from_json(CYCLIC).unwrap();
    let mut resolver = Resolver::new(&doc);

    let err = resolver
        .dereference(&ref_to("#/components/schemas/Node"))
        .unwrap_err();

    match err {
        ResolveError::CircularRef(pointer) => {
            assert_eq!(pointer, "#/components/schemas/Node");
        }
        other => panic!("expected CircularRef, got {other:?}"),
    }
}

#[test]
fn unresolved_pointer_names_the_pointer() {
    let doc = parse::from_json(TASKS).unwrap();
    let mut resolver = Resolver::new(&doc);

    let err = resolver
        .dereference(&ref_to("#/components/schemas/Nope"))
        .unwrap_err();

    match err {
        ResolveError::RefTargetNotFound(pointer) => {
            assert_eq!(pointer, "#/components/schemas/Nope");
        }
        other => panic!("expected RefTargetNotFound, got {other:?}"),
    }
}

#[test]
fn malformed_pointer_is_rejected() {
    let doc = parse::from_json(TASKS).unwrap();
    let resolver = Resolver::new(&doc);

    let err = resolver.schema("components/schemas/Address").unwrap_err();
    assert!(matches!(err, ResolveError::InvalidRefFormat(_)));
}

#[test]
fn resolve_once_keeps_nested_refs() {
    let doc = parse::from_json(TASKS).unwrap();
    let resolver = Resolver::new(&doc);

    let result = resolver
        .resolve_once(&ref_to("#/components/schemas/CreateUserReq"))
        .unwrap();

    // one level only: the top-level ref is gone, the nested one stays
    assert!(matches!(
        result.properties["address"],
        SchemaOrRef::Ref { .. }
    ));
}
