use svcgen_core::parse;
use svcgen_core::parse::parameter::ParameterOrRef;
use svcgen_core::parse::request_body::RequestBodyOrRef;
use svcgen_core::parse::schema::SchemaOrRef;

const TASKS: &str = include_str!("fixtures/tasks.json");

#[test]
fn parse_tasks_json() {
    let doc = parse::from_json(TASKS).expect("should parse tasks.json");
    assert_eq!(doc.paths.len(), 3);

    let components = doc.components.as_ref().expect("should have components");
    assert_eq!(components.schemas.len(), 2);
    assert_eq!(components.request_bodies.len(), 1);
}

#[test]
fn operations_keep_declaration_order() {
    let doc = parse::from_json(TASKS).unwrap();
    let users = doc.paths.get("/api/users").unwrap();

    let methods: Vec<&str> = users.operations.keys().map(String::as_str).collect();
    // `post` is written before `get` in the fixture
    assert_eq!(methods, vec!["post", "get"]);
}

#[test]
fn non_method_keys_are_skipped() {
    let json = r#"{
      "paths": {
        "/widgets": {
          "summary": "widget routes",
          "parameters": [],
          "get": { "responses": {} },
          "patch": { "responses": {} }
        }
      }
    }"#;
    let doc = parse::from_json(json).unwrap();
    let item = doc.paths.get("/widgets").unwrap();

    // `summary`, path-level `parameters`, and unrecognized methods are dropped
    let methods: Vec<&str> = item.operations.keys().map(String::as_str).collect();
    assert_eq!(methods, vec!["get"]);
}

#[test]
fn ref_and_inline_variants_are_distinguished() {
    let doc = parse::from_json(TASKS).unwrap();

    let post = &doc.paths.get("/api/users").unwrap().operations["post"];
    match post.request_body.as_ref().unwrap() {
        RequestBodyOrRef::Ref { ref_path } => {
            assert_eq!(ref_path, "#/components/requestBodies/CreateUser");
        }
        RequestBodyOrRef::RequestBody(_) => panic!("expected request body ref"),
    }

    let get = &doc.paths.get("/api/users").unwrap().operations["get"];
    assert!(matches!(get.parameters[0], ParameterOrRef::Parameter(_)));

    let components = doc.components.as_ref().unwrap();
    let req = components.schemas.get("CreateUserReq").unwrap();
    match req {
        SchemaOrRef::Schema(schema) => {
            assert!(matches!(
                schema.properties["address"],
                SchemaOrRef::Ref { .. }
            ));
        }
        SchemaOrRef::Ref { .. } => panic!("expected inline schema"),
    }
}

#[test]
fn unknown_top_level_fields_are_ignored() {
    let json = r#"{
      "openapi": "3.0.0",
      "info": { "title": "Min", "version": "1.0" },
      "servers": [{ "url": "https://api.example.com" }],
      "security": [],
      "paths": {}
    }"#;
    let doc = parse::from_json(json).unwrap();
    assert!(doc.paths.is_empty());
    assert!(doc.components.is_none());
}

#[test]
fn malformed_json_is_an_error() {
    assert!(parse::from_json("{ not json").is_err());
}
