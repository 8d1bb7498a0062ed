//! Structural-requiredness inference for dereferenced schemas.

use crate::parse::schema::{Schema, SchemaOrRef};

/// Fill in missing `required` lists.
///
/// A node that declares a non-empty `required` list is returned as the
/// author wrote it, children included. Otherwise, an object node's
/// `required` becomes its full property key set, and completion recurses
/// into property values, array `items`, and `allOf` members. An explicitly
/// empty `required` list triggers synthesis the same as an absent one.
pub fn complete_required(schema: &Schema) -> Schema {
    if !schema.required.is_empty() {
        return schema.clone();
    }

    let mut out = schema.clone();
    if !schema.properties.is_empty() {
        out.required = schema.properties.keys().cloned().collect();
        out.properties = schema
            .properties
            .iter()
            .map(|(name, prop)| (name.clone(), complete_node(prop)))
            .collect();
    }
    if let Some(ref items) = schema.items {
        out.items = Some(Box::new(complete_node(items)));
    }
    out.all_of = schema.all_of.iter().map(complete_node).collect();
    out
}

fn complete_node(node: &SchemaOrRef) -> SchemaOrRef {
    match node {
        SchemaOrRef::Schema(s) => SchemaOrRef::Schema(Box::new(complete_required(s))),
        // unresolved refs are left alone; the rewriter owns those
        SchemaOrRef::Ref { .. } => node.clone(),
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::parse::schema::SchemaType;

    fn leaf(schema_type: SchemaType) -> SchemaOrRef {
        SchemaOrRef::Schema(Box::new(Schema {
            schema_type: Some(schema_type),
            ..Schema::default()
        }))
    }

    fn object(props: Vec<(&str, SchemaOrRef)>, required: Vec<&str>) -> Schema {
        Schema {
            schema_type: Some(SchemaType::Object),
            properties: props
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<IndexMap<_, _>>(),
            required: required.into_iter().map(String::from).collect(),
            ..Schema::default()
        }
    }

    #[test]
    fn test_synthesizes_full_property_set() {
        let schema = object(
            vec![("id", leaf(SchemaType::String)), ("age", leaf(SchemaType::Integer))],
            vec![],
        );
        let completed = complete_required(&schema);
        assert_eq!(completed.required, vec!["id", "age"]);
    }

    #[test]
    fn test_explicit_required_wins() {
        let schema = object(vec![("id", leaf(SchemaType::String))], vec!["id"]);
        let completed = complete_required(&schema);
        assert_eq!(completed, schema);
    }

    #[test]
    fn test_empty_required_treated_as_absent() {
        // `required: []` falls through to synthesis, same as absence
        let schema = object(vec![("id", leaf(SchemaType::String))], vec![]);
        let completed = complete_required(&schema);
        assert_eq!(completed.required, vec!["id"]);
    }

    #[test]
    fn test_recurses_into_nested_properties() {
        let inner = object(vec![("name", leaf(SchemaType::String))], vec![]);
        let schema = object(
            vec![("owner", SchemaOrRef::Schema(Box::new(inner)))],
            vec![],
        );
        let completed = complete_required(&schema);
        assert_eq!(completed.required, vec!["owner"]);
        match &completed.properties["owner"] {
            SchemaOrRef::Schema(owner) => assert_eq!(owner.required, vec!["name"]),
            SchemaOrRef::Ref { .. } => panic!("expected inline schema"),
        }
    }

    #[test]
    fn test_recurses_into_array_items() {
        let item = object(vec![("id", leaf(SchemaType::String))], vec![]);
        let schema = Schema {
            schema_type: Some(SchemaType::Array),
            items: Some(Box::new(SchemaOrRef::Schema(Box::new(item)))),
            ..Schema::default()
        };
        let completed = complete_required(&schema);
        match completed.items.as_deref() {
            Some(SchemaOrRef::Schema(item)) => assert_eq!(item.required, vec!["id"]),
            _ => panic!("expected inline item schema"),
        }
    }

    #[test]
    fn test_leaf_unchanged() {
        let schema = Schema {
            schema_type: Some(SchemaType::String),
            ..Schema::default()
        };
        assert_eq!(complete_required(&schema), schema);
    }
}
