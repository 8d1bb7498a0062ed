use svcgen_core::parse::schema::{Schema, SchemaOrRef, SchemaType};

/// Map a schema node to its TypeScript type text.
///
/// A reference node compiles to its terminal component name; the descriptor
/// builder only leaves refs behind where one-level resolution applies.
pub fn schema_to_ts(node: &SchemaOrRef) -> String {
    match node {
        SchemaOrRef::Ref { ref_path } => ref_path
            .rsplit('/')
            .next()
            .unwrap_or("unknown")
            .to_string(),
        SchemaOrRef::Schema(schema) => schema_type_text(schema),
    }
}

/// Map an inline schema to its TypeScript type text.
pub fn schema_type_text(schema: &Schema) -> String {
    let base = base_type_text(schema);
    if schema.nullable == Some(true) {
        format!("{base} | null")
    } else {
        base
    }
}

fn base_type_text(schema: &Schema) -> String {
    if !schema.all_of.is_empty() {
        let parts: Vec<String> = schema.all_of.iter().map(schema_to_ts).collect();
        return parts.join(" & ");
    }

    // string enums become literal unions, anything else falls through
    if !schema.enum_values.is_empty() {
        let literals: Vec<String> = schema
            .enum_values
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| format!("\"{s}\""))
            .collect();
        if !literals.is_empty() {
            return literals.join(" | ");
        }
    }

    match schema.schema_type {
        Some(SchemaType::String) => "string".to_string(),
        Some(SchemaType::Number) | Some(SchemaType::Integer) => "number".to_string(),
        Some(SchemaType::Boolean) => "boolean".to_string(),
        Some(SchemaType::Null) => "null".to_string(),
        Some(SchemaType::Array) => array_text(schema),
        Some(SchemaType::Object) => object_literal(schema),
        None if !schema.properties.is_empty() => object_literal(schema),
        None if schema.items.is_some() => array_text(schema),
        None => "unknown".to_string(),
    }
}

fn array_text(schema: &Schema) -> String {
    let inner = schema
        .items
        .as_deref()
        .map(schema_to_ts)
        .unwrap_or_else(|| "unknown".to_string());
    if inner.contains('|') || inner.contains('&') {
        format!("({inner})[]")
    } else {
        format!("{inner}[]")
    }
}

fn object_literal(schema: &Schema) -> String {
    if schema.properties.is_empty() {
        return "Record<string, unknown>".to_string();
    }
    let fields: Vec<String> = schema
        .properties
        .iter()
        .map(|(name, prop)| {
            let marker = if schema.required.iter().any(|r| r == name) {
                ""
            } else {
                "?"
            };
            format!("{name}{marker}: {}", schema_to_ts(prop))
        })
        .collect();
    format!("{{ {} }}", fields.join("; "))
}
