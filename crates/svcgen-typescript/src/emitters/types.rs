use minijinja::{Environment, Value, context};

use svcgen_core::parse::schema::{Schema, SchemaType};
use svcgen_core::transform::{DescriptorSet, QueryParameter, TypeDescriptor};

use super::escape_jsdoc;
use crate::generator::{TYPES_TEMPLATE, TypeScriptError};
use crate::type_mapper::{schema_to_ts, schema_type_text};

/// Emit the types module: one namespace per operation with its `IParams`,
/// `IBody`, and `IRes` members as applicable.
pub fn emit_types(descriptors: &DescriptorSet, source: &str) -> Result<String, TypeScriptError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    env.add_template_owned(TYPES_TEMPLATE, source.to_string())?;

    let items: Vec<Value> = descriptors.types.iter().map(type_item_ctx).collect();

    let tmpl = env.get_template(TYPES_TEMPLATE)?;
    let rendered = tmpl.render(context! { list => items })?;
    Ok(rendered)
}

fn type_item_ctx(item: &TypeDescriptor) -> Value {
    let mut members = String::new();
    if !item.query_params.is_empty() {
        members.push_str(&params_block(&item.query_params));
    }
    if let Some(ref schema) = item.body_schema {
        members.push_str(&member_block("IBody", schema));
    }
    if let Some(ref schema) = item.response_schema {
        members.push_str(&member_block("IRes", schema));
    }

    context! {
        namespace => item.namespace.clone(),
        summary => item.summary.clone(),
        path => item.path.clone(),
        tags => item.tags.clone(),
        members => members,
    }
}

/// The `IParams` interface for an operation's query-position parameters.
fn params_block(params: &[QueryParameter]) -> String {
    let mut out = String::from("  export interface IParams {\n");
    for param in params {
        let ty = param
            .schema
            .as_ref()
            .map(schema_to_ts)
            .unwrap_or_else(|| "unknown".to_string());
        let marker = if param.required { "" } else { "?" };
        out.push_str(&format!("    {}{marker}: {ty};\n", param.name));
    }
    out.push_str("  }\n");
    out
}

/// An `IBody`/`IRes` member: object schemas become interfaces, anything
/// else a type alias.
fn member_block(name: &str, schema: &Schema) -> String {
    if is_object_like(schema) {
        let mut out = format!("  export interface {name} {{\n");
        for (prop, node) in &schema.properties {
            let marker = if schema.required.iter().any(|r| r == prop) {
                ""
            } else {
                "?"
            };
            out.push_str(&format!("    {prop}{marker}: {};\n", schema_to_ts(node)));
        }
        out.push_str("  }\n");
        out
    } else {
        format!("  export type {name} = {};\n", schema_type_text(schema))
    }
}

fn is_object_like(schema: &Schema) -> bool {
    !schema.properties.is_empty() || schema.schema_type == Some(SchemaType::Object)
}
