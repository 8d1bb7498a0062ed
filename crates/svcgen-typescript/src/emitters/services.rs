use minijinja::{Environment, Value, context};

use svcgen_core::transform::DescriptorSet;

use super::escape_jsdoc;
use crate::generator::{SERVICES_TEMPLATE, TypeScriptError};

/// Emit the services module: one callable per operation.
pub fn emit_services(
    descriptors: &DescriptorSet,
    source: &str,
    types_module: &str,
) -> Result<String, TypeScriptError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    env.add_template_owned(SERVICES_TEMPLATE, source.to_string())?;

    let tmpl = env.get_template(SERVICES_TEMPLATE)?;
    let rendered = tmpl.render(context! {
        list => Value::from_serialize(&descriptors.services),
        types_module => types_module,
    })?;
    Ok(rendered)
}
