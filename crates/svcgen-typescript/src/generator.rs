use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use svcgen_core::transform::DescriptorSet;
use svcgen_core::{CodeGenerator, GeneratedFile};

use crate::emitters;

pub const SERVICES_TEMPLATE: &str = "services.ts.j2";
pub const TYPES_TEMPLATE: &str = "types.ts.j2";

#[derive(Debug, Error)]
pub enum TypeScriptError {
    #[error("template file {} is missing", .0.display())]
    TemplateMissing(PathBuf),

    #[error("failed to read template {}: {source}", .path.display())]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// Configuration for the TypeScript generator.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptConfig {
    /// Directory with template overrides. `None` uses the embedded
    /// templates.
    pub template_dir: Option<PathBuf>,
    pub services_file_name: String,
    pub types_file_name: String,
}

/// TypeScript services/types generator.
pub struct TypeScriptGenerator;

impl CodeGenerator for TypeScriptGenerator {
    type Config = TypeScriptConfig;
    type Error = TypeScriptError;

    fn generate(
        &self,
        descriptors: &DescriptorSet,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        let services_src = template_source(
            config.template_dir.as_deref(),
            SERVICES_TEMPLATE,
            include_str!("../templates/services.ts.j2"),
        )?;
        let types_src = template_source(
            config.template_dir.as_deref(),
            TYPES_TEMPLATE,
            include_str!("../templates/types.ts.j2"),
        )?;

        // the services module imports its namespaces from the types module
        let types_module = Path::new(&config.types_file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&config.types_file_name)
            .to_string();

        log::debug!(
            "rendering {} operations into {} and {}",
            descriptors.services.len(),
            config.services_file_name,
            config.types_file_name
        );

        Ok(vec![
            GeneratedFile {
                path: config.services_file_name.clone(),
                content: emitters::services::emit_services(
                    descriptors,
                    &services_src,
                    &types_module,
                )?,
            },
            GeneratedFile {
                path: config.types_file_name.clone(),
                content: emitters::types::emit_types(descriptors, &types_src)?,
            },
        ])
    }
}

/// Read a template from the configured directory, or fall back to the
/// embedded copy when no directory is configured. A configured directory
/// missing the file is fatal.
fn template_source(
    dir: Option<&Path>,
    name: &str,
    embedded: &'static str,
) -> Result<String, TypeScriptError> {
    match dir {
        Some(dir) => {
            let path = dir.join(name);
            if !path.exists() {
                return Err(TypeScriptError::TemplateMissing(path));
            }
            fs::read_to_string(&path)
                .map_err(|source| TypeScriptError::TemplateRead { path, source })
        }
        None => Ok(embedded.to_string()),
    }
}
