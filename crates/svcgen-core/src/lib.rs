pub mod config;
pub mod conventions;
pub mod error;
pub mod parse;
pub mod transform;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that produce files from a descriptor set.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        descriptors: &transform::DescriptorSet,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
