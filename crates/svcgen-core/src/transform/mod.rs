pub mod descriptor;
pub mod naming;
pub mod required;

pub use descriptor::{
    BuildOptions, DescriptorSet, QueryParameter, ServiceDescriptor, TypeDescriptor, build,
};
