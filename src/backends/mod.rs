pub mod cache;
pub mod descriptor;
pub mod registry;

pub use cache::DescriptorCache;
pub use descriptor::{BackendDescriptor, BackendKind, Endpoint};
pub use registry::{API_KEY_ENV, AgentFactory, BackendRegistry, ServedModel, resolve_api_key};
