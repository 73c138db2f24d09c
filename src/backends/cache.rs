use super::descriptor::BackendDescriptor;
use super::registry::BackendRegistry;
use crate::config::BackendParams;
use crate::error::RegistryError;
use std::sync::Arc;

/// Descriptors already built for one worker, keyed by `(type, params)`.
///
/// Role groups that point at the same server share a single descriptor and
/// therefore a single HTTP connection pool.
#[derive(Debug, Default)]
pub struct DescriptorCache {
    entries: Vec<(String, BackendParams, Arc<BackendDescriptor>)>,
    builds: usize,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &mut self,
        registry: &BackendRegistry,
        type_name: &str,
        params: &BackendParams,
    ) -> Result<Arc<BackendDescriptor>, RegistryError> {
        if let Some((_, _, descriptor)) = self
            .entries
            .iter()
            .find(|(name, cached, _)| name == type_name && cached == params)
        {
            return Ok(Arc::clone(descriptor));
        }

        let descriptor = Arc::new(registry.build(type_name, params)?);
        self.builds += 1;
        self.entries
            .push((type_name.to_string(), params.clone(), Arc::clone(&descriptor)));
        Ok(descriptor)
    }

    /// Number of descriptors actually constructed.
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
