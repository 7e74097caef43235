//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::CommandDispatcher;
use crate::application::Reporter;
use crate::config::Settings;
use crate::infrastructure::digitalocean::DigitalOceanClient;
use crate::infrastructure::error::{InfraError, InfraResult};
use crate::infrastructure::traits::{FileSystem, RealFileSystem, ResourceProvider};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Remote API
    pub provider: Arc<dyn ResourceProvider>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container talking to the configured API with `token`.
    pub fn new(settings: &Settings, token: &str) -> InfraResult<Self> {
        let client = DigitalOceanClient::new(settings.api_url.clone(), token)
            .map_err(|e| InfraError::provider("initialize API client", e))?;
        Ok(Self::with_deps(Arc::new(client), Arc::new(RealFileSystem)))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(provider: Arc<dyn ResourceProvider>, fs: Arc<dyn FileSystem>) -> Self {
        Self { provider, fs }
    }

    /// Dispatcher emitting its progress through `reporter`.
    pub fn dispatcher(&self, reporter: Arc<dyn Reporter>) -> CommandDispatcher {
        CommandDispatcher::new(
            Arc::clone(&self.provider),
            Arc::clone(&self.fs),
            reporter,
        )
    }
}
