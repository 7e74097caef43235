//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::domain::{Droplet, DropletCreateRequest, Image, ResourceId};

/// Failure talking to the resource provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Remote API managing droplets and images.
///
/// Every call goes to the provider; implementations must not cache.
pub trait ResourceProvider: Send + Sync {
    /// All droplets of the account, in provider order.
    fn list_droplets(&self) -> ProviderResult<Vec<Droplet>>;

    /// All private images of the account, in provider order.
    fn list_images(&self) -> ProviderResult<Vec<Image>>;

    fn get_droplet(&self, id: ResourceId) -> ProviderResult<Droplet>;

    fn get_image(&self, id: ResourceId) -> ProviderResult<Image>;

    /// Create one droplet and return it as the provider reports it.
    fn create_droplet(&self, request: &DropletCreateRequest) -> ProviderResult<Droplet>;

    fn power_off(&self, id: ResourceId) -> ProviderResult<()>;

    fn power_on(&self, id: ResourceId) -> ProviderResult<()>;

    fn reboot(&self, id: ResourceId) -> ProviderResult<()>;

    fn destroy_droplet(&self, id: ResourceId) -> ProviderResult<()>;

    fn destroy_image(&self, id: ResourceId) -> ProviderResult<()>;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if path is a file.
    fn is_file(&self, path: &Path) -> bool;
}

/// Source of the bearer credential.
pub trait CredentialSource: Send + Sync {
    /// Value of the named variable, `None` if unset.
    fn lookup(&self, name: &str) -> Option<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Reads credentials from the process environment.
#[derive(Debug, Default)]
pub struct EnvCredentialSource;

impl CredentialSource for EnvCredentialSource {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}
