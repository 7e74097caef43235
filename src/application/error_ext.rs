//! Error conversion helpers for I/O and provider calls
//!
//! Provides extension traits for cleaner error handling with context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::ProviderResult;

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&key)
    ///     .with_path_context("read ssh key", &key)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Extension trait for converting provider results into `ApplicationResult`.
pub trait ProviderResultExt<T> {
    /// Describe which remote call failed.
    fn with_remote_context(self, context: impl Into<String>) -> ApplicationResult<T>;
}

impl<T> ProviderResultExt<T> for ProviderResult<T> {
    fn with_remote_context(self, context: impl Into<String>) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::Remote {
            context: context.into(),
            source,
        })
    }
}
