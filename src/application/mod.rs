//! Application layer: services and use cases
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod credentials;
pub mod error;
pub mod error_ext;
pub mod render;
pub mod reporter;
pub mod services;

pub use credentials::resolve_token;
pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::{IoResultExt, ProviderResultExt};
pub use reporter::Reporter;
