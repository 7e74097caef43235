//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (ResourceProvider, FileSystem)
//! but are themselves concrete structs, not traits.

mod dispatcher;
mod resolver;

pub use dispatcher::CommandDispatcher;
pub use resolver::IdentifierResolver;
