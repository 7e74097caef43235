//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod naming;
pub mod ssh_key;

pub use entities::*;
pub use error::DomainError;
pub use naming::{droplet_name, random_slug};
pub use ssh_key::PublicKey;
