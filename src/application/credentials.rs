//! Bearer token lookup

use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::infrastructure::traits::CredentialSource;

/// Read the token from the variable named `var`.
///
/// An unset or blank variable is a [`ApplicationError::MissingCredential`].
pub fn resolve_token(source: &dyn CredentialSource, var: &str) -> ApplicationResult<String> {
    debug!(var, "looking up token");
    match source.lookup(var) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ApplicationError::MissingCredential {
            var: var.to_string(),
        }),
    }
}
