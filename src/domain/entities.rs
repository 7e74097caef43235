//! Domain entities: core data structures

use std::fmt;
use std::path::PathBuf;

use crate::domain::DomainError;

/// Canonical numeric identifier the provider assigns to droplets and images.
pub type ResourceId = u64;

/// Kind of remote resource a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Droplet,
    Image,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Droplet => f.write_str("droplet"),
            ResourceKind::Image => f.write_str("image"),
        }
    }
}

/// A command-line target: either a numeric ID or a human-readable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(ResourceId),
    Name(String),
}

impl Selector {
    /// Classify a raw token.
    ///
    /// A token made only of ASCII digits is an ID, everything else is a name.
    /// Digit strings that overflow a `u64` are rejected rather than silently
    /// treated as names.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            raw.parse::<ResourceId>()
                .map(Selector::Id)
                .map_err(|e| DomainError::InvalidSelector {
                    selector: raw.to_string(),
                    reason: e.to_string(),
                })
        } else {
            Ok(Selector::Name(raw.to_string()))
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "{id}"),
            Selector::Name(name) => f.write_str(name),
        }
    }
}

/// Virtual machine as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Droplet {
    pub id: ResourceId,
    pub name: String,
    /// Provider status, e.g. "new", "active", "off"
    pub status: String,
    /// First public IPv4 address, if one is assigned yet
    pub ip_address: Option<String>,
}

/// Private image (snapshot, backup or custom image) as reported by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub id: ResourceId,
    pub name: String,
    /// Image size in gigabytes, absent while the image is still being created
    pub size_gigabytes: Option<f64>,
    /// Region slugs the image is available in
    pub regions: Vec<String>,
    /// RFC 3339 creation timestamp, passed through verbatim
    pub created_at: String,
}

/// Per-droplet remote actions addressable by selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropletAction {
    PowerOff,
    PowerOn,
    Reboot,
    Destroy,
}

impl DropletAction {
    /// Human-readable verb used in progress lines.
    pub fn verb(self) -> &'static str {
        match self {
            DropletAction::PowerOff => "power off",
            DropletAction::PowerOn => "power on",
            DropletAction::Reboot => "reboot",
            DropletAction::Destroy => "destroy",
        }
    }

    /// Subcommand spelling.
    pub fn command_name(self) -> &'static str {
        match self {
            DropletAction::PowerOff => "power_off",
            DropletAction::PowerOn => "power_on",
            DropletAction::Reboot => "reboot",
            DropletAction::Destroy => "destroy",
        }
    }
}

/// Fully defaulted parameters of `droplet create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateParams {
    pub image: String,
    pub region: String,
    /// Path to the SSH public key, `~` and `$VAR` not yet expanded
    pub ssh_key: PathBuf,
    pub size: String,
    /// Number of droplets to create, at least 1
    pub count: u32,
    /// Optional name prefix; empty means no prefix segment
    pub name_prefix: String,
}

/// What the provider needs to create one droplet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropletCreateRequest {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    /// SSH key fingerprints authorized on the droplet
    pub ssh_keys: Vec<String>,
}

/// A parsed, validated command line.
///
/// Only the (kind, action) pairs the CLI offers exist as variants, so a
/// handler lookup can never miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    CreateDroplets(CreateParams),
    ListDroplets,
    DropletAction {
        action: DropletAction,
        selectors: Vec<Selector>,
    },
    ListImages,
    DestroyImages {
        selectors: Vec<Selector>,
    },
}

impl Invocation {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Invocation::CreateDroplets(_)
            | Invocation::ListDroplets
            | Invocation::DropletAction { .. } => ResourceKind::Droplet,
            Invocation::ListImages | Invocation::DestroyImages { .. } => ResourceKind::Image,
        }
    }

    pub fn action_name(&self) -> &'static str {
        match self {
            Invocation::CreateDroplets(_) => "create",
            Invocation::ListDroplets | Invocation::ListImages => "list",
            Invocation::DropletAction { action, .. } => action.command_name(),
            Invocation::DestroyImages { .. } => "destroy",
        }
    }
}

/// Expand environment variables in a path string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_digit_token_when_parsing_selector_then_returns_id() {
        assert_eq!(Selector::parse("42").unwrap(), Selector::Id(42));
    }

    #[test]
    fn given_mixed_token_when_parsing_selector_then_returns_name() {
        assert_eq!(
            Selector::parse("web-1").unwrap(),
            Selector::Name("web-1".to_string())
        );
        assert_eq!(
            Selector::parse("42a").unwrap(),
            Selector::Name("42a".to_string())
        );
        assert_eq!(
            Selector::parse("-42").unwrap(),
            Selector::Name("-42".to_string())
        );
    }

    #[test]
    fn given_overflowing_digits_when_parsing_selector_then_fails() {
        let result = Selector::parse("99999999999999999999999");
        assert!(matches!(result, Err(DomainError::InvalidSelector { .. })));
    }

    #[test]
    fn given_invocations_when_asking_kind_then_matches_resource() {
        assert_eq!(Invocation::ListDroplets.kind(), ResourceKind::Droplet);
        assert_eq!(Invocation::ListImages.kind(), ResourceKind::Image);
        let destroy = Invocation::DestroyImages {
            selectors: vec![Selector::Id(1)],
        };
        assert_eq!(destroy.kind(), ResourceKind::Image);
        assert_eq!(destroy.action_name(), "destroy");
    }
}
