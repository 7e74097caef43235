//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/docli/docli.toml`
//! 3. Environment variables: `DOCLI_*` prefix
//! 4. Command-line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::Deserialize;

use crate::application::ApplicationError;
use crate::infrastructure::digitalocean::DEFAULT_API_URL;

/// Default name of the variable holding the API token.
pub const DEFAULT_TOKEN_VAR: &str = "TOKEN";

/// Defaults for `droplet create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropletDefaults {
    /// Image slug
    pub image: String,
    /// Region slug
    pub region: String,
    /// SSH public key path (`~` and `$VAR` are expanded when the key is read)
    pub ssh_key: PathBuf,
    /// Size slug
    pub size: String,
}

impl Default for DropletDefaults {
    fn default() -> Self {
        Self {
            image: "ubuntu-16-04-x64".into(),
            region: "ams3".into(),
            ssh_key: PathBuf::from("~/.ssh/id_rsa.pub"),
            size: "512mb".into(),
        }
    }
}

/// Raw droplet defaults for intermediate parsing (`None` → not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawDropletDefaults {
    pub image: Option<String>,
    pub region: Option<String>,
    pub ssh_key: Option<PathBuf>,
    pub size: Option<String>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub token_var: Option<String>,
    pub api_url: Option<String>,
    pub droplet: RawDropletDefaults,
}

/// Unified configuration for docli.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Name of the env variable holding the API token (default: TOKEN)
    pub token_var: String,
    /// API endpoint (default: public DigitalOcean v2 API)
    pub api_url: String,
    /// Defaults for droplet creation
    pub droplet: DropletDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token_var: DEFAULT_TOKEN_VAR.into(),
            api_url: DEFAULT_API_URL.into(),
            droplet: DropletDefaults::default(),
        }
    }
}

/// Get the XDG config directory for docli.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "docli").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("docli.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let droplet = &overlay.droplet;
        Self {
            token_var: overlay
                .token_var
                .clone()
                .unwrap_or_else(|| self.token_var.clone()),
            api_url: overlay
                .api_url
                .clone()
                .unwrap_or_else(|| self.api_url.clone()),
            droplet: DropletDefaults {
                image: droplet
                    .image
                    .clone()
                    .unwrap_or_else(|| self.droplet.image.clone()),
                region: droplet
                    .region
                    .clone()
                    .unwrap_or_else(|| self.droplet.region.clone()),
                ssh_key: droplet
                    .ssh_key
                    .clone()
                    .unwrap_or_else(|| self.droplet.ssh_key.clone()),
                size: droplet
                    .size
                    .clone()
                    .unwrap_or_else(|| self.droplet.size.clone()),
            },
        }
    }

    /// Load settings from the global config file and the environment.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional TOML file; a missing file is skipped
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Apply environment variables (replaces - explicit override)
        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply DOCLI_* environment variables as explicit overrides.
    ///
    /// `DOCLI_TOKEN_VAR`, `DOCLI_API_URL`, `DOCLI_DROPLET__IMAGE`, ...
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("DOCLI")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("token_var") {
            settings.token_var = val;
        }
        if let Ok(val) = config.get_string("api_url") {
            settings.api_url = val;
        }
        if let Ok(val) = config.get_string("droplet.image") {
            settings.droplet.image = val;
        }
        if let Ok(val) = config.get_string("droplet.region") {
            settings.droplet.region = val;
        }
        if let Ok(val) = config.get_string("droplet.ssh_key") {
            settings.droplet.ssh_key = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("droplet.size") {
            settings.droplet.size = val;
        }

        Ok(settings)
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
