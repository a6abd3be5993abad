//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Tax year used when `--tax-year` is not given.
    ///
    /// When unset, the calendar year before today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_year: Option<i32>,

    /// Accept imported travel logs even when they raise warnings.
    #[serde(default)]
    pub accept_import_warnings: bool,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SPT_*)
        figment = figment.merge(Env::prefixed("SPT_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for spt.
///
/// On Linux: `~/.config/spt`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("spt"))
}
