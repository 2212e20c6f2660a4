//! The main config loading module for folder-search.
//!
//! Handles loading and deserializing settings from `config.toml`.
//!
//! Provides the main [Config] struct and the [RawConfig] used for parsing. Also
//! writes a default config file for `fds --init`.

use crate::config::{General, Keys, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, io, path::Path, path::PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "FDS_CONFIG";

/// Raw configuration as read from the toml file
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    theme: Theme,
    keys: Keys,
}

/// Processed configuration used by folder-search
#[derive(Debug, Default, Clone)]
pub struct Config {
    general: General,
    theme: Theme,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: raw.general,
            theme: raw.theme,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file silently yields defaults; an unreadable or invalid one is
    /// reported on stderr and also yields defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<RawConfig>(&content) {
                Ok(raw) => raw.into(),
                Err(e) => {
                    eprintln!("Error parsing config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &General {
        &self.general
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the default configuration file path.
    /// Checks the FDS_CONFIG environment variable first,
    /// then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/folder-search/config.toml
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("folder-search/config.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/folder-search/config.toml");
        }
        PathBuf::from("folder-search.toml")
    }

    /// Write the default configuration file to `path`.
    /// Fails if the file already exists.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config written to {:?}", path);
        Ok(())
    }
}

const DEFAULT_TOML: &str = r##"# config.toml - default configuration for folder-search (fds)
#
# Commented values are the internal defaults.
# Colors: terminal names ("cyan"), hex ("#RRGGBB") or "default".

[general]
# case_sensitive = false
# ignore = ["node_modules"]
# error_policy = "lenient"     # or "strict": a failed scan stops navigation
# log_level = "info"

[theme]
# selection_icon = "> "
# title.fg = "#ffffd7"
# title.bg = "#5f5fd7"
# selection.fg = "#d75fd7"
# error.fg = "#ff0000"
# help.fg = "#626262"
# filter.fg = "yellow"

[keys]
# go_up = ["k", "Up"]
# go_down = ["j", "Down"]
# go_parent = ["h", "Left", "Backspace"]
# go_into_dir = ["l", "Right"]
# select = ["Enter"]
# quit = ["q", "Esc", "Ctrl+c"]
# filter = ["/"]
# clear_filter = ["Ctrl+f"]
# toggle_case = ["c"]
# refresh = ["r"]
"##;
