//! General settings for folder-search.
//!
//! Defines the `[general]` table of the config file: the defaults used to build the
//! initial [SearchOptions], the scan error policy and the log level.

use crate::app::ErrorPolicy;
use crate::core::filter::{DEFAULT_IGNORE, SearchOptions};

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct General {
    case_sensitive: bool,
    ignore: Vec<String>,
    error_policy: ErrorPolicy,
    log_level: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            case_sensitive: false,
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            error_policy: ErrorPolicy::Lenient,
            log_level: "info".into(),
        }
    }
}

impl General {
    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    #[inline]
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    #[inline]
    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    #[inline]
    pub fn log_level(&self) -> &str {
        let trimmed = self.log_level.trim();
        if trimmed.is_empty() { "info" } else { trimmed }
    }

    /// Search options built from these settings with an empty pattern.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::new("", self.case_sensitive, self.ignore.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_defaults() {
        let general = General::default();
        assert!(!general.case_sensitive());
        assert_eq!(general.ignore(), ["node_modules".to_string()]);
        assert_eq!(general.error_policy(), ErrorPolicy::Lenient);
        assert_eq!(general.log_level(), "info");
        assert_eq!(general.search_options(), SearchOptions::default());
    }

    #[test]
    fn general_from_toml() -> Result<(), Box<dyn std::error::Error>> {
        let general: General = toml::from_str(
            r#"
            case_sensitive = true
            ignore = ["target", "dist"]
            error_policy = "strict"
            log_level = "  "
            "#,
        )?;
        assert!(general.case_sensitive());
        assert_eq!(general.error_policy(), ErrorPolicy::Strict);
        assert_eq!(general.log_level(), "info");

        let opts = general.search_options();
        assert!(opts.case_sensitive());
        assert!(opts.ignore_names().contains("target"));
        assert!(!opts.ignore_names().contains("node_modules"));
        Ok(())
    }
}
