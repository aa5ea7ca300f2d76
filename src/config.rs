use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Options controlling how recipes are standardized
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct StandardizeConfig {
    /// Derive the recipe filename from its title
    #[serde(default = "default_derive_filename")]
    pub derive_filename: bool,
    /// Write contracted page spans ("145-6") out in full before storing them
    #[serde(default)]
    pub expand_contractions: bool,
}

impl Default for StandardizeConfig {
    fn default() -> Self {
        Self {
            derive_filename: default_derive_filename(),
            expand_contractions: false,
        }
    }
}

fn default_derive_filename() -> bool {
    true
}

impl StandardizeConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with MELA__ prefix
    /// 2. mela.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: MELA__EXPAND_CONTRACTIONS=true
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`StandardizeConfig::load`] for the source priority.
pub fn load_config() -> Result<StandardizeConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("mela").required(false))
        // Use double underscore after the prefix: MELA__DERIVE_FILENAME
        .add_source(
            Environment::with_prefix("MELA")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = StandardizeConfig::default();
        assert!(config.derive_filename);
        assert!(!config.expand_contractions);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: StandardizeConfig = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config, StandardizeConfig::default());
    }

    #[test]
    fn test_toml_source() {
        let config: StandardizeConfig = Config::builder()
            .add_source(File::from_str(
                "expand_contractions = true\nderive_filename = false",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(config.expand_contractions);
        assert!(!config.derive_filename);
    }

    #[test]
    fn test_load_config_without_file() {
        // No mela.toml in the test working directory
        assert_eq!(load_config().unwrap(), StandardizeConfig::default());
    }

    #[test]
    fn test_bad_value_is_a_standardize_error() {
        let err = Config::builder()
            .add_source(File::from_str(
                "expand_contractions = \"maybe\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize::<StandardizeConfig>()
            .unwrap_err();

        let err = crate::error::StandardizeError::from(err);
        assert!(matches!(err, crate::error::StandardizeError::ConfigError(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
