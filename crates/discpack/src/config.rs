use discpack_structure::LayoutConfig;
use serde::Deserialize;
use std::path::Path;

use crate::error::CliError;

/// Optional `discpack.toml` contents. Every section and key may be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct DiscpackConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl DiscpackConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path = path.as_ref();
        let config_error = |message: String| CliError::Config {
            path: path.to_path_buf(),
            message,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: Self = toml::from_str(&contents).map_err(|e| config_error(e.to_string()))?;
        config.layout.validate()?;
        Ok(config)
    }
}
