//! General client configuration.

use serde::{Deserialize, Serialize};

/// Default filename for direct downloads when none is given.
fn default_download_name() -> String {
    "download".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Directory for direct-download output. Empty means current directory.
    #[serde(default)]
    pub download_dir: String,

    /// Filename used when a direct download has no explicit destination.
    #[serde(default = "default_download_name")]
    pub download_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            download_dir: String::new(),
            download_name: default_download_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.download_dir.is_empty());
        assert_eq!(config.download_name, "download");
    }
}
