//! Report output configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_delimiter() -> String {
    ",".to_string()
}

const fn default_link_planning() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Field delimiter of the exported report. Must be a single ASCII character.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Fill the URL, link target, and anchor columns.
    #[serde(default = "default_link_planning")]
    pub link_planning: bool,

    /// Write the link graph next to the report when no explicit path is given.
    #[serde(default)]
    pub graph: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            link_planning: default_link_planning(),
            graph: false,
        }
    }
}

impl OutputConfig {
    /// Delimiter as the single byte the CSV writer expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ConfigError::InvalidValue {
                field: "output.delimiter".into(),
                reason: format!(
                    "must be a single ASCII character, got {:?}",
                    self.delimiter
                ),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = OutputConfig::default();
        assert_eq!(config.delimiter_byte().unwrap(), b',');
        assert!(config.link_planning);
        assert!(!config.graph);
    }

    #[test]
    fn tab_and_semicolon_are_accepted() {
        for (raw, byte) in [("\t", b'\t'), (";", b';')] {
            let config = OutputConfig {
                delimiter: raw.into(),
                ..OutputConfig::default()
            };
            assert_eq!(config.delimiter_byte().unwrap(), byte);
        }
    }

    #[test]
    fn multi_char_delimiter_is_rejected() {
        let config = OutputConfig {
            delimiter: "||".into(),
            ..OutputConfig::default()
        };
        assert!(config.delimiter_byte().is_err());
    }
}
