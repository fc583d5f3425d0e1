//! Configuration for ingestion and display
//!
//! A [`FrameConfig`] can be built in code, loaded from a TOML or YAML file,
//! and adjusted through `TABFRAME_*` environment variables.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dataframe::DisplayOptions;
use crate::error::{Error, Result};
use crate::value::DEFAULT_DATETIME_FORMATS;

pub const ENV_CSV_DELIMITER: &str = "TABFRAME_CSV_DELIMITER";
pub const ENV_MAX_ROWS: &str = "TABFRAME_MAX_ROWS";

/// CSV読み込みオプション
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: char,
    pub has_header: bool,
    /// Trim surrounding whitespace from every field before parsing
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            trim: false,
        }
    }
}

impl CsvOptions {
    pub(crate) fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::Config(format!(
                    "CSV delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                ))
            })
    }
}

/// 設定全体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub csv: CsvOptions,
    /// chrono formats tried, in order, after RFC 3339 when parsing date-times
    pub datetime_formats: Vec<String>,
    /// Pass as `&config.display` to `DataFrame::to_string_with`; plain
    /// `Display` ignores it
    pub display: DisplayOptions,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            csv: CsvOptions::default(),
            datetime_formats: DEFAULT_DATETIME_FORMATS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            display: DisplayOptions::default(),
        }
    }
}

impl FrameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: FrameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: FrameConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a `.toml`, `.yaml` or `.yml` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Err(Error::Config(format!(
                "unsupported config file: {}",
                path.display()
            ))),
        }
    }

    /// Applies `TABFRAME_CSV_DELIMITER` and `TABFRAME_MAX_ROWS` when set
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(delimiter) = std::env::var(ENV_CSV_DELIMITER) {
            let mut chars = delimiter.chars();
            self.csv.delimiter = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(Error::Config(format!(
                        "{} must be one character, got {:?}",
                        ENV_CSV_DELIMITER, delimiter
                    )))
                }
            };
        }
        if let Ok(max_rows) = std::env::var(ENV_MAX_ROWS) {
            self.display.max_rows = max_rows.parse().map_err(|_| {
                Error::Config(format!(
                    "{} must be a row count, got {:?}",
                    ENV_MAX_ROWS, max_rows
                ))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.csv.delimiter_byte()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FrameConfig::default();
        assert_eq!(config.csv.delimiter, ',');
        assert!(config.csv.has_header);
        assert!(!config.csv.trim);
        assert_eq!(config.display.max_rows, 20);
        assert_eq!(config.datetime_formats.len(), DEFAULT_DATETIME_FORMATS.len());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = FrameConfig::from_toml_str(
            r#"
            [csv]
            delimiter = ";"

            [display]
            max_rows = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.csv.delimiter, ';');
        assert!(config.csv.has_header);
        assert_eq!(config.display.max_rows, 5);
        assert_eq!(config.datetime_formats, FrameConfig::default().datetime_formats);
    }

    #[test]
    fn test_yaml_config() {
        let config = FrameConfig::from_yaml_str(
            "csv:\n  trim: true\ndatetime_formats:\n  - \"%d/%m/%Y\"\n",
        )
        .unwrap();

        assert!(config.csv.trim);
        assert_eq!(config.datetime_formats, vec!["%d/%m/%Y".to_string()]);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let result = FrameConfig::from_toml_str("[csv]\ndelimiter = \"é\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    // 環境変数を触るのはこのテストだけ
    #[test]
    fn test_env_overrides() {
        std::env::set_var(ENV_CSV_DELIMITER, "|");
        std::env::set_var(ENV_MAX_ROWS, "3");
        let config = FrameConfig::default().with_env_overrides();
        std::env::set_var(ENV_MAX_ROWS, "many");
        let bad = FrameConfig::default().with_env_overrides();
        std::env::remove_var(ENV_CSV_DELIMITER);
        std::env::remove_var(ENV_MAX_ROWS);

        let config = config.unwrap();
        assert_eq!(config.csv.delimiter, '|');
        assert_eq!(config.display.max_rows, 3);
        assert!(matches!(bad, Err(Error::Config(_))));
    }

    #[test]
    fn test_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.yml");
        fs::write(&path, "display:\n  max_rows: 7\n").unwrap();

        let config = FrameConfig::from_path(&path).unwrap();
        assert_eq!(config.display.max_rows, 7);
        assert_eq!(config.csv, CsvOptions::default());
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "csv.delimiter=;").unwrap();

        assert!(matches!(FrameConfig::from_path(&path), Err(Error::Config(_))));
    }
}
