//! Configuration
//!
//! Reader and tree configuration structures, with JSON persistence for both.
use crate::constants::DEFAULT_SEPARATOR;
use crate::errors::DecTreeError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}
fn default_has_header() -> bool {
    true
}
fn default_guess_from_parent() -> bool {
    true
}
fn default_num_threads() -> Option<usize> {
    None
}

/// How raw text is split into a table.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct ReaderConfig {
    /// Single field separator. No quoting or escaping is recognised.
    #[serde(default = "default_separator")]
    pub separator: char,
    /// Whether line 1 names the columns. When false, line 1 is a data row
    /// and columns are named `Parameter 0`, `Parameter 1`, ...
    #[serde(default = "default_has_header")]
    pub has_header: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            separator: DEFAULT_SEPARATOR,
            has_header: true,
        }
    }
}

impl ReaderConfig {
    pub fn validate_parameters(&self) -> Result<(), DecTreeError> {
        if !self.separator.is_ascii() || self.separator == '\n' || self.separator == '\r' {
            return Err(DecTreeError::InvalidParameter(
                "separator".to_string(),
                "a single ASCII character other than a line break".to_string(),
                format!("{:?}", self.separator),
            ));
        }
        Ok(())
    }
}

/// Configuration for the `DecisionTree`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct TreeConfig {
    /// Index of the column to predict.
    #[serde(default)]
    pub target: usize,
    /// Give unseen values of a split column a leaf holding the parent's majority class.
    #[serde(default = "default_guess_from_parent")]
    pub guess_from_parent: bool,
    /// Number of threads used to build sibling subtrees. `None` builds sequentially.
    #[serde(default = "default_num_threads")]
    pub num_threads: Option<usize>,
    /// Log every chosen split at debug level.
    #[serde(default)]
    pub log_splits: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            target: 0,
            guess_from_parent: true,
            num_threads: None,
            log_splits: false,
        }
    }
}

/// IO
pub trait ConfigIO: Serialize + DeserializeOwned + Sized {
    /// Save a configuration as a json object to a file.
    ///
    /// * `path` - Path to save the configuration.
    fn save_config<P: AsRef<Path>>(&self, path: P) -> Result<(), DecTreeError> {
        fs::write(path, self.json_dump()?).map_err(|e| DecTreeError::UnableToWrite(e.to_string()))
    }

    /// Dump a configuration as a json object
    fn json_dump(&self) -> Result<String, DecTreeError> {
        serde_json::to_string(self).map_err(|e| DecTreeError::UnableToWrite(e.to_string()))
    }

    /// Load a configuration from Json string
    ///
    /// * `json_str` - String object, which can be serialized to json.
    fn from_json(json_str: &str) -> Result<Self, DecTreeError> {
        serde_json::from_str::<Self>(json_str).map_err(|e| DecTreeError::UnableToRead(e.to_string()))
    }

    /// Load a configuration from a path to a json object.
    ///
    /// * `path` - Path to load the configuration from.
    fn load_config<P: AsRef<Path>>(path: P) -> Result<Self, DecTreeError> {
        let json_str = fs::read_to_string(path).map_err(|e| DecTreeError::UnableToRead(e.to_string()))?;
        Self::from_json(&json_str)
    }
}

impl ConfigIO for ReaderConfig {}
impl ConfigIO for TreeConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_tree_config_default() {
        let config = TreeConfig::default();
        assert_eq!(config.target, 0);
        assert!(config.guess_from_parent);
        assert_eq!(config.num_threads, None);
    }

    #[test]
    fn test_tree_config_partial_json() {
        let config = TreeConfig::from_json(r#"{"target": 3}"#).unwrap();
        assert_eq!(config.target, 3);
        assert!(config.guess_from_parent);
        assert!(!config.log_splits);

        let config = TreeConfig::from_json(r#"{"guess_from_parent": false, "num_threads": 4}"#).unwrap();
        assert!(!config.guess_from_parent);
        assert_eq!(config.num_threads, Some(4));
    }

    #[test]
    fn test_config_io_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tree.json");
        let config = TreeConfig {
            target: 2,
            guess_from_parent: false,
            num_threads: Some(2),
            log_splits: true,
        };
        config.save_config(&file_path).unwrap();
        assert_eq!(config, TreeConfig::load_config(&file_path).unwrap());
    }

    #[test]
    fn test_reader_config() {
        let config = ReaderConfig::from_json(r#"{"separator": ","}"#).unwrap();
        assert_eq!(config.separator, ',');
        assert!(config.has_header);
        assert!(config.validate_parameters().is_ok());

        let bad = ReaderConfig {
            separator: 'é',
            has_header: true,
        };
        assert!(matches!(bad.validate_parameters(), Err(DecTreeError::InvalidParameter(..))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let res = TreeConfig::load_config(dir.path().join("missing.json"));
        assert!(matches!(res, Err(DecTreeError::UnableToRead(_))));
    }
}
