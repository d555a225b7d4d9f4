/// Converter options and `m3d.toml` loading
///
/// ```toml
/// enabled = true
/// keep_original = false
/// test = '\.css$'
/// on_invalid = "skip"
/// ```
use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::compose::InvalidCallPolicy;
use crate::error::Result;

/// Config file looked up by the CLI in the working directory
pub const CONFIG_FILE_NAME: &str = "m3d.toml";

/// Passive configuration of a [`crate::Converter`].
///
/// Only `on_invalid` reaches the matrix math; the rest steers how stylesheets
/// are rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Rewrite stylesheets at all
    pub enabled: bool,
    /// Keep the original `transform` declaration and append the `matrix3d()` one after it
    pub keep_original: bool,
    /// Regex a file name must match to be rewritten
    pub test: String,
    pub on_invalid: InvalidCallPolicy,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            keep_original: false,
            test: default_test(),
            on_invalid: InvalidCallPolicy::Skip,
        }
    }
}

fn default_test() -> String {
    r"\.css$".to_string()
}

impl ConvertOptions {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let options = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?options, "loaded config");
        Ok(options)
    }

    /// Compile `test` into the file filter
    pub fn file_filter(&self) -> Result<Regex> {
        Ok(Regex::new(&self.test)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::default();
        assert!(options.enabled);
        assert!(!options.keep_original);
        assert_eq!(options.on_invalid, InvalidCallPolicy::Skip);

        let filter = options.file_filter().unwrap();
        assert!(filter.is_match("dist/styles.css"));
        assert!(!filter.is_match("dist/styles.css.map"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options = ConvertOptions::from_toml_str("keep_original = true").unwrap();
        assert!(options.keep_original);
        assert!(options.enabled);
        assert_eq!(options.test, r"\.css$");
    }

    #[test]
    fn test_full_toml() {
        let input = r#"
            enabled = false
            keep_original = true
            test = '\.(css|scss)$'
            on_invalid = "abort"
        "#;
        let options = ConvertOptions::from_toml_str(input).unwrap();
        assert!(!options.enabled);
        assert_eq!(options.on_invalid, InvalidCallPolicy::Abort);
        assert!(options.file_filter().unwrap().is_match("a.scss"));
    }

    #[test]
    fn test_bad_toml_and_pattern() {
        assert!(matches!(
            ConvertOptions::from_toml_str("on_invalid = \"explode\""),
            Err(TransformError::Config(_))
        ));

        let options = ConvertOptions {
            test: "(".to_string(),
            ..ConvertOptions::default()
        };
        assert!(matches!(options.file_filter(), Err(TransformError::Pattern(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "on_invalid = \"abort\"\n").unwrap();

        let options = ConvertOptions::load(&path).unwrap();
        assert_eq!(options.on_invalid, InvalidCallPolicy::Abort);

        let missing = ConvertOptions::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(TransformError::Io(_))));
    }
}
