//! Compiler configuration.
//!
//! All fields have defaults, so a missing `zmx.config.json` is the same as an
//! empty one. Unknown keys are rejected.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::CompileError;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "zmx.config.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct CompilerConfig {
    /// Directory scanned for source units (not recursive).
    pub source_dir: PathBuf,
    /// Directory the artifacts are written to. Created if absent.
    pub out_dir: PathBuf,
    /// Exact, case-sensitive file name suffix of a source unit.
    pub suffix: String,
    /// File name of the generated registry module.
    pub module_file: String,
    /// File name of the generated host document.
    pub html_file: String,
    /// `<title>` of the host document.
    pub title: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            out_dir: PathBuf::from("./dist"),
            suffix: ".zmx".to_string(),
            module_file: "components.js".to_string(),
            html_file: "index.html".to_string(),
            title: "Generated Components".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Load `zmx.config.json` from `dir`, falling back to defaults when the
    /// file does not exist.
    pub fn discover(dir: &Path) -> Result<Self, CompileError> {
        let path = dir.join(CONFIG_FILE_NAME);
        match fs::read_to_string(&path) {
            Ok(source) => Self::from_json(&source, &path),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(CompileError::ReadConfig { path, source }),
        }
    }

    /// Parse a config document. `path` is only used for error reporting.
    pub fn from_json(source: &str, path: &Path) -> Result<Self, CompileError> {
        serde_json::from_str(source).map_err(|source| CompileError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn module_path(&self) -> PathBuf {
        self.out_dir.join(&self.module_file)
    }

    pub fn html_path(&self) -> PathBuf {
        self.out_dir.join(&self.html_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.source_dir, PathBuf::from("."));
        assert_eq!(config.out_dir, PathBuf::from("./dist"));
        assert_eq!(config.suffix, ".zmx");
        assert_eq!(config.module_path(), PathBuf::from("./dist/components.js"));
        assert_eq!(config.html_path(), PathBuf::from("./dist/index.html"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            CompilerConfig::from_json(r#"{ "sourceDir": "src" }"#, Path::new("zmx.config.json"))
                .unwrap();
        assert_eq!(config.source_dir, PathBuf::from("src"));
        assert_eq!(config.out_dir, PathBuf::from("./dist"));
        assert_eq!(config.suffix, ".zmx");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = CompilerConfig::from_json(r#"{ "watch": true }"#, Path::new("zmx.config.json"))
            .unwrap_err();
        assert!(matches!(err, CompileError::Config { .. }));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CompilerConfig::discover(dir.path()).unwrap();
        assert_eq!(config, CompilerConfig::default());
    }

    #[test]
    fn test_discover_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "outDir": "public", "title": "Demo" }"#,
        )
        .unwrap();
        let config = CompilerConfig::discover(dir.path()).unwrap();
        assert_eq!(config.out_dir, PathBuf::from("public"));
        assert_eq!(config.title, "Demo");
    }
}
