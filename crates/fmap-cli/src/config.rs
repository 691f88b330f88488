//! Configuration loading for the fmap CLI.
//!
//! Configuration lives in an optional `fmap.toml` at the project root,
//! merged with `FMAP_`-prefixed environment variables via figment. Every
//! field has a working default, so a missing file is not an error.

use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use fmap_core::PathPatterns;

/// CLI configuration surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FmapConfig {
    /// Glob patterns for files to include.
    pub include: Vec<String>,
    /// Glob patterns for files to exclude.
    pub exclude: Vec<String>,
    /// Path to tsconfig.json, relative to the project root.
    pub tsconfig: Option<PathBuf>,
    /// Import-categorization pattern overrides.
    pub patterns: PathPatterns,
}

impl Default for FmapConfig {
    fn default() -> Self {
        Self {
            include: vec!["**/*.ts".to_string(), "**/*.tsx".to_string()],
            exclude: vec![
                "**/node_modules/**".to_string(),
                "**/.next/**".to_string(),
                "**/dist/**".to_string(),
                "**/*.d.ts".to_string(),
                "**/*.test.ts".to_string(),
                "**/*.test.tsx".to_string(),
            ],
            tsconfig: None,
            patterns: PathPatterns::default(),
        }
    }
}

impl FmapConfig {
    /// Load configuration for a project root.
    ///
    /// An explicit `config_path` must exist; otherwise `<root>/fmap.toml` is
    /// used when present, and defaults apply when it is not.
    pub fn load(root: &Path, config_path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_path {
            Some(path) => {
                anyhow::ensure!(path.exists(), "config file '{}' not found", path.display());
                Some(path.to_path_buf())
            }
            None => {
                let discovered = root.join("fmap.toml");
                discovered.exists().then_some(discovered)
            }
        };

        let mut figment = Figment::from(figment::providers::Serialized::defaults(Self::default()));
        if let Some(file) = &file {
            figment = figment.merge(Toml::file(file));
        }
        figment
            .merge(Env::prefixed("FMAP_"))
            .extract()
            .context("invalid fmap configuration")
    }
}
