//! Scaffolding options, usually read from a `scaffold.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::language::{LanguageMode, ReverseEngineerMode};
use crate::model::DatabaseModel;
use crate::transform::NamingConvention;

/// Conventional options file name.
pub const OPTIONS_FILENAME: &str = "scaffold.toml";

fn default_namespace() -> String {
    "Scaffolded".to_string()
}

/// Per-run options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScaffoldOptions {
    /// Which of DbContext and entity types to generate. Default: both.
    #[serde(default)]
    pub mode: ReverseEngineerMode,

    /// Entity language. Default: csharp.
    #[serde(default)]
    pub language: LanguageMode,

    /// Namespace passed to every template. Default: "Scaffolded".
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// DbContext class name. Default: `<model name>Context`.
    pub context_name: Option<String>,

    /// Naming preset used when no transformers are registered.
    #[serde(default)]
    pub naming: NamingConvention,

    /// Stop at the first failing entity instead of collecting failures.
    #[serde(default)]
    pub fail_fast: bool,

    /// Render entity types on the rayon thread pool.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            mode: ReverseEngineerMode::default(),
            language: LanguageMode::default(),
            namespace: default_namespace(),
            context_name: None,
            naming: NamingConvention::default(),
            fail_fast: false,
            parallel: false,
        }
    }
}

impl ScaffoldOptions {
    /// DbContext class name for `model`.
    pub fn context_name_for(&self, model: &DatabaseModel) -> String {
        match &self.context_name {
            Some(name) => name.clone(),
            None if model.name.is_empty() => "ModelContext".to_string(),
            None => format!("{}Context", model.name),
        }
    }
}

/// Load options from a TOML file.
pub fn load_options(path: &Path) -> Result<ScaffoldOptions, OptionsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| OptionsError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let options: ScaffoldOptions = toml::from_str(&contents).map_err(|e| OptionsError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(path = %path.display(), ?options, "Loaded scaffold options");
    Ok(options)
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
