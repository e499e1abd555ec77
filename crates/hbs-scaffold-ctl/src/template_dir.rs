//! Filesystem-backed template lookup.

use std::io::ErrorKind;
use std::path::PathBuf;

use hbs_scaffold::{InMemoryTemplateFileService, TemplateFileService};

/// Reads templates from `root/<path>`, optionally falling back to another
/// service when a file is absent.
#[derive(Debug)]
pub(crate) struct DirectoryTemplateFileService {
    root: PathBuf,
    fallback: Option<InMemoryTemplateFileService>,
}

impl DirectoryTemplateFileService {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fallback: None,
        }
    }

    pub(crate) fn with_fallback(mut self, fallback: InMemoryTemplateFileService) -> Self {
        self.fallback = Some(fallback);
        self
    }

    fn fallback(&self, path: &str) -> Option<String> {
        let source = self.fallback.as_ref()?.retrieve_template(path)?;
        tracing::debug!(template = path, "Using bundled template");
        Some(source)
    }
}

impl TemplateFileService for DirectoryTemplateFileService {
    fn retrieve_template(&self, path: &str) -> Option<String> {
        let file = self.root.join(path);
        match std::fs::read_to_string(&file) {
            Ok(source) => {
                tracing::debug!(template = path, file = %file.display(), "Read template");
                Some(source)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => self.fallback(path),
            Err(e) => {
                tracing::warn!(file = %file.display(), error = %e, "Failed to read template");
                self.fallback(path)
            }
        }
    }
}
