//! Template source collaborator.

use std::collections::HashMap;

/// Supplies template text by relative path (`CSharpEntityType/Class.hbs`).
///
/// Implementations decide where templates live; the generator only sees text.
pub trait TemplateFileService: Send + Sync {
    /// Template text at `path`, or `None` when there is no such template.
    fn retrieve_template(&self, path: &str) -> Option<String>;
}

/// Default templates shipped with the crate, keyed by path.
const BUNDLED_TEMPLATES: &[(&str, &str)] = &[
    (
        "CSharpDbContext/DbContext.hbs",
        include_str!("../templates/CSharpDbContext/DbContext.hbs"),
    ),
    (
        "CSharpDbContext/Partials/DbImports.hbs",
        include_str!("../templates/CSharpDbContext/Partials/DbImports.hbs"),
    ),
    (
        "CSharpDbContext/Partials/DbConstructor.hbs",
        include_str!("../templates/CSharpDbContext/Partials/DbConstructor.hbs"),
    ),
    (
        "CSharpDbContext/Partials/DbSets.hbs",
        include_str!("../templates/CSharpDbContext/Partials/DbSets.hbs"),
    ),
    (
        "CSharpEntityType/Class.hbs",
        include_str!("../templates/CSharpEntityType/Class.hbs"),
    ),
    (
        "CSharpEntityType/Partials/Imports.hbs",
        include_str!("../templates/CSharpEntityType/Partials/Imports.hbs"),
    ),
    (
        "CSharpEntityType/Partials/Constructor.hbs",
        include_str!("../templates/CSharpEntityType/Partials/Constructor.hbs"),
    ),
    (
        "CSharpEntityType/Partials/Properties.hbs",
        include_str!("../templates/CSharpEntityType/Partials/Properties.hbs"),
    ),
    (
        "TypeScriptEntityType/Interface.hbs",
        include_str!("../templates/TypeScriptEntityType/Interface.hbs"),
    ),
    (
        "TypeScriptEntityType/Partials/Imports.hbs",
        include_str!("../templates/TypeScriptEntityType/Partials/Imports.hbs"),
    ),
    (
        "TypeScriptEntityType/Partials/Properties.hbs",
        include_str!("../templates/TypeScriptEntityType/Partials/Properties.hbs"),
    ),
];

/// Templates held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateFileService {
    templates: HashMap<String, String>,
}

impl InMemoryTemplateFileService {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default C# and TypeScript templates.
    pub fn bundled() -> Self {
        BUNDLED_TEMPLATES.iter().copied().collect()
    }

    pub fn with_template(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(normalize(&path.into()), source.into());
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// `(path, source)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut entries: Vec<_> = self
            .templates
            .iter()
            .map(|(path, source)| (path.as_str(), source.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(path, _)| *path);
        entries.into_iter()
    }
}

impl TemplateFileService for InMemoryTemplateFileService {
    fn retrieve_template(&self, path: &str) -> Option<String> {
        self.templates.get(&normalize(path)).cloned()
    }
}

impl<P, T> FromIterator<(P, T)> for InMemoryTemplateFileService
where
    P: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut service = Self::new();
        for (path, source) in iter {
            service.insert(path, source);
        }
        service
    }
}

/// Forward slashes, no leading `./` or `/`.
fn normalize(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").trim_start_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieve_inserted_template() {
        let service = InMemoryTemplateFileService::new()
            .with_template("CSharpEntityType/Class.hbs", "class {{class_name}}");
        assert_eq!(
            service.retrieve_template("CSharpEntityType/Class.hbs").as_deref(),
            Some("class {{class_name}}")
        );
        assert_eq!(service.retrieve_template("CSharpEntityType/Missing.hbs"), None);
    }

    #[test]
    fn test_paths_are_normalized() {
        let service = InMemoryTemplateFileService::new()
            .with_template("CSharpDbContext\\DbContext.hbs", "ctx");
        assert!(service.retrieve_template("./CSharpDbContext/DbContext.hbs").is_some());
        assert!(service.retrieve_template("/CSharpDbContext/DbContext.hbs").is_some());
    }

    #[test]
    fn test_bundled_templates_cover_every_main_template() {
        let service = InMemoryTemplateFileService::bundled();
        for path in [
            "CSharpDbContext/DbContext.hbs",
            "CSharpEntityType/Class.hbs",
            "TypeScriptEntityType/Interface.hbs",
        ] {
            assert!(service.retrieve_template(path).is_some(), "{path}");
        }
        assert!(service
            .retrieve_template("TypeScriptEntityType/Partials/Constructor.hbs")
            .is_none());
    }

    #[test]
    fn test_collect_from_pairs() {
        let service: InMemoryTemplateFileService =
            [("a.hbs", "A"), ("b.hbs", "B")].into_iter().collect();
        assert_eq!(service.len(), 2);
        assert!(!service.is_empty());
        let paths: Vec<_> = service.iter().map(|(path, _)| path).collect();
        assert_eq!(paths, ["a.hbs", "b.hbs"]);
    }
}
