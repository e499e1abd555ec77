//! Helper registry: named helpers, last registration wins.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::{builtin, BlockHelperFn, HelperFn};
use crate::error::{GenerationError, GenerationResult};

/// Which kind of helper a registry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    Inline,
    Block,
}

impl fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryKind::Inline => f.write_str("helper"),
            RegistryKind::Block => f.write_str("block helper"),
        }
    }
}

/// Registry of named helpers.
///
/// Names are unique: registering an existing name replaces the previous entry.
/// There is no removal operation.
#[derive(Clone)]
pub struct Registry<F> {
    kind: RegistryKind,
    entries: BTreeMap<String, F>,
}

/// Inline helpers. Always contains the built-in `spaces` helper unless a
/// caller replaced it under the same name.
pub type HelperRegistry = Registry<HelperFn>;

/// Block helpers. Starts empty.
pub type BlockHelperRegistry = Registry<BlockHelperFn>;

impl Registry<HelperFn> {
    /// Create a registry seeded with the built-in helpers.
    pub fn new() -> Self {
        let mut entries: BTreeMap<String, HelperFn> = BTreeMap::new();
        entries.insert(builtin::SPACES_HELPER.to_string(), Arc::new(builtin::spaces));
        Self {
            kind: RegistryKind::Inline,
            entries,
        }
    }
}

impl Default for Registry<HelperFn> {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry<BlockHelperFn> {
    /// Create an empty block helper registry.
    pub fn new() -> Self {
        Self {
            kind: RegistryKind::Block,
            entries: BTreeMap::new(),
        }
    }
}

impl Default for Registry<BlockHelperFn> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Clone> Registry<F> {
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Add or replace a helper. Returns the helper previously registered under `name`.
    pub fn register(&mut self, name: impl Into<String>, helper: F) -> Option<F> {
        let name = name.into();
        let previous = self.entries.insert(name.clone(), helper);
        if previous.is_some() {
            tracing::warn!(helper = %name, kind = %self.kind, "Overriding registered helper");
        }
        previous
    }

    /// Register helpers in iteration order; later entries win on name collisions.
    pub fn extend<I, S>(&mut self, helpers: I)
    where
        I: IntoIterator<Item = (S, F)>,
        S: Into<String>,
    {
        for (name, helper) in helpers {
            self.register(name, helper);
        }
    }

    /// Look up a helper by name.
    pub fn resolve(&self, name: &str) -> GenerationResult<&F> {
        self.entries
            .get(name)
            .ok_or_else(|| GenerationError::UnresolvedHelper {
                helper: name.to_string(),
                template: format!("<{} registry>", self.kind),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All registered helpers, ordered by name.
    pub fn all(&self) -> &BTreeMap<String, F> {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<F> fmt::Debug for Registry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{block_helper_fn, helper_fn};
    use serde_json::{json, Value};

    fn call(helper: &HelperFn, args: &[Value]) -> String {
        let mut out = String::new();
        helper(&mut out, &Value::Null, args).unwrap();
        out
    }

    #[test]
    fn test_new_registry_seeds_spaces() {
        let registry = HelperRegistry::new();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains("spaces"));
        let spaces = registry.resolve("spaces").unwrap();
        assert_eq!(call(spaces, &[json!(3)]), "   ");
    }

    #[test]
    fn test_block_registry_starts_empty() {
        let registry = BlockHelperRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.kind(), RegistryKind::Block);
    }

    #[test]
    fn test_resolve_returns_registered_helper() {
        let mut registry = HelperRegistry::new();
        let upper = helper_fn(|out, _, args| {
            let text = args.first().and_then(Value::as_str).unwrap_or_default();
            out.write_str(&text.to_uppercase())?;
            Ok(())
        });
        registry.register("upper", upper.clone());

        let resolved = registry.resolve("upper").unwrap();
        assert!(Arc::ptr_eq(resolved, &upper));
        assert_eq!(call(resolved, &[json!("order")]), "ORDER");
    }

    #[test]
    fn test_resolve_unregistered_fails() {
        let registry = HelperRegistry::new();
        match registry.resolve("pluralize") {
            Err(GenerationError::UnresolvedHelper { helper, .. }) => assert_eq!(helper, "pluralize"),
            Err(other) => panic!("Expected UnresolvedHelper, got {other:?}"),
            Ok(_) => panic!("Expected UnresolvedHelper, got a helper"),
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = HelperRegistry::new();
        registry.extend([
            ("greet", helper_fn(|out, _, _| Ok(out.write_str("hello")?))),
            ("greet", helper_fn(|out, _, _| Ok(out.write_str("hi")?))),
        ]);
        assert_eq!(registry.len(), 2);
        assert_eq!(call(registry.resolve("greet").unwrap(), &[]), "hi");
    }

    #[test]
    fn test_caller_can_replace_builtin_spaces() {
        let mut registry = HelperRegistry::new();
        let previous = registry.register("spaces", helper_fn(|out, _, _| Ok(out.write_str("\t")?)));
        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(call(registry.resolve("spaces").unwrap(), &[json!(4)]), "\t");
    }

    #[test]
    fn test_block_registry_register_and_resolve() {
        let mut registry = BlockHelperRegistry::new();
        registry.register("with-keys", block_helper_fn(|_, _, _, _| Ok(())));
        assert!(registry.resolve("with-keys").is_ok());
        assert!(registry.resolve("spaces").is_err());
    }

    #[test]
    fn test_all_is_ordered_by_name() {
        let mut registry = HelperRegistry::new();
        registry.register("zeta", helper_fn(|_, _, _| Ok(())));
        registry.register("alpha", helper_fn(|_, _, _| Ok(())));
        let names: Vec<_> = registry.all().keys().cloned().collect();
        assert_eq!(names, vec!["alpha", "spaces", "zeta"]);
    }
}
