//! Transformed entity names, resolved once per run.
//!
//! Every entity of the model and every navigation target passes through the
//! entity name and entity file name transformers exactly once, before any
//! template is rendered. Generators look names up here.

use std::collections::{HashMap, HashSet};

use crate::error::{EntityFailure, GenerationError, GenerationResult};
use crate::model::DatabaseModel;
use crate::transform::TransformerSet;

/// Class name and file stem of one entity after transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub class_name: String,
    pub file_stem: String,
}

/// Transformed names keyed by model entity name.
#[derive(Debug, Clone, Default)]
pub struct EntityNames {
    resolved: HashMap<String, ResolvedName>,
    failed: HashSet<String>,
}

impl EntityNames {
    /// Transform the name of every entity and navigation target in `model`.
    ///
    /// Each failure is returned once, against the entity whose transformer
    /// failed, with `<file stem>.<extension>` as its file name when the file
    /// name transformer succeeded. Later lookups of that entity report
    /// [`GenerationError::FailedDependency`].
    pub fn resolve(
        transformers: &TransformerSet,
        model: &DatabaseModel,
        extension: &str,
    ) -> (Self, Vec<EntityFailure>) {
        let mut names = Self::default();
        let mut failures = Vec::new();

        let targets = model
            .entity_types
            .iter()
            .flat_map(|entity| entity.navigations.iter().map(|n| n.target_entity.as_str()));
        let all = model.entity_types.iter().map(|e| e.name.as_str()).chain(targets);

        for name in all {
            if names.resolved.contains_key(name) || names.failed.contains(name) {
                continue;
            }
            match resolve_one(transformers, name) {
                Ok(resolved) => {
                    names.resolved.insert(name.to_string(), resolved);
                }
                Err((error, file_stem)) => {
                    names.failed.insert(name.to_string());
                    failures.push(EntityFailure {
                        entity: name.to_string(),
                        file_name: file_stem.map(|stem| format!("{stem}.{extension}")),
                        error,
                    });
                }
            }
        }

        tracing::debug!(
            resolved = names.resolved.len(),
            failed = names.failed.len(),
            "Resolved entity names"
        );
        (names, failures)
    }

    pub fn get(&self, entity: &str) -> GenerationResult<&ResolvedName> {
        match self.resolved.get(entity) {
            Some(resolved) => Ok(resolved),
            None if self.failed.contains(entity) => Err(GenerationError::FailedDependency {
                dependency: entity.to_string(),
            }),
            None => Err(GenerationError::configuration(format!(
                "entity '{entity}' is not part of the resolved model"
            ))),
        }
    }

    pub fn class_name(&self, entity: &str) -> GenerationResult<&str> {
        self.get(entity).map(|r| r.class_name.as_str())
    }

    pub fn file_stem(&self, entity: &str) -> GenerationResult<&str> {
        self.get(entity).map(|r| r.file_stem.as_str())
    }

    /// Whether `entity`'s own transformation failed.
    pub fn is_failed(&self, entity: &str) -> bool {
        self.failed.contains(entity)
    }
}

/// Both transformers run once, even when the first fails.
fn resolve_one(
    transformers: &TransformerSet,
    name: &str,
) -> Result<ResolvedName, (GenerationError, Option<String>)> {
    let class_name = transformers.transform_entity_name(name);
    let file_stem = transformers.transform_entity_file_name(name);
    match (class_name, file_stem) {
        (Ok(class_name), Ok(file_stem)) => Ok(ResolvedName {
            class_name,
            file_stem,
        }),
        (Err(error), file_stem) => Err((error, file_stem.ok())),
        (Ok(_), Err(error)) => Err((error, None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformRole;
    use crate::model::{EntityType, Navigation};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn shop() -> DatabaseModel {
        DatabaseModel::new("Shop")
            .with_entity(
                EntityType::new("Order").with_navigation(Navigation::collection("Lines", "OrderLine")),
            )
            .with_entity(
                EntityType::new("OrderLine")
                    .with_navigation(Navigation::reference("Order", "Order"))
                    .with_navigation(Navigation::reference("Product", "Product")),
            )
    }

    #[test]
    fn test_each_name_is_transformed_once() {
        let name_calls = Arc::new(AtomicUsize::new(0));
        let file_calls = Arc::new(AtomicUsize::new(0));
        let (n, f) = (Arc::clone(&name_calls), Arc::clone(&file_calls));
        let transformers = TransformerSet::new()
            .entity_name(move |name| {
                n.fetch_add(1, Ordering::SeqCst);
                Ok(name.to_uppercase())
            })
            .entity_file_name(move |name| {
                f.fetch_add(1, Ordering::SeqCst);
                Ok(name.to_lowercase())
            });

        let (names, failures) = EntityNames::resolve(&transformers, &shop(), "cs");
        assert!(failures.is_empty());
        // Order, OrderLine and the external Product target
        assert_eq!(name_calls.load(Ordering::SeqCst), 3);
        assert_eq!(file_calls.load(Ordering::SeqCst), 3);
        assert_eq!(names.class_name("OrderLine").unwrap(), "ORDERLINE");
        assert_eq!(names.file_stem("Product").unwrap(), "product");
    }

    #[test]
    fn test_failure_is_reported_once_and_blocks_dependents() {
        let transformers = TransformerSet::new().entity_name(|name| {
            if name == "Order" {
                Err("bad".into())
            } else {
                Ok(name.to_string())
            }
        });

        let (names, failures) = EntityNames::resolve(&transformers, &shop(), "cs");
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].entity, "Order");
        assert_eq!(failures[0].file_name.as_deref(), Some("Order.cs"));
        assert!(matches!(
            failures[0].error,
            GenerationError::Transformation { role: TransformRole::EntityName, .. }
        ));

        assert!(names.is_failed("Order"));
        assert!(!names.is_failed("OrderLine"));
        assert_eq!(names.class_name("OrderLine").unwrap(), "OrderLine");
        match names.class_name("Order") {
            Err(GenerationError::FailedDependency { dependency }) => assert_eq!(dependency, "Order"),
            other => panic!("Expected FailedDependency, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_entity_is_configuration_error() {
        let (names, _) = EntityNames::resolve(&TransformerSet::new(), &shop(), "cs");
        assert!(matches!(
            names.class_name("Invoice"),
            Err(GenerationError::Configuration(_))
        ));
    }
}
