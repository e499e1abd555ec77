//! # Generation Error Types
//!
//! Unified error handling for configuration, transformation and rendering.

use std::fmt;

use thiserror::Error;

/// Error type returned by caller-supplied helper and transformer callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Generation operation result type
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Which transformer of a [`TransformerSet`](crate::TransformerSet) failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformRole {
    EntityName,
    EntityFileName,
    Property,
    NavigationProperty,
}

impl fmt::Display for TransformRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransformRole::EntityName => "entity name",
            TransformRole::EntityFileName => "entity file name",
            TransformRole::Property => "property",
            TransformRole::NavigationProperty => "navigation property",
        };
        f.write_str(name)
    }
}

/// Comprehensive error types for a generation run
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Invalid or missing role wiring, or registration out of order.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unresolved helper '{helper}' in template '{template}'")]
    UnresolvedHelper { helper: String, template: String },

    #[error("{role} transformer failed for entity '{entity}': {source}")]
    Transformation {
        entity: String,
        role: TransformRole,
        #[source]
        source: BoxError,
    },

    #[error("Generated file name '{file_name}' produced by both '{first}' and '{second}'")]
    FileNameCollision {
        file_name: String,
        first: String,
        second: String,
    },

    /// An entity this output refers to failed its own name transformation.
    #[error("Depends on entity '{dependency}', whose name transformation failed")]
    FailedDependency { dependency: String },

    #[error("Render error in template '{template}': {message}")]
    Render { template: String, message: String },

    #[error("Template not found: {path}")]
    TemplateNotFound { path: String },

    #[error("{} entity type(s) failed to generate: {}", .0.len(), summarize(.0))]
    EntityFailures(Vec<EntityFailure>),
}

impl GenerationError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a render error for the given template
    pub fn render(template: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            template: template.into(),
            message: message.into(),
        }
    }

    /// Whether this error aborts the whole run rather than a single entity.
    #[must_use]
    pub fn is_fatal_to_run(&self) -> bool {
        matches!(
            self,
            GenerationError::Configuration(_)
                | GenerationError::FileNameCollision { .. }
                | GenerationError::TemplateNotFound { .. }
                | GenerationError::EntityFailures(_)
        )
    }
}

/// A failure scoped to a single entity type of the model.
#[derive(Debug)]
pub struct EntityFailure {
    /// Entity name as it appears in the database model.
    pub entity: String,
    /// Output file the entity was headed for, when it was computed before the failure.
    pub file_name: Option<String>,
    pub error: GenerationError,
}

impl fmt::Display for EntityFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file_name {
            Some(file) => write!(f, "{} ({}): {}", self.entity, file, self.error),
            None => write!(f, "{}: {}", self.entity, self.error),
        }
    }
}

fn summarize(failures: &[EntityFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_constructor() {
        let err = GenerationError::configuration("call configure_generation first");
        match err {
            GenerationError::Configuration(msg) => {
                assert_eq!(msg, "call configure_generation first")
            }
            _ => panic!("Expected Configuration variant"),
        }
    }

    #[test]
    fn test_unresolved_helper_message_names_helper_and_template() {
        let err = GenerationError::UnresolvedHelper {
            helper: "pluralize".into(),
            template: "CSharpEntityType/Class.hbs".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("pluralize"));
        assert!(msg.contains("CSharpEntityType/Class.hbs"));
    }

    #[test]
    fn test_transformation_error_keeps_source() {
        let err = GenerationError::Transformation {
            entity: "Order".into(),
            role: TransformRole::Property,
            source: "empty property name".into(),
        };
        assert_eq!(
            err.to_string(),
            "property transformer failed for entity 'Order': empty property name"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_fatality_classification() {
        assert!(GenerationError::configuration("x").is_fatal_to_run());
        assert!(GenerationError::FileNameCollision {
            file_name: "Order.cs".into(),
            first: "Order".into(),
            second: "order".into(),
        }
        .is_fatal_to_run());
        assert!(!GenerationError::render("t", "bad").is_fatal_to_run());
        assert!(!GenerationError::FailedDependency {
            dependency: "Order".into(),
        }
        .is_fatal_to_run());
        assert!(!GenerationError::UnresolvedHelper {
            helper: "h".into(),
            template: "t".into(),
        }
        .is_fatal_to_run());
    }

    #[test]
    fn test_entity_failures_summary() {
        let err = GenerationError::EntityFailures(vec![
            EntityFailure {
                entity: "Order".into(),
                file_name: Some("Order.cs".into()),
                error: GenerationError::render("Class.hbs", "unclosed block"),
            },
            EntityFailure {
                entity: "Customer".into(),
                file_name: None,
                error: GenerationError::render("Class.hbs", "bad"),
            },
        ]);
        let msg = err.to_string();
        assert!(msg.starts_with("2 entity type(s) failed"));
        assert!(msg.contains("Order (Order.cs)"));
        assert!(msg.contains("Customer: "));
    }
}
