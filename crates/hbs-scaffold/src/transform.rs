//! Entity and property transformation pipeline.
//!
//! Runs before any template sees the model: entity names, entity file names,
//! scalar properties and navigation properties each pass through their own
//! optional transformer. An absent transformer is the identity.

use std::fmt;
use std::sync::Arc;

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};

use crate::error::{BoxError, GenerationError, GenerationResult, TransformRole};
use crate::model::EntityPropertyInfo;

/// `string -> string` transformer for entity and file names.
pub type NameTransformer = Arc<dyn Fn(&str) -> Result<String, BoxError> + Send + Sync>;

/// `EntityPropertyInfo -> EntityPropertyInfo` transformer.
pub type PropertyTransformer =
    Arc<dyn Fn(EntityPropertyInfo) -> Result<EntityPropertyInfo, BoxError> + Send + Sync>;

/// Naming preset applied when no explicit transformers are registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingConvention {
    /// Keep database names as they are.
    #[default]
    None,
    /// PascalCase entities, file names and properties.
    Pascal,
    /// PascalCase entities and file names, camelCase properties.
    Camel,
}

impl std::str::FromStr for NamingConvention {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(NamingConvention::None),
            "pascal" | "pascal-case" => Ok(NamingConvention::Pascal),
            "camel" | "camel-case" => Ok(NamingConvention::Camel),
            other => Err(GenerationError::configuration(format!(
                "unknown naming convention '{other}' (expected none, pascal or camel)"
            ))),
        }
    }
}

/// Up to four optional transformers.
#[derive(Clone, Default)]
pub struct TransformerSet {
    entity_name: Option<NameTransformer>,
    entity_file_name: Option<NameTransformer>,
    property: Option<PropertyTransformer>,
    navigation_property: Option<PropertyTransformer>,
}

impl TransformerSet {
    /// An empty set: every transform is the identity.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.entity_name = Some(Arc::new(f));
        self
    }

    pub fn entity_file_name<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        self.entity_file_name = Some(Arc::new(f));
        self
    }

    pub fn property<F>(mut self, f: F) -> Self
    where
        F: Fn(EntityPropertyInfo) -> Result<EntityPropertyInfo, BoxError> + Send + Sync + 'static,
    {
        self.property = Some(Arc::new(f));
        self
    }

    pub fn navigation_property<F>(mut self, f: F) -> Self
    where
        F: Fn(EntityPropertyInfo) -> Result<EntityPropertyInfo, BoxError> + Send + Sync + 'static,
    {
        self.navigation_property = Some(Arc::new(f));
        self
    }

    /// PascalCase for entity names, file names, properties and navigations.
    pub fn pascal_case() -> Self {
        Self::new()
            .entity_name(|name| Ok(name.to_upper_camel_case()))
            .entity_file_name(|name| Ok(name.to_upper_camel_case()))
            .property(|info| Ok(rename_property(info, |n| n.to_upper_camel_case())))
            .navigation_property(|info| Ok(rename_property(info, |n| n.to_upper_camel_case())))
    }

    /// PascalCase for entity and file names, camelCase for members.
    pub fn camel_case() -> Self {
        Self::new()
            .entity_name(|name| Ok(name.to_upper_camel_case()))
            .entity_file_name(|name| Ok(name.to_upper_camel_case()))
            .property(|info| Ok(rename_property(info, |n| n.to_lower_camel_case())))
            .navigation_property(|info| Ok(rename_property(info, |n| n.to_lower_camel_case())))
    }

    pub fn for_naming(naming: NamingConvention) -> Self {
        match naming {
            NamingConvention::None => Self::new(),
            NamingConvention::Pascal => Self::pascal_case(),
            NamingConvention::Camel => Self::camel_case(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.entity_name.is_none()
            && self.entity_file_name.is_none()
            && self.property.is_none()
            && self.navigation_property.is_none()
    }

    pub fn transform_entity_name(&self, name: &str) -> GenerationResult<String> {
        apply_name(self.entity_name.as_ref(), name, TransformRole::EntityName)
    }

    pub fn transform_entity_file_name(&self, name: &str) -> GenerationResult<String> {
        apply_name(self.entity_file_name.as_ref(), name, TransformRole::EntityFileName)
    }

    /// Transform a scalar property. Errors name `declaring_type` as the entity.
    pub fn transform_property(&self, info: EntityPropertyInfo) -> GenerationResult<EntityPropertyInfo> {
        apply_property(self.property.as_ref(), info, TransformRole::Property)
    }

    pub fn transform_navigation_property(
        &self,
        info: EntityPropertyInfo,
    ) -> GenerationResult<EntityPropertyInfo> {
        apply_property(
            self.navigation_property.as_ref(),
            info,
            TransformRole::NavigationProperty,
        )
    }
}

fn rename_property(info: EntityPropertyInfo, rename: impl Fn(&str) -> String) -> EntityPropertyInfo {
    EntityPropertyInfo {
        property_name: rename(&info.property_name),
        ..info
    }
}

fn apply_name(
    transformer: Option<&NameTransformer>,
    name: &str,
    role: TransformRole,
) -> GenerationResult<String> {
    match transformer {
        Some(f) => f(name).map_err(|source| GenerationError::Transformation {
            entity: name.to_string(),
            role,
            source,
        }),
        None => Ok(name.to_string()),
    }
}

fn apply_property(
    transformer: Option<&PropertyTransformer>,
    info: EntityPropertyInfo,
    role: TransformRole,
) -> GenerationResult<EntityPropertyInfo> {
    let Some(f) = transformer else {
        return Ok(info);
    };
    let entity = info
        .declaring_type
        .clone()
        .unwrap_or_else(|| info.property_name.clone());
    f(info).map_err(|source| GenerationError::Transformation {
        entity,
        role,
        source,
    })
}

impl fmt::Debug for TransformerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformerSet")
            .field("entity_name", &self.entity_name.is_some())
            .field("entity_file_name", &self.entity_file_name.is_some())
            .field("property", &self.property.is_some())
            .field("navigation_property", &self.navigation_property.is_some())
            .finish()
    }
}
