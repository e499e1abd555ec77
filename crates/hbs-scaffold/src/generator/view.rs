//! Template view models.
//!
//! Everything a template can reference is built here, after the
//! transformation pipeline has run.

use serde::Serialize;

use super::GenerationScope;
use crate::error::GenerationResult;
use crate::model::{DatabaseModel, EntityPropertyInfo, EntityType};

/// Data bound to the DbContext template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbContextView {
    pub namespace: String,
    pub context_name: String,
    pub entity_types: Vec<DbSetView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DbSetView {
    pub entity_name: String,
    pub db_set_name: String,
    pub table_name: String,
    pub schema: Option<String>,
}

/// Data bound to an entity type template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityTypeView {
    pub namespace: String,
    pub class_name: String,
    pub table_name: String,
    pub schema: Option<String>,
    pub properties: Vec<PropertyView>,
    pub nav_properties: Vec<NavigationView>,
    /// Namespaces (C#) or sibling modules (TypeScript) the entity depends on.
    pub imports: Vec<ImportView>,
    pub has_collections: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyView {
    pub property_type: String,
    pub property_name: String,
    pub column_name: String,
    pub property_is_nullable: bool,
    pub is_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationView {
    /// Full declared type, e.g. `ICollection<OrderLine>`.
    pub property_type: String,
    pub property_name: String,
    pub element_type: String,
    pub is_collection: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportView {
    pub name: String,
    pub path: Option<String>,
}

impl DbContextView {
    pub fn build(scope: &GenerationScope<'_>, model: &DatabaseModel) -> GenerationResult<Self> {
        let entity_types = model
            .entity_types
            .iter()
            .map(|entity| {
                let entity_name = scope.names.class_name(&entity.name)?.to_string();
                Ok(DbSetView {
                    db_set_name: entity_name.clone(),
                    entity_name,
                    table_name: entity.table().to_string(),
                    schema: entity.schema.clone(),
                })
            })
            .collect::<GenerationResult<Vec<_>>>()?;

        Ok(Self {
            namespace: scope.namespace.to_string(),
            context_name: scope.context_name.to_string(),
            entity_types,
        })
    }
}

impl EntityTypeView {
    /// Run the property transformers over `entity` and map its types into
    /// the active language. Entity names come from [`GenerationScope::names`]. `imports` is left empty for the generator to fill.
    pub fn build(scope: &GenerationScope<'_>, entity: &EntityType) -> GenerationResult<Self> {
        let class_name = scope.names.class_name(&entity.name)?.to_string();

        let mut properties = Vec::with_capacity(entity.properties.len());
        for property in &entity.properties {
            let info = EntityPropertyInfo::new(
                scope.language.type_name(&property.clr_type, property.nullable),
                property.name.as_str(),
            )
            .with_declaring_type(entity.name.as_str());
            let info = scope.transformers.transform_property(info)?;
            properties.push(PropertyView {
                property_type: info.property_type,
                property_name: info.property_name,
                column_name: property.column().to_string(),
                property_is_nullable: property.nullable,
                is_key: property.is_key,
            });
        }

        let mut nav_properties = Vec::with_capacity(entity.navigations.len());
        for navigation in &entity.navigations {
            let target = scope.names.class_name(&navigation.target_entity)?;
            let info = EntityPropertyInfo::new(target, navigation.name.as_str())
                .with_declaring_type(entity.name.as_str());
            let info = scope.transformers.transform_navigation_property(info)?;
            let property_type = if navigation.is_collection {
                scope.language.collection_type(&info.property_type)
            } else {
                info.property_type.clone()
            };
            nav_properties.push(NavigationView {
                property_type,
                property_name: info.property_name,
                element_type: info.property_type,
                is_collection: navigation.is_collection,
            });
        }

        Ok(Self {
            namespace: scope.namespace.to_string(),
            class_name,
            table_name: entity.table().to_string(),
            schema: entity.schema.clone(),
            has_collections: nav_properties.iter().any(|n| n.is_collection),
            properties,
            nav_properties,
            imports: Vec::new(),
        })
    }
}
