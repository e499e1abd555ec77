//! Reverse-engineered database model consumed by the generators.
//!
//! Introspection itself happens elsewhere; these types are the hand-off shape
//! (the CLI reads them from JSON).

use serde::{Deserialize, Serialize};

/// A reverse-engineered database model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseModel {
    /// Model (database) name, used to derive the default DbContext name.
    pub name: String,
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
}

/// One table or view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityType {
    pub name: String,
    /// Backing table name. Defaults to the entity name when absent.
    pub table_name: Option<String>,
    pub schema: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub navigations: Vec<Navigation>,
}

/// A scalar column mapped to a property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub column_name: Option<String>,
    /// Semantic type name (e.g. `int`, `string`, `DateTime`).
    pub clr_type: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub is_key: bool,
}

/// A relationship to another entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigation {
    pub name: String,
    /// Name of the entity type on the other end (untransformed).
    pub target_entity: String,
    #[serde(default)]
    pub is_collection: bool,
}

impl DatabaseModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entity_types: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity: EntityType) -> Self {
        self.entity_types.push(entity);
        self
    }
}

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_navigation(mut self, navigation: Navigation) -> Self {
        self.navigations.push(navigation);
        self
    }

    /// Table name, falling back to the entity name.
    pub fn table(&self) -> &str {
        self.table_name.as_deref().unwrap_or(&self.name)
    }
}

impl Property {
    pub fn new(name: impl Into<String>, clr_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clr_type: clr_type.into(),
            ..Default::default()
        }
    }

    pub fn key(mut self) -> Self {
        self.is_key = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn column(&self) -> &str {
        self.column_name.as_deref().unwrap_or(&self.name)
    }
}

impl Navigation {
    pub fn reference(name: impl Into<String>, target_entity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_entity: target_entity.into(),
            is_collection: false,
        }
    }

    pub fn collection(name: impl Into<String>, target_entity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_entity: target_entity.into(),
            is_collection: true,
        }
    }
}

/// Describes one property as it passes through a property transformer.
///
/// Transformers consume one value and return a new one; instances are never
/// shared or mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityPropertyInfo {
    pub property_type: String,
    pub property_name: String,
    pub declaring_type: Option<String>,
}

impl EntityPropertyInfo {
    pub fn new(property_type: impl Into<String>, property_name: impl Into<String>) -> Self {
        Self {
            property_type: property_type.into(),
            property_name: property_name.into(),
            declaring_type: None,
        }
    }

    pub fn with_declaring_type(mut self, declaring_type: impl Into<String>) -> Self {
        self.declaring_type = Some(declaring_type.into());
        self
    }
}
