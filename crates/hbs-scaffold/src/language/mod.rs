//! Language strategy selection.
//!
//! A run is wired once for a `(ReverseEngineerMode, LanguageMode)` pair;
//! [`select_roles`] is the whole strategy table.

mod csharp;
mod typescript;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::generator::{
    DbContextGenerator, EntityTypeGenerator, HbsCSharpEntityTypeGenerator, HbsCSharpModelGenerator,
    HbsDbContextGenerator, HbsTypeScriptEntityTypeGenerator, HbsTypeScriptModelGenerator,
    ModelGenerator, NullDbContextGenerator, NullEntityTypeGenerator,
};
use crate::helpers::HelperFn;

pub use csharp::CSharpTemplateLanguageService;
pub use typescript::{ts_type, TypeScriptTemplateLanguageService, TS_TYPE_HELPER};

/// Extension of the generated DbContext file, whatever the entity language.
pub const DBCONTEXT_FILE_EXTENSION: &str = "cs";

/// Main DbContext template.
pub const DBCONTEXT_TEMPLATE: &str = "CSharpDbContext/DbContext.hbs";

/// Optional DbContext partials.
pub const DBCONTEXT_PARTIALS: &[PartialTemplate] = &[
    PartialTemplate::new("dbimports", "CSharpDbContext/Partials/DbImports.hbs"),
    PartialTemplate::new("dbconstructor", "CSharpDbContext/Partials/DbConstructor.hbs"),
    PartialTemplate::new("dbsets", "CSharpDbContext/Partials/DbSets.hbs"),
];

/// Language of the generated entity types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageMode {
    #[default]
    #[serde(rename = "csharp", alias = "cs")]
    CSharp,
    #[serde(rename = "typescript", alias = "ts")]
    TypeScript,
}

impl LanguageMode {
    pub const ALL: [LanguageMode; 2] = [LanguageMode::CSharp, LanguageMode::TypeScript];
}

impl fmt::Display for LanguageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageMode::CSharp => f.write_str("csharp"),
            LanguageMode::TypeScript => f.write_str("typescript"),
        }
    }
}

impl FromStr for LanguageMode {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csharp" | "cs" | "c#" => Ok(LanguageMode::CSharp),
            "typescript" | "ts" => Ok(LanguageMode::TypeScript),
            other => Err(GenerationError::configuration(format!(
                "unknown language '{other}' (expected csharp or typescript)"
            ))),
        }
    }
}

/// Which of {DbContext, entity types} a run generates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReverseEngineerMode {
    DbContextOnly,
    EntitiesOnly,
    #[default]
    DbContextAndEntities,
}

impl ReverseEngineerMode {
    pub const ALL: [ReverseEngineerMode; 3] = [
        ReverseEngineerMode::DbContextOnly,
        ReverseEngineerMode::EntitiesOnly,
        ReverseEngineerMode::DbContextAndEntities,
    ];

    pub fn generates_dbcontext(self) -> bool {
        matches!(
            self,
            ReverseEngineerMode::DbContextOnly | ReverseEngineerMode::DbContextAndEntities
        )
    }

    pub fn generates_entities(self) -> bool {
        matches!(
            self,
            ReverseEngineerMode::EntitiesOnly | ReverseEngineerMode::DbContextAndEntities
        )
    }
}

impl fmt::Display for ReverseEngineerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReverseEngineerMode::DbContextOnly => f.write_str("db-context-only"),
            ReverseEngineerMode::EntitiesOnly => f.write_str("entities-only"),
            ReverseEngineerMode::DbContextAndEntities => f.write_str("db-context-and-entities"),
        }
    }
}

impl FromStr for ReverseEngineerMode {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "dbcontextonly" | "dbcontext" => Ok(ReverseEngineerMode::DbContextOnly),
            "entitiesonly" | "entities" => Ok(ReverseEngineerMode::EntitiesOnly),
            "dbcontextandentities" | "all" => Ok(ReverseEngineerMode::DbContextAndEntities),
            _ => Err(GenerationError::configuration(format!(
                "unknown reverse-engineer mode '{s}' \
                 (expected db-context-only, entities-only or db-context-and-entities)"
            ))),
        }
    }
}

/// A partial template: registered under `name`, loaded from `path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialTemplate {
    pub name: &'static str,
    pub path: &'static str,
}

impl PartialTemplate {
    pub const fn new(name: &'static str, path: &'static str) -> Self {
        Self { name, path }
    }
}

/// Language-specific knowledge the generators defer to: template locations,
/// file extension, type names and the language's helper set.
pub trait TemplateLanguageService: Send + Sync + fmt::Debug {
    fn language(&self) -> LanguageMode;

    /// Extension of generated entity files, without the dot.
    fn entity_file_extension(&self) -> &'static str;

    fn dbcontext_template(&self) -> &'static str {
        DBCONTEXT_TEMPLATE
    }

    fn dbcontext_partials(&self) -> &'static [PartialTemplate] {
        DBCONTEXT_PARTIALS
    }

    fn entity_type_template(&self) -> &'static str;

    fn entity_type_partials(&self) -> &'static [PartialTemplate];

    /// Name of a property type in this language.
    fn type_name(&self, clr_type: &str, nullable: bool) -> String;

    /// Type of a collection navigation over `element`.
    fn collection_type(&self, element: &str) -> String;

    /// Helpers layered between the built-ins and caller-supplied helpers.
    fn helpers(&self) -> Vec<(&'static str, HelperFn)> {
        Vec::new()
    }
}

/// Concrete implementations bound to the four generation roles.
#[derive(Debug, Clone)]
pub struct RoleBindings {
    pub dbcontext: Arc<dyn DbContextGenerator>,
    pub entity_type: Arc<dyn EntityTypeGenerator>,
    pub model: Arc<dyn ModelGenerator>,
    pub language: Arc<dyn TemplateLanguageService>,
}

/// Bind every role for one run.
///
/// | role        | bound to                                                    |
/// |-------------|-------------------------------------------------------------|
/// | DbContext   | Handlebars generator if the mode generates it, else null    |
/// | entity type | language-specific generator if the mode generates it, else null |
/// | model       | language-specific, always                                   |
/// | language    | language-specific, always                                   |
pub fn select_roles(mode: ReverseEngineerMode, language: LanguageMode) -> RoleBindings {
    let dbcontext: Arc<dyn DbContextGenerator> = if mode.generates_dbcontext() {
        Arc::new(HbsDbContextGenerator)
    } else {
        Arc::new(NullDbContextGenerator)
    };

    let entity_type: Arc<dyn EntityTypeGenerator> = match (mode.generates_entities(), language) {
        (false, _) => Arc::new(NullEntityTypeGenerator),
        (true, LanguageMode::CSharp) => Arc::new(HbsCSharpEntityTypeGenerator),
        (true, LanguageMode::TypeScript) => Arc::new(HbsTypeScriptEntityTypeGenerator),
    };

    let (model, service): (Arc<dyn ModelGenerator>, Arc<dyn TemplateLanguageService>) =
        match language {
            LanguageMode::CSharp => (
                Arc::new(HbsCSharpModelGenerator),
                Arc::new(CSharpTemplateLanguageService),
            ),
            LanguageMode::TypeScript => (
                Arc::new(HbsTypeScriptModelGenerator),
                Arc::new(TypeScriptTemplateLanguageService),
            ),
        };

    tracing::debug!(
        %mode,
        %language,
        dbcontext = dbcontext.name(),
        entity_type = entity_type.name(),
        model = model.name(),
        "Selected generation roles"
    );

    RoleBindings {
        dbcontext,
        entity_type,
        model,
        language: service,
    }
}
