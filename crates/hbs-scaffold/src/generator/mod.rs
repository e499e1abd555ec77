//! Generator roles: DbContext, entity type and model generators.
//!
//! Each role is a trait with a Handlebars-backed implementation and, for the
//! two mode-dependent roles, a null implementation that produces nothing.
//! [`select_roles`](crate::language::select_roles) decides which is bound.

mod dbcontext;
mod entity;
mod model;
mod names;
mod view;

use std::fmt;

use crate::error::GenerationResult;
use crate::language::TemplateLanguageService;
use crate::model::{DatabaseModel, EntityType};
use crate::renderer::TemplateRenderer;
use crate::transform::TransformerSet;

pub use dbcontext::{HbsDbContextGenerator, NullDbContextGenerator};
pub use entity::{HbsCSharpEntityTypeGenerator, HbsTypeScriptEntityTypeGenerator, NullEntityTypeGenerator};
pub use model::{HbsCSharpModelGenerator, HbsTypeScriptModelGenerator, ModelGenerator};
pub use names::{EntityNames, ResolvedName};
pub use view::{DbContextView, DbSetView, EntityTypeView, ImportView, NavigationView, PropertyView};

/// Read-only state shared by every generator call of one run.
#[derive(Clone, Copy)]
pub struct GenerationScope<'a> {
    pub renderer: &'a TemplateRenderer,
    pub transformers: &'a TransformerSet,
    /// Entity names transformed once for the whole run.
    pub names: &'a EntityNames,
    pub language: &'a dyn TemplateLanguageService,
    pub namespace: &'a str,
    pub context_name: &'a str,
}

impl fmt::Debug for GenerationScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationScope")
            .field("language", &self.language.language())
            .field("namespace", &self.namespace)
            .field("context_name", &self.context_name)
            .finish_non_exhaustive()
    }
}

/// One generated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File name including extension, e.g. `OrderLine.cs`.
    pub file_name: String,
    pub code: String,
}

impl GeneratedFile {
    pub fn new(file_name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            code: code.into(),
        }
    }
}

/// Produces the DbContext source for a whole model.
pub trait DbContextGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// `false` for the null implementation.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Render the DbContext, or `None` when this role generates nothing.
    fn write_code(
        &self,
        scope: &GenerationScope<'_>,
        model: &DatabaseModel,
    ) -> GenerationResult<Option<String>>;
}

/// Produces the source of one entity type.
pub trait EntityTypeGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// `false` for the null implementation.
    fn is_enabled(&self) -> bool {
        true
    }

    /// Render one entity type, or `None` when this role generates nothing.
    fn write_code(
        &self,
        scope: &GenerationScope<'_>,
        entity: &EntityType,
    ) -> GenerationResult<Option<String>>;
}
