use super::{DbContextGenerator, DbContextView, GenerationScope};
use crate::error::GenerationResult;
use crate::model::DatabaseModel;

/// Renders the DbContext template once per model.
#[derive(Debug, Clone, Copy, Default)]
pub struct HbsDbContextGenerator;

impl DbContextGenerator for HbsDbContextGenerator {
    fn name(&self) -> &'static str {
        "HbsDbContextGenerator"
    }

    fn write_code(
        &self,
        scope: &GenerationScope<'_>,
        model: &DatabaseModel,
    ) -> GenerationResult<Option<String>> {
        let view = DbContextView::build(scope, model)?;
        let template = scope.language.dbcontext_template();
        let code = scope.renderer.render_named(template, &view)?;
        tracing::debug!(
            context = scope.context_name,
            entities = view.entity_types.len(),
            "Rendered DbContext"
        );
        Ok(Some(code))
    }
}

/// Bound when the reverse-engineer mode skips the DbContext.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDbContextGenerator;

impl DbContextGenerator for NullDbContextGenerator {
    fn name(&self) -> &'static str {
        "NullDbContextGenerator"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn write_code(
        &self,
        _scope: &GenerationScope<'_>,
        _model: &DatabaseModel,
    ) -> GenerationResult<Option<String>> {
        Ok(None)
    }
}
