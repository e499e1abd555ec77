use std::collections::BTreeMap;

use super::{EntityTypeGenerator, EntityTypeView, GenerationScope, ImportView};
use crate::error::{GenerationError, GenerationResult};
use crate::language::LanguageMode;
use crate::model::EntityType;

fn ensure_language(
    generator: &dyn EntityTypeGenerator,
    expected: LanguageMode,
    scope: &GenerationScope<'_>,
) -> GenerationResult<()> {
    let actual = scope.language.language();
    if actual == expected {
        Ok(())
    } else {
        Err(GenerationError::configuration(format!(
            "{} cannot render {actual} templates",
            generator.name()
        )))
    }
}

fn render(scope: &GenerationScope<'_>, view: &EntityTypeView) -> GenerationResult<String> {
    let template = scope.language.entity_type_template();
    let code = scope.renderer.render_named(template, view)?;
    tracing::debug!(
        entity = %view.class_name,
        properties = view.properties.len(),
        navigations = view.nav_properties.len(),
        "Rendered entity type"
    );
    Ok(code)
}

/// C# entity classes. Imports are the namespaces the class body needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HbsCSharpEntityTypeGenerator;

impl EntityTypeGenerator for HbsCSharpEntityTypeGenerator {
    fn name(&self) -> &'static str {
        "HbsCSharpEntityTypeGenerator"
    }

    fn write_code(
        &self,
        scope: &GenerationScope<'_>,
        entity: &EntityType,
    ) -> GenerationResult<Option<String>> {
        ensure_language(self, LanguageMode::CSharp, scope)?;
        let mut view = EntityTypeView::build(scope, entity)?;

        let mut imports = vec!["System"];
        if view.has_collections {
            imports.push("System.Collections.Generic");
        }
        view.imports = imports
            .into_iter()
            .map(|name| ImportView {
                name: name.to_string(),
                path: None,
            })
            .collect();

        render(scope, &view).map(Some)
    }
}

/// TypeScript entity interfaces. Imports are the sibling entity modules
/// referenced by navigations, keyed by type name.
#[derive(Debug, Clone, Copy, Default)]
pub struct HbsTypeScriptEntityTypeGenerator;

impl EntityTypeGenerator for HbsTypeScriptEntityTypeGenerator {
    fn name(&self) -> &'static str {
        "HbsTypeScriptEntityTypeGenerator"
    }

    fn write_code(
        &self,
        scope: &GenerationScope<'_>,
        entity: &EntityType,
    ) -> GenerationResult<Option<String>> {
        ensure_language(self, LanguageMode::TypeScript, scope)?;
        let mut view = EntityTypeView::build(scope, entity)?;

        let mut imports = BTreeMap::new();
        for navigation in &entity.navigations {
            let resolved = scope.names.get(&navigation.target_entity)?;
            if resolved.class_name == view.class_name {
                continue;
            }
            imports
                .entry(resolved.class_name.clone())
                .or_insert_with(|| format!("./{}", resolved.file_stem));
        }
        view.imports = imports
            .into_iter()
            .map(|(name, path)| ImportView {
                name,
                path: Some(path),
            })
            .collect();

        render(scope, &view).map(Some)
    }
}

/// Bound when the reverse-engineer mode skips entity types.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEntityTypeGenerator;

impl EntityTypeGenerator for NullEntityTypeGenerator {
    fn name(&self) -> &'static str {
        "NullEntityTypeGenerator"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn write_code(
        &self,
        _scope: &GenerationScope<'_>,
        _entity: &EntityType,
    ) -> GenerationResult<Option<String>> {
        Ok(None)
    }
}
