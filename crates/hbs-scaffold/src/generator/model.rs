use std::fmt;

use super::{DbContextGenerator, EntityTypeGenerator, GeneratedFile, GenerationScope};
use crate::error::{EntityFailure, GenerationError, GenerationResult};
use crate::language::{LanguageMode, DBCONTEXT_FILE_EXTENSION};
use crate::model::{DatabaseModel, EntityType};

/// Turns role output into named files for one language.
///
/// The DbContext file is `<ContextName>.cs` in every language; entity files
/// are `<transformed file name>.<language extension>`.
pub trait ModelGenerator: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn language(&self) -> LanguageMode;

    fn dbcontext_file_name(&self, context_name: &str) -> String {
        format!("{context_name}.{DBCONTEXT_FILE_EXTENSION}")
    }

    fn entity_file_name(
        &self,
        scope: &GenerationScope<'_>,
        entity: &EntityType,
    ) -> GenerationResult<String> {
        let stem = scope.names.file_stem(&entity.name)?;
        Ok(format!("{stem}.{}", scope.language.entity_file_extension()))
    }

    /// Reject a scope wired for another language.
    fn check_language(&self, scope: &GenerationScope<'_>) -> GenerationResult<()> {
        let language = scope.language.language();
        if language == self.language() {
            Ok(())
        } else {
            Err(GenerationError::configuration(format!(
                "{} is bound to {} but the language service is {language}",
                self.name(),
                self.language()
            )))
        }
    }

    fn generate_dbcontext(
        &self,
        generator: &dyn DbContextGenerator,
        scope: &GenerationScope<'_>,
        model: &DatabaseModel,
    ) -> GenerationResult<Option<GeneratedFile>> {
        self.check_language(scope)?;
        let code = generator.write_code(scope, model)?;
        Ok(code.map(|code| GeneratedFile::new(self.dbcontext_file_name(scope.context_name), code)))
    }

    /// Generate one entity file. Failures carry the entity and, once it is
    /// known, the target file name.
    fn generate_entity(
        &self,
        generator: &dyn EntityTypeGenerator,
        scope: &GenerationScope<'_>,
        entity: &EntityType,
    ) -> Result<Option<GeneratedFile>, EntityFailure> {
        if !generator.is_enabled() {
            return Ok(None);
        }
        let failure = |file_name: Option<&str>, error| EntityFailure {
            entity: entity.name.clone(),
            file_name: file_name.map(str::to_string),
            error,
        };

        let file_name = self
            .entity_file_name(scope, entity)
            .map_err(|e| failure(None, e))?;
        let code = generator
            .write_code(scope, entity)
            .map_err(|e| failure(Some(&file_name), e))?;
        Ok(code.map(|code| GeneratedFile::new(file_name, code)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HbsCSharpModelGenerator;

impl ModelGenerator for HbsCSharpModelGenerator {
    fn name(&self) -> &'static str {
        "HbsCSharpModelGenerator"
    }

    fn language(&self) -> LanguageMode {
        LanguageMode::CSharp
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HbsTypeScriptModelGenerator;

impl ModelGenerator for HbsTypeScriptModelGenerator {
    fn name(&self) -> &'static str {
        "HbsTypeScriptModelGenerator"
    }

    fn language(&self) -> LanguageMode {
        LanguageMode::TypeScript
    }
}
