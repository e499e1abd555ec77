//! Generator façade: transforms, renders and collects every output of a model.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rayon::prelude::*;

use crate::config::GenerationConfig;
use crate::error::{EntityFailure, GenerationError, GenerationResult};
use crate::generator::{EntityNames, GeneratedFile, GenerationScope};
use crate::language::PartialTemplate;
use crate::model::{DatabaseModel, EntityType};
use crate::options::ScaffoldOptions;
use crate::renderer::TemplateRenderer;
use crate::template_files::TemplateFileService;

/// Files generated for a model, keyed by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldedModel {
    files: BTreeMap<String, String>,
    dbcontext_file: Option<String>,
}

impl ScaffoldedModel {
    /// Generated code for `file_name`.
    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(String::as_str)
    }

    /// File name of the generated DbContext, if the mode produced one.
    pub fn dbcontext_file(&self) -> Option<&str> {
        self.dbcontext_file.as_deref()
    }

    /// Entity file names in name order.
    pub fn entity_files(&self) -> impl Iterator<Item = &str> {
        let dbcontext = self.dbcontext_file.as_deref();
        self.files
            .keys()
            .map(String::as_str)
            .filter(move |name| Some(*name) != dbcontext)
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }

    pub fn into_files(self) -> BTreeMap<String, String> {
        self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Outcome of a run that collects per-entity failures instead of aborting.
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub model: ScaffoldedModel,
    pub failures: Vec<EntityFailure>,
}

impl ScaffoldReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// The generated files, or [`GenerationError::EntityFailures`] if any
    /// entity failed.
    pub fn into_result(self) -> GenerationResult<ScaffoldedModel> {
        if self.failures.is_empty() {
            Ok(self.model)
        } else {
            Err(GenerationError::EntityFailures(self.failures))
        }
    }
}

/// Runs the generation pipeline for one configuration.
///
/// Templates are compiled once at construction; [`generate`](Self::generate)
/// can be called for any number of models.
pub struct Scaffolder {
    config: GenerationConfig,
    options: ScaffoldOptions,
    renderer: TemplateRenderer,
}

impl Scaffolder {
    /// Compile every template the configured roles need.
    ///
    /// A missing main template is [`GenerationError::TemplateNotFound`];
    /// missing partials are skipped.
    pub fn new(
        config: GenerationConfig,
        templates: &dyn TemplateFileService,
        options: ScaffoldOptions,
    ) -> GenerationResult<Self> {
        let mut renderer = TemplateRenderer::new(config.helpers(), config.block_helpers());
        let roles = config.roles();
        let language = roles.language.as_ref();

        if roles.dbcontext.is_enabled() {
            load_template(&mut renderer, templates, language.dbcontext_template())?;
            load_partials(&mut renderer, templates, language.dbcontext_partials())?;
        }
        if roles.entity_type.is_enabled() {
            load_template(&mut renderer, templates, language.entity_type_template())?;
            load_partials(&mut renderer, templates, language.entity_type_partials())?;
        }

        if options.mode != config.mode() || options.language != config.language() {
            tracing::debug!(
                mode = %config.mode(),
                language = %config.language(),
                "Options mode/language differ from configuration; using configuration"
            );
        }

        Ok(Self {
            config,
            options,
            renderer,
        })
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn options(&self) -> &ScaffoldOptions {
        &self.options
    }

    /// Generate every output of `model`; any entity failure fails the run.
    pub fn generate(&self, model: &DatabaseModel) -> GenerationResult<ScaffoldedModel> {
        self.generate_report(model)?.into_result()
    }

    /// Generate every output of `model`, collecting per-entity failures.
    ///
    /// Configuration errors and file name collisions still abort the run,
    /// as does the first entity failure when `fail_fast` is set.
    pub fn generate_report(&self, model: &DatabaseModel) -> GenerationResult<ScaffoldReport> {
        let context_name = self.options.context_name_for(model);
        let roles = self.config.roles();
        let (names, name_failures) = EntityNames::resolve(
            self.config.transformers(),
            model,
            roles.language.entity_file_extension(),
        );
        let scope = GenerationScope {
            renderer: &self.renderer,
            transformers: self.config.transformers(),
            names: &names,
            language: roles.language.as_ref(),
            namespace: &self.options.namespace,
            context_name: &context_name,
        };

        tracing::info!(
            model = %model.name,
            entities = model.entity_types.len(),
            mode = %self.config.mode(),
            language = %self.config.language(),
            parallel = self.options.parallel,
            "Scaffolding model"
        );

        let mut collector = Collector::new(self.options.fail_fast);
        for failure in name_failures {
            let origin = failure.entity.clone();
            collector.accept(&origin, Err(failure))?;
        }

        let dbcontext = roles
            .model
            .generate_dbcontext(roles.dbcontext.as_ref(), &scope, model)
            .map_err(|error| EntityFailure {
                entity: context_name.clone(),
                file_name: Some(roles.model.dbcontext_file_name(&context_name)),
                error,
            });
        if let Some(file) = collector.accept(&context_name, dbcontext)? {
            collector.dbcontext_file = Some(file);
        }

        // Entities whose own names failed were recorded above.
        let generate = |entity: &EntityType| {
            if names.is_failed(&entity.name) {
                return Ok(None);
            }
            roles
                .model
                .generate_entity(roles.entity_type.as_ref(), &scope, entity)
        };
        let results: Vec<_> = if self.options.parallel {
            model.entity_types.par_iter().map(generate).collect()
        } else {
            model.entity_types.iter().map(generate).collect()
        };
        for (entity, result) in model.entity_types.iter().zip(results) {
            collector.accept(&entity.name, result)?;
        }

        let report = collector.finish();
        tracing::info!(
            files = report.model.len(),
            failures = report.failures.len(),
            "Scaffolding finished"
        );
        Ok(report)
    }
}

impl fmt::Debug for Scaffolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scaffolder")
            .field("config", &self.config)
            .field("options", &self.options)
            .field("renderer", &self.renderer)
            .finish()
    }
}

fn load_template(
    renderer: &mut TemplateRenderer,
    templates: &dyn TemplateFileService,
    path: &str,
) -> GenerationResult<()> {
    let source = templates
        .retrieve_template(path)
        .ok_or_else(|| GenerationError::TemplateNotFound {
            path: path.to_string(),
        })?;
    renderer.register_template(path, &source)?;
    tracing::debug!(template = path, "Compiled template");
    Ok(())
}

fn load_partials(
    renderer: &mut TemplateRenderer,
    templates: &dyn TemplateFileService,
    partials: &[PartialTemplate],
) -> GenerationResult<()> {
    for partial in partials {
        match templates.retrieve_template(partial.path) {
            Some(source) => renderer.register_partial(partial.name, &source)?,
            None => tracing::debug!(partial = partial.name, path = partial.path, "Partial not provided"),
        }
    }
    Ok(())
}

/// Merges generated files in model order, detecting file name collisions.
struct Collector {
    fail_fast: bool,
    files: BTreeMap<String, String>,
    origins: HashMap<String, String>,
    dbcontext_file: Option<String>,
    failures: Vec<EntityFailure>,
}

impl Collector {
    fn new(fail_fast: bool) -> Self {
        Self {
            fail_fast,
            files: BTreeMap::new(),
            origins: HashMap::new(),
            dbcontext_file: None,
            failures: Vec::new(),
        }
    }

    /// Record one target's outcome; returns the stored file name, if any.
    fn accept(
        &mut self,
        origin: &str,
        result: Result<Option<GeneratedFile>, EntityFailure>,
    ) -> GenerationResult<Option<String>> {
        match result {
            Ok(None) => Ok(None),
            Ok(Some(file)) => {
                if let Some(first) = self.origins.get(&file.file_name) {
                    return Err(GenerationError::FileNameCollision {
                        file_name: file.file_name,
                        first: first.clone(),
                        second: origin.to_string(),
                    });
                }
                self.origins
                    .insert(file.file_name.clone(), origin.to_string());
                self.files.insert(file.file_name.clone(), file.code);
                Ok(Some(file.file_name))
            }
            Err(failure) if failure.error.is_fatal_to_run() => Err(failure.error),
            Err(failure) if self.fail_fast => {
                tracing::error!(
                    entity = %failure.entity,
                    file = ?failure.file_name,
                    error = %failure.error,
                    "Entity generation failed"
                );
                Err(failure.error)
            }
            Err(failure) => {
                tracing::warn!(
                    entity = %failure.entity,
                    file = ?failure.file_name,
                    error = %failure.error,
                    "Entity generation failed"
                );
                self.failures.push(failure);
                Ok(None)
            }
        }
    }

    fn finish(self) -> ScaffoldReport {
        ScaffoldReport {
            model: ScaffoldedModel {
                files: self.files,
                dbcontext_file: self.dbcontext_file,
            },
            failures: self.failures,
        }
    }
}
