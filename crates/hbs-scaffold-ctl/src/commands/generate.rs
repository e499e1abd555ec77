//! `generate`: model JSON + templates → source files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use hbs_scaffold::options::OPTIONS_FILENAME;
use hbs_scaffold::{
    load_options, DatabaseModel, GenerationBuilder, InMemoryTemplateFileService, ScaffoldOptions,
    Scaffolder, TemplateFileService,
};

use crate::template_dir::DirectoryTemplateFileService;
use crate::GenerateArgs;

pub(crate) fn handle_generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    let options = resolve_options(&args)?;
    let model = read_model(&args.model)?;

    let templates: Box<dyn TemplateFileService> = match &args.templates {
        Some(dir) => Box::new(
            DirectoryTemplateFileService::new(dir)
                .with_fallback(InMemoryTemplateFileService::bundled()),
        ),
        None => Box::new(InMemoryTemplateFileService::bundled()),
    };

    let config = GenerationBuilder::from_options(&options).build()?;
    let scaffolder = Scaffolder::new(config, templates.as_ref(), options)?;
    let report = scaffolder.generate_report(&model)?;

    match &args.out {
        Some(dir) => write_files(dir, report.model.files())?,
        None => print_files(report.model.files()),
    }

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("Error: {failure}");
        }
        bail!(
            "{} entity type(s) failed to generate",
            report.failures.len()
        );
    }
    Ok(())
}

/// Options file (explicit, or `./scaffold.toml` when present) with
/// command-line flags layered on top.
fn resolve_options(args: &GenerateArgs) -> anyhow::Result<ScaffoldOptions> {
    let mut options = match &args.options {
        Some(path) => load_options(path)?,
        None if Path::new(OPTIONS_FILENAME).is_file() => load_options(Path::new(OPTIONS_FILENAME))?,
        None => ScaffoldOptions::default(),
    };

    if let Some(mode) = args.mode {
        options.mode = mode;
    }
    if let Some(language) = args.language {
        options.language = language;
    }
    if let Some(namespace) = &args.namespace {
        options.namespace = namespace.clone();
    }
    if let Some(context_name) = &args.context_name {
        options.context_name = Some(context_name.clone());
    }
    if let Some(naming) = args.naming {
        options.naming = naming;
    }
    options.fail_fast |= args.fail_fast;
    options.parallel |= args.parallel;
    Ok(options)
}

fn read_model(path: &Path) -> anyhow::Result<DatabaseModel> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read model file '{}'", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse model JSON '{}'", path.display()))
}

fn write_files(dir: &Path, files: &BTreeMap<String, String>) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory '{}'", dir.display()))?;
    for (file_name, code) in files {
        let path = dir.join(file_name);
        fs::write(&path, code)
            .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
        tracing::debug!(file = %path.display(), "Wrote file");
    }
    eprintln!("Generated {} file(s) in {}", files.len(), dir.display());
    Ok(())
}

fn print_files(files: &BTreeMap<String, String>) {
    for (file_name, code) in files {
        println!("// ---- {file_name} ----");
        print!("{code}");
        if !code.ends_with('\n') {
            println!();
        }
    }
}
