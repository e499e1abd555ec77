//! `templates`: list or export the bundled templates.

use std::fs;
use std::path::Path;

use anyhow::Context;
use hbs_scaffold::InMemoryTemplateFileService;

use crate::TemplateCommands;

pub(crate) fn handle_template_command(cmd: TemplateCommands) -> anyhow::Result<()> {
    let bundled = InMemoryTemplateFileService::bundled();
    match cmd {
        TemplateCommands::List => {
            for (path, _) in bundled.iter() {
                println!("{path}");
            }
            Ok(())
        }
        TemplateCommands::Export { out, force } => export(&bundled, &out, force),
    }
}

fn export(bundled: &InMemoryTemplateFileService, out: &Path, force: bool) -> anyhow::Result<()> {
    let mut written = 0;
    for (path, source) in bundled.iter() {
        let dest = out.join(path);
        if dest.exists() && !force {
            eprintln!("Skipping existing {} (use --force to overwrite)", dest.display());
            continue;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }
        fs::write(&dest, source)
            .with_context(|| format!("Failed to write template '{}'", dest.display()))?;
        written += 1;
    }
    eprintln!("Exported {written} template(s) to {}", out.display());
    Ok(())
}
