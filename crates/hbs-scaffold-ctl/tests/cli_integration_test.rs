//! Integration tests for the hbs-scaffold-ctl binary.
//!
//! Writes a model (and optionally templates/options) into a temp directory and
//! runs the compiled binary against it: model JSON → templates → output files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const MODEL: &str = r#"{
  "name": "Shop",
  "entity_types": [
    {
      "name": "order",
      "properties": [
        { "name": "id", "clr_type": "int", "is_key": true },
        { "name": "customer_name", "clr_type": "string" }
      ],
      "navigations": [
        { "name": "order_lines", "target_entity": "order_line", "is_collection": true }
      ]
    },
    {
      "name": "order_line",
      "properties": [
        { "name": "id", "clr_type": "int", "is_key": true },
        { "name": "quantity", "clr_type": "int", "nullable": true }
      ]
    }
  ]
}"#;

/// Get the path to the compiled hbs-scaffold-ctl binary.
fn scaffold_ctl_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_hbs-scaffold-ctl"))
}

fn run_scaffold_ctl(work_dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(scaffold_ctl_bin())
        .args(args)
        .current_dir(work_dir)
        .output()
        .expect("Failed to execute hbs-scaffold-ctl")
}

fn write_model(dir: &Path) {
    fs::write(dir.join("model.json"), MODEL).unwrap();
}

// ==========================================================================
// generate
// ==========================================================================

#[test]
fn test_generate_with_bundled_templates() {
    let temp = TempDir::new().unwrap();
    write_model(temp.path());

    let output = run_scaffold_ctl(
        temp.path(),
        &["generate", "--model", "model.json", "--out", "out", "--naming", "pascal"],
    );
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = temp.path().join("out");
    let mut names: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, ["Order.cs", "OrderLine.cs", "ShopContext.cs"]);

    let order = fs::read_to_string(out.join("Order.cs")).unwrap();
    assert!(order.contains("        public string CustomerName { get; set; }"));
    assert!(order.contains("        public virtual ICollection<OrderLine> OrderLines { get; set; }"));

    let order_line = fs::read_to_string(out.join("OrderLine.cs")).unwrap();
    assert!(order_line.contains("        public int? Quantity { get; set; }"));
}

#[test]
fn test_generate_typescript_to_stdout() {
    let temp = TempDir::new().unwrap();
    write_model(temp.path());

    let output = run_scaffold_ctl(
        temp.path(),
        &[
            "generate",
            "--model",
            "model.json",
            "--language",
            "ts",
            "--mode",
            "entities-only",
            "--naming",
            "camel",
        ],
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("// ---- Order.ts ----"));
    assert!(stdout.contains("// ---- OrderLine.ts ----"));
    assert!(!stdout.contains("ShopContext"));
    assert!(stdout.contains("  orderLines?: OrderLine[];"));
    assert!(stdout.contains("  quantity?: number;"));
}

#[test]
fn test_generate_reads_options_file_from_working_directory() {
    let temp = TempDir::new().unwrap();
    write_model(temp.path());
    fs::write(
        temp.path().join("scaffold.toml"),
        "mode = \"db-context-only\"\nnamespace = \"Shop.Data\"\ncontext-name = \"StoreContext\"\n",
    )
    .unwrap();

    let output = run_scaffold_ctl(temp.path(), &["generate", "--model", "model.json", "--out", "out"]);
    assert!(output.status.success());

    let out = temp.path().join("out");
    assert_eq!(fs::read_dir(&out).unwrap().count(), 1);
    let context = fs::read_to_string(out.join("StoreContext.cs")).unwrap();
    assert!(context.contains("namespace Shop.Data"));
    assert!(context.contains("    public partial class StoreContext : DbContext"));
}

#[test]
fn test_generate_with_custom_template_directory() {
    let temp = TempDir::new().unwrap();
    write_model(temp.path());
    let templates = temp.path().join("templates").join("CSharpEntityType");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("Class.hbs"), "// {{class_name}} in {{namespace}}\n").unwrap();

    let output = run_scaffold_ctl(
        temp.path(),
        &[
            "generate",
            "--model",
            "model.json",
            "--templates",
            "templates",
            "--namespace",
            "Custom",
            "--out",
            "out",
        ],
    );
    assert!(output.status.success());

    let out = temp.path().join("out");
    assert_eq!(fs::read_to_string(out.join("order.cs")).unwrap(), "// order in Custom\n");
    // DbContext template falls back to the bundled one
    assert!(fs::read_to_string(out.join("ShopContext.cs"))
        .unwrap()
        .contains("public partial class ShopContext : DbContext"));
}

#[test]
fn test_generate_reports_entity_failures() {
    let temp = TempDir::new().unwrap();
    write_model(temp.path());
    let templates = temp.path().join("templates").join("CSharpEntityType");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("Class.hbs"), "{{pluralize class_name}}").unwrap();

    let output = run_scaffold_ctl(
        temp.path(),
        &[
            "generate",
            "--model",
            "model.json",
            "--templates",
            "templates",
            "--mode",
            "entities-only",
        ],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pluralize"), "stderr: {stderr}");
    assert!(stderr.contains("2 entity type(s) failed to generate"), "stderr: {stderr}");
}

#[test]
fn test_generate_rejects_unknown_language() {
    let temp = TempDir::new().unwrap();
    write_model(temp.path());

    let output = run_scaffold_ctl(
        temp.path(),
        &["generate", "--model", "model.json", "--language", "cobol"],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("cobol"));
}

#[test]
fn test_generate_missing_model_file() {
    let temp = TempDir::new().unwrap();
    let output = run_scaffold_ctl(temp.path(), &["generate", "--model", "missing.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read model file"));
}

// ==========================================================================
// templates
// ==========================================================================

#[test]
fn test_templates_list() {
    let temp = TempDir::new().unwrap();
    let output = run_scaffold_ctl(temp.path(), &["templates", "list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let paths: Vec<_> = stdout.lines().collect();
    assert!(paths.contains(&"CSharpDbContext/DbContext.hbs"));
    assert!(paths.contains(&"CSharpEntityType/Class.hbs"));
    assert!(paths.contains(&"TypeScriptEntityType/Interface.hbs"));
}

#[test]
fn test_templates_export_then_generate() {
    let temp = TempDir::new().unwrap();
    write_model(temp.path());

    let output = run_scaffold_ctl(temp.path(), &["templates", "export", "--out", "templates"]);
    assert!(output.status.success());
    assert!(temp.path().join("templates/CSharpEntityType/Partials/Properties.hbs").is_file());

    // existing files are left alone without --force
    let class = temp.path().join("templates/CSharpEntityType/Class.hbs");
    fs::write(&class, "edited {{class_name}}").unwrap();
    let output = run_scaffold_ctl(temp.path(), &["templates", "export", "--out", "templates"]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(&class).unwrap(), "edited {{class_name}}");

    let output = run_scaffold_ctl(
        temp.path(),
        &[
            "generate",
            "--model",
            "model.json",
            "--templates",
            "templates",
            "--mode",
            "entities-only",
            "--out",
            "out",
        ],
    );
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(temp.path().join("out/order.cs")).unwrap(),
        "edited order"
    );
}
