use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::{LanguageMode, PartialTemplate, TemplateLanguageService};
use crate::helpers::{HelperFn, HelperResult};

/// Name of the helper mapping a semantic type to its TypeScript name.
pub const TS_TYPE_HELPER: &str = "ts-type";

const ENTITY_TYPE_TEMPLATE: &str = "TypeScriptEntityType/Interface.hbs";

const ENTITY_TYPE_PARTIALS: &[PartialTemplate] = &[
    PartialTemplate::new("imports", "TypeScriptEntityType/Partials/Imports.hbs"),
    PartialTemplate::new("constructor", "TypeScriptEntityType/Partials/Constructor.hbs"),
    PartialTemplate::new("properties", "TypeScriptEntityType/Partials/Properties.hbs"),
];

/// TypeScript entity interfaces (`.ts`). The DbContext stays C#.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptTemplateLanguageService;

impl TemplateLanguageService for TypeScriptTemplateLanguageService {
    fn language(&self) -> LanguageMode {
        LanguageMode::TypeScript
    }

    fn entity_file_extension(&self) -> &'static str {
        "ts"
    }

    fn entity_type_template(&self) -> &'static str {
        ENTITY_TYPE_TEMPLATE
    }

    fn entity_type_partials(&self) -> &'static [PartialTemplate] {
        ENTITY_TYPE_PARTIALS
    }

    // Nullability is left to templates (`{{#if property_is_nullable}}`).
    fn type_name(&self, clr_type: &str, _nullable: bool) -> String {
        typescript_type(clr_type).to_string()
    }

    fn collection_type(&self, element: &str) -> String {
        format!("{element}[]")
    }

    fn helpers(&self) -> Vec<(&'static str, HelperFn)> {
        vec![(TS_TYPE_HELPER, Arc::new(ts_type) as HelperFn)]
    }
}

fn typescript_type(clr_type: &str) -> &'static str {
    match clr_type.trim().trim_end_matches('?') {
        "byte" | "sbyte" | "short" | "ushort" | "int" | "uint" | "long" | "ulong" | "float"
        | "double" | "decimal" => "number",
        "string" | "char" | "Guid" | "TimeSpan" => "string",
        "bool" => "boolean",
        "DateTime" | "DateTimeOffset" | "DateOnly" => "Date",
        _ => "any",
    }
}

/// `{{ts-type "int"}}` writes `number`.
pub fn ts_type(out: &mut dyn fmt::Write, _context: &Value, args: &[Value]) -> HelperResult {
    let clr_type = args
        .first()
        .and_then(Value::as_str)
        .ok_or("ts-type helper expects a type name argument")?;
    out.write_str(typescript_type(clr_type))?;
    Ok(())
}
