use super::{LanguageMode, PartialTemplate, TemplateLanguageService};

const ENTITY_TYPE_TEMPLATE: &str = "CSharpEntityType/Class.hbs";

const ENTITY_TYPE_PARTIALS: &[PartialTemplate] = &[
    PartialTemplate::new("imports", "CSharpEntityType/Partials/Imports.hbs"),
    PartialTemplate::new("constructor", "CSharpEntityType/Partials/Constructor.hbs"),
    PartialTemplate::new("properties", "CSharpEntityType/Partials/Properties.hbs"),
];

/// Value types that take a `?` suffix when nullable.
const VALUE_TYPES: &[&str] = &[
    "bool",
    "byte",
    "sbyte",
    "char",
    "short",
    "ushort",
    "int",
    "uint",
    "long",
    "ulong",
    "float",
    "double",
    "decimal",
    "DateTime",
    "DateTimeOffset",
    "DateOnly",
    "TimeOnly",
    "TimeSpan",
    "Guid",
];

/// C# entity classes (`.cs`).
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpTemplateLanguageService;

impl TemplateLanguageService for CSharpTemplateLanguageService {
    fn language(&self) -> LanguageMode {
        LanguageMode::CSharp
    }

    fn entity_file_extension(&self) -> &'static str {
        "cs"
    }

    fn entity_type_template(&self) -> &'static str {
        ENTITY_TYPE_TEMPLATE
    }

    fn entity_type_partials(&self) -> &'static [PartialTemplate] {
        ENTITY_TYPE_PARTIALS
    }

    fn type_name(&self, clr_type: &str, nullable: bool) -> String {
        let base = clr_type.trim_end_matches('?');
        if nullable && VALUE_TYPES.contains(&base) {
            format!("{base}?")
        } else {
            clr_type.to_string()
        }
    }

    fn collection_type(&self, element: &str) -> String {
        format!("ICollection<{element}>")
    }
}
