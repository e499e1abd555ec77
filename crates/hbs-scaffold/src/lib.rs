//! Template-driven DbContext and entity type source generation.
//!
//! Given a reverse-engineered [`DatabaseModel`], renders one DbContext file and
//! one file per entity type from Handlebars templates. Callers customize the
//! output without forking templates by registering helpers and by renaming
//! model elements through the transformation pipeline.
//!
//! # Modules
//!
//! - [`helpers`] — Named inline and block helper registries (built-in `spaces`)
//! - [`transform`] — Entity name, file name, property and navigation transformers
//! - [`language`] — `(ReverseEngineerMode, LanguageMode)` role selection, C# and TypeScript services
//! - [`renderer`] — Handlebars renderer dispatching to the helper registries
//! - [`generator`] — DbContext, entity type and model generator roles
//! - [`scaffolder`] — Façade producing the file name → code mapping for a model
//! - [`config`] / [`options`] — Registration surface and TOML options
//!
//! # Example
//!
//! ```
//! use hbs_scaffold::{
//!     DatabaseModel, EntityType, GenerationBuilder, InMemoryTemplateFileService, Property,
//!     ScaffoldOptions, Scaffolder,
//! };
//!
//! let templates = InMemoryTemplateFileService::new()
//!     .with_template("CSharpDbContext/DbContext.hbs", "public class {{context_name}} {}")
//!     .with_template(
//!         "CSharpEntityType/Class.hbs",
//!         "public class {{class_name}}\n{\n{{#each properties}}{{spaces 4}}public {{property_type}} {{property_name}} { get; set; }\n{{/each~}}\n}\n",
//!     );
//! let options = ScaffoldOptions::default();
//! let config = GenerationBuilder::from_options(&options).build()?;
//! let scaffolder = Scaffolder::new(config, &templates, options)?;
//!
//! let model = DatabaseModel::new("Shop")
//!     .with_entity(EntityType::new("Order").with_property(Property::new("Id", "int").key()));
//! let output = scaffolder.generate(&model)?;
//!
//! assert_eq!(output.get("ShopContext.cs"), Some("public class ShopContext {}"));
//! assert_eq!(
//!     output.get("Order.cs"),
//!     Some("public class Order\n{\n    public int Id { get; set; }\n}\n")
//! );
//! # Ok::<(), hbs_scaffold::GenerationError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod language;
pub mod model;
pub mod options;
pub mod renderer;
pub mod scaffolder;
pub mod template_files;
pub mod transform;

pub use config::{GenerationBuilder, GenerationConfig};
pub use error::{BoxError, EntityFailure, GenerationError, GenerationResult, TransformRole};
pub use generator::{EntityNames, GeneratedFile, GenerationScope, ResolvedName};
pub use helpers::{
    block_helper_fn, helper_fn, BlockHelperFn, BlockHelperRegistry, BlockOptions, HelperFn,
    HelperRegistry, MAX_SPACES, RESERVED_HELPER_NAMES, SPACES_HELPER,
};
pub use language::{select_roles, LanguageMode, ReverseEngineerMode, RoleBindings};
pub use model::{DatabaseModel, EntityPropertyInfo, EntityType, Navigation, Property};
pub use options::{load_options, OptionsError, ScaffoldOptions};
pub use renderer::TemplateRenderer;
pub use scaffolder::{ScaffoldReport, ScaffoldedModel, Scaffolder};
pub use template_files::{InMemoryTemplateFileService, TemplateFileService};
pub use transform::{NamingConvention, TransformerSet};
