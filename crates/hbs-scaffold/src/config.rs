//! Generation configuration: role wiring, helper registries and transformers.
//!
//! Built once through [`GenerationBuilder`] and read-only afterwards. The
//! builder is ordering-sensitive: `configure_generation` must come first.
//!
//! ```
//! use hbs_scaffold::{helper_fn, GenerationBuilder, LanguageMode, ReverseEngineerMode};
//!
//! let config = GenerationBuilder::new()
//!     .configure_generation(ReverseEngineerMode::DbContextAndEntities, LanguageMode::CSharp)
//!     .register_helpers([(
//!         "quote",
//!         helper_fn(|out, _ctx, args| {
//!             write!(out, "\"{}\"", args.first().and_then(|v| v.as_str()).unwrap_or_default())?;
//!             Ok(())
//!         }),
//!     )])?
//!     .build()?;
//! assert!(config.helpers().contains("spaces"));
//! assert!(config.helpers().contains("quote"));
//! # Ok::<(), hbs_scaffold::GenerationError>(())
//! ```

use std::fmt;

use crate::error::{GenerationError, GenerationResult};
use crate::helpers::{is_reserved, BlockHelperFn, BlockHelperRegistry, HelperFn, HelperRegistry};
use crate::language::{select_roles, LanguageMode, ReverseEngineerMode, RoleBindings};
use crate::options::ScaffoldOptions;
use crate::transform::TransformerSet;

/// Immutable configuration for generation runs. Cheap to clone.
#[derive(Clone)]
pub struct GenerationConfig {
    mode: ReverseEngineerMode,
    language: LanguageMode,
    roles: RoleBindings,
    helpers: HelperRegistry,
    block_helpers: BlockHelperRegistry,
    transformers: TransformerSet,
}

impl GenerationConfig {
    pub fn builder() -> GenerationBuilder {
        GenerationBuilder::new()
    }

    pub fn mode(&self) -> ReverseEngineerMode {
        self.mode
    }

    pub fn language(&self) -> LanguageMode {
        self.language
    }

    pub fn roles(&self) -> &RoleBindings {
        &self.roles
    }

    pub fn helpers(&self) -> &HelperRegistry {
        &self.helpers
    }

    pub fn block_helpers(&self) -> &BlockHelperRegistry {
        &self.block_helpers
    }

    pub fn transformers(&self) -> &TransformerSet {
        &self.transformers
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("mode", &self.mode)
            .field("language", &self.language)
            .field("roles", &self.roles)
            .field("helpers", &self.helpers)
            .field("block_helpers", &self.block_helpers)
            .field("transformers", &self.transformers)
            .finish()
    }
}

/// Registration surface for a [`GenerationConfig`].
#[derive(Debug, Default)]
pub struct GenerationBuilder {
    configured: Option<GenerationConfig>,
}

impl GenerationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure mode, language and the naming preset from options.
    pub fn from_options(options: &ScaffoldOptions) -> Self {
        let mut builder = Self::new().configure_generation(options.mode, options.language);
        if let Some(config) = builder.configured.as_mut() {
            config.transformers = TransformerSet::for_naming(options.naming);
        }
        builder
    }

    /// Wire every role for `(mode, language)` and seed the helper registry
    /// with the built-ins followed by the language's helpers.
    ///
    /// Calling this again starts over and discards earlier registrations.
    pub fn configure_generation(mut self, mode: ReverseEngineerMode, language: LanguageMode) -> Self {
        if self.configured.is_some() {
            tracing::warn!(%mode, %language, "Reconfiguring generation; earlier registrations are discarded");
        }

        let roles = select_roles(mode, language);
        let mut helpers = HelperRegistry::new();
        helpers.extend(roles.language.helpers());

        self.configured = Some(GenerationConfig {
            mode,
            language,
            roles,
            helpers,
            block_helpers: BlockHelperRegistry::new(),
            transformers: TransformerSet::new(),
        });
        self
    }

    /// Merge caller helpers; later names override earlier ones, including
    /// built-in and language helpers.
    ///
    /// Names of Handlebars built-ins (`if`, `each`, ...) are rejected; see
    /// [`RESERVED_HELPER_NAMES`](crate::helpers::RESERVED_HELPER_NAMES).
    pub fn register_helpers<I, S>(mut self, helpers: I) -> GenerationResult<Self>
    where
        I: IntoIterator<Item = (S, HelperFn)>,
        S: Into<String>,
    {
        let config = self.configured_mut("register_helpers")?;
        let helpers = unreserved(helpers)?;
        config.helpers.extend(helpers);
        Ok(self)
    }

    pub fn register_block_helpers<I, S>(mut self, helpers: I) -> GenerationResult<Self>
    where
        I: IntoIterator<Item = (S, BlockHelperFn)>,
        S: Into<String>,
    {
        let config = self.configured_mut("register_block_helpers")?;
        let helpers = unreserved(helpers)?;
        config.block_helpers.extend(helpers);
        Ok(self)
    }

    /// Replace the active transformer set.
    pub fn register_transformers(mut self, transformers: TransformerSet) -> GenerationResult<Self> {
        self.configured_mut("register_transformers")?.transformers = transformers;
        Ok(self)
    }

    pub fn build(self) -> GenerationResult<GenerationConfig> {
        let config = self.configured.ok_or_else(|| {
            GenerationError::configuration("no roles wired: call configure_generation first")
        })?;
        tracing::debug!(
            mode = %config.mode,
            language = %config.language,
            helpers = config.helpers.len(),
            block_helpers = config.block_helpers.len(),
            "Generation configured"
        );
        Ok(config)
    }

    fn configured_mut(&mut self, operation: &str) -> GenerationResult<&mut GenerationConfig> {
        self.configured.as_mut().ok_or_else(|| {
            GenerationError::configuration(format!(
                "{operation} called before configure_generation: call configure_generation first"
            ))
        })
    }
}

/// Collect `helpers`, failing on the first reserved name.
fn unreserved<I, S, F>(helpers: I) -> GenerationResult<Vec<(String, F)>>
where
    I: IntoIterator<Item = (S, F)>,
    S: Into<String>,
{
    helpers
        .into_iter()
        .map(|(name, helper)| {
            let name = name.into();
            if is_reserved(&name) {
                Err(GenerationError::configuration(format!(
                    "helper name '{name}' is reserved for a Handlebars built-in"
                )))
            } else {
                Ok((name, helper))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{block_helper_fn, helper_fn};
    use crate::language::TS_TYPE_HELPER;
    use crate::transform::NamingConvention;

    fn configured(language: LanguageMode) -> GenerationBuilder {
        GenerationBuilder::new()
            .configure_generation(ReverseEngineerMode::DbContextAndEntities, language)
    }

    #[test]
    fn test_build_without_configure_fails() {
        let err = GenerationBuilder::new().build().unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
    }

    #[test]
    fn test_registration_before_configure_fails() {
        let helpers = GenerationBuilder::new().register_helpers([("x", helper_fn(|_, _, _| Ok(())))]);
        assert!(matches!(helpers, Err(GenerationError::Configuration(_))));

        let blocks = GenerationBuilder::new()
            .register_block_helpers([("x", block_helper_fn(|_, _, _, _| Ok(())))]);
        assert!(matches!(blocks, Err(GenerationError::Configuration(_))));

        let transformers = GenerationBuilder::new().register_transformers(TransformerSet::new());
        match transformers {
            Err(GenerationError::Configuration(msg)) => {
                assert!(msg.contains("call configure_generation first"))
            }
            other => panic!("Expected Configuration error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_after_configure() {
        let config = configured(LanguageMode::CSharp).build().unwrap();
        assert_eq!(config.mode(), ReverseEngineerMode::DbContextAndEntities);
        assert_eq!(config.language(), LanguageMode::CSharp);
        let names: Vec<_> = config.helpers().names().collect();
        assert_eq!(names, ["spaces"]);
        assert!(config.block_helpers().is_empty());
        assert!(config.transformers().is_identity());
    }

    #[test]
    fn test_typescript_adds_language_helpers() {
        let config = configured(LanguageMode::TypeScript).build().unwrap();
        assert!(config.helpers().contains("spaces"));
        assert!(config.helpers().contains(TS_TYPE_HELPER));
    }

    #[test]
    fn test_caller_helpers_layer_last() {
        let config = configured(LanguageMode::TypeScript)
            .register_helpers([
                ("spaces", helper_fn(|out, _, _| Ok(out.write_str("\t")?))),
                (TS_TYPE_HELPER, helper_fn(|out, _, _| Ok(out.write_str("unknown")?))),
            ])
            .unwrap()
            .register_helpers([("extra", helper_fn(|_, _, _| Ok(())))])
            .unwrap()
            .build()
            .unwrap();

        let mut out = String::new();
        let spaces = config.helpers().resolve("spaces").unwrap();
        spaces(&mut out, &serde_json::Value::Null, &[serde_json::json!(4)]).unwrap();
        assert_eq!(out, "\t");
        assert_eq!(config.helpers().len(), 3);
    }

    #[test]
    fn test_reconfigure_discards_registrations() {
        let config = configured(LanguageMode::CSharp)
            .register_helpers([("extra", helper_fn(|_, _, _| Ok(())))])
            .unwrap()
            .configure_generation(ReverseEngineerMode::EntitiesOnly, LanguageMode::CSharp)
            .build()
            .unwrap();
        assert!(!config.helpers().contains("extra"));
        assert_eq!(config.mode(), ReverseEngineerMode::EntitiesOnly);
    }

    #[test]
    fn test_from_options_applies_naming_preset() {
        let options = ScaffoldOptions {
            mode: ReverseEngineerMode::EntitiesOnly,
            language: LanguageMode::TypeScript,
            naming: NamingConvention::Pascal,
            ..Default::default()
        };
        let config = GenerationBuilder::from_options(&options).build().unwrap();
        assert_eq!(config.language(), LanguageMode::TypeScript);
        assert!(!config.roles().dbcontext.is_enabled());
        assert_eq!(
            config.transformers().transform_entity_name("order_line").unwrap(),
            "OrderLine"
        );
    }

    #[test]
    fn test_config_is_send_sync_and_clone() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<GenerationConfig>();
    }

    #[test]
    fn test_reserved_helper_names_are_rejected() {
        let inline = configured(LanguageMode::CSharp)
            .register_helpers([("each", helper_fn(|_, _, _| Ok(())))]);
        match inline {
            Err(GenerationError::Configuration(msg)) => assert!(msg.contains("'each'"), "{msg}"),
            other => panic!("Expected Configuration error, got {other:?}"),
        }

        let block = configured(LanguageMode::CSharp)
            .register_block_helpers([("if", block_helper_fn(|_, _, _, _| Ok(())))]);
        assert!(matches!(block, Err(GenerationError::Configuration(_))));

        let missing = configured(LanguageMode::CSharp)
            .register_helpers([("helperMissing", helper_fn(|_, _, _| Ok(())))]);
        assert!(matches!(missing, Err(GenerationError::Configuration(_))));
    }
}
