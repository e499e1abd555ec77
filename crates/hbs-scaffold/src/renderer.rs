//! Handlebars-based template renderer with registry-backed helper dispatch.
//!
//! Unknown names never render as empty text. `{{name args}}` and
//! `{{#name}}..{{/name}}` fail when no helper is registered under `name`, and
//! a bare `{{name}}` fails when it is neither a helper nor a context value
//! (values that are present but `null` still render as empty).

use std::collections::BTreeSet;
use std::fmt;

use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperDef, Output, RenderContext, RenderError,
    RenderErrorReason,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{BoxError, GenerationError, GenerationResult};
use crate::helpers::{
    is_reserved, BlockHelperFn, BlockHelperRegistry, BlockOptions, HandlebarsBlock, HelperFn,
    HelperRegistry,
};

/// Handlebars hook invoked for names that resolve to neither a helper nor a value.
const HELPER_MISSING: &str = "helperMissing";

/// Name reported for templates rendered from raw source.
pub const INLINE_TEMPLATE: &str = "<inline>";

/// Template renderer bound to one pair of helper registries.
///
/// Named templates and partials are compiled once; rendering takes `&self`
/// so a renderer can be shared across threads.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Build a renderer exposing every helper of both registries.
    pub fn new(helpers: &HelperRegistry, block_helpers: &BlockHelperRegistry) -> Self {
        let mut handlebars = Handlebars::new();
        // Generated source code, not HTML
        handlebars.register_escape_fn(no_escape);

        handlebars.register_helper(HELPER_MISSING, Box::new(MissingHelper));

        let names: BTreeSet<&str> = helpers.names().chain(block_helpers.names()).collect();
        for name in names {
            if is_reserved(name) {
                tracing::warn!(helper = name, "Not registering helper under a reserved name");
                continue;
            }
            let dispatch = HelperDispatch {
                name: name.to_string(),
                inline: helpers.all().get(name).cloned(),
                block: block_helpers.all().get(name).cloned(),
            };
            handlebars.register_helper(name, Box::new(dispatch));
        }

        tracing::debug!(
            helpers = helpers.len(),
            block_helpers = block_helpers.len(),
            "Template renderer created"
        );
        Self { handlebars }
    }

    /// Compile and register a named template.
    pub fn register_template(&mut self, name: &str, source: &str) -> GenerationResult<()> {
        self.handlebars
            .register_template_string(name, source)
            .map_err(|e| GenerationError::render(name, e.to_string()))
    }

    /// Compile and register a partial, usable as `{{> name}}`.
    pub fn register_partial(&mut self, name: &str, source: &str) -> GenerationResult<()> {
        self.handlebars
            .register_partial(name, source)
            .map_err(|e| GenerationError::render(name, e.to_string()))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Render a template registered with [`register_template`](Self::register_template).
    pub fn render_named<T: Serialize>(&self, name: &str, model: &T) -> GenerationResult<String> {
        self.handlebars
            .render(name, model)
            .map_err(|e| map_render_error(name, e))
    }

    /// Render raw template source against `model`.
    pub fn render<T: Serialize>(&self, source: &str, model: &T) -> GenerationResult<String> {
        self.handlebars
            .render_template(source, model)
            .map_err(|e| map_render_error(INLINE_TEMPLATE, e))
    }
}

impl fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut templates: Vec<_> = self.handlebars.get_templates().keys().collect();
        templates.sort();
        f.debug_struct("TemplateRenderer")
            .field("templates", &templates)
            .finish_non_exhaustive()
    }
}

/// One-shot render: `render(template, model, helpers, block_helpers) -> text`.
pub fn render<T: Serialize>(
    source: &str,
    model: &T,
    helpers: &HelperRegistry,
    block_helpers: &BlockHelperRegistry,
) -> GenerationResult<String> {
    TemplateRenderer::new(helpers, block_helpers).render(source, model)
}

fn map_render_error(template: &str, err: RenderError) -> GenerationError {
    match err.reason() {
        RenderErrorReason::HelperNotFound(helper) => GenerationError::UnresolvedHelper {
            helper: helper.clone(),
            template: template.to_string(),
        },
        _ => GenerationError::render(template, err.to_string()),
    }
}

/// Fails every invocation that reached Handlebars' missing-helper hook.
struct MissingHelper;

impl HelperDef for MissingHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        _: &mut dyn Output,
    ) -> handlebars::HelperResult {
        Err(RenderErrorReason::HelperNotFound(h.name().to_string()).into())
    }
}

/// Adapter registered with Handlebars under one helper name.
///
/// Inline and block helpers share the Handlebars namespace, so a single
/// adapter holds whichever kinds are registered and picks by call syntax.
struct HelperDispatch {
    name: String,
    inline: Option<HelperFn>,
    block: Option<BlockHelperFn>,
}

impl HelperDispatch {
    fn wrap_error(&self, err: BoxError) -> RenderError {
        match err.downcast::<RenderError>() {
            Ok(render) => *render,
            Err(other) => {
                RenderErrorReason::Other(format!("helper '{}' failed: {other}", self.name)).into()
            }
        }
    }

    fn not_found(&self) -> RenderError {
        RenderErrorReason::HelperNotFound(self.name.clone()).into()
    }
}

impl HelperDef for HelperDispatch {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> handlebars::HelperResult {
        let args: Vec<Value> = h.params().iter().map(|p| p.value().clone()).collect();
        let mut buffer = String::new();

        if h.is_block() {
            let block = self.block.as_ref().ok_or_else(|| self.not_found())?;
            let hash = h
                .hash()
                .iter()
                .map(|(key, value)| (key.to_string(), value.value().clone()))
                .collect();
            let mut renderer = HandlebarsBlock {
                helper: h,
                registry: r,
                context: ctx,
                render_context: rc,
            };
            let mut options = BlockOptions::new(self.name.clone(), hash, &mut renderer);
            block(&mut buffer, &mut options, ctx.data(), &args)
                .map_err(|e| self.wrap_error(e))?;
        } else {
            let inline = self.inline.as_ref().ok_or_else(|| self.not_found())?;
            inline(&mut buffer, ctx.data(), &args).map_err(|e| self.wrap_error(e))?;
        }

        out.write(&buffer)?;
        Ok(())
    }
}
