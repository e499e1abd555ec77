//! Block invocation options handed to block helpers.

use std::collections::BTreeMap;
use std::fmt;

use handlebars::{
    BlockContext, Context, Handlebars, Helper, RenderContext, RenderError, RenderErrorReason,
    Renderable, StringOutput, Template,
};
use serde_json::Value;

/// Renders the block or inverse section of one helper invocation.
pub(crate) trait BlockRenderer {
    fn render(&mut self, inverse: bool, data: Option<&Value>) -> Result<String, RenderError>;

    fn has_inverse(&self) -> bool;
}

/// Access to the block a block helper was invoked with.
///
/// `{{#name args}}block{{else}}inverse{{/name}}`: the helper decides whether
/// and how many times `block` or `inverse` is rendered, optionally with a
/// different data context for each pass.
pub struct BlockOptions<'a> {
    name: String,
    hash: BTreeMap<String, Value>,
    renderer: &'a mut (dyn BlockRenderer + 'a),
}

impl<'a> BlockOptions<'a> {
    pub(crate) fn new(
        name: String,
        hash: BTreeMap<String, Value>,
        renderer: &'a mut (dyn BlockRenderer + 'a),
    ) -> Self {
        Self {
            name,
            hash,
            renderer,
        }
    }

    /// Name the helper was invoked under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Named (`key=value`) argument of the invocation.
    pub fn hash(&self, key: &str) -> Option<&Value> {
        self.hash.get(key)
    }

    pub fn has_inverse(&self) -> bool {
        self.renderer.has_inverse()
    }

    /// Render the enclosed block. With `data`, the block sees `data` as its
    /// current context (`{{this}}`, `{{field}}`); otherwise the caller's context.
    pub fn render_block(&mut self, data: Option<&Value>) -> Result<String, RenderError> {
        self.renderer.render(false, data)
    }

    /// Render the `{{else}}` branch, if any.
    pub fn render_inverse(&mut self, data: Option<&Value>) -> Result<String, RenderError> {
        self.renderer.render(true, data)
    }
}

impl fmt::Debug for BlockOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockOptions")
            .field("name", &self.name)
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

/// [`BlockRenderer`] over a live Handlebars helper invocation.
pub(crate) struct HandlebarsBlock<'h, 'reg, 'rc> {
    pub helper: &'h Helper<'rc>,
    pub registry: &'reg Handlebars<'reg>,
    pub context: &'rc Context,
    pub render_context: &'h mut RenderContext<'reg, 'rc>,
}

impl<'h, 'reg: 'rc, 'rc> HandlebarsBlock<'h, 'reg, 'rc> {
    fn render_template(
        &mut self,
        template: &'rc Template,
        data: Option<&Value>,
    ) -> Result<String, RenderError> {
        let mut out = StringOutput::new();
        match data {
            Some(data) => {
                let mut block = BlockContext::new();
                block.set_base_value(data.clone());
                self.render_context.push_block(block);
                let rendered =
                    template.render(self.registry, self.context, self.render_context, &mut out);
                self.render_context.pop_block();
                rendered?;
            }
            None => template.render(self.registry, self.context, self.render_context, &mut out)?,
        }

        out.into_string()
            .map_err(|e| RenderErrorReason::Other(e.to_string()).into())
    }
}

impl<'h, 'reg: 'rc, 'rc> BlockRenderer for HandlebarsBlock<'h, 'reg, 'rc> {
    fn render(&mut self, inverse: bool, data: Option<&Value>) -> Result<String, RenderError> {
        let template = if inverse {
            self.helper.inverse()
        } else {
            self.helper.template()
        };
        match template {
            Some(template) => self.render_template(template, data),
            None => Ok(String::new()),
        }
    }

    fn has_inverse(&self) -> bool {
        self.helper.inverse().is_some()
    }
}
