//! Named inline helpers and block helpers injected into every template.
//!
//! A helper writes text to an output sink given the template's context
//! variables and the positional arguments from the template call site:
//!
//! ```text
//! {{spaces 4}}public {{property_type}} {{property_name}} { get; set; }
//! ```
//!
//! Block helpers additionally receive [`BlockOptions`], which render the
//! enclosed block (or its `{{else}}` branch) zero or more times.

mod block;
mod builtin;
mod registry;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;

pub use block::BlockOptions;
pub(crate) use block::HandlebarsBlock;
pub use builtin::{spaces, MAX_SPACES, SPACES_HELPER};
pub use registry::{BlockHelperRegistry, HelperRegistry, Registry, RegistryKind};

/// Handlebars built-ins and dispatch hooks. Caller helpers may not use
/// these names.
pub const RESERVED_HELPER_NAMES: &[&str] = &[
    "if",
    "unless",
    "each",
    "with",
    "lookup",
    "raw",
    "log",
    "helperMissing",
    "blockHelperMissing",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_HELPER_NAMES.contains(&name)
}

/// Result of a helper invocation.
pub type HelperResult = Result<(), BoxError>;

/// Inline helper: `(output, context, args) -> writes text`.
pub type HelperFn = Arc<dyn Fn(&mut dyn fmt::Write, &Value, &[Value]) -> HelperResult + Send + Sync>;

/// Block helper: `(output, options, context, args) -> writes text`.
pub type BlockHelperFn = Arc<
    dyn Fn(&mut dyn fmt::Write, &mut BlockOptions<'_>, &Value, &[Value]) -> HelperResult
        + Send
        + Sync,
>;

/// Wrap a closure as a [`HelperFn`].
pub fn helper_fn<F>(f: F) -> HelperFn
where
    F: Fn(&mut dyn fmt::Write, &Value, &[Value]) -> HelperResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a [`BlockHelperFn`].
pub fn block_helper_fn<F>(f: F) -> BlockHelperFn
where
    F: Fn(&mut dyn fmt::Write, &mut BlockOptions<'_>, &Value, &[Value]) -> HelperResult
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}
