//! Command handlers for hbs-scaffold-ctl

pub(crate) mod generate;
pub(crate) mod templates;

pub(crate) use generate::handle_generate_command;
pub(crate) use templates::handle_template_command;
