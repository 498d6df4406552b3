//! Card templates rendered with Handlebars.
//!
//! Templates receive the card metadata as a single pre-rendered YAML string,
//! `{{card_data}}`, plus any caller-supplied variables. Output is not HTML-escaped.

use handlebars::Handlebars;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::error::template::render_failed;

/// Variables passed to a template, by name.
pub type TemplateVars = Map<String, Value>;

/// Name of the variable holding the card's YAML metadata.
pub const CARD_DATA_VAR: &str = "card_data";

/// Renders template text with a set of variables.
pub trait TemplateRenderer {
    fn render(&self, template: &str, vars: &TemplateVars) -> Result<String>;
}

/// [`TemplateRenderer`] backed by Handlebars, in non-strict mode.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_escape_fn(handlebars::no_escape);
        Self { registry }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, vars: &TemplateVars) -> Result<String> {
        self.registry
            .render_template(template, vars)
            .map_err(render_failed)
    }
}

/// Parse `KEY=VALUE` into a template variable. Values are kept as strings.
pub fn parse_var(input: &str) -> Option<(String, Value)> {
    let (key, value) = input.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), Value::String(value.to_string())))
}
