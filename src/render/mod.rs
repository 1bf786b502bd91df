//! Template rendering
//!
//! Renders the intermediate document through a Handlebars template loaded from
//! a template directory. Output is reStructuredText, so HTML escaping is off.
//!
//! Helpers available to templates:
//! - `underline value "="` repeats the marker to the display width of `value`,
//!   for RST section titles
//! - `upper value` upper-cases a value

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, no_escape,
};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing::debug;

/// Error type for template operations
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template '{name}' not found in {}", .dir.display())]
    TemplateNotFound { dir: PathBuf, name: String },
    #[error("Failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid template '{name}': {message}")]
    Template { name: String, message: String },
    #[error("Failed to render template '{name}': {message}")]
    Render { name: String, message: String },
}

/// Handlebars renderer bound to one template directory
pub struct TemplateRenderer {
    template_dir: PathBuf,
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(no_escape);
        handlebars.register_helper("underline", Box::new(underline_helper));
        handlebars.register_helper("upper", Box::new(upper_helper));

        Self {
            template_dir: template_dir.into(),
            handlebars,
        }
    }

    pub fn template_path(&self, name: &str) -> PathBuf {
        self.template_dir.join(name)
    }

    /// Load and compile a template from the template directory.
    pub fn load_template(&mut self, name: &str) -> Result<(), RenderError> {
        let path = self.template_path(name);
        if !path.is_file() {
            return Err(RenderError::TemplateNotFound {
                dir: self.template_dir.clone(),
                name: name.to_string(),
            });
        }

        let source = std::fs::read_to_string(&path).map_err(|e| RenderError::Io {
            path: path.clone(),
            source: e,
        })?;
        self.handlebars
            .register_template_string(name, source)
            .map_err(|e| RenderError::Template {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        debug!(template = %path.display(), "Loaded template");
        Ok(())
    }

    /// Render a loaded template with `data` as the whole context.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, RenderError> {
        if !self.handlebars.has_template(name) {
            return Err(RenderError::TemplateNotFound {
                dir: self.template_dir.clone(),
                name: name.to_string(),
            });
        }
        self.handlebars
            .render(name, data)
            .map_err(|e| RenderError::Render {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn underline_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text = h.param(0).map(|v| value_text(v.value())).unwrap_or_default();
    let marker = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("=");
    out.write(&marker.repeat(text.chars().count()))?;
    Ok(())
}

fn upper_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text = h.param(0).map(|v| value_text(v.value())).unwrap_or_default();
    out.write(&text.to_uppercase())?;
    Ok(())
}
