//! Server-side HTML rendering.
//!
//! Templates live in `backend/templates` and are compiled into the binary.
//! Names ending in `.html` are autoescaped.

use minijinja::Environment;
use serde::Serialize;
use tracing::error;

use crate::domain::Error;

const TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../../../templates/base.html")),
    (
        "dashboard.html",
        include_str!("../../../templates/dashboard.html"),
    ),
    (
        "dashboard/analytics.html",
        include_str!("../../../templates/dashboard/analytics.html"),
    ),
];

/// Renders the embedded page templates.
#[derive(Debug)]
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Load and parse every embedded template.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error encountered.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render `name` with `context`.
    ///
    /// Missing templates and runtime template failures become internal
    /// errors; the detail is logged, not returned to clients.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, Error> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(context))
            .map_err(|err| {
                error!(template = name, error = %err, "template rendering failed");
                Error::internal(format!("failed to render template {name}: {err}"))
            })
    }
}
