use std::path::Path;

use anyhow::Context;
use axum::{http::StatusCode, response::Html};
use minijinja::{path_loader, Environment};
use serde::Serialize;
use tracing::error;

/// Turns a named template plus a context object into markup.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, name: &str, context: &serde_json::Value) -> anyhow::Result<String>;
}

/// Templates loaded from `<dir>/<name>.html`, HTML auto-escaped.
pub struct TemplateDir {
    env: Environment<'static>,
}

impl TemplateDir {
    pub fn new(dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir.to_path_buf()));
        Self { env }
    }
}

impl TemplateRenderer for TemplateDir {
    fn render(&self, name: &str, context: &serde_json::Value) -> anyhow::Result<String> {
        let template = self
            .env
            .get_template(&format!("{name}.html"))
            .with_context(|| format!("load template {name}"))?;
        template
            .render(context)
            .with_context(|| format!("render template {name}"))
    }
}

pub fn render_page<C: Serialize>(
    views: &dyn TemplateRenderer,
    name: &str,
    context: &C,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    let rendered = serde_json::to_value(context)
        .map_err(anyhow::Error::from)
        .and_then(|ctx| views.render(name, &ctx));
    match rendered {
        Ok(html) => Ok(Html(html)),
        Err(e) => {
            error!(error = %e, template = name, "render failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"))
        }
    }
}
