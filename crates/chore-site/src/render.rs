//! Template rendering.
//!
//! The engine is a pure collaborator: template name + context in, rendered
//! text out. Templates are jinja files loaded from the site's `templates/`
//! directory. A `url_path` helper is exposed to templates for building
//! root-relative links.

use std::path::PathBuf;

use minijinja::Environment;
use serde::Serialize;

use crate::errors::BuildError;

/// Jinja environment bound to one templates directory.
pub struct Engine {
    env: Environment<'static>,
}

impl Engine {
    /// Engine loading templates from `templates_dir`.
    pub fn new(templates_dir: PathBuf) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(templates_dir));
        env.add_function("url_path", url_path);
        Self { env }
    }

    /// Render `template` with `context`.
    pub fn render<C: Serialize>(&self, template: &str, context: &C) -> Result<String, BuildError> {
        let render_err = |source| BuildError::Render {
            template: template.to_string(),
            source,
        };
        let tmpl = self.env.get_template(template).map_err(render_err)?;
        tmpl.render(context).map_err(render_err)
    }
}

/// Normalize a site path to a root-relative URL (`static/x` → `/static/x`).
fn url_path(path: String) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Ctx {
        greeting: String,
    }

    fn engine_with(template: &str) -> (tempfile::TempDir, Engine) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.jinja"), template).unwrap();
        let engine = Engine::new(dir.path().to_path_buf());
        (dir, engine)
    }

    #[test]
    fn renders_context_values() {
        let (_dir, engine) = engine_with("hello {{ greeting }}");
        let html = engine
            .render(
                "page.jinja",
                &Ctx {
                    greeting: "world".to_string(),
                },
            )
            .unwrap();
        assert_eq!(html, "hello world");
    }

    #[test]
    fn url_path_is_available_in_templates() {
        let (_dir, engine) = engine_with("{{ url_path('static/style.css') }}");
        let html = engine
            .render(
                "page.jinja",
                &Ctx {
                    greeting: String::new(),
                },
            )
            .unwrap();
        assert_eq!(html, "/static/style.css");
    }

    #[test]
    fn url_path_does_not_double_slash() {
        assert_eq!(url_path("/static/x".to_string()), "/static/x");
        assert_eq!(url_path("static/x".to_string()), "/static/x");
    }

    #[test]
    fn missing_template_is_a_render_error() {
        let (_dir, engine) = engine_with("unused");
        let err = engine
            .render(
                "nope.jinja",
                &Ctx {
                    greeting: String::new(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, BuildError::Render { ref template, .. } if template == "nope.jinja"));
    }

    #[test]
    fn template_syntax_error_is_a_render_error() {
        let (_dir, engine) = engine_with("{% for %}");
        let err = engine
            .render(
                "page.jinja",
                &Ctx {
                    greeting: String::new(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, BuildError::Render { .. }));
    }
}
