//! HTML entry emission.
//!
//! The template is rendered with minijinja. Declared template variables are
//! exposed as `config`, alongside `public_path`, `environment`, `scripts` and
//! `stylesheets`.

use std::path::Path;

use minijinja::{context, Environment as TemplateEngine};
use regex::Regex;
use serde::Serialize;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{Configuration, HtmlMinify};

const STEP: &str = "html";

/// Public URLs of the artifacts the page should load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HtmlAssets {
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
}

/// Renders the HTML entry for a resolved configuration.
#[derive(Debug, Clone, Copy)]
pub struct HtmlEmitter<'a> {
    config: &'a Configuration,
}

impl<'a> HtmlEmitter<'a> {
    pub const fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// Render `template_source` into the final page.
    pub fn render(&self, template_source: &str, assets: &HtmlAssets) -> PipelineResult<String> {
        let options = &self.config.plugins.html;
        let template_path = options.template.as_path();

        let engine = TemplateEngine::new();
        let mut page = engine
            .render_str(
                template_source,
                context! {
                    config => &self.config.template_variables,
                    environment => self.config.environment.as_str(),
                    public_path => &self.config.output.public_path,
                    scripts => &assets.scripts,
                    stylesheets => &assets.stylesheets,
                },
            )
            .map_err(|e| PipelineError::transform(template_path, STEP, e.to_string()))?;

        if options.inject {
            page = inject(&page, assets);
        }
        minify(&page, options.minify, template_path)
    }
}

fn inject(page: &str, assets: &HtmlAssets) -> String {
    let links: String = assets
        .stylesheets
        .iter()
        .map(|href| format!("<link href=\"{href}\" rel=\"stylesheet\">"))
        .collect();
    let scripts: String = assets
        .scripts
        .iter()
        .map(|src| format!("<script src=\"{src}\"></script>"))
        .collect();

    let page = insert_before(page, "</head>", &links);
    insert_before(&page, "</body>", &scripts)
}

/// Insert `content` before the last occurrence of `marker`, or append it.
fn insert_before(page: &str, marker: &str, content: &str) -> String {
    if content.is_empty() {
        return page.to_string();
    }
    match page.rfind(marker) {
        Some(at) => format!("{}{content}{}", &page[..at], &page[at..]),
        None => format!("{page}{content}"),
    }
}

fn minify(page: &str, options: HtmlMinify, template_path: &Path) -> PipelineResult<String> {
    let compile = |pattern: &str| {
        Regex::new(pattern).map_err(|e| PipelineError::transform(template_path, STEP, e.to_string()))
    };

    let mut page = page.to_string();
    if options.collapse_whitespace {
        page = compile(r">\s+<")?.replace_all(&page, "><").trim().to_string();
    }
    if options.remove_attribute_quotes {
        for pattern in [
            r#"(\s[\w:.-]+)="([^\s"'=<>`]+)""#,
            r#"(\s[\w:.-]+)='([^\s"'=<>`]+)'"#,
        ] {
            page = compile(pattern)?.replace_all(&page, "$1=$2").into_owned();
        }
    }
    Ok(page)
}
