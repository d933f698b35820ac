//! `packplan resolve`: show the resolved configuration.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::display::{list_table, output, render_list, CommandOutput, DetailView};
use crate::cli::Session;
use crate::domain::models::{Configuration, Destination};

#[derive(Args, Debug, Default)]
pub struct ResolveArgs {
    /// Also list the route rules
    #[arg(short, long)]
    pub rules: bool,
}

#[derive(Debug, Serialize)]
pub struct ResolveOutput {
    #[serde(flatten)]
    pub configuration: Configuration,
    #[serde(skip)]
    pub show_rules: bool,
}

impl CommandOutput for ResolveOutput {
    fn to_human(&self) -> String {
        let config = &self.configuration;
        let plugins = &config.plugins;
        let mut view = DetailView::new("Resolved configuration")
            .field("Environment", config.environment)
            .field("Source map", serde_label(&config.source_map))
            .field("Output root", config.output.root.display())
            .field("Bundle", &config.output.filename)
            .field("Public path", &config.output.public_path)
            .field("Hot reload", plugins.hot_module_replacement)
            .field("CSS minify", plugins.css.minify)
            .field("Clean output", plugins.clean_output)
            .field(
                "Dev server",
                format!("{}:{}", config.dev_server.host, config.dev_server.port),
            )
            .section("Template variables");
        for (key, value) in &config.template_variables {
            view = view.field(key, value);
        }

        view = view.section("Defines");
        for (key, value) in &plugins.define {
            view = view.item(format!("{key} = {value}"));
        }

        let mut rendered = view.render();
        if self.show_rules {
            let mut table = list_table(&["category", "rule", "test", "loaders", "destination"]);
            for (category, rule) in config.rules.iter() {
                table.add_row(vec![
                    category.to_string(),
                    rule.name.clone(),
                    rule.test.to_string(),
                    rule.loader_names().join(" > "),
                    describe_destination(&rule.destination),
                ]);
            }
            rendered.push_str("\n\n");
            rendered.push_str(&render_list("rule", &table, config.rules.len()));
        }
        rendered
    }
}

fn describe_destination(destination: &Destination) -> String {
    match destination {
        Destination::Bundle => "bundle".to_string(),
        Destination::Extract { filename } => format!("extract {filename}"),
        Destination::Asset {
            name,
            output_path,
            inline_limit,
        } => {
            let mut text = match output_path {
                Some(dir) => format!("asset {dir}/{name}"),
                None => format!("asset {name}"),
            };
            if let Some(limit) = inline_limit {
                text.push_str(&format!(" (inline <= {limit} B)"));
            }
            text
        }
    }
}

/// The serialized name of a unit enum value.
fn serde_label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(label)) => label,
        _ => String::from("-"),
    }
}

pub fn execute(args: &ResolveArgs, session: &Session) -> Result<()> {
    let configuration = session.configuration()?;
    output(
        &ResolveOutput {
            configuration,
            show_rules: args.rules,
        },
        session.json,
    );
    Ok(())
}
