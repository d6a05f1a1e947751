//! `routemap resolve` command implementation.

use clap::Args;
use routemap_table::{ComponentRef, RouteMatch};
use serde::Serialize;

use super::ManifestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Request paths to resolve.
    #[arg(required = true)]
    paths: Vec<String>,

    #[command(flatten)]
    manifest: ManifestArgs,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    /// Fail if any path resolves to the catch-all.
    #[arg(long)]
    deny_fallback: bool,
}

/// Resolution report for one request path.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct Resolution<'a> {
    path: &'a str,
    component: &'a ComponentRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    sidebar: Option<&'a str>,
    fallback: bool,
    chain: Vec<&'a ComponentRef>,
}

impl<'a> Resolution<'a> {
    fn new(path: &'a str, route: &RouteMatch<'a>) -> Self {
        Self {
            path,
            component: route.component(),
            sidebar: route.sidebar(),
            fallback: route.is_fallback(),
            chain: route.chain().map(|entry| &entry.component).collect(),
        }
    }
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be loaded, or if
    /// `--deny-fallback` is set and a path has no declared route.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let table = self.manifest.load_table()?;

        let resolutions: Vec<Resolution<'_>> = self
            .paths
            .iter()
            .map(|path| Resolution::new(path, &table.resolve(path)))
            .collect();

        if self.json {
            output.line(&serde_json::to_string_pretty(&resolutions)?);
        } else {
            for resolution in &resolutions {
                print_resolution(&output, resolution);
            }
        }

        let fallbacks = resolutions.iter().filter(|r| r.fallback).count();
        if self.deny_fallback && fallbacks > 0 {
            return Err(CliError::Validation(format!(
                "{fallbacks} path(s) resolved to the catch-all route"
            )));
        }

        Ok(())
    }
}

fn print_resolution(output: &Output, resolution: &Resolution<'_>) {
    output.highlight(resolution.path);

    let component = resolution.component.to_string();
    if resolution.fallback {
        output.line(&format!(
            "  component: {component} {}",
            output.warn_text("(fallback)")
        ));
    } else {
        output.line(&format!("  component: {component}"));
    }

    if let Some(sidebar) = resolution.sidebar {
        output.line(&format!("  sidebar:   {sidebar}"));
    }

    if resolution.chain.len() > 1 {
        let chain: Vec<String> = resolution.chain.iter().map(ToString::to_string).collect();
        output.line(&format!("  chain:     {}", output.dim(&chain.join(" > "))));
    }
}
