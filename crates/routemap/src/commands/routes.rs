//! `routemap routes` command implementation.

use clap::Args;
use routemap_table::{RouteEntry, RouteTable};

use super::ManifestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    manifest: ManifestArgs,

    /// List exact pages only, with their sidebars.
    #[arg(long)]
    pages: bool,

    /// Print as JSON.
    #[arg(long)]
    json: bool,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let table = self.manifest.load_table()?;

        match (self.pages, self.json) {
            (true, true) => output.line(&serde_json::to_string_pretty(&table.leaves())?),
            (false, true) => output.line(&serde_json::to_string_pretty(table.entries())?),
            (true, false) => {
                for leaf in table.leaves() {
                    output.line(&page_line(&output, leaf.path, leaf.sidebar));
                }
            }
            (false, false) => {
                for line in tree_lines(&table) {
                    output.line(&line);
                }
            }
        }

        Ok(())
    }
}

fn page_line(output: &Output, path: &str, sidebar: Option<&str>) -> String {
    match sidebar {
        Some(sidebar) => format!("{path}  {}", output.dim(&format!("[{sidebar}]"))),
        None => path.to_owned(),
    }
}

/// Render the route tree, one entry per line, indented by depth.
fn tree_lines(table: &RouteTable) -> Vec<String> {
    table
        .routes()
        .map(|(depth, entry)| format!("{}{}", "  ".repeat(depth), describe(entry)))
        .collect()
}

fn describe(entry: &RouteEntry) -> String {
    let mut line = format!("{} -> {}", entry.path, entry.component);
    if entry.exact {
        line.push_str(" (exact)");
    }
    if let Some(sidebar) = &entry.sidebar {
        line.push_str(&format!(" [{sidebar}]"));
    }
    line
}
