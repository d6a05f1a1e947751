//! `routemap check` command implementation.

use std::collections::BTreeSet;

use clap::Args;
use routemap_table::RouteTable;

use super::ManifestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    manifest: ManifestArgs,
}

/// Summary of a validated route table.
#[derive(Debug, PartialEq, Eq)]
struct Summary<'a> {
    top_level: usize,
    total: usize,
    pages: usize,
    sidebars: BTreeSet<&'a str>,
}

impl<'a> Summary<'a> {
    fn new(table: &'a RouteTable) -> Self {
        let leaves = table.leaves();
        Self {
            top_level: table.entries().len(),
            total: table.len(),
            pages: leaves.len(),
            sidebars: leaves.iter().filter_map(|leaf| leaf.sidebar).collect(),
        }
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Loading validates the table; a manifest that loads is well-formed.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be loaded or is invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let table = self.manifest.load_table()?;
        let summary = Summary::new(&table);

        output.success(&format!(
            "Manifest OK: {} top-level entries, {} routes, {} pages",
            summary.top_level, summary.total, summary.pages
        ));

        if summary.sidebars.is_empty() {
            output.warning("No sidebars declared");
        } else {
            let sidebars: Vec<&str> = summary.sidebars.into_iter().collect();
            output.line(&format!("Sidebars: {}", sidebars.join(", ")));
        }

        Ok(())
    }
}
