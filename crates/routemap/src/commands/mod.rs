//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;
pub(crate) mod routes;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use routemap_config::{CliSettings, Config};
use routemap_table::{ManifestFormat, RouteTable};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;
pub(crate) use routes::RoutesArgs;

/// Manifest format accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum FormatArg {
    Auto,
    Json,
    RoutesJs,
}

impl From<FormatArg> for ManifestFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Auto => Self::Auto,
            FormatArg::Json => Self::Json,
            FormatArg::RoutesJs => Self::RoutesJs,
        }
    }
}

/// Manifest selection and matching arguments shared by all commands.
#[derive(Args)]
pub(crate) struct ManifestArgs {
    /// Path to configuration file (default: auto-discover routemap.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route manifest file (overrides config).
    #[arg(short, long, env = "ROUTEMAP_MANIFEST")]
    manifest: Option<PathBuf>,

    /// Manifest format (overrides config).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Match paths case-insensitively.
    #[arg(long)]
    ignore_case: bool,

    /// Require trailing slashes to agree on exact routes.
    #[arg(long)]
    strict: bool,
}

impl ManifestArgs {
    /// Build CLI settings from args.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            manifest_path: self.manifest.clone(),
            format: self.format.map(ManifestFormat::from),
            case_sensitive: self.ignore_case.then_some(false),
            strict_trailing_slash: self.strict.then_some(true),
        }
    }

    /// Load config and the route table it points to.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or manifest loading fails.
    pub(crate) fn load_table(&self) -> Result<RouteTable, CliError> {
        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let manifest = &config.manifest_resolved;

        let table = RouteTable::load(&manifest.path, manifest.format)?;
        Ok(table.with_options(config.matching))
    }
}
