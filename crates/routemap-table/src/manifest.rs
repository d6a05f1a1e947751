//! Route manifest loading.
//!
//! Two on-disk formats are supported:
//! - JSON: an array of [`RouteEntry`] objects
//! - `routes.js`: the JavaScript module emitted by the site generator
//!
//! A `routes.js` module looks like this:
//!
//! ```js
//! import ComponentCreator from '@docusaurus/ComponentCreator';
//!
//! export default [
//!   {
//!     path: '/blog',
//!     component: ComponentCreator('/blog', '5b9'),
//!     exact: true
//!   },
//!   {
//!     path: '*',
//!     component: ComponentCreator('*'),
//!   },
//! ];
//! ```
//!
//! The array literal after `export default` is rewritten into JSON (string
//! quotes, `ComponentCreator` calls, bare keys, trailing commas) and parsed
//! with the same schema as the JSON format.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::entry::RouteEntry;
use crate::table::{RouteTable, TableError};

/// JavaScript string literal. Group 1 holds the body of a single-quoted one.
static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""(?:[^"\\]|\\.)*"|'((?:[^'\\\n]|\\.)*)'"#)
        .expect("invalid string literal regex")
});

/// `ComponentCreator("id")` or `ComponentCreator("id", "hash")` after quote rewriting.
static COMPONENT_CREATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"ComponentCreator\(\s*("(?:[^"\\]|\\.)*")\s*(?:,\s*("(?:[^"\\]|\\.)*")\s*)?\)"#,
    )
    .expect("invalid ComponentCreator regex")
});

/// Unquoted object key at the start of a line.
static BARE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\s*)([A-Za-z_$][\w$]*)\s*:").expect("invalid object key regex")
});

/// Comma directly before a closing bracket or brace.
static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[\]}])").expect("invalid trailing comma regex"));

/// Manifest file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestFormat {
    /// Detect from the file extension.
    #[default]
    Auto,
    /// JSON array of route entries.
    Json,
    /// Generated JavaScript module.
    RoutesJs,
}

impl ManifestFormat {
    /// Resolve [`ManifestFormat::Auto`] using the file extension.
    ///
    /// `.js`, `.mjs` and `.cjs` files are read as `routes.js` modules,
    /// everything else as JSON.
    #[must_use]
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => match path.extension().and_then(|ext| ext.to_str()) {
                Some("js" | "mjs" | "cjs") => Self::RoutesJs,
                _ => Self::Json,
            },
            format => format,
        }
    }
}

/// Error returned when a manifest cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest file does not exist.
    #[error("Manifest not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error reading the manifest.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Manifest is not valid JSON for the route schema.
    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
    /// `routes.js` module has no exported route array.
    #[error("Invalid routes module: {0}")]
    RoutesJs(String),
    /// Entries violate a table invariant.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl RouteTable {
    /// Parse a JSON manifest.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Json`] for malformed JSON and
    /// [`ManifestError::Table`] for invalid entries.
    pub fn from_json(source: &str) -> Result<Self, ManifestError> {
        let entries: Vec<RouteEntry> = serde_json::from_str(source)?;
        Ok(Self::new(entries)?)
    }

    /// Parse a generated `routes.js` module.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::RoutesJs`] if no `export default [...]` array
    /// is found, [`ManifestError::Json`] if the array cannot be converted,
    /// and [`ManifestError::Table`] for invalid entries.
    pub fn from_routes_js(source: &str) -> Result<Self, ManifestError> {
        let json = routes_js_to_json(source)?;
        Self::from_json(&json)
    }

    /// Load a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NotFound`] if the file is missing, otherwise
    /// any error from [`RouteTable::from_json`] or [`RouteTable::from_routes_js`].
    pub fn load(path: &Path, format: ManifestFormat) -> Result<Self, ManifestError> {
        let source = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ManifestError::NotFound(path.to_path_buf())
            } else {
                ManifestError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let format = format.resolve(path);
        tracing::debug!(path = %path.display(), ?format, "Loading route manifest");

        let table = match format {
            ManifestFormat::RoutesJs => Self::from_routes_js(&source)?,
            ManifestFormat::Json | ManifestFormat::Auto => Self::from_json(&source)?,
        };

        tracing::info!(
            path = %path.display(),
            routes = table.len(),
            "Route manifest loaded"
        );
        Ok(table)
    }
}

/// Extract the exported array literal from a `routes.js` module.
fn exported_array(source: &str) -> Result<&str, ManifestError> {
    let export = source
        .find("export default")
        .ok_or_else(|| ManifestError::RoutesJs("missing `export default`".to_owned()))?;
    let open = source[export..]
        .find('[')
        .map(|offset| export + offset)
        .ok_or_else(|| ManifestError::RoutesJs("exported value is not an array".to_owned()))?;
    let close = source
        .rfind(']')
        .filter(|&close| close > open)
        .ok_or_else(|| ManifestError::RoutesJs("unterminated route array".to_owned()))?;

    Ok(&source[open..=close])
}

/// Rewrite a `routes.js` module into a JSON array.
fn routes_js_to_json(source: &str) -> Result<String, ManifestError> {
    let array = exported_array(source)?;

    let quoted = STRING_LITERAL.replace_all(array, |caps: &Captures| match caps.get(1) {
        Some(body) => single_to_double_quoted(body.as_str()),
        None => caps[0].to_owned(),
    });
    let components = COMPONENT_CREATOR.replace_all(&quoted, |caps: &Captures| match caps.get(2) {
        Some(hash) => format!(r#"{{"id":{},"hash":{}}}"#, &caps[1], hash.as_str()),
        None => format!(r#"{{"id":{}}}"#, &caps[1]),
    });
    let keys = BARE_KEY.replace_all(&components, r#"${1}"${2}":"#);
    let json = TRAILING_COMMA.replace_all(&keys, "${1}");

    Ok(json.into_owned())
}

/// Requote the body of a single-quoted JavaScript string as a JSON string.
///
/// `\'` loses its backslash and bare `"` gains one. Other escapes are shared
/// by both languages and pass through unchanged.
fn single_to_double_quoted(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 2);
    out.push('"');
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('\'') => out.push('\''),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push_str("\\\\"),
            },
            '"' => out.push_str("\\\""),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
