//! Route table model and path resolution for routemap.
//!
//! This crate provides:
//! - [`RouteTable`]: Validated, immutable route manifest with [`RouteTable::resolve`]
//! - [`RouteEntry`] / [`ComponentRef`]: The manifest data model
//! - Manifest loading from JSON or the generator's `routes.js` module
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use routemap_table::{ComponentRef, RouteEntry, RouteTable};
//!
//! let table = RouteTable::new(vec![
//!     RouteEntry::exact("/blog", ComponentRef::new("/blog", Some("5b9"))),
//!     RouteEntry::catch_all(ComponentRef::new("*", None)),
//! ])?;
//!
//! assert_eq!(table.resolve_component("/blog").hash(), Some("5b9"));
//! assert!(table.resolve("/missing").is_fallback());
//! # Ok(())
//! # }
//! ```

mod component;
mod entry;
mod manifest;
pub mod path;
mod table;

pub use component::ComponentRef;
pub use entry::{CATCH_ALL_PATH, RouteEntry};
pub use manifest::{ManifestError, ManifestFormat};
pub use table::{LeafRoute, MatchOptions, RouteMatch, RouteTable, Routes, TableError};
