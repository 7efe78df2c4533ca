//! Reference data loaded once at start-up: the category catalog and the
//! country → currency table.
//!
//! Both are immutable after construction and safe to share across
//! requests.

pub mod categories;
pub mod currencies;

use std::path::PathBuf;

pub use categories::{CategoryCatalog, DEFAULT_CATEGORY};
pub use currencies::CurrencyTable;

/// Failure to load a reference data file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed mapping literal at byte {offset}: {reason}")]
    Parse { offset: usize, reason: String },
}
