// Public fallible APIs in this crate share one concrete error contract (`FolioError`).
// Repeating per-function `# Errors` boilerplate obscures behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod assistant;
pub mod config;
pub mod document;
pub mod error;
pub(crate) mod frontmatter;
pub mod render;
pub mod search;
pub mod store;
pub mod tags;
pub mod toc;

pub use config::SiteConfig;
pub use document::{DocMeta, Document};
pub use error::{FolioError, Result};
pub use store::DocStore;
