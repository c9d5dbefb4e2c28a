//! Data-cleaning pipeline for spreadsheet product rows.
//!
//! Rows come in from the spreadsheet collaborator as loose key/value maps,
//! get their variant normalized and a category attached, and are parked in
//! a per-workflow [`RowCache`] until they are pushed for approval.

pub mod batch;
pub mod cache;
pub mod categorize;
pub mod enrich;
pub mod error;

pub use batch::clean_rows;
pub use cache::{CachedRows, RowCache};
pub use categorize::{parse_category_reply, Categories, Categorizer, StaticCategorizer};
pub use enrich::{enrich_row, preview_row};
pub use error::{CacheError, CategorizeError, PipelineError};
