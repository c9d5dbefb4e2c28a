//! HTTP side of the PIM console: the approvals/products REST backend and the
//! remote text classifier.

pub mod categorizer;
pub mod client;
pub mod error;
pub mod publish;
pub(crate) mod retry;

pub use categorizer::HttpCategorizer;
pub use client::PimClient;
pub use error::ClientError;
pub use publish::{publish_approved, set_approval_status, PublishReport};
