pub mod app_config;
pub mod approval;
pub mod config;
pub mod row;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use approval::{
    filter_duplicates, ApprovalBuckets, ApprovalRecord, ApprovalStatus, ProductPayload,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use row::{product_name_field, value_as_text, variant_field, SheetRow};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid approval status: {0}")]
    InvalidStatus(String),

    #[error("a rejection needs a reason")]
    MissingRejectionReason,

    #[error("approval cannot move from {from} to {to}")]
    InvalidTransition {
        from: ApprovalStatus,
        to: ApprovalStatus,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
