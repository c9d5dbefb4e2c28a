//! Approval-queue command handlers.

use anyhow::Context;
use clap::Subcommand;
use pim_client::{publish_approved, set_approval_status, PimClient};
use pim_core::{AppConfig, ApprovalBuckets, ApprovalStatus};

use crate::rows::print_json;

/// Sub-commands available under `approvals`.
#[derive(Debug, Subcommand)]
pub enum ApprovalsCommands {
    /// List approvals grouped by status
    List {
        /// Product-name search (ignored below three characters)
        #[arg(long)]
        search: Option<String>,
    },
    /// Move approvals to a new status
    SetStatus {
        /// pending, approved or rejected
        status: ApprovalStatus,
        /// Approval ids
        #[arg(required = true)]
        ids: Vec<String>,
        /// Reason shown to the submitter; required when rejecting
        #[arg(long)]
        reason: Option<String>,
    },
    /// Approve several pending records at once
    Approve {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Delete one approval from the queue
    Delete {
        id: String,
    },
    /// Publish every approved record as a catalog product
    Publish {
        /// Only publish approved records matching this search
        #[arg(long)]
        search: Option<String>,
    },
}

pub(crate) async fn run(config: &AppConfig, command: ApprovalsCommands) -> anyhow::Result<()> {
    let client = PimClient::new(config).context("failed to build PIM client")?;
    match command {
        ApprovalsCommands::List { search } => run_list(&client, search.as_deref()).await,
        ApprovalsCommands::SetStatus {
            status,
            ids,
            reason,
        } => {
            let user = require_user(config)?;
            let records =
                set_approval_status(&client, &ids, status, reason.as_deref(), user).await?;
            print_json(&records)
        }
        ApprovalsCommands::Approve { ids } => {
            let user = require_user(config)?;
            let records =
                set_approval_status(&client, &ids, ApprovalStatus::Approved, None, user).await?;
            print_json(&records)
        }
        ApprovalsCommands::Delete { id } => {
            client.delete_approval(&id).await?;
            tracing::info!(id = %id, "deleted approval");
            print_json(&serde_json::json!({ "deleted": id }))
        }
        ApprovalsCommands::Publish { search } => {
            run_publish(&client, search.as_deref(), require_user(config)?).await
        }
    }
}

async fn run_list(client: &PimClient, search: Option<&str>) -> anyhow::Result<()> {
    let buckets = ApprovalBuckets::partition(client.list_approvals(search).await?);
    tracing::info!(total = buckets.total(), "listed approvals");
    print_json(&serde_json::json!({
        "pending": buckets.pending,
        "approved": buckets.approved,
        "rejected": buckets.rejected,
    }))
}

async fn run_publish(
    client: &PimClient,
    search: Option<&str>,
    user_email: &str,
) -> anyhow::Result<()> {
    let approved = ApprovalBuckets::partition(client.list_approvals(search).await?).approved;
    if approved.is_empty() {
        tracing::info!("no approved records to publish");
    }

    let report = publish_approved(client, approved, user_email).await?;
    let duplicates: Vec<&str> = report
        .duplicates
        .iter()
        .map(|r| r.product_name.as_str())
        .collect();
    print_json(&serde_json::json!({
        "published": report.published,
        "removed": report.removed,
        "duplicates": duplicates,
    }))
}

fn require_user(config: &AppConfig) -> anyhow::Result<&str> {
    config
        .user_email
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("PIM_USER_EMAIL must be set for review actions"))
}
