//! Review actions that span several backend calls.

use pim_core::{
    filter_duplicates, ApprovalRecord, ApprovalStatus, CoreError, ProductPayload,
};

use crate::client::PimClient;
use crate::error::ClientError;

/// Outcome of [`publish_approved`].
#[derive(Debug, Default)]
pub struct PublishReport {
    /// Products created in the catalog.
    pub published: usize,
    /// Records skipped because a product with the same name already exists.
    pub duplicates: Vec<ApprovalRecord>,
    /// Approvals removed from the queue, duplicates included.
    pub removed: usize,
}

/// Publishes approved records as catalog products.
///
/// Every record must be `approved` and carry a backend id; this is checked
/// before any request is made. Names the catalog already knows are reported
/// as duplicates instead of created. All processed approvals, duplicates
/// included, are then deleted from the queue.
///
/// # Errors
///
/// - [`ClientError::Workflow`] if a record is not `approved`.
/// - [`ClientError::MissingId`] if a record was never stored.
/// - [`ClientError`] from any of the backend calls.
pub async fn publish_approved(
    client: &PimClient,
    records: Vec<ApprovalRecord>,
    user_email: &str,
) -> Result<PublishReport, ClientError> {
    let mut ids = Vec::with_capacity(records.len());
    for record in &records {
        record.status.transition_to(ApprovalStatus::Published)?;
        let id = record
            .id
            .clone()
            .ok_or_else(|| ClientError::MissingId(record.product_name.clone()))?;
        ids.push(id);
    }
    if records.is_empty() {
        return Ok(PublishReport::default());
    }

    let duplicate_names = client.check_duplicates(&records).await?;
    let (unique, duplicates) = filter_duplicates(records, &duplicate_names);

    if !unique.is_empty() {
        let payloads: Vec<ProductPayload> = unique
            .iter()
            .map(|r| ProductPayload::from_approval(r, user_email))
            .collect();
        client.bulk_create_products(&payloads, user_email).await?;
    }
    client.delete_approvals(&ids, user_email).await?;

    tracing::info!(
        published = unique.len(),
        duplicates = duplicates.len(),
        removed = ids.len(),
        "published approvals"
    );
    Ok(PublishReport {
        published: unique.len(),
        duplicates,
        removed: ids.len(),
    })
}

/// Moves the approvals named by `ids` to `next` and saves each one.
///
/// The queue is fetched once. Every id is looked up and every move is checked
/// before the first `PUT`, so a bad id or an invalid move changes nothing.
/// `reason` is required when rejecting. Publishing is not a plain status
/// change; use [`publish_approved`] for it.
///
/// # Errors
///
/// - [`ClientError::UnknownApproval`] if an id is not in the queue.
/// - [`ClientError::Workflow`] if a move is not allowed or a rejection has no
///   reason.
/// - [`ClientError`] from the backend calls.
pub async fn set_approval_status(
    client: &PimClient,
    ids: &[String],
    next: ApprovalStatus,
    reason: Option<&str>,
    user_email: &str,
) -> Result<Vec<ApprovalRecord>, ClientError> {
    if next == ApprovalStatus::Rejected && reason.is_none_or(|r| r.trim().is_empty()) {
        return Err(CoreError::MissingRejectionReason.into());
    }
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut queue = client.list_approvals(None).await?;

    let mut updated = Vec::with_capacity(ids.len());
    for id in ids {
        if updated
            .iter()
            .any(|r: &ApprovalRecord| r.id.as_deref() == Some(id.as_str()))
        {
            continue;
        }
        let pos = queue
            .iter()
            .position(|r| r.id.as_deref() == Some(id.as_str()))
            .ok_or_else(|| ClientError::UnknownApproval(id.clone()))?;
        let mut record = queue.swap_remove(pos);

        if next == ApprovalStatus::Published {
            return Err(CoreError::InvalidTransition {
                from: record.status,
                to: next,
            }
            .into());
        }
        record.review(next, reason)?;
        updated.push(record);
    }

    for record in &updated {
        client.update_approval(record, user_email).await?;
    }
    tracing::info!(count = updated.len(), status = %next, "updated approval status");
    Ok(updated)
}
