//! Approval records and the review workflow they move through.
//!
//! Cleaned rows are submitted to the backend as approvals in the `pending`
//! state. A reviewer approves or rejects them; approved records are then
//! published as products and removed from the approval queue.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::CoreError;

/// Review state of an approval record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    /// Pushed to the product catalog. Terminal.
    Published,
}

impl ApprovalStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
            ApprovalStatus::Published => "published",
        }
    }

    /// Returns `true` if a record may move from `self` to `next`.
    ///
    /// | from       | to                      |
    /// |------------|-------------------------|
    /// | `pending`  | `approved`, `rejected`  |
    /// | `approved` | `rejected`, `published` |
    /// | `rejected` | `pending`               |
    #[must_use]
    pub fn can_transition_to(self, next: ApprovalStatus) -> bool {
        matches!(
            (self, next),
            (
                ApprovalStatus::Pending,
                ApprovalStatus::Approved | ApprovalStatus::Rejected
            ) | (
                ApprovalStatus::Approved,
                ApprovalStatus::Rejected | ApprovalStatus::Published
            ) | (ApprovalStatus::Rejected, ApprovalStatus::Pending)
        )
    }

    /// Validates the move from `self` to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] when the move is not allowed.
    pub fn transition_to(self, next: ApprovalStatus) -> Result<ApprovalStatus, CoreError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(CoreError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ApprovalStatus::Pending),
            "approved" => Ok(ApprovalStatus::Approved),
            "rejected" => Ok(ApprovalStatus::Rejected),
            "published" => Ok(ApprovalStatus::Published),
            _ => Err(CoreError::InvalidStatus(s.to_string())),
        }
    }
}

/// An approval as stored by the backend's `/api/v1/approvals` resource.
///
/// Fields the console does not interpret are kept in `extra` so that a
/// read-modify-write cycle does not drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalRecord {
    /// Backend document ID. Absent on records that were never stored.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub manufacturer_name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub product_category: Option<String>,
    #[serde(default)]
    pub product_subcategory: Option<String>,
    #[serde(default)]
    pub variant_type: Option<String>,
    /// Canonical variant label, e.g. `"5KG x 2"`.
    #[serde(default)]
    pub variant: Option<String>,
    /// Units per pack.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub amount: Option<u32>,
    /// Whole kilograms per pack; `None` means manual entry is required.
    #[serde(default, deserialize_with = "lenient_u64")]
    pub weight_in_kg: Option<u64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub status: ApprovalStatus,
    /// Set when a reviewer rejects the record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ApprovalRecord {
    /// Moves the record to `next`, enforcing the workflow.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] and leaves the record
    /// untouched when the move is not allowed.
    pub fn set_status(&mut self, next: ApprovalStatus) -> Result<(), CoreError> {
        self.status = self.status.transition_to(next)?;
        Ok(())
    }

    /// Applies a reviewer decision. Rejecting requires a non-blank `reason`,
    /// which is stored on the record; any other move clears a previous one.
    ///
    /// # Errors
    ///
    /// - [`CoreError::MissingRejectionReason`] when rejecting without a reason.
    /// - [`CoreError::InvalidTransition`] when the move is not allowed.
    ///
    /// The record is untouched on error.
    pub fn review(&mut self, next: ApprovalStatus, reason: Option<&str>) -> Result<(), CoreError> {
        let reason = reason.map(str::trim).filter(|r| !r.is_empty());
        if next == ApprovalStatus::Rejected && reason.is_none() {
            return Err(CoreError::MissingRejectionReason);
        }
        self.set_status(next)?;
        self.rejection_reason = match next {
            ApprovalStatus::Rejected => reason.map(str::to_owned),
            _ => None,
        };
        Ok(())
    }
}

// The review form sends numbers as text and allows decimals, so the numeric
// columns accept integers, floats (rounded half-up) and numeric strings.
// Anything else reads as missing instead of failing the whole list.
fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(whole_number))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_u64(deserializer)?.and_then(|n| u32::try_from(n).ok()))
}

fn whole_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(round_half_up)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(round_half_up))
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn round_half_up(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0 && f < u64::MAX as f64).then(|| f.round() as u64)
}

/// Approvals grouped by review state, as shown on the approval screen tabs.
#[derive(Debug, Default, Clone)]
pub struct ApprovalBuckets {
    pub pending: Vec<ApprovalRecord>,
    pub approved: Vec<ApprovalRecord>,
    pub rejected: Vec<ApprovalRecord>,
}

impl ApprovalBuckets {
    /// Splits `records` by status, preserving input order within each bucket.
    /// Published records are no longer part of the queue and are dropped.
    #[must_use]
    pub fn partition(records: Vec<ApprovalRecord>) -> Self {
        let mut buckets = Self::default();
        for record in records {
            match record.status {
                ApprovalStatus::Pending => buckets.pending.push(record),
                ApprovalStatus::Approved => buckets.approved.push(record),
                ApprovalStatus::Rejected => buckets.rejected.push(record),
                ApprovalStatus::Published => {}
            }
        }
        buckets
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.pending.len() + self.approved.len() + self.rejected.len()
    }
}

/// Body element of `POST /api/v1/products/bulk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub manufacturer_name: Option<String>,
    pub brand: Option<String>,
    pub product_category: Option<String>,
    /// Sent as `""` rather than `null` when unknown.
    pub product_subcategory: String,
    pub product_name: String,
    pub variant_type: Option<String>,
    pub variant: Option<String>,
    /// Legacy duplicate of `weight_in_kg`; the product resource reads both.
    pub weight: Option<u64>,
    pub weight_in_kg: Option<u64>,
    pub image_url: Option<String>,
    pub created_by: String,
}

impl ProductPayload {
    #[must_use]
    pub fn from_approval(record: &ApprovalRecord, created_by: &str) -> Self {
        Self {
            manufacturer_name: record.manufacturer_name.clone(),
            brand: record.brand.clone(),
            product_category: record.product_category.clone(),
            product_subcategory: record.product_subcategory.clone().unwrap_or_default(),
            product_name: record.product_name.clone(),
            variant_type: record.variant_type.clone(),
            variant: record.variant.clone(),
            weight: record.weight_in_kg,
            weight_in_kg: record.weight_in_kg,
            image_url: record.image_url.clone(),
            created_by: created_by.to_owned(),
        }
    }
}

/// Splits `records` into `(unique, duplicates)` by exact product name.
#[must_use]
pub fn filter_duplicates(
    records: Vec<ApprovalRecord>,
    duplicate_names: &[String],
) -> (Vec<ApprovalRecord>, Vec<ApprovalRecord>) {
    records
        .into_iter()
        .partition(|r| !duplicate_names.iter().any(|d| d == &r.product_name))
}
