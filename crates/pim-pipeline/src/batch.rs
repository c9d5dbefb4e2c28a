//! Batch cleaning of an uploaded sheet.

use futures::stream::{self, StreamExt};
use pim_core::{product_name_field, SheetRow};

use crate::categorize::{Categories, Categorizer};
use crate::enrich::enrich_row;
use crate::error::PipelineError;

/// Cleans every row of a sheet for the approval queue.
///
/// Variant normalization is synchronous; categorization calls run with at
/// most `max_concurrent` in flight. Output order matches input order. A
/// categorizer failure is logged and that row falls back to
/// [`Categories::unknown`].
///
/// # Errors
///
/// Returns [`PipelineError::MissingCreatedBy`] if `created_by` is blank.
/// No row is processed in that case.
pub async fn clean_rows<C>(
    rows: Vec<SheetRow>,
    categorizer: &C,
    created_by: &str,
    max_concurrent: usize,
) -> Result<Vec<SheetRow>, PipelineError>
where
    C: Categorizer,
{
    let created_by = created_by.trim();
    if created_by.is_empty() {
        return Err(PipelineError::MissingCreatedBy);
    }

    let total = rows.len();
    let cleaned: Vec<SheetRow> = stream::iter(rows.into_iter().enumerate())
        .map(|(idx, row)| async move {
            let categories = categorize_row(categorizer, &row, idx).await;
            enrich_row(row, &categories, created_by)
        })
        .buffered(max_concurrent.max(1))
        .collect()
        .await;

    let missing_weight = cleaned
        .iter()
        .filter(|r| r.get("weightInKg").is_some_and(serde_json::Value::is_null))
        .count();
    tracing::info!(rows = total, missing_weight, "cleaned sheet rows");

    Ok(cleaned)
}

async fn categorize_row<C: Categorizer>(categorizer: &C, row: &SheetRow, idx: usize) -> Categories {
    let Some(name) = product_name_field(row) else {
        tracing::debug!(row = idx, "row has no product name; skipping categorization");
        return Categories::unknown();
    };

    match categorizer.categorize(&name).await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!(row = idx, product = %name, error = %e, "categorization failed");
            Categories::unknown()
        }
    }
}
