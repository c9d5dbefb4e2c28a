//! Sheet-cleaning command handlers.

use std::path::Path;

use anyhow::Context;
use pim_client::{HttpCategorizer, PimClient};
use pim_core::{AppConfig, SheetRow};
use pim_pipeline::{clean_rows, preview_row, Categorizer, RowCache, StaticCategorizer};
use pim_variant::normalize_variant;

use crate::rows::{print_json, read_rows};

pub(crate) fn run_normalize(variants: &[String]) -> anyhow::Result<()> {
    let normalized: Vec<_> = variants
        .iter()
        .map(|raw| normalize_variant(raw.as_str()))
        .collect();
    print_json(&normalized)
}

pub(crate) fn run_preview(input: &Path) -> anyhow::Result<()> {
    let rows: Vec<SheetRow> = read_rows(input)?.into_iter().map(preview_row).collect();
    print_json(&rows)
}

/// Cleans `input`, caches the rows under `workflow` and prints the entry.
///
/// Categorization goes to `PIM_CATEGORIZER_URL` unless `offline` is set or no
/// endpoint is configured.
pub(crate) async fn run_clean(
    config: &AppConfig,
    input: &Path,
    workflow: Option<String>,
    offline: bool,
) -> anyhow::Result<()> {
    let rows = read_rows(input)?;
    let workflow_id = workflow.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let created_by = config.user_email.as_deref().unwrap_or_default();

    let cleaned = match config.categorizer_url.as_deref() {
        Some(url) if !offline => {
            let categorizer =
                HttpCategorizer::new(url, config.request_timeout_secs, &config.user_agent)
                    .context("failed to build categorizer client")?;
            clean_with(rows, &categorizer, created_by, config).await?
        }
        _ => {
            tracing::info!("categorizing offline");
            clean_with(rows, &StaticCategorizer, created_by, config).await?
        }
    };

    let cache = RowCache::open(&config.cache_dir)?;
    let entry = cache.save(&workflow_id, cleaned)?;
    tracing::info!(workflow_id = %entry.workflow_id, rows = entry.rows.len(), "cached cleaned rows");
    print_json(&entry)
}

async fn clean_with<C: Categorizer>(
    rows: Vec<SheetRow>,
    categorizer: &C,
    created_by: &str,
    config: &AppConfig,
) -> anyhow::Result<Vec<SheetRow>> {
    Ok(clean_rows(rows, categorizer, created_by, config.max_concurrent_rows).await?)
}

/// Submits a cached workflow for approval, then clears it.
///
/// The cache entry is only removed after the backend accepted the rows.
pub(crate) async fn run_push(config: &AppConfig, workflow: &str) -> anyhow::Result<()> {
    let cache = RowCache::open(&config.cache_dir)?;
    let entry = cache
        .load(workflow)?
        .ok_or_else(|| anyhow::anyhow!("no cached rows for workflow '{workflow}'"))?;

    let client = PimClient::new(config).context("failed to build PIM client")?;
    client.submit_approvals(&entry.rows).await?;
    cache.clear(workflow)?;

    print_json(&serde_json::json!({
        "workflowId": workflow,
        "submitted": entry.rows.len(),
    }))
}
