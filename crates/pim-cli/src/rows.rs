//! JSON I/O for the CLI: row files in, pretty JSON out.

use std::path::Path;

use anyhow::Context;
use pim_core::SheetRow;
use serde::Serialize;

/// Reads a JSON array of row objects.
pub(crate) fn read_rows(path: &Path) -> anyhow::Result<Vec<SheetRow>> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("{} is not a JSON array of row objects", path.display()))
}

/// Writes `value` to stdout as pretty-printed JSON.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
