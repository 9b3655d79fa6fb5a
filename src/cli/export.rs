use super::ui;
use crate::core::{Explorer, ExportOptions, FilterState};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the ranked funds for `state` into `directory` and returns the path.
pub fn run(
    explorer: &Explorer,
    state: &FilterState,
    directory: &Path,
    options: ExportOptions,
) -> Result<PathBuf> {
    let Some(view) = explorer.view_for(state)? else {
        bail!("Nothing to export: the dataset has no funds");
    };
    let export = explorer
        .export(&view, options)
        .context("Failed to serialize the selected funds")?;

    fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create directory: {}", directory.display()))?;
    let path = directory.join(&export.filename);
    fs::write(&path, &export.bytes)
        .with_context(|| format!("Failed to write export file: {}", path.display()))?;

    info!("Exported {} funds to {}", view.len(), path.display());
    println!(
        "Exported {} funds to {}",
        ui::style_text(&view.len().to_string(), ui::StyleType::TotalValue),
        path.display()
    );
    Ok(path)
}
