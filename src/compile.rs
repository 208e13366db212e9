//! `compile`: price-listing CSV -> `output.json`

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::catalog::compile_lines;
use crate::error::ChecklistError;
use crate::layout::SetPaths;
use crate::metadata::SetMetadata;
use crate::types::Catalog;
use crate::utils::{osc8_file_link, to_pretty_json};

/// Compile CSV text. The first line is a header and is ignored.
pub fn compile_csv(content: &str, current_set: Option<u32>) -> Catalog {
    compile_lines(content.trim().lines().skip(1), current_set)
}

/// Compile one set, writing `output.json` and rewriting `set.json`
pub fn compile_set(paths: &SetPaths) -> Result<Catalog> {
    if !paths.dir.is_dir() {
        return Err(ChecklistError::SetDirMissing(paths.dir.clone()).into());
    }
    let csv_path = paths.cards_csv();
    if !csv_path.is_file() {
        return Err(ChecklistError::CsvMissing(csv_path).into());
    }

    let set_json = paths.set_json();
    let metadata = SetMetadata::load(&set_json);
    let current_set = metadata.set_number();
    debug!("Current set number for {}: {:?}", paths.name, current_set);

    let content = fs::read_to_string(&csv_path)
        .with_context(|| format!("Failed to read CSV: {}", csv_path.display()))?;
    let catalog = compile_csv(&content, current_set);

    let output_path = paths.output_json();
    write_catalog(&catalog, &output_path)?;
    metadata.save(&set_json)?;

    info!("Compiled {} cards for {}", catalog.cards.len(), paths.name);
    Ok(catalog)
}

pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    fs::write(path, to_pretty_json(catalog)?)
        .with_context(|| format!("Failed to write catalog: {}", path.display()))
}

pub fn run_compile(sets_dir: &Path, set_name: &str) -> Result<()> {
    let paths = SetPaths::new(sets_dir, set_name);
    let catalog = compile_set(&paths)?;
    println!(
        "Successfully compiled {} cards to {}",
        catalog.cards.len(),
        osc8_file_link(&paths.output_json())
    );
    Ok(())
}
