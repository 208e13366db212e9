//! `build`: compile then render every set under the sets directory

use anyhow::{Context, Result};
use log::{error, info};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::compile::compile_set;
use crate::error::ChecklistError;
use crate::generate::render_set;
use crate::layout::{SetPaths, CARDS_CSV};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Compile,
    Render,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Compile => write!(f, "compile"),
            Step::Render => write!(f, "render"),
        }
    }
}

#[derive(Debug)]
pub struct Failure {
    pub set_name: String,
    pub step: Step,
    pub error: anyhow::Error,
}

/// Names of the sub-directories that contain a cards CSV, sorted
pub fn discover_sets(sets_dir: &Path) -> Result<Vec<String>> {
    let mut sets = Vec::new();
    let entries = fs::read_dir(sets_dir)
        .with_context(|| format!("Failed to list sets in {}", sets_dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if !path.is_dir() || !path.join(CARDS_CSV).is_file() {
            continue;
        }
        if let Some(name) = path.file_name() {
            sets.push(name.to_string_lossy().to_string());
        }
    }

    sets.sort();
    Ok(sets)
}

/// Build every set, collecting failures instead of stopping at the first one
pub fn build_sets(sets_dir: &Path, sets: &[String]) -> Vec<Failure> {
    let mut failures = Vec::new();

    for set_name in sets {
        info!("building {}...", set_name);
        let paths = SetPaths::new(sets_dir, set_name);

        if let Err(error) = compile_set(&paths) {
            failures.push(Failure {
                set_name: set_name.clone(),
                step: Step::Compile,
                error,
            });
            continue;
        }

        if let Err(error) = render_set(&paths) {
            failures.push(Failure {
                set_name: set_name.clone(),
                step: Step::Render,
                error,
            });
        }
    }

    failures
}

pub fn run_build(sets_dir: &Path) -> Result<()> {
    let sets = discover_sets(sets_dir)?;
    if sets.is_empty() {
        return Err(ChecklistError::NoSets(sets_dir.to_path_buf()).into());
    }

    let failures = build_sets(sets_dir, &sets);
    if !failures.is_empty() {
        for failure in &failures {
            error!(
                "✗ {} ({}): {:#}",
                failure.set_name, failure.step, failure.error
            );
        }
        return Err(ChecklistError::BuildFailed(failures.len()).into());
    }

    println!("Built {} set(s)", sets.len());
    Ok(())
}
