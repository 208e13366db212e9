//! Fatal errors of the checklist commands

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChecklistError {
    #[error("Set directory \"{}\" does not exist", .0.display())]
    SetDirMissing(PathBuf),

    #[error("Cards CSV file \"{}\" does not exist", .0.display())]
    CsvMissing(PathBuf),

    #[error("Catalog \"{}\" does not exist. Run `compile` first", .0.display())]
    CatalogMissing(PathBuf),

    #[error("No sets with a cards.csv found in \"{}\"", .0.display())]
    NoSets(PathBuf),

    #[error("{0} set(s) failed to build")]
    BuildFailed(usize),
}
