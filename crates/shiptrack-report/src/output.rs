//! Run output files.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use shiptrack_model::{FlatShipmentRecord, SummaryRow};

use crate::flat::render_flat_table;
use crate::summary::render_summary;

pub const FLAT_FILE_NAME: &str = "shipments_flat.csv";
pub const SUMMARY_FILE_NAME: &str = "summary_stats.csv";

/// Paths of the files produced by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub flat_table: PathBuf,
    pub summary: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            flat_table: output_dir.join(FLAT_FILE_NAME),
            summary: output_dir.join(SUMMARY_FILE_NAME),
        }
    }
}

/// Write both output files into `output_dir`.
///
/// Both tables are rendered before anything touches the disk. Each file is
/// staged next to its destination and renamed into place; when the summary
/// cannot be placed, the flat table placed by this call is removed again.
pub fn write_outputs(
    output_dir: &Path,
    shipments: &[FlatShipmentRecord],
    rows: &[SummaryRow],
) -> Result<OutputPaths> {
    let flat_bytes = render_flat_table(shipments)?;
    let summary_bytes = render_summary(rows)?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let paths = OutputPaths::in_dir(output_dir);

    let flat_staged = stage(&paths.flat_table, &flat_bytes)?;
    let summary_staged = match stage(&paths.summary, &summary_bytes) {
        Ok(staged) => staged,
        Err(error) => {
            discard(&flat_staged);
            return Err(error);
        }
    };

    if let Err(error) = place(&flat_staged, &paths.flat_table) {
        discard(&flat_staged);
        discard(&summary_staged);
        return Err(error);
    }
    if let Err(error) = place(&summary_staged, &paths.summary) {
        discard(&summary_staged);
        discard(&paths.flat_table);
        return Err(error);
    }

    debug!(
        flat_table = %paths.flat_table.display(),
        summary = %paths.summary.display(),
        rows = shipments.len(),
        "outputs written"
    );
    Ok(paths)
}

/// Write `bytes` to `path` through a temporary sibling file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let staged = stage(path, bytes)?;
    place(&staged, path).inspect_err(|_| discard(&staged))
}

fn staged_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp.{}", std::process::id()))
}

fn stage(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    let staged = staged_path(path);
    let written = File::create(&staged).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(error) = written {
        discard(&staged);
        return Err(error).with_context(|| format!("write {}", staged.display()));
    }
    Ok(staged)
}

fn place(staged: &Path, path: &Path) -> Result<()> {
    fs::rename(staged, path)
        .with_context(|| format!("move {} to {}", staged.display(), path.display()))
}

fn discard(path: &Path) {
    if path.exists()
        && let Err(error) = fs::remove_file(path)
    {
        warn!(path = %path.display(), error = %error, "failed to remove partial output");
    }
}
