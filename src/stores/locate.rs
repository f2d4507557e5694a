//! "Latest persisted store" locator.
//!
//! Each ingestion run persists its vector database into a fresh
//! subdirectory under a common root. Retrieval wants the newest one: for
//! every subdirectory we take its most recently modified file, convert that
//! mtime to a calendar date, and pick the subdirectory with the maximum
//! date. Ties resolve to the first subdirectory in scan order — scan order
//! itself is unspecified, a documented nondeterminism.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use crate::types::IngestError;

/// A persisted vector store discovered read-only at query time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorStoreHandle {
    pub path: PathBuf,
    /// Calendar date of the store's most recently modified file.
    pub latest_date: NaiveDate,
}

/// Finds the most recently written run-directory under `root`.
///
/// Returns `Ok(None)` when `root` holds no subdirectory with any files.
pub fn locate_latest_store(root: &Path) -> Result<Option<VectorStoreHandle>, IngestError> {
    let mut best: Option<VectorStoreHandle> = None;

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let path = entry.path();
        let Some(date) = latest_file_date(&path)? else {
            debug!(path = %path.display(), "run directory holds no files; skipped");
            continue;
        };

        let candidate = VectorStoreHandle {
            path,
            latest_date: date,
        };
        best = match best {
            // Strictly-greater keeps the first-scanned directory on ties.
            Some(current) if candidate.latest_date > current.latest_date => Some(candidate),
            Some(current) => Some(current),
            None => Some(candidate),
        };
    }

    Ok(best)
}

/// Calendar date of the most recently modified file anywhere under `dir`.
pub fn latest_file_date(dir: &Path) -> Result<Option<NaiveDate>, IngestError> {
    Ok(latest_mtime(dir)?.map(|mtime| DateTime::<Utc>::from(mtime).date_naive()))
}

fn latest_mtime(dir: &Path) -> Result<Option<SystemTime>, IngestError> {
    let mut latest: Option<SystemTime> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let candidate = if file_type.is_dir() {
            latest_mtime(&entry.path())?
        } else {
            Some(entry.metadata()?.modified()?)
        };
        if let Some(mtime) = candidate {
            latest = Some(match latest {
                Some(current) if current >= mtime => current,
                _ => mtime,
            });
        }
    }

    Ok(latest)
}

/// Selection rule shared with [`locate_latest_store`], split out so the
/// max-date policy is testable without manufacturing file mtimes.
pub fn pick_latest(candidates: Vec<(PathBuf, NaiveDate)>) -> Option<VectorStoreHandle> {
    let mut best: Option<VectorStoreHandle> = None;
    for (path, date) in candidates {
        best = match best {
            Some(current) if date > current.latest_date => Some(VectorStoreHandle {
                path,
                latest_date: date,
            }),
            Some(current) => Some(current),
            None => Some(VectorStoreHandle {
                path,
                latest_date: date,
            }),
        };
    }
    best
}
