use std::fmt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::models::{Listing, Result};

/// The two checkpointed stages of a run: search-result scraping and the
/// per-listing email lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Page,
    Company,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Page => write!(f, "page"),
            Phase::Company => write!(f, "company"),
        }
    }
}

/// Writes a snapshot of the full record list after every unit of work and
/// reloads it on restart. Only the snapshot at the final expected index
/// counts as "phase complete"; earlier files are left behind as
/// orphaned artifacts.
pub struct CheckpointStore {
    dir: PathBuf,
}

impl CheckpointStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, phase: Phase, index: usize) -> PathBuf {
        self.dir.join(format!("{}_{}.checkpoint", phase, index))
    }

    pub fn save(&self, records: &[Listing], phase: Phase, index: usize) -> Result<()> {
        let json = serde_json::to_string(records)?;
        std::fs::write(self.path(phase, index), json)?;
        Ok(())
    }

    /// `None` means no checkpoint exists and the phase starts fresh. A
    /// file that exists but does not parse is treated as fatal rather
    /// than silently discarded.
    pub fn load(&self, phase: Phase, index: usize) -> Result<Option<Vec<Listing>>> {
        let path = self.path(phase, index);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let records: Vec<Listing> = serde_json::from_str(&content)?;
        info!("loaded {} records from {}", records.len(), path.display());
        Ok(Some(records))
    }
}
