//! Artifact persistence under the content directory.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{Artifact, ChartError, ChartResult};

/// Subdirectory of the content root that holds generated pages.
pub const CHARTS_SUBDIR: &str = "charts";

/// Writes rendered pages into `<static_dir>/charts`.
///
/// File names embed a nanosecond timestamp. Two invocations landing in the
/// same nanosecond are vanishingly unlikely under normal clocks, so no
/// collision check or lock is taken; concurrent writers never share a name.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    charts_dir: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the content directory.
    pub fn new(static_dir: impl AsRef<Path>) -> Self {
        Self {
            charts_dir: static_dir.as_ref().join(CHARTS_SUBDIR),
        }
    }

    /// Directory generated pages are written to.
    pub fn charts_dir(&self) -> &Path {
        &self.charts_dir
    }

    /// Persist a rendered page and return its artifact record.
    ///
    /// Ensures the charts directory exists first; both directory creation
    /// and the write abort the invocation on failure.
    pub fn persist(&self, page: &str) -> ChartResult<Artifact> {
        std::fs::create_dir_all(&self.charts_dir).map_err(|e| {
            ChartError::Persistence(format!("creating {}: {e}", self.charts_dir.display()))
        })?;

        let file_name = format!("echarts_{}.html", unix_nanos());
        let path = self.charts_dir.join(&file_name);

        std::fs::write(&path, page)
            .map_err(|e| ChartError::Persistence(format!("writing {}: {e}", path.display())))?;

        Ok(Artifact { file_name, path })
    }
}

fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}
