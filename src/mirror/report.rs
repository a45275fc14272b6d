//! Run report types.
//!
//! A [`MirrorReport`] summarizes what one mirror run did: per-dataset tier
//! counts, skipped files, and whether the result was published.

use serde::Serialize;
use std::fmt;

/// Tier counts for one mirrored dataset.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DatasetSummary {
    /// `<namespace>/<name>` repo id.
    pub repo_id: String,
    /// Files copied into the repo.
    pub small: usize,
    /// Files recorded for release-asset hosting.
    pub large: usize,
    /// Files dropped because they never landed on disk.
    pub skipped: usize,
}

/// A report generated over a whole mirror run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MirrorReport {
    /// One summary per dataset, in mirror order.
    pub datasets: Vec<DatasetSummary>,
    /// Whether release upload and git push actually ran.
    pub published: bool,
}

impl MirrorReport {
    /// Add a dataset summary to the report.
    pub fn add(&mut self, summary: DatasetSummary) {
        self.datasets.push(summary);
    }

    /// Total small-tier files across all datasets.
    pub fn small_count(&self) -> usize {
        self.datasets.iter().map(|d| d.small).sum()
    }

    /// Total large-tier files across all datasets.
    pub fn large_count(&self) -> usize {
        self.datasets.iter().map(|d| d.large).sum()
    }

    /// Total files dropped by per-file failures.
    pub fn skipped_count(&self) -> usize {
        self.datasets.iter().map(|d| d.skipped).sum()
    }
}

impl fmt::Display for MirrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dataset in &self.datasets {
            writeln!(
                f,
                "  {}: {} small, {} large, {} skipped",
                dataset.repo_id, dataset.small, dataset.large, dataset.skipped
            )?;
        }
        writeln!(
            f,
            "Mirrored {} dataset(s): {} small, {} large, {} skipped{}",
            self.datasets.len(),
            self.small_count(),
            self.large_count(),
            self.skipped_count(),
            if self.published {
                ""
            } else {
                " (publishing skipped)"
            }
        )
    }
}
