//! Local tiering: partitioning, manifest, and helper-script generation.
//!
//! Everything in this module works on files that are already on disk; remote
//! acquisition lives in `crate::hf`.

pub mod manifest;
pub mod partition;
pub mod report;
pub mod scripts;

pub use report::{DatasetSummary, MirrorReport};

use std::path::PathBuf;

/// A file small enough to live directly in the mirror repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmallFile {
    /// Permanent path under the datasets root, e.g. `datasets/msmarco/queries.jsonl`.
    pub dest: PathBuf,
}

/// A file that is published as a release asset instead of being committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LargeFile {
    /// Where the bytes currently sit in the download cache.
    pub cache_path: PathBuf,
    /// `<dataset-name>/<relative-path>`, used for manifest and script paths.
    pub logical_path: String,
}

impl LargeFile {
    /// Name the file is hosted under as a release asset.
    ///
    /// The logical path is flattened with `__` so that files from different
    /// datasets can share a basename without clobbering each other's asset.
    pub fn asset_name(&self) -> String {
        self.logical_path.replace('/', "__")
    }
}

/// Storage tier decided for one fetched file.
#[derive(Clone, Debug)]
pub enum TierAssignment {
    Small(SmallFile),
    Large(LargeFile),
}
