//! Hugging Face Hub remote concerns.
//!
//! This module owns everything that talks to the Hub: dataset reference
//! parsing, file listing, and per-file acquisition. Local tiering and
//! manifest generation stay in `crate::mirror`.

pub mod fetch;
pub mod listing;
pub mod resolve;

use std::path::PathBuf;

/// Canonical reference to a Hugging Face dataset repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetRef {
    pub namespace: String,
    pub name: String,
}

impl DatasetRef {
    /// The `<namespace>/<name>` repo id the Hub APIs expect.
    pub fn repo_id(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}

/// One file advertised by a dataset's remote listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteFileEntry {
    /// Path of the file relative to the dataset root.
    pub rfilename: String,
    /// Size in bytes as declared by the Hub, when it declares one.
    pub size: Option<u64>,
}

/// A remote entry together with where its bytes actually landed on disk.
#[derive(Clone, Debug)]
pub struct FetchedFile {
    pub entry: RemoteFileEntry,
    pub local_path: PathBuf,
}
