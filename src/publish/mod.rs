//! External publishing collaborators.
//!
//! Release hosting (gh CLI) and version control (git) are thin shells around
//! external tools. The [`Publisher`] trait is the seam the pipeline talks
//! through, so a run can be driven without either tool installed.

pub mod gh;
pub mod git;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::MirrorConfig;
use crate::error::MirrorError;
use crate::mirror::LargeFile;

/// The pipeline's view of the release-hosting and version-control tools.
pub trait Publisher {
    /// Probe whether publishing can run at all.
    fn available(&self) -> bool;

    /// Create the configured release, or reuse it if it already exists.
    fn ensure_release(&self, config: &MirrorConfig) -> Result<(), MirrorError>;

    /// Upload every large-tier file as a release asset.
    fn upload_assets(
        &self,
        config: &MirrorConfig,
        large: &[LargeFile],
    ) -> Result<(), MirrorError>;

    /// Commit and push the small tier plus generated artifacts.
    fn commit_and_push(&self, config: &MirrorConfig, message: &str) -> Result<(), MirrorError>;
}

/// Production publisher backed by the gh and git CLIs.
#[derive(Clone, Copy, Debug, Default)]
pub struct CliPublisher;

impl Publisher for CliPublisher {
    fn available(&self) -> bool {
        gh::cli_available()
    }

    fn ensure_release(&self, config: &MirrorConfig) -> Result<(), MirrorError> {
        gh::create_or_get_release(&config.repo_slug(), &config.release_tag)
    }

    fn upload_assets(
        &self,
        config: &MirrorConfig,
        large: &[LargeFile],
    ) -> Result<(), MirrorError> {
        let staged = stage_assets(&config.tmp_dir, large)?;
        gh::upload_release_assets(&config.repo_slug(), &config.release_tag, &staged)
    }

    fn commit_and_push(&self, config: &MirrorConfig, message: &str) -> Result<(), MirrorError> {
        // Only the mirror's own outputs are committed; the download cache
        // under tmp_dir stays out of version control.
        let paths = vec![
            config.datasets_dir.clone(),
            config.checksums_dir.clone(),
            config.scripts_dir.clone(),
        ];
        git::add_commit_push(Path::new("."), &paths, message)
    }
}

/// Link (or copy) each large file under its namespaced asset name.
///
/// The gh CLI names assets after the uploaded file, so the rename to
/// [`LargeFile::asset_name`] has to happen on disk before the upload.
pub fn stage_assets(tmp_dir: &Path, large: &[LargeFile]) -> Result<Vec<PathBuf>, MirrorError> {
    let stage_root = tmp_dir.join("assets");
    fs::create_dir_all(&stage_root)?;

    let mut staged = Vec::with_capacity(large.len());
    for file in large {
        let dest = stage_root.join(file.asset_name());
        if dest.exists() {
            fs::remove_file(&dest)?;
        }
        // Hard link when possible; copy across filesystems.
        if fs::hard_link(&file.cache_path, &dest).is_err() {
            fs::copy(&file.cache_path, &dest)?;
        }
        staged.push(dest);
    }
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staged_assets_use_namespaced_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_a = dir.path().join("a/corpus.gz");
        let cache_b = dir.path().join("b/corpus.gz");
        for (path, bytes) in [(&cache_a, b"aaa"), (&cache_b, b"bbb")] {
            fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
            fs::write(path, bytes).expect("write");
        }

        let large = vec![
            LargeFile {
                cache_path: cache_a,
                logical_path: "msmarco/corpus.gz".to_string(),
            },
            LargeFile {
                cache_path: cache_b,
                logical_path: "nq/corpus.gz".to_string(),
            },
        ];

        let staged = stage_assets(&dir.path().join("tmp"), &large).expect("stage");
        assert_eq!(staged.len(), 2);
        assert!(staged[0].ends_with("msmarco__corpus.gz"));
        assert!(staged[1].ends_with("nq__corpus.gz"));
        assert_eq!(fs::read(&staged[0]).expect("read"), b"aaa");
        assert_eq!(fs::read(&staged[1]).expect("read"), b"bbb");
    }

    #[test]
    fn restaging_overwrites_previous_asset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = dir.path().join("corpus.gz");
        fs::write(&cache, b"v1").expect("write");
        let large = vec![LargeFile {
            cache_path: cache.clone(),
            logical_path: "ds/corpus.gz".to_string(),
        }];

        let tmp = dir.path().join("tmp");
        stage_assets(&tmp, &large).expect("first stage");
        fs::write(&cache, b"v2-longer").expect("rewrite");
        let staged = stage_assets(&tmp, &large).expect("second stage");
        assert_eq!(fs::read(&staged[0]).expect("read"), b"v2-longer");
    }
}
