//! Run configuration.
//!
//! All knobs for a mirror run live in [`MirrorConfig`], which is passed
//! explicitly into the pipeline. Nothing here is process-global, so several
//! differently-configured runs can share one process.

use std::path::PathBuf;

use crate::error::MirrorError;

/// Size threshold below which files are committed directly into the repo.
pub const SMALL_FILE_LIMIT: u64 = 50 * 1024 * 1024;

/// Default number of concurrent per-file downloads within a dataset.
pub const DEFAULT_FETCH_PARALLELISM: usize = 4;

/// Configuration for a single mirror run.
#[derive(Clone, Debug)]
pub struct MirrorConfig {
    /// GitHub owner hosting the mirror repository.
    pub gh_owner: String,
    /// GitHub repository name (without the owner).
    pub gh_repo: String,
    /// Release tag that hosts the large-file assets.
    pub release_tag: String,
    /// Hugging Face access token, if any (needed for private datasets).
    pub hf_token: Option<String>,
    /// Dataset repo ids to mirror, in `<namespace>/<name>` form.
    pub datasets: Vec<String>,
    /// Files at or below this many bytes go into the repo; larger files
    /// become release assets.
    pub small_file_limit: u64,
    /// Worker count for the per-dataset fetch stage.
    pub fetch_parallelism: usize,
    /// Repo-relative root for committed small files.
    pub datasets_dir: PathBuf,
    /// Repo-relative root for the checksum manifest.
    pub checksums_dir: PathBuf,
    /// Repo-relative root for the generated helper scripts.
    pub scripts_dir: PathBuf,
    /// Temporary download cache root.
    pub tmp_dir: PathBuf,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            gh_owner: String::new(),
            gh_repo: String::new(),
            release_tag: "v1.0".to_string(),
            hf_token: None,
            datasets: Vec::new(),
            small_file_limit: SMALL_FILE_LIMIT,
            fetch_parallelism: DEFAULT_FETCH_PARALLELISM,
            datasets_dir: PathBuf::from("datasets"),
            checksums_dir: PathBuf::from("checksums"),
            scripts_dir: PathBuf::from("scripts"),
            tmp_dir: PathBuf::from(".tmp_mirror"),
        }
    }
}

impl MirrorConfig {
    /// Validate the configuration before any network activity.
    pub fn validate(&self) -> Result<(), MirrorError> {
        if self.gh_owner.trim().is_empty() || self.gh_repo.trim().is_empty() {
            return Err(MirrorError::Config(
                "set GH_OWNER and GH_REPO (or --owner/--repo)".to_string(),
            ));
        }
        if self.release_tag.trim().is_empty() {
            return Err(MirrorError::Config(
                "release tag must not be empty".to_string(),
            ));
        }
        if self.datasets.is_empty() {
            return Err(MirrorError::Config(
                "no datasets to mirror; pass at least one <namespace>/<name>".to_string(),
            ));
        }
        if self.fetch_parallelism == 0 {
            return Err(MirrorError::Config(
                "fetch parallelism must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// `<owner>/<repo>` slug used by the gh CLI.
    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.gh_owner, self.gh_repo)
    }

    /// Base URL that release assets download from.
    pub fn release_download_base(&self) -> String {
        format!(
            "https://github.com/{}/{}/releases/download/{}",
            self.gh_owner, self.gh_repo, self.release_tag
        )
    }

    /// Human-facing URL of the release page.
    pub fn release_page_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/releases/tag/{}",
            self.gh_owner, self.gh_repo, self.release_tag
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> MirrorConfig {
        MirrorConfig {
            gh_owner: "acme".to_string(),
            gh_repo: "mirror".to_string(),
            datasets: vec!["org/ds".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn valid_config_passes() {
        valid_config().validate().expect("valid");
    }

    #[test]
    fn empty_owner_is_rejected() {
        let config = MirrorConfig {
            gh_owner: "  ".to_string(),
            ..valid_config()
        };
        let err = config.validate().expect_err("should fail");
        assert!(matches!(err, MirrorError::Config(_)));
    }

    #[test]
    fn empty_dataset_list_is_rejected() {
        let config = MirrorConfig {
            datasets: Vec::new(),
            ..valid_config()
        };
        let err = config.validate().expect_err("should fail");
        assert!(err.to_string().contains("no datasets"));
    }

    #[test]
    fn release_urls_are_derived_from_identifiers() {
        let config = valid_config();
        assert_eq!(
            config.release_download_base(),
            "https://github.com/acme/mirror/releases/download/v1.0"
        );
        assert_eq!(
            config.release_page_url(),
            "https://github.com/acme/mirror/releases/tag/v1.0"
        );
    }
}
