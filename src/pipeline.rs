//! The mirror pipeline.
//!
//! Drives the configured datasets through listing, fetch, and partition,
//! then writes the manifest and helper scripts, and finally publishes the
//! results when the release-hosting CLI is usable. Publishing is strictly
//! additive: a run without it still produces every local artifact.

use std::fs;

use crate::config::MirrorConfig;
use crate::error::MirrorError;
use crate::hf::{self, DatasetRef, FetchedFile, RemoteFileEntry};
use crate::mirror::{
    manifest, partition, scripts, DatasetSummary, LargeFile, MirrorReport, SmallFile,
    TierAssignment,
};
use crate::publish::{CliPublisher, Publisher};

/// The pipeline's view of the remote dataset store.
///
/// The production implementation is [`HubSource`]; tests drive the pipeline
/// with an in-memory source instead.
pub trait DatasetSource {
    /// List the payload files of a dataset.
    fn list(
        &self,
        dataset: &DatasetRef,
        config: &MirrorConfig,
    ) -> Result<Vec<RemoteFileEntry>, MirrorError>;

    /// Fetch the listed files into the temp cache. Files that land nowhere
    /// are simply absent from the result.
    fn fetch(
        &self,
        dataset: &DatasetRef,
        entries: &[RemoteFileEntry],
        config: &MirrorConfig,
    ) -> Result<Vec<FetchedFile>, MirrorError>;
}

/// Remote store backed by the Hugging Face Hub.
#[derive(Clone, Copy, Debug, Default)]
pub struct HubSource;

impl DatasetSource for HubSource {
    fn list(
        &self,
        dataset: &DatasetRef,
        config: &MirrorConfig,
    ) -> Result<Vec<RemoteFileEntry>, MirrorError> {
        hf::listing::list_dataset_files(dataset, config.hf_token.as_deref())
    }

    fn fetch(
        &self,
        dataset: &DatasetRef,
        entries: &[RemoteFileEntry],
        config: &MirrorConfig,
    ) -> Result<Vec<FetchedFile>, MirrorError> {
        hf::fetch::fetch_dataset(
            dataset,
            entries,
            &config.tmp_dir,
            config.hf_token.as_deref(),
            config.fetch_parallelism,
        )
    }
}

/// Run the full pipeline with the production collaborators.
pub fn run_mirror(config: &MirrorConfig) -> Result<MirrorReport, MirrorError> {
    run_mirror_with(config, &HubSource, &CliPublisher)
}

/// Run the full pipeline with explicit collaborators.
pub fn run_mirror_with(
    config: &MirrorConfig,
    source: &dyn DatasetSource,
    publisher: &dyn Publisher,
) -> Result<MirrorReport, MirrorError> {
    config.validate()?;

    // Every reference must parse before any network activity starts.
    let datasets = config
        .datasets
        .iter()
        .map(|input| hf::resolve::parse_dataset_ref(input))
        .collect::<Result<Vec<_>, _>>()?;

    ensure_dirs(config)?;

    let mut report = MirrorReport::default();
    let mut all_small: Vec<SmallFile> = Vec::new();
    let mut all_large: Vec<LargeFile> = Vec::new();

    for dataset in &datasets {
        println!("\n=== Mirroring {} ===", dataset.repo_id());
        let (small, large, summary) = mirror_dataset(source, dataset, config)?;
        all_small.extend(small);
        all_large.extend(large);
        report.add(summary);
    }

    // Local artifacts are written no matter what publishing decides.
    println!("\nComputing checksums...");
    manifest::write_manifest(config, &all_small, &all_large)?;
    scripts::write_scripts(config, &all_large)?;

    if publisher.available() {
        println!("Release host is available and authenticated");
        publisher.ensure_release(config)?;
        publisher.upload_assets(config, &all_large)?;
        publisher.commit_and_push(
            config,
            &format!(
                "Mirror datasets: small files in repo, large files in release {}",
                config.release_tag
            ),
        )?;
        report.published = true;
        print_consumer_usage(config);
    } else {
        println!("Release host unavailable or not authenticated; skipping publishing.");
        println!("To enable publishing, run: gh auth login");
        print_local_usage(config);
    }

    Ok(report)
}

fn ensure_dirs(config: &MirrorConfig) -> Result<(), MirrorError> {
    for dir in [
        &config.datasets_dir,
        &config.checksums_dir,
        &config.scripts_dir,
        &config.tmp_dir,
    ] {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Mirror one dataset: list, fetch, partition, and summarize.
fn mirror_dataset(
    source: &dyn DatasetSource,
    dataset: &DatasetRef,
    config: &MirrorConfig,
) -> Result<(Vec<SmallFile>, Vec<LargeFile>, DatasetSummary), MirrorError> {
    let entries = source.list(dataset, config)?;
    let fetched = source.fetch(dataset, &entries, config)?;
    let mut skipped = entries.len() - fetched.len();

    let mut small = Vec::new();
    let mut large = Vec::new();
    for file in &fetched {
        match partition::partition_file(file, &dataset.name, config)? {
            Some(TierAssignment::Small(file)) => small.push(file),
            Some(TierAssignment::Large(file)) => large.push(file),
            None => skipped += 1,
        }
    }

    let summary = DatasetSummary {
        repo_id: dataset.repo_id(),
        small: small.len(),
        large: large.len(),
        skipped,
    };
    Ok((small, large, summary))
}

fn print_consumer_usage(config: &MirrorConfig) {
    println!("\nDone.");
    println!("USAGE for consumers:");
    println!(
        "1) git clone https://github.com/{}/{}",
        config.gh_owner, config.gh_repo
    );
    println!(
        "2) ./{}/{}   # fetches large assets from the release",
        config.scripts_dir.display(),
        scripts::DOWNLOAD_SCRIPT
    );
    println!(
        "3) ./{}/{}     # verifies all files",
        config.scripts_dir.display(),
        scripts::VERIFY_SCRIPT
    );
    println!("\nRelease URL: {}", config.release_page_url());
}

fn print_local_usage(config: &MirrorConfig) {
    println!("\nDone (publishing skipped).");
    println!("Downloaded files are available in:");
    println!("- Small files: {}", config.datasets_dir.display());
    println!("- Large files: {}", config.tmp_dir.display());
    println!("\nTo publish:");
    println!("1) Run: gh auth login");
    println!("2) Re-run this tool");
}
