use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use hf_hub::api::sync::{ApiBuilder, ApiRepo};

use crate::error::MirrorError;

use super::{DatasetRef, FetchedFile, RemoteFileEntry};

/// Build a Hub repo handle whose cache lives under the per-dataset temp root.
pub fn build_repo(
    dataset: &DatasetRef,
    cache_root: &Path,
    token: Option<&str>,
) -> Result<ApiRepo, MirrorError> {
    let mut builder = ApiBuilder::new()
        .with_progress(false)
        .with_cache_dir(cache_root.to_path_buf());

    if token.is_some() {
        builder = builder.with_token(token.map(str::to_string));
    }

    let api = builder.build().map_err(|source| MirrorError::HfApi {
        repo_id: dataset.repo_id(),
        message: source.to_string(),
    })?;

    Ok(api.dataset(dataset.repo_id()))
}

/// Retrieve one file into the per-dataset cache.
///
/// The download client does not guarantee where the file lands: it may use
/// the requested layout or its own snapshot layout. Both candidates are
/// checked; `Ok(None)` means the file landed nowhere and is skipped.
pub fn fetch_file(
    repo: &ApiRepo,
    dataset_root: &Path,
    entry: &RemoteFileEntry,
) -> Result<Option<FetchedFile>, MirrorError> {
    let expected = dataset_root.join(&entry.rfilename);
    if let Some(parent) = expected.parent() {
        fs::create_dir_all(parent)?;
    }

    let reported = match repo.download(&entry.rfilename) {
        Ok(path) => path,
        Err(source) => {
            eprintln!(
                "WARN: download of '{}' failed, skipping: {}",
                entry.rfilename, source
            );
            return Ok(None);
        }
    };

    match resolve_landing(&expected, &reported) {
        Some(local_path) => Ok(Some(FetchedFile {
            entry: entry.clone(),
            local_path,
        })),
        None => {
            eprintln!(
                "WARN: '{}' missing at both {} and {}, skipping",
                entry.rfilename,
                expected.display(),
                reported.display()
            );
            Ok(None)
        }
    }
}

/// Two-candidate landing resolution: the requested path wins when it exists,
/// otherwise the path the client reported; neither existing is a definite
/// failure.
pub(crate) fn resolve_landing(expected: &Path, reported: &Path) -> Option<PathBuf> {
    if expected.is_file() {
        return Some(expected.to_path_buf());
    }
    if reported.is_file() {
        return Some(reported.to_path_buf());
    }
    None
}

/// Fetch every listed file of a dataset through a bounded worker pool.
///
/// Workers pull listing indices from a shared counter and write results back
/// by index, so the returned order matches the listing regardless of which
/// download finishes first. Skipped files are simply absent from the result.
pub fn fetch_dataset(
    dataset: &DatasetRef,
    entries: &[RemoteFileEntry],
    tmp_root: &Path,
    token: Option<&str>,
    parallelism: usize,
) -> Result<Vec<FetchedFile>, MirrorError> {
    let dataset_root = tmp_root.join(&dataset.name);
    fs::create_dir_all(&dataset_root)?;

    if entries.is_empty() {
        return Ok(Vec::new());
    }

    let repo = build_repo(dataset, &dataset_root, token)?;
    let workers = parallelism.min(entries.len());

    let next = AtomicUsize::new(0);
    let slots: Mutex<Vec<Option<Result<Option<FetchedFile>, MirrorError>>>> =
        Mutex::new((0..entries.len()).map(|_| None).collect());

    std::thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                if index >= entries.len() {
                    break;
                }
                let entry = &entries[index];
                println!(
                    "Downloading: {}/{} ({})",
                    dataset.name,
                    entry.rfilename,
                    entry
                        .size
                        .map(|size| format!("{size} bytes"))
                        .unwrap_or_else(|| "size unknown".to_string())
                );
                let outcome = fetch_file(&repo, &dataset_root, entry);
                slots.lock().expect("fetch slot lock")[index] = Some(outcome);
            });
        }
    });

    let mut fetched = Vec::with_capacity(entries.len());
    let slots = slots.into_inner().expect("fetch slot lock");
    for outcome in slots {
        match outcome {
            Some(Ok(Some(file))) => fetched.push(file),
            Some(Ok(None)) => {}
            Some(Err(error)) => return Err(error),
            // Unreachable in practice: the scope re-raises worker panics on
            // join, so every slot is filled by the time we get here. The arm
            // only keeps the match total.
            None => {}
        }
    }

    Ok(fetched)
}
