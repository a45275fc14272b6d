use std::fs;

use crate::config::MirrorConfig;
use crate::error::MirrorError;
use crate::hf::FetchedFile;

use super::{LargeFile, SmallFile, TierAssignment};

/// Decide the storage tier of one fetched file and place it accordingly.
///
/// The effective size is the declared listing size when present, otherwise
/// the on-disk size. Small files are copied (not moved) into the permanent
/// datasets area; large files stay in the cache and are only recorded under
/// their logical path. `Ok(None)` means the file vanished between fetch and
/// placement; it is logged and dropped, never fatal to the run.
pub fn partition_file(
    fetched: &FetchedFile,
    dataset_name: &str,
    config: &MirrorConfig,
) -> Result<Option<TierAssignment>, MirrorError> {
    let effective_size = match fetched.entry.size {
        Some(declared) => declared,
        None => match fs::metadata(&fetched.local_path) {
            Ok(meta) => meta.len(),
            Err(source) => {
                eprintln!(
                    "WARN: cannot stat '{}', dropping: {}",
                    fetched.local_path.display(),
                    source
                );
                return Ok(None);
            }
        },
    };

    if effective_size <= config.small_file_limit {
        let dest = config
            .datasets_dir
            .join(dataset_name)
            .join(&fetched.entry.rfilename);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        if let Err(source) = fs::copy(&fetched.local_path, &dest) {
            eprintln!(
                "WARN: cannot copy '{}' into the repo, dropping: {}",
                fetched.local_path.display(),
                source
            );
            return Ok(None);
        }
        Ok(Some(TierAssignment::Small(SmallFile { dest })))
    } else {
        Ok(Some(TierAssignment::Large(LargeFile {
            cache_path: fetched.local_path.clone(),
            logical_path: format!("{}/{}", dataset_name, fetched.entry.rfilename),
        })))
    }
}
