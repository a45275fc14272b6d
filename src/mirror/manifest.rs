use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::config::MirrorConfig;
use crate::error::MirrorError;

use super::{LargeFile, SmallFile};

/// Manifest file name under the checksums root.
pub const MANIFEST_FILE: &str = "sha256.txt";

const HASH_CHUNK: usize = 1024 * 1024;

/// Stream a file through sha256 and return the lowercase hex digest.
///
/// Reads in fixed-size chunks so arbitrarily large files hash with bounded
/// memory.
pub fn sha256_file(path: &Path) -> Result<String, MirrorError> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; HASH_CHUNK];

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Render the manifest text for the aggregated small and large tiers.
///
/// Small files come first, sorted by permanent path; large files follow,
/// sorted by logical path and recorded under the datasets prefix where the
/// download script will place them. The output is byte-identical across
/// runs over unchanged inputs.
pub fn render_manifest(
    config: &MirrorConfig,
    small: &[SmallFile],
    large: &[LargeFile],
) -> Result<String, MirrorError> {
    let mut small_sorted: Vec<&SmallFile> = small.iter().collect();
    small_sorted.sort_by(|a, b| a.dest.cmp(&b.dest));

    let mut large_sorted: Vec<&LargeFile> = large.iter().collect();
    large_sorted.sort_by(|a, b| a.logical_path.cmp(&b.logical_path));

    let mut lines = Vec::with_capacity(small.len() + large.len());
    for file in small_sorted {
        let digest = sha256_file(&file.dest)?;
        lines.push(format!("{}  {}", digest, file.dest.display()));
    }
    for file in large_sorted {
        let digest = sha256_file(&file.cache_path)?;
        lines.push(format!(
            "{}  {}/{}",
            digest,
            config.datasets_dir.display(),
            file.logical_path
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    Ok(text)
}

/// Write `checksums/sha256.txt` and return its path.
pub fn write_manifest(
    config: &MirrorConfig,
    small: &[SmallFile],
    large: &[LargeFile],
) -> Result<PathBuf, MirrorError> {
    let text = render_manifest(config, small, large)?;
    fs::create_dir_all(&config.checksums_dir)?;
    let manifest_path = config.checksums_dir.join(MANIFEST_FILE);
    fs::write(&manifest_path, text)?;
    println!("Wrote {}", manifest_path.display());
    Ok(manifest_path)
}
