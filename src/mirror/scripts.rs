use std::fs;
use std::path::{Path, PathBuf};

use crate::config::MirrorConfig;
use crate::error::MirrorError;

use super::LargeFile;

/// File name of the generated large-file download script.
pub const DOWNLOAD_SCRIPT: &str = "download.sh";
/// File name of the generated manifest verification script.
pub const VERIFY_SCRIPT: &str = "verify.sh";

/// Render the download script for the aggregated large tier.
///
/// One `curl` line per large file, sorted by logical path; strict shell mode
/// makes the script exit non-zero on the first failed retrieval. Small files
/// arrive with the git clone and need no line here.
pub fn render_download_script(config: &MirrorConfig, large: &[LargeFile]) -> String {
    let mut large_sorted: Vec<&LargeFile> = large.iter().collect();
    large_sorted.sort_by(|a, b| a.logical_path.cmp(&b.logical_path));

    let datasets_root = config.datasets_dir.display();
    let mut lines = vec![
        "#!/usr/bin/env bash".to_string(),
        "set -euo pipefail".to_string(),
        format!("BASE=\"{}\"", config.release_download_base()),
        format!("mkdir -p \"{datasets_root}\""),
    ];

    for file in large_sorted {
        let out_path = format!("{}/{}", datasets_root, file.logical_path);
        lines.push(format!("mkdir -p \"$(dirname \"{out_path}\")\""));
        lines.push(format!(
            "curl -L -o \"{out_path}\" \"$BASE/{}\"",
            file.asset_name()
        ));
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Render the verify script.
///
/// Prefers `sha256sum` and falls back to `shasum -a 256` so the script works
/// on both Linux and macOS hosts.
pub fn render_verify_script(config: &MirrorConfig) -> String {
    let manifest = format!("{}/{}", config.checksums_dir.display(), super::manifest::MANIFEST_FILE);
    [
        "#!/usr/bin/env bash".to_string(),
        "set -euo pipefail".to_string(),
        "if command -v sha256sum >/dev/null 2>&1; then".to_string(),
        format!("  sha256sum -c \"{manifest}\""),
        "else".to_string(),
        format!("  shasum -a 256 -c \"{manifest}\""),
        "fi".to_string(),
        String::new(),
    ]
    .join("\n")
}

/// Write both helper scripts, mark them executable, and return their paths.
pub fn write_scripts(
    config: &MirrorConfig,
    large: &[LargeFile],
) -> Result<(PathBuf, PathBuf), MirrorError> {
    fs::create_dir_all(&config.scripts_dir)?;

    let download_path = config.scripts_dir.join(DOWNLOAD_SCRIPT);
    fs::write(&download_path, render_download_script(config, large))?;
    mark_executable(&download_path)?;
    println!("Wrote {}", download_path.display());

    let verify_path = config.scripts_dir.join(VERIFY_SCRIPT);
    fs::write(&verify_path, render_verify_script(config))?;
    mark_executable(&verify_path)?;
    println!("Wrote {}", verify_path.display());

    Ok((download_path, verify_path))
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<(), MirrorError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<(), MirrorError> {
    Ok(())
}
