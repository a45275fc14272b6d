use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::MirrorError;

fn command_error(program: &str, source: std::io::Error) -> MirrorError {
    MirrorError::Command {
        program: program.to_string(),
        message: source.to_string(),
    }
}

fn run_checked(command: &mut Command) -> Result<(), MirrorError> {
    let program = command.get_program().to_string_lossy().to_string();
    let status = command.status().map_err(|e| command_error(&program, e))?;
    if !status.success() {
        return Err(MirrorError::Command {
            program,
            message: format!("exited with {status}"),
        });
    }
    Ok(())
}

/// Whether the gh CLI is installed and authenticated.
///
/// Any failure (missing binary, no auth) reads as unavailable; the caller
/// degrades to a local-only run.
pub fn cli_available() -> bool {
    Command::new("gh")
        .args(["auth", "status"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Whether a release with the given tag already exists.
pub fn release_exists(repo_slug: &str, tag: &str) -> Result<bool, MirrorError> {
    let status = Command::new("gh")
        .args(["release", "view", tag, "-R", repo_slug])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| command_error("gh", e))?;
    Ok(status.success())
}

/// Create the release if it does not exist yet; reuse it if it does.
pub fn create_or_get_release(repo_slug: &str, tag: &str) -> Result<(), MirrorError> {
    if release_exists(repo_slug, tag)? {
        println!("Release {tag} already exists");
        return Ok(());
    }
    run_checked(Command::new("gh").args([
        "release",
        "create",
        tag,
        "-R",
        repo_slug,
        "-t",
        tag,
        "-n",
        "Automated dataset mirror",
    ]))
}

/// Upload files as assets of the release.
pub fn upload_release_assets(
    repo_slug: &str,
    tag: &str,
    files: &[PathBuf],
) -> Result<(), MirrorError> {
    if files.is_empty() {
        return Ok(());
    }
    let mut command = Command::new("gh");
    command.args(["release", "upload", tag]);
    command.args(files);
    command.args(["-R", repo_slug]);
    run_checked(&mut command)
}
