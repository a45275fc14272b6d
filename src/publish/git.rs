use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::MirrorError;

fn command_error(source: std::io::Error) -> MirrorError {
    MirrorError::Command {
        program: "git".to_string(),
        message: source.to_string(),
    }
}

/// Stage only the given paths.
///
/// The download cache sits inside the working tree, so staging is scoped to
/// the mirror's own output directories rather than `git add -A`; large-tier
/// bytes must never end up in a commit.
pub fn add_paths(root: &Path, paths: &[PathBuf]) -> Result<(), MirrorError> {
    let mut command = Command::new("git");
    command.current_dir(root).args(["add", "--"]);
    command.args(paths);
    let status = command.status().map_err(command_error)?;
    if !status.success() {
        return Err(MirrorError::Command {
            program: "git".to_string(),
            message: format!("'git add' exited with {status}"),
        });
    }
    Ok(())
}

/// Commit the staged changes.
///
/// Returns `Ok(false)` when the commit fails because the diff is empty
/// (nothing changed since the last run); that is a benign no-op.
pub fn commit(root: &Path, message: &str) -> Result<bool, MirrorError> {
    let status = Command::new("git")
        .current_dir(root)
        .args(["commit", "-m", message])
        .status()
        .map_err(command_error)?;
    Ok(status.success())
}

/// Push the current branch.
pub fn push_head(root: &Path) -> Result<(), MirrorError> {
    let status = Command::new("git")
        .current_dir(root)
        .args(["push", "origin", "HEAD"])
        .status()
        .map_err(command_error)?;
    if !status.success() {
        return Err(MirrorError::Command {
            program: "git".to_string(),
            message: format!("'git push origin HEAD' exited with {status}"),
        });
    }
    Ok(())
}

/// Stage the mirror output paths, commit, and push the current branch.
///
/// An empty-diff commit skips the push and still succeeds.
pub fn add_commit_push(
    root: &Path,
    paths: &[PathBuf],
    message: &str,
) -> Result<(), MirrorError> {
    add_paths(root, paths)?;
    if !commit(root, message)? {
        println!("No changes to commit.");
        return Ok(());
    }
    push_head(root)
}
