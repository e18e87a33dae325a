//! Source repository synchronization.
//!
//! Uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! The contract is intentionally small: after `sync` returns Ok, the
//! directory exists and holds a shallow, submodule-inclusive checkout of the
//! remote's default branch. There is no branch selection and no conflict
//! resolution; a pull that cannot fast-forward is an error.

use std::path::Path;
use std::process::Command;

use log::info;

use crate::error::{Error, Result};

/// Ensure `dir` contains an up-to-date checkout of `url`.
///
/// Clones shallowly (depth 1, submodules included) when the directory is
/// absent, otherwise fast-forwards from the default tracking branch.
pub fn sync(dir: &str, url: &str) -> Result<()> {
    if Path::new(dir).exists() {
        pull(dir)
    } else {
        clone_shallow(dir, url)
    }
}

/// Clone a repository using a shallow, submodule-inclusive checkout.
fn clone_shallow(dir: &str, url: &str) -> Result<()> {
    info!("Cloning repository {} from {}", dir, url);

    let output = Command::new("git")
        .args(["clone", "--depth", "1", "--recurse-submodules", url, dir])
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        // Provide helpful error message for common auth failures
        let message = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            format!(
                "Authentication failed. Make sure you have access to the repository.\n\
                For private repos, ensure you have:\n\
                - SSH key added to ssh-agent\n\
                - Git credentials configured\n\
                Error: {}",
                stderr
            )
        } else {
            stderr.to_string()
        };

        return Err(Error::GitClone {
            url: url.to_string(),
            message,
        });
    }

    Ok(())
}

/// Fast-forward an existing checkout from its default tracking branch.
fn pull(dir: &str) -> Result<()> {
    info!("Pulling repository {}", dir);

    let output = Command::new("git")
        .args(["-C", dir, "pull", "--ff-only"])
        .output()
        .map_err(|e| Error::GitCommand {
            command: "pull --ff-only".to_string(),
            dir: dir.to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: "pull --ff-only".to_string(),
            dir: dir.to_string(),
            stderr: stderr.to_string(),
        });
    }

    Ok(())
}
