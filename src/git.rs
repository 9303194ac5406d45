//! Git plumbing for new projects: clone the skeleton, drop its history,
//! start a fresh repository and create the first commit.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

use crate::command::ExternalCommand;
use crate::progress;

fn git(verbose: bool) -> ExternalCommand {
    let mut cmd = ExternalCommand::new("git");
    cmd.print_output(verbose);
    cmd
}

/// Fail early if `dest` is a file or a non-empty directory.
pub fn ensure_destination_free(dest: &Path) -> Result<()> {
    let Ok(meta) = fs::symlink_metadata(dest) else {
        return Ok(());
    };
    if !meta.is_dir() {
        bail!("{} already exists and is not a directory", dest.display());
    }
    let mut entries =
        fs::read_dir(dest).with_context(|| format!("failed to read {}", dest.display()))?;
    if entries.next().is_some() {
        bail!("directory {} already exists and is not empty", dest.display());
    }
    Ok(())
}

/// Clone `skeleton` into `dest`.
///
/// When the clone fails, anything it left at a previously absent `dest` is
/// removed so the command can simply be retried.
pub fn clone_skeleton(skeleton: &str, dest: &Path, verbose: bool) -> Result<()> {
    ensure_destination_free(dest)?;
    let existed = dest.exists();

    let status = progress::cloning(skeleton);
    let result = git(verbose)
        .args(["clone", "--quiet", "--", skeleton])
        .arg(dest)
        .run()
        .with_context(|| format!("failed to clone skeleton repository {}", skeleton));

    match result {
        Ok(_) => {
            status.finish(&format!("cloned {}", skeleton));
            Ok(())
        }
        Err(e) => {
            status.finish_and_clear();
            if !existed && dest.exists() {
                debug!("removing partial clone at {}", dest.display());
                if let Err(cleanup) = fs::remove_dir_all(dest) {
                    warn!("could not remove partial clone at {}: {}", dest.display(), cleanup);
                }
            }
            Err(e)
        }
    }
}

/// Delete the skeleton's history and initialize an empty repository in `root`.
pub fn reset_history(root: &Path, verbose: bool) -> Result<()> {
    let git_dir = root.join(".git");
    if git_dir.exists() {
        fs::remove_dir_all(&git_dir)
            .with_context(|| format!("failed to remove {}", git_dir.display()))?;
        debug!("removed {}", git_dir.display());
    }

    git(verbose)
        .args(["init", "--quiet"])
        .current_dir(root)
        .run()
        .context("failed to initialize a new git repository")?;
    Ok(())
}

/// Clone the skeleton into `dest` and give it a fresh, empty history.
pub fn initialize_from_skeleton(skeleton: &str, dest: &Path, verbose: bool) -> Result<()> {
    clone_skeleton(skeleton, dest, verbose)?;
    reset_history(dest, verbose)?;
    info!("initialized new repository in {}", dest.display());
    Ok(())
}

/// Stage everything in `root` and record the first commit.
pub fn first_commit(root: &Path, message: &str, verbose: bool) -> Result<()> {
    git(verbose)
        .args(["add", "--all"])
        .current_dir(root)
        .run()
        .context("failed to stage project files")?;

    git(verbose)
        .args(["commit", "--quiet", "-m", message])
        .current_dir(root)
        .run()
        .context(
            "failed to create the initial commit \
             (is git user.name and user.email configured?)",
        )?;

    info!("created initial commit: {}", message);
    Ok(())
}
