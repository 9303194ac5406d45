//! Placeholder substitution over a freshly cloned skeleton.
//!
//! Runs in two passes over the tree below `root`:
//! 1. Rename every file or directory whose base name starts with the token,
//!    replacing the first occurrence only. Entries are renamed deepest-first
//!    from a snapshot taken before any rename, so a renamed parent never
//!    orphans a pending child.
//! 2. Walk the now stable tree again and replace every occurrence of the
//!    token inside each regular file, keeping its permission bits.
//!
//! `.git` directories are skipped by both passes. Any I/O error aborts the
//! walk; whatever was already renamed or rewritten stays that way.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use regex::bytes::{NoExpand, Regex};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// What a substitution run changed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// `(old, new)` paths in the order they were renamed.
    pub renamed: Vec<(PathBuf, PathBuf)>,
    /// Files whose contents were rewritten, by their final path.
    pub rewritten: Vec<PathBuf>,
}

impl SubstitutionReport {
    pub fn is_empty(&self) -> bool {
        self.renamed.is_empty() && self.rewritten.is_empty()
    }
}

/// Replace `token` with `replacement` in names and contents below `root`.
pub fn substitute_placeholders(
    root: &Path,
    token: &str,
    replacement: &str,
) -> Result<SubstitutionReport> {
    if token.is_empty() {
        bail!("placeholder token must not be empty");
    }

    let mut report = SubstitutionReport::default();
    rename_entries(root, token, replacement, &mut report)?;
    rewrite_contents(root, token, replacement, &mut report)?;
    Ok(report)
}

/// `name` with its leading `token` replaced, or `None` if it does not start with `token`.
///
/// Compares raw bytes, so names that are not valid UTF-8 are handled too.
pub fn substituted_name(name: &OsStr, token: &str, replacement: &str) -> Option<OsString> {
    let rest = name.as_bytes().strip_prefix(token.as_bytes())?;
    let mut renamed = replacement.as_bytes().to_vec();
    renamed.extend_from_slice(rest);
    Some(OsStr::from_bytes(&renamed).to_os_string())
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == ".git"
}

fn walk(root: &Path) -> impl Iterator<Item = walkdir::Result<DirEntry>> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_git_dir(e))
}

fn rename_entries(
    root: &Path,
    token: &str,
    replacement: &str,
    report: &mut SubstitutionReport,
) -> Result<()> {
    // Pre-order snapshot; reversed, every descendant precedes its ancestors.
    let snapshot = walk(root)
        .map(|entry| entry.map(DirEntry::into_path))
        .collect::<walkdir::Result<Vec<_>>>()
        .with_context(|| format!("failed to walk {}", root.display()))?;

    for path in snapshot.into_iter().rev() {
        let Some(name) = path.file_name() else {
            continue;
        };
        let Some(new_name) = substituted_name(name, token, replacement) else {
            continue;
        };
        if new_name.as_os_str() == name {
            continue;
        }

        let target = match path.parent() {
            Some(parent) => parent.join(&new_name),
            None => PathBuf::from(&new_name),
        };
        if fs::symlink_metadata(&target).is_ok() {
            bail!(
                "cannot rename {} to {}: destination already exists",
                path.display(),
                target.display()
            );
        }

        fs::rename(&path, &target).with_context(|| {
            format!("failed to rename {} to {}", path.display(), target.display())
        })?;
        debug!("renamed: {} -> {}", path.display(), target.display());
        report.renamed.push((path, target));
    }

    Ok(())
}

fn rewrite_contents(
    root: &Path,
    token: &str,
    replacement: &str,
    report: &mut SubstitutionReport,
) -> Result<()> {
    let pattern = Regex::new(&regex::escape(token)).context("invalid placeholder token")?;

    for entry in walk(root) {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if rewrite_file(entry.path(), &pattern, replacement)? {
            debug!("rewrote: {}", entry.path().display());
            report.rewritten.push(entry.into_path());
        }
    }

    Ok(())
}

/// Rewrite one file in place. Returns whether anything was replaced.
fn rewrite_file(path: &Path, pattern: &Regex, replacement: &str) -> Result<bool> {
    let input = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if !pattern.is_match(&input) {
        return Ok(false);
    }
    let output = pattern.replace_all(&input, NoExpand(replacement.as_bytes()));

    let perms = fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .permissions();

    if perms.readonly() {
        let mut writable = perms.clone();
        writable.set_mode(perms.mode() | 0o200);
        fs::set_permissions(path, writable)
            .with_context(|| format!("failed to make {} writable", path.display()))?;
    }

    fs::write(path, &output).with_context(|| format!("failed to write {}", path.display()))?;
    fs::set_permissions(path, perms)
        .with_context(|| format!("failed to restore permissions of {}", path.display()))?;

    Ok(true)
}
