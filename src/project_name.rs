//! Validated project names.
//!
//! A project name becomes both a directory name and the literal replacement
//! for the placeholder token, so it has to be safe in both roles.

use std::fmt;
use std::path::Path;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

const MAX_LEN: usize = 214;

/// Starts alphanumeric, then only alphanumerics, `.`, `_` and `-`.
static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            bail!("project name must not be empty");
        }
        if name.len() > MAX_LEN {
            bail!(
                "project name is too long ({} characters, at most {} allowed)",
                name.len(),
                MAX_LEN
            );
        }
        if !NAME_REGEX.is_match(name) {
            bail!(
                "invalid project name '{}': use letters, digits, '.', '_' or '-', starting with a letter or digit",
                name
            );
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ProjectName {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}
