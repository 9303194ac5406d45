//! Create command - scaffold a new project from the skeleton repository.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info, instrument};

use super::style;
use crate::config::Config;
use crate::git;
use crate::placeholder::substitute_placeholders;
use crate::project_name::ProjectName;
use crate::welcome;

#[derive(Args)]
pub struct CreateArgs {
    /// Name of the new project (also the directory it is created in)
    pub name: String,
}

#[instrument(level = "debug", skip_all, fields(name = %args.name))]
pub fn run(args: CreateArgs, verbose: bool) -> Result<()> {
    let name = ProjectName::parse(&args.name)?;
    let cwd = env::current_dir().context("failed to get current directory")?;
    let config = Config::from_env(verbose);
    debug!(skeleton = %config.skeleton, "loaded configuration");

    let root = create_project(&cwd, &name, &config)?;

    println!(
        "{} {}",
        style::success("Created project"),
        style::bold(&root.display().to_string())
    );
    welcome::print_welcome(&root, name.as_str());
    Ok(())
}

/// Scaffold `name` under `parent` and return the project root.
///
/// Steps run in order: clone and reset history, substitute the placeholder,
/// commit. A failure after the clone leaves the directory in place.
pub fn create_project(parent: &Path, name: &ProjectName, config: &Config) -> Result<PathBuf> {
    let root = parent.join(name);

    git::initialize_from_skeleton(&config.skeleton, &root, config.verbose)?;

    let report = substitute_placeholders(&root, &config.placeholder, name.as_str())
        .with_context(|| {
            format!(
                "failed to replace '{}' in {} (the directory was left in place)",
                config.placeholder,
                root.display()
            )
        })?;
    info!(
        "renamed {} entries, rewrote {} files",
        report.renamed.len(),
        report.rewritten.len()
    );

    git::first_commit(&root, &config.commit_message, config.verbose)
        .with_context(|| format!("project left uncommitted in {}", root.display()))?;

    Ok(root)
}
