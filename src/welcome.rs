//! Welcome message shown once the project is ready.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::config::WELCOME_FILE;

/// Text printed when the project has no readable welcome file.
pub fn fallback_message(project_name: &str) -> String {
    format!(
        "Could not find a welcome message for this skeleton.\n\
         \n\
         Next steps:\n\
         \x20 cd {}\n\
         \x20 git remote add origin <your repository url>\n\
         \x20 git push -u origin HEAD",
        project_name
    )
}

/// Load the welcome message from `root`, falling back to a built-in one.
///
/// A missing or unreadable file is only a warning.
pub fn welcome_message(root: &Path, project_name: &str) -> String {
    let path = root.join(WELCOME_FILE);
    match fs::read_to_string(&path) {
        Ok(text) if !text.trim().is_empty() => text.trim_end().to_string(),
        Ok(_) => {
            warn!("{} is empty", path.display());
            fallback_message(project_name)
        }
        Err(e) => {
            warn!("could not read welcome message from {}: {}", path.display(), e);
            fallback_message(project_name)
        }
    }
}

pub fn print_welcome(root: &Path, project_name: &str) {
    println!("\n{}", welcome_message(root, project_name));
}
