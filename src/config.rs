//! Runtime configuration for project creation.

use std::env;

/// Skeleton repository cloned when `STREAM_UTILS_SKELETON` is not set.
///
/// This is a stand-in location and is not checked to exist; point
/// `STREAM_UTILS_SKELETON` at the real skeleton repository.
pub const DEFAULT_SKELETON: &str = "https://github.com/stream-utils/kafka-streams-skeleton.git";

/// Environment variable overriding the skeleton repository reference.
pub const SKELETON_ENV: &str = "STREAM_UTILS_SKELETON";

/// Token baked into the skeleton's paths and file contents.
pub const PLACEHOLDER: &str = "myproject";

/// Message used for the first commit of every new project.
pub const COMMIT_MESSAGE: &str = "Project initialized with stream-utils";

/// File in the project root holding the welcome message.
pub const WELCOME_FILE: &str = "welcome.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Anything `git clone` accepts: a URL or a local path.
    pub skeleton: String,
    pub placeholder: String,
    pub commit_message: String,
    /// Echo the output of external commands.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skeleton: DEFAULT_SKELETON.to_string(),
            placeholder: PLACEHOLDER.to_string(),
            commit_message: COMMIT_MESSAGE.to_string(),
            verbose: false,
        }
    }
}

impl Config {
    /// Build the configuration from the environment.
    pub fn from_env(verbose: bool) -> Self {
        let skeleton = env::var(SKELETON_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SKELETON.to_string());

        Self {
            skeleton,
            verbose,
            ..Self::default()
        }
    }
}
