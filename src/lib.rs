//! stream-utils - scaffold a new project from the Kafka Streams skeleton.

pub mod cli;
pub mod command;
pub mod config;
pub mod git;
pub mod placeholder;
pub mod progress;
pub mod project_name;
pub mod welcome;

pub use placeholder::{substitute_placeholders, SubstitutionReport};
pub use project_name::ProjectName;
