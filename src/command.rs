use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// An external program that must succeed.
///
/// Every command this tool runs is treated as must-succeed: a launch error or
/// a non-zero exit becomes an `Err` carrying the captured output.
pub struct ExternalCommand {
    cmd: Command,
    print_output: bool,
}

impl ExternalCommand {
    pub fn new(program: &str) -> Self {
        Self {
            cmd: Command::new(program),
            print_output: false,
        }
    }

    pub fn arg<S: AsRef<std::ffi::OsStr>>(&mut self, arg: S) -> &mut Self {
        self.cmd.arg(arg);
        self
    }

    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    pub fn current_dir<P: AsRef<Path>>(&mut self, dir: P) -> &mut Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Echo the captured output to stdout once the command has finished.
    pub fn print_output(&mut self, yes: bool) -> &mut Self {
        self.print_output = yes;
        self
    }

    /// Run to completion and return the combined stdout and stderr.
    pub fn run(&mut self) -> Result<String> {
        tracing::debug!("+ {}", self.format_command());

        let output = self
            .cmd
            .output()
            .with_context(|| format!("Failed to run {}", self.get_program()))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim().to_string();

        if self.print_output && !combined.is_empty() {
            println!("{}", combined);
        }

        if !output.status.success() {
            let code = output.status.code().unwrap_or(1);
            if combined.is_empty() {
                anyhow::bail!("{} failed with exit code: {}", self.get_program(), code);
            }
            anyhow::bail!(
                "{} failed with exit code: {}\n{}",
                self.get_program(),
                code,
                combined
            );
        }

        Ok(combined)
    }

    fn get_program(&self) -> String {
        self.cmd.get_program().to_string_lossy().to_string()
    }

    fn format_command(&self) -> String {
        let program = self.get_program();
        let args: Vec<_> = self.cmd.get_args().map(|a| a.to_string_lossy()).collect();
        format!("{} {}", program, args.join(" "))
    }
}
