//! Workflow commands understood by the Actions runner.
//!
//! Modern runners read environment, PATH and output updates from the files
//! named by `GITHUB_ENV`, `GITHUB_PATH` and `GITHUB_OUTPUT`. When a file is
//! not configured the equivalent `::command::` line is printed to stdout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use uuid::Uuid;

/// Side effects a step can request from the runner.
pub trait WorkflowCommands {
    /// Make `name=value` visible to later steps of the job.
    fn export_variable(&mut self, name: &str, value: &str) -> Result<()>;
    /// Prepend `path` to PATH for later steps of the job.
    fn add_path(&mut self, path: &str) -> Result<()>;
    /// Set a step output.
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Writes commands to the runner's command files, or to stdout as fallback.
#[derive(Debug, Clone, Default)]
pub struct GithubCommands {
    env_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl GithubCommands {
    pub fn new(
        env_file: Option<PathBuf>,
        path_file: Option<PathBuf>,
        output_file: Option<PathBuf>,
    ) -> Self {
        Self {
            env_file,
            path_file,
            output_file,
        }
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        Self::new(
            file("GITHUB_ENV"),
            file("GITHUB_PATH"),
            file("GITHUB_OUTPUT"),
        )
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl WorkflowCommands for GithubCommands {
    fn export_variable(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.env_file {
            Some(path) => append_line(path, &key_value_message(name, value)?),
            None => {
                println!("::set-env name={}::{}", escape_property(name), escape_data(value));
                Ok(())
            }
        }
    }

    fn add_path(&mut self, path: &str) -> Result<()> {
        match &self.path_file {
            Some(file) => append_line(file, path),
            None => {
                println!("::add-path::{}", escape_data(path));
                Ok(())
            }
        }
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(path) => append_line(path, &key_value_message(name, value)?),
            None => {
                println!(
                    "::set-output name={}::{}",
                    escape_property(name),
                    escape_data(value)
                );
                Ok(())
            }
        }
    }
}

/// Print an `::error::` annotation for the job log.
pub fn issue_error(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// `name<<delim\nvalue\ndelim` block with a random delimiter.
pub fn key_value_message(name: &str, value: &str) -> Result<String> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    if name.contains(&delimiter) {
        bail!("unexpected input: name should not contain the delimiter \"{delimiter}\"");
    }
    if value.contains(&delimiter) {
        bail!("unexpected input: value should not contain the delimiter \"{delimiter}\"");
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}"))
}

pub fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

fn append_line(path: &Path, message: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open command file {}", path.display()))?;
    writeln!(file, "{message}").with_context(|| format!("write command file {}", path.display()))
}
