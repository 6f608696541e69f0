//! `setup-spark`: install Apache Spark for later steps of a GitHub Actions job.
//!
//! Inputs come from `INPUT_*` variables set by the runner, or from flags when
//! run by hand.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use setup_spark::core::release::{SparkRelease, resolve_url};
use setup_spark::exit_codes;
use setup_spark::install::{InstallRequest, install};
use setup_spark::io::config::load_config;
use setup_spark::io::inputs::{self, RawInputs, required};
use setup_spark::io::tool_cache::ToolCache;
use setup_spark::io::workflow::{GithubCommands, issue_error};
use setup_spark::io::workspace::workspace_dir;
use setup_spark::logging;
use tracing::{error, info};

const DOWNLOADS_PAGE: &str = "https://spark.apache.org/downloads.html";

#[derive(Parser)]
#[command(
    name = "setup-spark",
    version,
    about = "Install Apache Spark into a GitHub Actions workspace"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download, install and export Spark for later steps.
    Install {
        #[command(flatten)]
        inputs: InputArgs,
        /// Optional TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the archive URL `install` would download.
    Url {
        #[command(flatten)]
        inputs: InputArgs,
        /// Optional TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Flags mirroring the step inputs; each overrides its `INPUT_*` variable.
#[derive(Args, Debug, Default)]
struct InputArgs {
    #[arg(long)]
    spark_version: Option<String>,
    #[arg(long)]
    spark_url: Option<String>,
    #[arg(long)]
    hadoop_version: Option<String>,
    #[arg(long)]
    scala_version: Option<String>,
    #[arg(long)]
    py4j_version: Option<String>,
}

impl InputArgs {
    /// Environment inputs with these flags layered on top.
    fn resolve(self) -> RawInputs {
        let flags = RawInputs::new(
            self.spark_version,
            self.spark_url,
            self.hadoop_version,
            self.scala_version,
            self.py4j_version,
        );
        RawInputs::from_env().overlay(flags)
    }
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        error!(
            "Issue installing Spark: check if the Spark version and Hadoop versions you are using is part of the one proposed in the Spark download page at {DOWNLOADS_PAGE}"
        );
        error!("{:#}", err);
        issue_error(&format!("{err:#}"));
        std::process::exit(exit_codes::FAILED);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Install { inputs, config } => cmd_install(inputs, config),
        Command::Url { inputs, config } => cmd_url(inputs, config),
    }
}

fn cmd_install(args: InputArgs, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let inputs = args.resolve().into_inputs()?;
    let cache = ToolCache::locate(config.tool_cache_dir.as_deref(), env_lookup)?;
    let temp_dir = env_lookup("RUNNER_TEMP")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);
    let request = InstallRequest {
        inputs,
        workspace: workspace_dir(env_lookup),
        temp_dir,
        config,
    };

    let mut commands = GithubCommands::from_env();
    let report = install(&request, &cache, &mut commands)?;
    info!(
        spark_home = %report.spark_home.display(),
        cached = %report.cached_path.display(),
        "Spark {} installed",
        report.version
    );
    Ok(())
}

fn cmd_url(args: InputArgs, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config.as_deref())?;
    let raw = args.resolve();
    let release = SparkRelease::new(
        &required(inputs::SPARK_VERSION, raw.spark_version)?,
        &required(inputs::HADOOP_VERSION, raw.hadoop_version)?,
        raw.scala_version.as_deref(),
    )?;
    println!(
        "{}",
        resolve_url(
            raw.spark_url.as_deref(),
            &release,
            &config.archive_base_url
        )
    );
    Ok(())
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
