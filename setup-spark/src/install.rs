//! The installer: download, extract, cache, link, verify and export Spark.
//!
//! Each step feeds the next and the first error aborts the run. Nothing is
//! rolled back; a partially extracted tree stays on disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, instrument};

use crate::core::environment::SparkEnvironment;
use crate::core::release::{SparkRelease, resolve_url};
use crate::io::archive::extract_tgz;
use crate::io::config::InstallerConfig;
use crate::io::download::download_archive;
use crate::io::inputs::ActionInputs;
use crate::io::tool_cache::ToolCache;
use crate::io::workflow::WorkflowCommands;
use crate::io::workspace::resolve_install_dir;

/// Tool cache name for Spark entries.
pub const TOOL_NAME: &str = "spark";
/// Name of the stable link inside the install directory.
pub const SPARK_LINK: &str = "spark";
/// Step output carrying the installed version.
pub const VERSION_OUTPUT: &str = "spark-version";

/// Everything one installer run needs besides its side-effect sinks.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub inputs: ActionInputs,
    pub workspace: PathBuf,
    /// Scratch directory for the downloaded archive.
    pub temp_dir: PathBuf,
    pub config: InstallerConfig,
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub version: String,
    pub url: String,
    pub install_dir: PathBuf,
    pub extracted_dir: PathBuf,
    pub cached_path: PathBuf,
    pub spark_home: PathBuf,
    pub environment: SparkEnvironment,
}

/// Run every installer step in order.
#[instrument(skip_all, fields(spark_version = %request.inputs.spark_version))]
pub fn install<C: WorkflowCommands>(
    request: &InstallRequest,
    cache: &ToolCache,
    commands: &mut C,
) -> Result<InstallReport> {
    let inputs = &request.inputs;
    let config = &request.config;
    let release = SparkRelease::new(
        &inputs.spark_version,
        &inputs.hadoop_version,
        inputs.scala_version.as_deref(),
    )?;

    let install_dir = resolve_install_dir(&request.workspace);
    info!(install_dir = %install_dir.display(), "Spark will be installed to {}", install_dir.display());

    let url = resolve_url(
        inputs.spark_url.as_deref(),
        &release,
        &config.archive_base_url,
    );
    info!("Downloading the binary from {url}");
    let archive = download_archive(&url, &request.temp_dir, config.download_timeout())?;
    let extracted = extract_tgz(archive.path(), &install_dir)
        .with_context(|| format!("extract archive downloaded from {url}"))?;

    let extracted_dir = extracted
        .root_dir()
        .unwrap_or_else(|| install_dir.join(release.archive_stem()));
    if !extracted_dir.is_dir() {
        bail!(not_downloaded(&url));
    }

    let cached_path = cache.cache_dir(&extracted_dir, TOOL_NAME, &release.cache_version())?;
    commands.add_path(&cached_path.display().to_string())?;

    let spark_home = link_spark_home(&install_dir, &extracted_dir)?;
    if !spark_home.join("bin").join("spark-submit").exists() {
        bail!(not_downloaded(&url));
    }
    info!("Binary downloaded, setting up environment variables");

    let environment = SparkEnvironment::new(
        &spark_home.display().to_string(),
        &release,
        &inputs.py4j_version,
        &config.pyspark_python,
        &config.spark_opts,
    );
    for (name, value) in &environment.variables {
        commands.export_variable(name, value)?;
    }
    commands.add_path(&environment.bin_path)?;
    commands.set_output(VERSION_OUTPUT, &release.version)?;

    Ok(InstallReport {
        version: release.version,
        url,
        install_dir,
        extracted_dir,
        cached_path,
        spark_home,
        environment,
    })
}

fn not_downloaded(url: &str) -> String {
    format!("The Spark binary was not properly downloaded from {url}")
}

/// Point `<install_dir>/spark` at `target`, replacing an older link.
pub fn link_spark_home(install_dir: &Path, target: &Path) -> Result<PathBuf> {
    let link = install_dir.join(SPARK_LINK);
    if let Ok(meta) = fs::symlink_metadata(&link) {
        if !meta.file_type().is_symlink() {
            bail!("{} exists and is not a symlink", link.display());
        }
        fs::remove_file(&link).with_context(|| format!("remove old link {}", link.display()))?;
    }
    symlink_dir(target, &link)
        .with_context(|| format!("create symlink {} -> {}", link.display(), target.display()))?;
    Ok(link)
}

#[cfg(unix)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_dir(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}
