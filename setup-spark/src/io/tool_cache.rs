//! Hosted tool cache in the layout used by the Actions runner images.
//!
//! Entries live at `<root>/<tool>/<version>/<arch>/`, and a sibling
//! `<arch>.complete` file marks an entry as fully written.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCache {
    root: PathBuf,
    arch: String,
}

impl ToolCache {
    pub fn new(root: impl Into<PathBuf>, arch: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            arch: arch.into(),
        }
    }

    /// Resolve the cache root: explicit override, then `RUNNER_TOOL_CACHE`.
    pub fn locate<F>(override_dir: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let root = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => lookup("RUNNER_TOOL_CACHE")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .ok_or_else(|| anyhow!("Expected RUNNER_TOOL_CACHE to be defined"))?,
        };
        Ok(Self::new(root, runner_arch(std::env::consts::ARCH)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entry_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version).join(&self.arch)
    }

    fn marker_path(&self, tool: &str, version: &str) -> PathBuf {
        self.root
            .join(tool)
            .join(version)
            .join(format!("{}.complete", self.arch))
    }

    /// Cached directory for `tool`/`version` if a complete entry exists.
    pub fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let dir = self.entry_dir(tool, version);
        (dir.is_dir() && self.marker_path(tool, version).is_file()).then_some(dir)
    }

    /// Copy the contents of `source` into the cache and mark the entry complete.
    ///
    /// Any previous entry for the same key is replaced.
    #[instrument(skip(self, source), fields(source = %source.display()))]
    pub fn cache_dir(&self, source: &Path, tool: &str, version: &str) -> Result<PathBuf> {
        if !source.is_dir() {
            bail!("source directory {} does not exist", source.display());
        }
        let dest = self.entry_dir(tool, version);
        let marker = self.marker_path(tool, version);
        remove_if_exists(&marker)?;
        if dest.exists() {
            fs::remove_dir_all(&dest)
                .with_context(|| format!("remove stale cache entry {}", dest.display()))?;
        }
        fs::create_dir_all(&dest)
            .with_context(|| format!("create cache entry {}", dest.display()))?;

        let copied = copy_tree(source, &dest)?;
        fs::write(&marker, "").with_context(|| format!("write {}", marker.display()))?;
        info!(cached = %dest.display(), files = copied, "cached tool directory");
        Ok(dest)
    }
}

/// Map Rust's target arch to the names used by the runner images.
pub fn runner_arch(arch: &str) -> String {
    match arch {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "ia32",
        other => other,
    }
    .to_string()
}

fn remove_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("remove {}", path.display()))?;
    }
    Ok(())
}

fn copy_tree(source: &Path, dest: &Path) -> Result<usize> {
    let mut copied = 0usize;
    for entry in WalkDir::new(source).min_depth(1).follow_links(false) {
        let entry = entry.with_context(|| format!("walk {}", source.display()))?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("relativize {}", entry.path().display()))?;
        let target = dest.join(rel);
        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("create directory {}", target.display()))?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("copy {} to {}", entry.path().display(), target.display())
            })?;
            copied += 1;
        }
    }
    debug!(copied, "copied tree");
    Ok(copied)
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> Result<()> {
    let points_to = fs::read_link(link).with_context(|| format!("read link {}", link.display()))?;
    std::os::unix::fs::symlink(&points_to, target)
        .with_context(|| format!("create symlink {}", target.display()))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, _target: &Path) -> Result<()> {
    bail!("symlinks are only supported on unix: {}", link.display())
}
