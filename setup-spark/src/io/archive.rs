//! Extraction of gzip-compressed tar archives.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use tar::Archive;
use tracing::{debug, instrument};

/// Result of unpacking an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub dest: PathBuf,
    /// Set when every entry lives under the same top-level directory.
    pub top_level: Option<String>,
}

impl Extracted {
    /// Absolute path of the single top-level directory, if any.
    pub fn root_dir(&self) -> Option<PathBuf> {
        self.top_level.as_ref().map(|name| self.dest.join(name))
    }
}

/// Unpack a `.tgz` at `archive` into `dest`, overwriting existing files.
///
/// Entries that would land outside `dest` are skipped.
#[instrument(skip_all, fields(archive = %archive.display(), dest = %dest.display()))]
pub fn extract_tgz(archive: &Path, dest: &Path) -> Result<Extracted> {
    fs::create_dir_all(dest).with_context(|| format!("create directory {}", dest.display()))?;
    let file = File::open(archive).with_context(|| format!("open {}", archive.display()))?;
    let mut tar = Archive::new(GzDecoder::new(BufReader::new(file)));
    tar.set_preserve_permissions(true);
    tar.set_overwrite(true);

    let mut tops = BTreeSet::new();
    let mut entries = 0usize;
    for entry in tar
        .entries()
        .with_context(|| format!("read entries of {}", archive.display()))?
    {
        let mut entry = entry.with_context(|| format!("read entry of {}", archive.display()))?;
        let path = entry.path().context("decode entry path")?.into_owned();
        if let Some(top) = top_level_name(&path) {
            tops.insert(top);
        }
        let unpacked = entry
            .unpack_in(dest)
            .with_context(|| format!("unpack {} into {}", path.display(), dest.display()))?;
        if unpacked {
            entries += 1;
        }
    }

    let top_level = if tops.len() == 1 {
        tops.into_iter().next()
    } else {
        None
    };
    debug!(entries, ?top_level, "archive extracted");
    Ok(Extracted {
        dest: dest.to_path_buf(),
        top_level,
    })
}

fn top_level_name(path: &Path) -> Option<String> {
    path.components().find_map(|component| match component {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    })
}
