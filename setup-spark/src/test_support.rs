//! Test-only helpers for building fixture Spark archives and capturing
//! workflow commands.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Result;
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::io::workflow::WorkflowCommands;

/// Minimal Spark distribution layout packed as `<stem>.tgz`.
#[derive(Debug, Clone)]
pub struct SparkArchive {
    pub stem: String,
    pub py4j_version: String,
    pub include_spark_submit: bool,
}

impl SparkArchive {
    pub fn new(stem: &str) -> Self {
        Self {
            stem: stem.to_string(),
            py4j_version: "0.10.9.7".to_string(),
            include_spark_submit: true,
        }
    }

    /// Drop `bin/spark-submit` to simulate a broken download.
    pub fn without_spark_submit(mut self) -> Self {
        self.include_spark_submit = false;
        self
    }

    /// Write the archive into `dir` and return its path.
    pub fn write_to(&self, dir: &Path) -> PathBuf {
        let path = dir.join(format!("{}.tgz", self.stem));
        let py4j = format!(
            "{}/python/lib/py4j-{}-src.zip",
            self.stem, self.py4j_version
        );
        let submit = format!("{}/bin/spark-submit", self.stem);
        let shell = format!("{}/bin/spark-shell", self.stem);
        let pyspark = format!("{}/python/pyspark/__init__.py", self.stem);
        let release = format!("{}/RELEASE", self.stem);

        let mut entries: Vec<(&str, &str)> = vec![
            (release.as_str(), "Spark fixture\n"),
            (shell.as_str(), "#!/usr/bin/env bash\n"),
            (pyspark.as_str(), ""),
            (py4j.as_str(), "zip"),
        ];
        if self.include_spark_submit {
            entries.push((submit.as_str(), "#!/usr/bin/env bash\necho spark-submit\n"));
        }
        write_tgz(&path, &entries);
        path
    }
}

/// Write a gzip-compressed tar with the given `(path, contents)` files.
///
/// Files under a `bin/` directory are marked executable.
pub fn write_tgz(path: &Path, files: &[(&str, &str)]) {
    let file = File::create(path).expect("create archive");
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));
    for (name, contents) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(contents.len() as u64);
        header.set_mode(if name.contains("/bin/") { 0o755 } else { 0o644 });
        header.set_cksum();
        builder
            .append_data(&mut header, name, contents.as_bytes())
            .expect("append entry");
    }
    let encoder = builder.into_inner().expect("finish tar");
    encoder.finish().expect("finish gzip");
}

/// Records every workflow command instead of talking to the runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingCommands {
    pub variables: Vec<(String, String)>,
    pub paths: Vec<String>,
    pub outputs: Vec<(String, String)>,
}

impl RecordingCommands {
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn output(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl WorkflowCommands for RecordingCommands {
    fn export_variable(&mut self, name: &str, value: &str) -> Result<()> {
        self.variables.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn add_path(&mut self, path: &str) -> Result<()> {
        self.paths.push(path.to_string());
        Ok(())
    }

    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.outputs.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
