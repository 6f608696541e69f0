//! Step inputs as passed by the Actions runner.
//!
//! The runner exposes each `with:` entry as `INPUT_<NAME>`; command-line
//! flags take precedence so the binary is usable outside a workflow.

use anyhow::{Result, anyhow};

pub const SPARK_VERSION: &str = "spark-version";
pub const SPARK_URL: &str = "spark-url";
pub const HADOOP_VERSION: &str = "hadoop-version";
pub const SCALA_VERSION: &str = "scala-version";
pub const PY4J_VERSION: &str = "py4j-version";

/// Inputs as read, before required ones are checked.
///
/// Empty or whitespace-only values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    pub spark_version: Option<String>,
    pub spark_url: Option<String>,
    pub hadoop_version: Option<String>,
    pub scala_version: Option<String>,
    pub py4j_version: Option<String>,
}

/// Validated inputs for one installer run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub spark_version: String,
    pub spark_url: Option<String>,
    pub hadoop_version: String,
    pub scala_version: Option<String>,
    pub py4j_version: String,
}

impl RawInputs {
    pub fn new(
        spark_version: Option<String>,
        spark_url: Option<String>,
        hadoop_version: Option<String>,
        scala_version: Option<String>,
        py4j_version: Option<String>,
    ) -> Self {
        Self {
            spark_version: normalize(spark_version),
            spark_url: normalize(spark_url),
            hadoop_version: normalize(hadoop_version),
            scala_version: normalize(scala_version),
            py4j_version: normalize(py4j_version),
        }
    }

    /// Read inputs through `lookup`, keyed by `INPUT_*` variable name.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(&input_env_name(name));
        Self::new(
            get(SPARK_VERSION),
            get(SPARK_URL),
            get(HADOOP_VERSION),
            get(SCALA_VERSION),
            get(PY4J_VERSION),
        )
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Values present in `overrides` replace the ones in `self`.
    pub fn overlay(self, overrides: RawInputs) -> RawInputs {
        RawInputs {
            spark_version: overrides.spark_version.or(self.spark_version),
            spark_url: overrides.spark_url.or(self.spark_url),
            hadoop_version: overrides.hadoop_version.or(self.hadoop_version),
            scala_version: overrides.scala_version.or(self.scala_version),
            py4j_version: overrides.py4j_version.or(self.py4j_version),
        }
    }

    pub fn into_inputs(self) -> Result<ActionInputs> {
        Ok(ActionInputs {
            spark_version: required(SPARK_VERSION, self.spark_version)?,
            spark_url: self.spark_url,
            hadoop_version: required(HADOOP_VERSION, self.hadoop_version)?,
            scala_version: self.scala_version,
            py4j_version: required(PY4J_VERSION, self.py4j_version)?,
        })
    }
}

/// `INPUT_<NAME>`: upper-cased, spaces become `_`, hyphens are kept.
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Unwrap a required input, naming it when missing.
pub fn required(name: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| anyhow!("Input required and not supplied: {name}"))
}
