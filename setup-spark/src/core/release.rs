//! Naming conventions for Apache Spark binary releases.
//!
//! Every name derived here follows the layout of the Apache archive:
//! `spark-<ver>/spark-<ver>-bin-hadoop<hadoop>[-scala<scala>].tgz`.

use anyhow::{Result, anyhow};

/// Default mirror serving every historical Spark release.
pub const DEFAULT_ARCHIVE_BASE_URL: &str = "https://archive.apache.org/dist/spark";

/// A validated Spark build variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparkRelease {
    pub version: String,
    pub hadoop_version: String,
    /// `None` when no Scala variant was requested.
    pub scala_version: Option<String>,
}

impl SparkRelease {
    /// Build a release from raw input strings.
    ///
    /// An empty (or whitespace-only) Scala version means the default build.
    pub fn new(version: &str, hadoop_version: &str, scala_version: Option<&str>) -> Result<Self> {
        let version = validate_component("spark-version", version)?;
        let hadoop_version = validate_component("hadoop-version", hadoop_version)?;
        let scala_version = match scala_version.map(str::trim) {
            Some(scala) if !scala.is_empty() => Some(validate_component("scala-version", scala)?),
            _ => None,
        };
        Ok(Self {
            version,
            hadoop_version,
            scala_version,
        })
    }

    /// `-scala<ver>` when a Scala variant was requested, else empty.
    pub fn scala_suffix(&self) -> String {
        match &self.scala_version {
            Some(scala) => format!("-scala{scala}"),
            None => String::new(),
        }
    }

    /// Directory name inside the archive, e.g. `spark-3.5.0-bin-hadoop3`.
    pub fn archive_stem(&self) -> String {
        format!("spark-{}", self.cache_version())
    }

    /// Tool cache version key, e.g. `3.5.0-bin-hadoop3-scala2.13`.
    pub fn cache_version(&self) -> String {
        format!(
            "{}-bin-hadoop{}{}",
            self.version,
            self.hadoop_version,
            self.scala_suffix()
        )
    }

    /// Archive URL under `base_url` following the Apache mirror layout.
    pub fn default_url(&self, base_url: &str) -> String {
        format!(
            "{}/spark-{}/{}.tgz",
            base_url.trim_end_matches('/'),
            self.version,
            self.archive_stem()
        )
    }
}

/// Pick the download URL: an explicit non-empty URL wins verbatim.
pub fn resolve_url(explicit: Option<&str>, release: &SparkRelease, base_url: &str) -> String {
    match explicit {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => release.default_url(base_url),
    }
}

fn validate_component(name: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(anyhow!("{name} must not be empty"));
    }
    if value.contains('/') || value.chars().any(char::is_whitespace) {
        return Err(anyhow!(
            "{name} must not contain '/' or whitespace (got '{value}')"
        ));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(version: &str, hadoop: &str, scala: Option<&str>) -> SparkRelease {
        SparkRelease::new(version, hadoop, scala).expect("release")
    }

    #[test]
    fn default_url_without_scala() {
        let url = release("3.5.0", "3", None).default_url(DEFAULT_ARCHIVE_BASE_URL);
        assert_eq!(
            url,
            "https://archive.apache.org/dist/spark/spark-3.5.0/spark-3.5.0-bin-hadoop3.tgz"
        );
    }

    #[test]
    fn default_url_with_scala_suffix_before_extension() {
        let url = release("3.5.0", "3", Some("2.13")).default_url(DEFAULT_ARCHIVE_BASE_URL);
        assert_eq!(
            url,
            "https://archive.apache.org/dist/spark/spark-3.5.0/spark-3.5.0-bin-hadoop3-scala2.13.tgz"
        );
    }

    #[test]
    fn empty_scala_version_is_no_suffix() {
        let spark = release("3.4.1", "3", Some("  "));
        assert_eq!(spark.scala_version, None);
        assert_eq!(spark.scala_suffix(), "");
        assert_eq!(spark.archive_stem(), "spark-3.4.1-bin-hadoop3");
    }

    #[test]
    fn cache_version_includes_scala_suffix() {
        let spark = release("3.5.0", "3", Some("2.13"));
        assert_eq!(spark.cache_version(), "3.5.0-bin-hadoop3-scala2.13");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let url = release("2.4.8", "2.7", None).default_url("https://mirror.example/spark/");
        assert_eq!(
            url,
            "https://mirror.example/spark/spark-2.4.8/spark-2.4.8-bin-hadoop2.7.tgz"
        );
    }

    #[test]
    fn explicit_url_is_used_verbatim() {
        let spark = release("3.5.0", "3", None);
        let explicit = "https://dlcdn.apache.org/spark/custom/spark.tgz?x=1";
        assert_eq!(
            resolve_url(Some(explicit), &spark, DEFAULT_ARCHIVE_BASE_URL),
            explicit
        );
    }

    #[test]
    fn blank_explicit_url_falls_back_to_default() {
        let spark = release("3.5.0", "3", None);
        assert_eq!(
            resolve_url(Some(""), &spark, DEFAULT_ARCHIVE_BASE_URL),
            spark.default_url(DEFAULT_ARCHIVE_BASE_URL)
        );
    }

    #[test]
    fn rejects_empty_or_path_like_versions() {
        let err = SparkRelease::new("", "3", None).unwrap_err();
        assert!(err.to_string().contains("spark-version must not be empty"));

        let err = SparkRelease::new("3.5.0", "../3", None).unwrap_err();
        assert!(err.to_string().contains("hadoop-version"));
    }
}
