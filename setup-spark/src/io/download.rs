//! Archive download into a temporary file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};
use url::Url;

const USER_AGENT: &str = concat!("setup-spark/", env!("CARGO_PKG_VERSION"));

/// Fetch `url` into a fresh temp file under `temp_dir`.
///
/// Supports `http`, `https` and `file` URLs. The file is removed when the
/// returned handle is dropped.
#[instrument(skip(temp_dir, timeout), fields(timeout_secs = timeout.as_secs()))]
pub fn download_archive(url: &str, temp_dir: &Path, timeout: Duration) -> Result<NamedTempFile> {
    let parsed = Url::parse(url).with_context(|| format!("parse download url {url}"))?;
    fs::create_dir_all(temp_dir)
        .with_context(|| format!("create download dir {}", temp_dir.display()))?;
    let mut target = tempfile::Builder::new()
        .prefix("spark-")
        .suffix(".tgz")
        .tempfile_in(temp_dir)
        .with_context(|| format!("create temp file in {}", temp_dir.display()))?;

    info!(url, "downloading Spark archive");
    let bytes = match parsed.scheme() {
        "http" | "https" => fetch_http(url, timeout, target.as_file_mut())?,
        "file" => copy_local(&parsed, target.as_file_mut())?,
        other => bail!("unsupported download scheme '{other}' in {url}"),
    };
    debug!(bytes, path = %target.path().display(), "archive downloaded");
    Ok(target)
}

fn fetch_http(url: &str, timeout: Duration, file: &mut File) -> Result<u64> {
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .context("build http client")?;
    let mut resp = client
        .get(url)
        .send()
        .with_context(|| format!("GET {url}"))?;
    if !resp.status().is_success() {
        bail!("GET {} returned status code {}", url, resp.status());
    }
    let mut writer = BufWriter::new(file);
    let bytes = resp
        .copy_to(&mut writer)
        .with_context(|| format!("read response body from {url}"))?;
    writer.flush().context("flush downloaded archive")?;
    Ok(bytes)
}

fn copy_local(url: &Url, file: &mut File) -> Result<u64> {
    let source = url
        .to_file_path()
        .map_err(|_| anyhow!("file url is not a local path: {url}"))?;
    let mut reader =
        File::open(&source).with_context(|| format!("open {}", source.display()))?;
    let bytes = std::io::copy(&mut reader, file)
        .with_context(|| format!("copy {}", source.display()))?;
    file.flush().context("flush copied archive")?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_file_urls() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = temp.path().join("spark.tgz");
        fs::write(&source, b"archive bytes").expect("write source");
        let url = Url::from_file_path(&source).expect("file url");

        let downloaded = download_archive(
            url.as_str(),
            &temp.path().join("downloads"),
            Duration::from_secs(5),
        )
        .expect("download");
        assert_eq!(fs::read(downloaded.path()).expect("read"), b"archive bytes");
        assert!(downloaded.path().starts_with(temp.path().join("downloads")));
    }

    #[test]
    fn missing_local_file_names_the_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let url = Url::from_file_path(temp.path().join("absent.tgz")).expect("file url");
        let err = download_archive(url.as_str(), temp.path(), Duration::from_secs(5)).unwrap_err();
        assert!(format!("{err:#}").contains("absent.tgz"));
    }

    #[test]
    fn rejects_unknown_schemes() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = download_archive(
            "ftp://archive.apache.org/spark.tgz",
            temp.path(),
            Duration::from_secs(5),
        )
        .unwrap_err();
        assert!(err.to_string().contains("unsupported download scheme 'ftp'"));
    }
}
