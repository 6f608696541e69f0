//! CLI tests for `setup-spark install`.
//!
//! Spawns the binary the way the Actions runner does: inputs as `INPUT_*`
//! variables and command files under a temp directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use setup_spark::exit_codes;
use setup_spark::test_support::SparkArchive;
use url::Url;

fn run_install(root: &Path, archive: &Path) -> Output {
    let url = Url::from_file_path(archive).expect("file url");
    Command::new(env!("CARGO_BIN_EXE_setup-spark"))
        .arg("install")
        .env("INPUT_SPARK-VERSION", "3.5.0")
        .env("INPUT_SPARK-URL", url.as_str())
        .env("INPUT_HADOOP-VERSION", "3")
        .env("INPUT_SCALA-VERSION", "")
        .env("INPUT_PY4J-VERSION", "0.10.9.7")
        .env("GITHUB_WORKSPACE", root.join("work/repo"))
        .env("RUNNER_TOOL_CACHE", root.join("toolcache"))
        .env("RUNNER_TEMP", root.join("tmp"))
        .env("GITHUB_ENV", root.join("github_env"))
        .env("GITHUB_PATH", root.join("github_path"))
        .env("GITHUB_OUTPUT", root.join("github_output"))
        .output()
        .expect("setup-spark install")
}

#[test]
fn install_exports_environment_and_output() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("work/repo")).expect("create workspace");
    let archive = SparkArchive::new("spark-3.5.0-bin-hadoop3").write_to(root);

    let output = run_install(root, &archive);
    assert_eq!(
        output.status.code(),
        Some(exit_codes::OK),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let spark_home = root.join("work/spark");
    assert!(spark_home.join("bin/spark-submit").is_file());

    let env = fs::read_to_string(root.join("github_env")).expect("read env file");
    assert!(env.contains(&format!("\n{}\n", spark_home.display())));
    assert!(env.contains(&format!(
        "\n{home}/python:{home}/python/lib/py4j-0.10.9.7-src.zip\n",
        home = spark_home.display()
    )));
    let paths = fs::read_to_string(root.join("github_path")).expect("read path file");
    assert!(paths.contains(&format!("{}/bin\n", spark_home.display())));
    assert!(paths.contains("toolcache/spark/3.5.0-bin-hadoop3/"));
    let outputs = fs::read_to_string(root.join("github_output")).expect("read output file");
    assert!(outputs.starts_with("spark-version<<ghadelimiter_"));
    assert!(outputs.contains("\n3.5.0\n"));
}

#[test]
fn install_fails_when_spark_submit_is_missing() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("work/repo")).expect("create workspace");
    let archive = SparkArchive::new("spark-3.5.0-bin-hadoop3")
        .without_spark_submit()
        .write_to(root);

    let output = run_install(root, &archive);
    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("::error::The Spark binary was not properly downloaded from file://"));
    assert!(!root.join("github_env").exists());
}
