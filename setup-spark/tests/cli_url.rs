//! CLI tests for `setup-spark url`.

use std::process::Command;

use setup_spark::exit_codes;

fn url_command() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_setup-spark"));
    for name in [
        "INPUT_SPARK-VERSION",
        "INPUT_SPARK-URL",
        "INPUT_HADOOP-VERSION",
        "INPUT_SCALA-VERSION",
        "INPUT_PY4J-VERSION",
    ] {
        cmd.env_remove(name);
    }
    cmd.arg("url");
    cmd
}

#[test]
fn prints_default_archive_url() {
    let output = url_command()
        .args(["--spark-version", "3.5.0", "--hadoop-version", "3"])
        .output()
        .expect("setup-spark url");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "https://archive.apache.org/dist/spark/spark-3.5.0/spark-3.5.0-bin-hadoop3.tgz\n"
    );
}

#[test]
fn reads_inputs_from_runner_environment() {
    let output = url_command()
        .env("INPUT_SPARK-VERSION", "3.5.0")
        .env("INPUT_HADOOP-VERSION", "3")
        .env("INPUT_SCALA-VERSION", "2.13")
        .output()
        .expect("setup-spark url");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "https://archive.apache.org/dist/spark/spark-3.5.0/spark-3.5.0-bin-hadoop3-scala2.13.tgz\n"
    );
}

#[test]
fn missing_spark_version_fails_with_error_annotation() {
    let output = url_command()
        .args(["--hadoop-version", "3"])
        .output()
        .expect("setup-spark url");

    assert_eq!(output.status.code(), Some(exit_codes::FAILED));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("::error::Input required and not supplied: spark-version"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("https://spark.apache.org/downloads.html"));
}
