//! Environment exported to later workflow steps.

use crate::core::release::SparkRelease;

/// Interpreter used for both the PySpark driver and workers.
pub const DEFAULT_PYSPARK_PYTHON: &str = "python";

/// JVM options handed to `spark-submit` through `SPARK_OPTS`.
pub const DEFAULT_SPARK_OPTS: &str = "--driver-java-options=-Xms1024M --driver-java-options=-Xmx2048M --driver-java-options=-Dlog4j.logLevel=info";

/// Ordered set of variables to export plus the `bin` directory to put on PATH.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparkEnvironment {
    pub spark_home: String,
    pub bin_path: String,
    pub variables: Vec<(&'static str, String)>,
}

impl SparkEnvironment {
    pub fn new(
        spark_home: &str,
        release: &SparkRelease,
        py4j_version: &str,
        pyspark_python: &str,
        spark_opts: &str,
    ) -> Self {
        let variables = vec![
            ("SPARK_HOME", spark_home.to_string()),
            ("HADOOP_VERSION", release.hadoop_version.clone()),
            ("APACHE_SPARK_VERSION", release.version.clone()),
            ("PYSPARK_PYTHON", pyspark_python.to_string()),
            ("PYSPARK_DRIVER_PYTHON", pyspark_python.to_string()),
            ("PYTHONPATH", python_path(spark_home, py4j_version)),
            ("SPARK_OPTS", spark_opts.to_string()),
        ];
        Self {
            spark_home: spark_home.to_string(),
            bin_path: format!("{spark_home}/bin"),
            variables,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// `PYTHONPATH` exposing the PySpark sources and the bundled py4j zip.
pub fn python_path(spark_home: &str, py4j_version: &str) -> String {
    format!("{spark_home}/python:{spark_home}/python/lib/py4j-{py4j_version}-src.zip")
}
