//! Install Apache Spark into a GitHub Actions job.
//!
//! A single step downloads a Spark binary release, unpacks it next to the
//! workspace, registers it in the hosted tool cache, links it as `spark` and
//! exports `SPARK_HOME`, `PYTHONPATH` and friends for later steps.
//!
//! - **[`core`]**: Pure naming, URL and environment logic. No I/O.
//! - **[`io`]**: Side-effecting helpers (inputs, download, extraction, tool
//!   cache, workflow commands).
//!
//! [`install`] sequences them; the `setup-spark` binary wires in the
//! process environment.

pub mod core;
pub mod exit_codes;
pub mod install;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
