//! Install directory selection.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Used when `GITHUB_WORKSPACE` is unset.
pub const DEFAULT_WORKSPACE: &str = "/home/runner/work";

/// Workspace directory from `GITHUB_WORKSPACE`, or the hosted-runner default.
pub fn workspace_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    lookup("GITHUB_WORKSPACE")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKSPACE))
}

/// Prefer the parent of `workspace` so Spark stays out of the checkout.
///
/// Falls back to `workspace` itself when the parent cannot be listed. The
/// check is best-effort: a later write failure is reported by the step that
/// hits it.
pub fn resolve_install_dir(workspace: &Path) -> PathBuf {
    let parent = workspace
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty());
    match parent {
        Some(parent) if fs::read_dir(parent).is_ok() => {
            debug!(install_dir = %parent.display(), "parent of workspace is accessible");
            parent.to_path_buf()
        }
        _ => {
            warn!(
                workspace = %workspace.display(),
                "using $GITHUB_WORKSPACE to store Spark (parent not accessible)"
            );
            workspace.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readable_parent_is_preferred() {
        let temp = tempfile::tempdir().expect("tempdir");
        let workspace = temp.path().join("repo");
        fs::create_dir(&workspace).expect("create workspace");
        assert_eq!(resolve_install_dir(&workspace), temp.path());
    }

    #[test]
    fn missing_parent_falls_back_to_workspace() {
        let temp = tempfile::tempdir().expect("tempdir");
        let workspace = temp.path().join("gone").join("repo");
        assert_eq!(resolve_install_dir(&workspace), workspace);
    }

    #[test]
    fn relative_workspace_without_parent_is_kept() {
        assert_eq!(resolve_install_dir(Path::new("repo")), PathBuf::from("repo"));
    }

    #[test]
    fn workspace_defaults_when_unset_or_empty() {
        assert_eq!(workspace_dir(|_| None), PathBuf::from(DEFAULT_WORKSPACE));
        assert_eq!(
            workspace_dir(|_| Some(String::new())),
            PathBuf::from(DEFAULT_WORKSPACE)
        );
        assert_eq!(
            workspace_dir(|_| Some("/w/repo".to_string())),
            PathBuf::from("/w/repo")
        );
    }
}
