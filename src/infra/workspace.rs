//! Workspace resolution and the fetch capability.
//!
//! A package identifier becomes a directory by probing
//! `<root>/<src_dir>/<identifier>` under every configured workspace root.
//! Roots come from a colon-separated environment variable (GOPATH by
//! default); fetching is a capability trait so the fingerprint pipeline
//! only ever sees a resolved local path.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::infra::config::WorkspaceConfig;

/// Failures while turning a package identifier into a local directory
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("{0} is not set; it must hold a colon-separated list of workspace roots")]
    EnvMissing(String),
    #[error("package {0} not found under any workspace root")]
    PackageNotFound(String),
    #[error("cannot probe {path}: {reason}")]
    RootUnreadable { path: String, reason: String },
    #[error("fetch of {package} failed: {reason}")]
    Fetch { package: String, reason: String },
}

/// Capability to materialize a remote package into the workspace.
/// Implementations run before resolution; the pipeline itself never
/// depends on this trait.
pub trait PackageFetcher {
    fn fetch(&self, package: &str) -> Result<(), WorkspaceError>;
}

/// Production fetcher shelling out to the Go toolchain
pub struct GoGetFetcher {
    /// Stream subprocess output to the user's terminal
    pub inherit_output: bool,
}

impl PackageFetcher for GoGetFetcher {
    fn fetch(&self, package: &str) -> Result<(), WorkspaceError> {
        let mut cmd = Command::new("go");
        cmd.args(["get", "-u", "-v", package]);

        if self.inherit_output {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        let status = cmd.status().map_err(|e| WorkspaceError::Fetch {
            package: package.to_string(),
            reason: e.to_string(),
        })?;

        if !status.success() {
            return Err(WorkspaceError::Fetch {
                package: package.to_string(),
                reason: format!("go get exited with {status}"),
            });
        }

        Ok(())
    }
}

/// Ordered set of workspace roots
pub struct Workspace {
    roots: Vec<PathBuf>,
    src_dir: String,
}

impl Workspace {
    pub fn new(roots: Vec<PathBuf>, src_dir: impl Into<String>) -> Self {
        Self {
            roots,
            src_dir: src_dir.into(),
        }
    }

    /// Read the colon-separated root list from the configured environment
    /// variable. An unset or empty variable is a configuration error, not
    /// an empty workspace.
    pub fn from_env(cfg: &WorkspaceConfig) -> Result<Self, WorkspaceError> {
        let raw = std::env::var(&cfg.env).map_err(|_| WorkspaceError::EnvMissing(cfg.env.clone()))?;

        let roots: Vec<PathBuf> = raw
            .split(':')
            .filter(|part| !part.is_empty())
            .map(expand_root)
            .collect();

        if roots.is_empty() {
            return Err(WorkspaceError::EnvMissing(cfg.env.clone()));
        }

        debug!(env = %cfg.env, roots = roots.len(), "workspace roots loaded");
        Ok(Self::new(roots, cfg.src_dir.clone()))
    }

    /// First existing `<root>/<src_dir>/<package>` wins.
    pub fn resolve(&self, package: &str) -> Result<PathBuf, WorkspaceError> {
        for root in &self.roots {
            let candidate = root.join(&self.src_dir).join(package);
            if dir_exists(&candidate)? {
                debug!(path = %candidate.display(), "package resolved");
                return Ok(candidate);
            }
        }

        Err(WorkspaceError::PackageNotFound(package.to_string()))
    }

    /// Where a freshly fetched package lands: under the primary root.
    pub fn fetched_path(&self, package: &str) -> Result<PathBuf, WorkspaceError> {
        let root = self
            .roots
            .first()
            .ok_or_else(|| WorkspaceError::PackageNotFound(package.to_string()))?;
        Ok(root.join(&self.src_dir).join(package))
    }
}

/// Expand `~` and `$VARS` in a root entry; a failed expansion keeps the
/// literal text.
fn expand_root(part: &str) -> PathBuf {
    match shellexpand::full(part) {
        Ok(expanded) => PathBuf::from(expanded.into_owned()),
        Err(_) => PathBuf::from(part),
    }
}

fn dir_exists(path: &Path) -> Result<bool, WorkspaceError> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(WorkspaceError::RootUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn resolution_probes_roots_in_order() -> anyhow::Result<()> {
        let first = TempDir::new()?;
        let second = TempDir::new()?;
        std::fs::create_dir_all(second.path().join("src/example.com/demo"))?;

        let ws = Workspace::new(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            "src",
        );

        let resolved = ws.resolve("example.com/demo")?;
        assert_eq!(resolved, second.path().join("src/example.com/demo"));
        Ok(())
    }

    #[test]
    fn earlier_roots_shadow_later_ones() -> anyhow::Result<()> {
        let first = TempDir::new()?;
        let second = TempDir::new()?;
        std::fs::create_dir_all(first.path().join("src/pkg"))?;
        std::fs::create_dir_all(second.path().join("src/pkg"))?;

        let ws = Workspace::new(
            vec![first.path().to_path_buf(), second.path().to_path_buf()],
            "src",
        );

        assert_eq!(ws.resolve("pkg")?, first.path().join("src/pkg"));
        Ok(())
    }

    #[test]
    fn unknown_packages_are_a_resolution_error() {
        let ws = Workspace::new(vec![PathBuf::from("/nonexistent-root")], "src");
        let err = ws.resolve("example.com/missing").unwrap_err();
        assert!(matches!(err, WorkspaceError::PackageNotFound(_)));
        assert!(err.to_string().contains("example.com/missing"));
    }

    #[test]
    fn fetched_packages_land_under_the_primary_root() -> anyhow::Result<()> {
        let root = TempDir::new()?;
        let ws = Workspace::new(vec![root.path().to_path_buf()], "src");
        assert_eq!(
            ws.fetched_path("example.com/demo")?,
            root.path().join("src/example.com/demo")
        );
        Ok(())
    }
}
