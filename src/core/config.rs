//! Project configuration for the release pipeline
//!
//! The released bundle is a config directory, not a cargo workspace, so
//! there is no config file to load: everything is a project constant plus
//! the remote resolution chain (`--remote` flag, `GIT_REMOTE` env, default).

use std::env;
use std::path::PathBuf;

/// Name of the released bundle; archives unpack under `<name>-v<version>/`
pub const PROJECT_NAME: &str = "pre-commit-config";

/// Prefix for release tags (`v1.4.0`)
pub const TAG_PREFIX: &str = "v";

/// Directory (relative to the repository root) that receives the archives
pub const RELEASES_DIR: &str = "releases";

/// Default remote for `--push`
pub const DEFAULT_REMOTE: &str = "origin";

/// Resolved configuration for one release run
#[derive(Debug, Clone)]
pub struct ProjectConfig {
  pub project_name: String,
  pub tag_prefix: String,
  pub releases_dir: PathBuf,
  pub remote: String,
}

impl ProjectConfig {
  /// Resolve the configuration, with an optional CLI remote override
  pub fn resolve(remote_override: Option<String>) -> Self {
    Self::resolve_from(remote_override, env::var("GIT_REMOTE").ok())
  }

  /// Remote precedence: `--remote` flag, then `GIT_REMOTE`, then the default
  fn resolve_from(remote_override: Option<String>, env_remote: Option<String>) -> Self {
    let remote = remote_override
      .or(env_remote)
      .filter(|r| !r.is_empty())
      .unwrap_or_else(|| DEFAULT_REMOTE.to_string());

    Self {
      project_name: PROJECT_NAME.to_string(),
      tag_prefix: TAG_PREFIX.to_string(),
      releases_dir: PathBuf::from(RELEASES_DIR),
      remote,
    }
  }
}
