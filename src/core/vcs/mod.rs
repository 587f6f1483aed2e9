//! Git operations abstraction
//!
//! - **RepositoryBackend**: the capability seam the release pipeline runs
//!   against (head, tag namespace, changelog range, tree archive, push)
//! - **SystemGit**: subprocess implementation using the system git binary

pub mod system_git;

pub use system_git::SystemGit;

use std::path::Path;

use crate::core::error::ReleaseResult;

/// Archive formats the backend can cut from a tag's tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
  TarGz,
  Zip,
}

impl ArchiveFormat {
  /// Format name as understood by `git archive --format`
  pub fn as_git_format(&self) -> &'static str {
    match self {
      ArchiveFormat::TarGz => "tar.gz",
      ArchiveFormat::Zip => "zip",
    }
  }
}

/// Capability surface the release pipeline needs from version control
///
/// All operations are synchronous and either complete or fail outright;
/// there is no retry layer. Queries are read-only, mutations are explicit.
pub trait RepositoryBackend {
  /// Repository working tree root
  fn work_tree(&self) -> &Path;

  /// Full id of the current head commit
  fn head(&self) -> ReleaseResult<String>;

  /// Paths with uncommitted changes (empty means clean)
  fn working_tree_changes(&self) -> ReleaseResult<Vec<String>>;

  /// Whether a tag with this exact name exists
  fn tag_exists(&self, name: &str) -> ReleaseResult<bool>;

  /// All tag names matching a glob pattern
  fn list_tags(&self, pattern: &str) -> ReleaseResult<Vec<String>>;

  /// Create an annotated tag at `target` with the given message
  fn create_tag(&self, name: &str, target: &str, message: &str) -> ReleaseResult<()>;

  /// Delete a local tag
  fn delete_tag(&self, name: &str) -> ReleaseResult<()>;

  /// Commit subject lines in `from..to` (all of history up to `to` when
  /// `from` is absent), newest first
  fn commit_subjects_between(&self, from: Option<&str>, to: &str) -> ReleaseResult<Vec<String>>;

  /// Write an archive of `treeish`'s tree to `output`, every entry rooted
  /// under `prefix/`
  fn archive(&self, treeish: &str, format: ArchiveFormat, prefix: &str, output: &Path) -> ReleaseResult<()>;

  /// Push a tag to a named remote
  fn push_tag(&self, remote: &str, tag: &str) -> ReleaseResult<()>;
}
