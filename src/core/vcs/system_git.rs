//! System git backend - zero crate dependencies
//!
//! Shells out to the git binary for every operation, with an isolated
//! subprocess environment so global user configuration cannot change
//! behavior mid-release.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::error::{GitError, ReleaseError, ReleaseResult, ResultExt, ValidationError};
use crate::core::vcs::{ArchiveFormat, RepositoryBackend};

/// Git backend using the system git binary
pub struct SystemGit {
  /// Directory the commands run in
  repo_path: PathBuf,

  /// Working tree root
  work_tree: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// One subprocess call resolves the working tree root and doubles as the
  /// "is this a repository at all" check.
  pub fn open(path: &Path) -> ReleaseResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(ReleaseError::Validation(ValidationError::NotARepository {
          path: path.to_path_buf(),
        }));
      }
      return Err(ReleaseError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();

    Ok(Self {
      repo_path: path.to_path_buf(),
      work_tree: PathBuf::from(work_tree),
    })
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII paths

    cmd
  }

  /// Run a git command and return its stdout, surfacing stderr on failure
  fn run(&self, args: &[&str]) -> ReleaseResult<String> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute git {}", args.join(" ")))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: format!("git {}", args.join(" ")),
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
  }
}

impl RepositoryBackend for SystemGit {
  fn work_tree(&self) -> &Path {
    &self.work_tree
  }

  fn head(&self) -> ReleaseResult<String> {
    Ok(self.run(&["rev-parse", "HEAD"])?.trim().to_string())
  }

  fn working_tree_changes(&self) -> ReleaseResult<Vec<String>> {
    let stdout = self.run(&["status", "--porcelain"])?;
    Ok(parse_porcelain_paths(&stdout))
  }

  fn tag_exists(&self, name: &str) -> ReleaseResult<bool> {
    let stdout = self.run(&["tag", "--list", name])?;
    Ok(stdout.lines().any(|line| line.trim() == name))
  }

  fn list_tags(&self, pattern: &str) -> ReleaseResult<Vec<String>> {
    let stdout = self.run(&["tag", "--list", pattern])?;
    Ok(
      stdout
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect(),
    )
  }

  fn create_tag(&self, name: &str, target: &str, message: &str) -> ReleaseResult<()> {
    let output = self
      .git_cmd()
      .args(["tag", "-a", name, "-m", message, target])
      .output()
      .context("Failed to execute git tag")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::TagCreationFailed {
        tag: name.to_string(),
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(())
  }

  fn delete_tag(&self, name: &str) -> ReleaseResult<()> {
    self.run(&["tag", "-d", name])?;
    Ok(())
  }

  fn commit_subjects_between(&self, from: Option<&str>, to: &str) -> ReleaseResult<Vec<String>> {
    let range = match from {
      Some(from) => format!("{}..{}", from, to),
      None => to.to_string(),
    };

    let stdout = self.run(&["log", "--pretty=format:%s", &range])?;
    Ok(
      stdout
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect(),
    )
  }

  fn archive(&self, treeish: &str, format: ArchiveFormat, prefix: &str, output: &Path) -> ReleaseResult<()> {
    let prefix_arg = format!("--prefix={}/", prefix);
    let format_arg = format!("--format={}", format.as_git_format());
    let output_arg = format!("--output={}", output.display());

    self.run(&["archive", &format_arg, &prefix_arg, &output_arg, treeish])?;
    Ok(())
  }

  fn push_tag(&self, remote: &str, tag: &str) -> ReleaseResult<()> {
    let output = self
      .git_cmd()
      .args(["push", remote, tag])
      .output()
      .context("Failed to execute git push")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        tag: tag.to_string(),
        stderr: stderr.trim().to_string(),
      }));
    }

    Ok(())
  }
}

/// Extract paths from `git status --porcelain` output
///
/// Each line is `XY <path>`; rename lines keep the `old -> new` form since
/// both sides are part of the pending change.
fn parse_porcelain_paths(stdout: &str) -> Vec<String> {
  stdout
    .lines()
    .filter_map(|line| line.get(3..))
    .map(|path| path.trim().to_string())
    .filter(|path| !path.is_empty())
    .collect()
}
