//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A throwaway git repository holding a pre-commit config bundle
pub struct TestRepo {
  root: TempDir,
  pub path: PathBuf,
}

impl TestRepo {
  /// Create a repository with one initial commit
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().join("repo");
    std::fs::create_dir_all(&path)?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "tag.gpgSign", "false"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;

    std::fs::write(path.join(".pre-commit-config.yaml"), "repos: []\n")?;
    std::fs::write(path.join("install.sh"), "#!/bin/sh\n")?;
    std::fs::write(path.join(".gitignore"), "releases/\n")?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial commit"])?;

    Ok(Self { root, path })
  }

  /// Write a file (creating parent directories) and commit it
  pub fn commit_file(&self, name: &str, content: &str, message: &str) -> Result<()> {
    let file_path = self.path.join(name);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    Ok(())
  }

  /// Write a file without committing (dirties the tree)
  pub fn write_file(&self, name: &str, content: &str) -> Result<()> {
    std::fs::write(self.path.join(name), content)?;
    Ok(())
  }

  /// Create an annotated tag at HEAD
  pub fn tag(&self, name: &str) -> Result<()> {
    git(&self.path, &["tag", "-a", name, "-m", name])?;
    Ok(())
  }

  /// All tag names
  pub fn tags(&self) -> Result<Vec<String>> {
    let output = git(&self.path, &["tag", "--list"])?;
    Ok(
      String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect(),
    )
  }

  /// Full message of an annotated tag
  pub fn tag_message(&self, name: &str) -> Result<String> {
    let output = git(&self.path, &["tag", "-l", "--format=%(contents)", name])?;
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
  }

  /// Commit a tag points at (peeled)
  pub fn tag_target(&self, name: &str) -> Result<String> {
    let output = git(&self.path, &["rev-parse", &format!("{}^{{commit}}", name)])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Current HEAD commit id
  pub fn head(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// File names under releases/, sorted (empty if the directory is absent)
  pub fn release_files(&self) -> Result<Vec<String>> {
    let dir = self.path.join("releases");
    if !dir.exists() {
      return Ok(Vec::new());
    }

    let mut names: Vec<String> = std::fs::read_dir(&dir)?
      .filter_map(|entry| entry.ok())
      .filter_map(|entry| entry.file_name().into_string().ok())
      .collect();
    names.sort();
    Ok(names)
  }

  /// Create a bare repository next to this one and register it as a remote
  pub fn add_remote(&self, name: &str) -> Result<PathBuf> {
    let remote_path = self.root.path().join(format!("{}.git", name));
    let remote_str = remote_path.to_str().context("non-utf8 temp path")?;

    git(self.root.path(), &["init", "--bare", remote_str])?;
    git(&self.path, &["remote", "add", name, remote_str])?;

    Ok(remote_path)
  }
}

/// Run git in a directory, asserting success
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the precommit-release binary without asserting success
pub fn run_release(cwd: &Path, args: &[&str]) -> Result<Output> {
  run_release_env(cwd, args, &[])
}

/// Run the binary with extra environment variables
pub fn run_release_env(cwd: &Path, args: &[&str], envs: &[(&str, &str)]) -> Result<Output> {
  let bin = env!("CARGO_BIN_EXE_precommit-release");

  let mut cmd = Command::new(bin);
  cmd.current_dir(cwd).args(args).env_remove("GIT_REMOTE");
  for (key, value) in envs {
    cmd.env(key, value);
  }

  cmd.output().context("Failed to run precommit-release")
}

/// Run the binary and require success, returning stdout
pub fn run_release_ok(cwd: &Path, args: &[&str]) -> Result<String> {
  let output = run_release(cwd, args)?;

  if !output.status.success() {
    anyhow::bail!(
      "precommit-release failed: {:?}\nstdout: {}\nstderr: {}",
      args,
      String::from_utf8_lossy(&output.stdout),
      String::from_utf8_lossy(&output.stderr)
    );
  }

  Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
