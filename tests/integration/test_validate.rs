//! Preflight validation failure tests

use crate::helpers::{TestRepo, run_release};
use anyhow::Result;

#[test]
fn test_rejects_malformed_versions() -> Result<()> {
  let repo = TestRepo::new()?;

  for version in ["1.2", "1.2.3.4", "v1.2.3", "1.2.x", "abc"] {
    let output = run_release(&repo.path, &[version])?;
    assert_eq!(output.status.code(), Some(1), "should reject '{}'", version);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
      stderr.contains("Invalid version"),
      "stderr for '{}': {}",
      version,
      stderr
    );
  }

  // Nothing was tagged along the way
  assert!(repo.tags()?.is_empty());
  Ok(())
}

#[test]
fn test_requires_a_repository() -> Result<()> {
  let dir = tempfile::tempdir()?;

  let output = run_release(dir.path(), &["0.1.0"])?;

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Not a git repository"));
  Ok(())
}

#[test]
fn test_dirty_tree_aborts_before_tagging() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("install.sh", "#!/bin/sh\necho changed\n")?;

  let output = run_release(&repo.path, &["0.1.0"])?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("uncommitted changes"));
  assert!(stderr.contains("install.sh"));

  assert!(repo.tags()?.is_empty());
  assert!(repo.release_files()?.is_empty());
  Ok(())
}

#[test]
fn test_dirty_tree_allowed_with_dry_run() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.write_file("install.sh", "#!/bin/sh\necho changed\n")?;

  let output = run_release(&repo.path, &["0.1.0", "--dry-run"])?;

  assert!(output.status.success());
  assert!(repo.tags()?.is_empty());
  Ok(())
}

#[test]
fn test_version_must_advance() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.tag("v1.2.3")?;

  for stale in ["1.2.3", "1.2.2"] {
    let output = run_release(&repo.path, &[stale])?;
    assert_eq!(output.status.code(), Some(1), "'{}' should fail", stale);
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not advance"));
  }

  // Advancing versions pass validation (dry-run leaves the repo untouched)
  for advancing in ["1.2.4", "1.3.0", "2.0.0"] {
    let output = run_release(&repo.path, &[advancing, "--dry-run"])?;
    assert!(output.status.success(), "'{}' should pass validation", advancing);
  }

  assert_eq!(repo.tags()?, vec!["v1.2.3"]);
  Ok(())
}

#[test]
fn test_help_exits_zero() -> Result<()> {
  let repo = TestRepo::new()?;

  let output = run_release(&repo.path, &["--help"])?;

  assert!(output.status.success());
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("--dry-run"));
  assert!(stdout.contains("--force"));
  Ok(())
}
