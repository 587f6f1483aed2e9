//! Dry-run behavior tests

use crate::helpers::{TestRepo, run_release, run_release_ok};
use anyhow::Result;

#[test]
fn test_dry_run_mutates_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.tag("v0.1.0")?;
  repo.commit_file("hooks/a.yaml", "a: 1\n", "fix A")?;

  let output = run_release(&repo.path, &["0.2.0", "--dry-run", "--push"])?;

  assert!(output.status.success());
  assert_eq!(repo.tags()?, vec!["v0.1.0"]);
  assert!(repo.release_files()?.is_empty());
  assert!(!repo.path.join("releases").exists());

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("[dry-run]"));
  Ok(())
}

#[test]
fn test_dry_run_vocabulary_matches_real_run() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.tag("v0.1.0")?;
  repo.commit_file("hooks/a.yaml", "a: 1\n", "fix A")?;

  let dry = run_release_ok(&repo.path, &["0.2.0", "--dry-run"])?;
  let real = run_release_ok(&repo.path, &["0.2.0"])?;

  // Same action messages, different prefix
  for action in ["Creating annotated tag v0.2.0", "Packaging"] {
    assert!(dry.contains(action), "dry-run output missing '{}': {}", action, dry);
    assert!(real.contains(action), "real output missing '{}': {}", action, real);
  }
  assert!(dry.contains("[dry-run]"));
  assert!(!real.contains("[dry-run]"));
  Ok(())
}

#[test]
fn test_json_plan_output() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.tag("v0.1.0")?;
  repo.commit_file("hooks/a.yaml", "a: 1\n", "fix A")?;

  let stdout = run_release_ok(&repo.path, &["0.2.0", "--dry-run", "--json"])?;
  let plan: serde_json::Value = serde_json::from_str(&stdout)?;

  assert_eq!(plan["tag_name"], "v0.2.0");
  assert_eq!(plan["previous_tag"], "v0.1.0");
  assert_eq!(plan["project"], "pre-commit-config");
  assert_eq!(plan["archive_prefix"], "pre-commit-config-v0.2.0");

  let subjects: Vec<String> = serde_json::from_value(plan["subjects"].clone())?;
  assert!(subjects.contains(&"fix A".to_string()));
  Ok(())
}
