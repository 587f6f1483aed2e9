//! Release command implementation
//!
//! One linear pipeline per invocation:
//! parse → validate → plan → tag → archive → push → report.
//! No step is retried; a fatal step aborts the rest without undoing
//! completed steps.

use std::env;

use crate::core::config::ProjectConfig;
use crate::core::error::ReleaseResult;
use crate::core::vcs::{RepositoryBackend, SystemGit};
use crate::release::archive::{self, ReleaseArtifact};
use crate::release::plan::ReleasePlan;
use crate::release::request::{ReleaseFlags, ReleaseRequest};
use crate::ui::status::StatusReporter;

/// Run one release end to end
pub fn run_release(
  raw_version: String,
  dry_run: bool,
  force: bool,
  no_archive: bool,
  push: bool,
  remote: Option<String>,
  json: bool,
) -> ReleaseResult<()> {
  let config = ProjectConfig::resolve(remote);
  let flags = ReleaseFlags {
    dry_run,
    force,
    no_archive,
    push,
  };
  let request = ReleaseRequest::new(&raw_version, flags, config.remote.clone())?;

  let current_dir = env::current_dir()?;
  let repo = SystemGit::open(&current_dir)?;
  let reporter = StatusReporter::new(flags.dry_run, json);

  let plan = ReleasePlan::prepare(&repo, &request, &config)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&plan)?);
  } else {
    print_plan(&plan);
  }

  if plan.ordering_bypassed {
    if let Some(previous) = &plan.previous_tag {
      reporter.warning(&format!(
        "Version {} does not advance past {} (ordering bypassed by --force)",
        plan.version, previous
      ));
    }
  }

  create_tag(&repo, &plan, &request, &reporter)?;

  let artifacts = if flags.no_archive {
    reporter.info("Skipping archives (--no-archive)");
    Vec::new()
  } else {
    archive::package_archives(&repo, &plan, &reporter)?
  };

  let pushed = publish_tag(&repo, &plan, &request, &reporter);

  if !json {
    print_summary(&plan, &artifacts, &request, pushed);
  }

  Ok(())
}

/// Tag step: delete a forced pre-existing tag, then create the annotated tag
fn create_tag(
  repo: &dyn RepositoryBackend,
  plan: &ReleasePlan,
  request: &ReleaseRequest,
  reporter: &StatusReporter,
) -> ReleaseResult<()> {
  if request.flags.force && repo.tag_exists(&plan.tag_name)? {
    // Destructive: the old tag and its message are gone after this
    reporter.action(&format!("Deleting existing tag {}", plan.tag_name));
    if !request.flags.dry_run {
      repo.delete_tag(&plan.tag_name)?;
    }
  }

  reporter.action(&format!(
    "Creating annotated tag {} at {}",
    plan.tag_name,
    plan.short_head()
  ));
  if !request.flags.dry_run {
    repo.create_tag(&plan.tag_name, &plan.head, &plan.tag_message)?;
    reporter.success(&format!("Created tag {}", plan.tag_name));
  }

  Ok(())
}

/// Push step
///
/// Returns whether the tag actually reached the remote. A push failure
/// degrades to a warning: the tag exists locally, so the run still counts
/// as a success and the summary prints the manual retry command.
fn publish_tag(
  repo: &dyn RepositoryBackend,
  plan: &ReleasePlan,
  request: &ReleaseRequest,
  reporter: &StatusReporter,
) -> bool {
  if !request.flags.push {
    return false;
  }

  reporter.action(&format!("Pushing {} to {}", plan.tag_name, request.remote));
  if request.flags.dry_run {
    return false;
  }

  match repo.push_tag(&request.remote, &plan.tag_name) {
    Ok(()) => {
      reporter.success(&format!("Pushed {} to {}", plan.tag_name, request.remote));
      true
    }
    Err(err) => {
      reporter.warning(&err.to_string());
      reporter.warning(&format!(
        "The tag exists locally; push it manually with: git push {} {}",
        request.remote, plan.tag_name
      ));
      false
    }
  }
}

fn print_plan(plan: &ReleasePlan) {
  println!("📦 Release {} of {}", plan.tag_name, plan.project);
  println!();

  match &plan.previous_tag {
    Some(previous) => println!("   Previous: {}", previous),
    None => println!("   Previous: none (first release)"),
  }
  println!("   Head:     {}", plan.short_head());

  if !plan.subjects.is_empty() {
    println!("   Changes:");
    for subject in &plan.subjects {
      println!("     - {}", subject);
    }
  }
  println!();
}

fn print_summary(plan: &ReleasePlan, artifacts: &[ReleaseArtifact], request: &ReleaseRequest, pushed: bool) {
  println!();
  if request.flags.dry_run {
    println!("🔍 Dry-run complete (no changes applied)");
  } else {
    println!("✅ Release {} complete!", plan.version);
  }
  println!();
  println!("   Version:  {}", plan.version);
  println!("   Tag:      {}", plan.tag_name);
  println!("   Commit:   {}", plan.head);

  if !artifacts.is_empty() {
    println!("   Archives:");
    for artifact in artifacts {
      let digest = artifact.sha256.get(..12).unwrap_or(&artifact.sha256);
      println!(
        "     {} ({}, sha256 {}…)",
        artifact.path.display(),
        archive::format_size(artifact.size),
        digest
      );
    }
  }

  if pushed {
    println!("   Remote:   pushed to {}", request.remote);
  }

  if !pushed && !request.flags.dry_run {
    println!();
    println!("Next steps:");
    println!("  git push {} {}", request.remote, plan.tag_name);
  }
}
