//! Release planning: preflight validation and the derived release plan
//!
//! A `ReleasePlan` is the pipeline's work product: it exists only after
//! every preflight check has passed, and from then on the tag, archive, and
//! push steps read from it without further decisions.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use semver::Version;
use serde::Serialize;

use crate::core::config::ProjectConfig;
use crate::core::error::{ReleaseResult, ValidationError};
use crate::core::vcs::RepositoryBackend;
use crate::release::request::ReleaseRequest;
use crate::release::version;

/// A validated release plan
#[derive(Debug, Clone, Serialize)]
pub struct ReleasePlan {
  /// Name of the released bundle
  pub project: String,
  pub version: Version,
  /// Annotated tag to create (`v<version>`)
  pub tag_name: String,
  /// Full head commit id the tag will point at
  pub head: String,
  /// Latest existing release tag, if any
  pub previous_tag: Option<String>,
  /// Commit subjects since `previous_tag`, newest first
  pub subjects: Vec<String>,
  /// Top-level directory inside the archives
  pub archive_prefix: String,
  pub tar_path: PathBuf,
  pub zip_path: PathBuf,
  /// Generated annotated-tag message
  pub tag_message: String,
  pub created_at: DateTime<Utc>,
  /// True when --force bypassed the version-ordering check
  pub ordering_bypassed: bool,
}

impl ReleasePlan {
  /// Validate the request against repository state and derive the plan
  ///
  /// Checks run in order: clean working tree (skipped for dry runs),
  /// version progression, tag existence. The plan is only built once all
  /// of them pass. Every query here is read-only.
  pub fn prepare(
    repo: &dyn RepositoryBackend,
    request: &ReleaseRequest,
    config: &ProjectConfig,
  ) -> ReleaseResult<Self> {
    if !request.flags.dry_run {
      let changes = repo.working_tree_changes()?;
      if !changes.is_empty() {
        return Err(ValidationError::DirtyWorkingTree { paths: changes }.into());
      }
    }

    let tags = repo.list_tags(&format!("{}*", config.tag_prefix))?;
    let previous = version::latest_release_tag(&tags);

    let mut ordering_bypassed = false;
    if let Some((_, previous_version)) = &previous {
      if request.version <= *previous_version {
        if !request.flags.force {
          return Err(
            ValidationError::VersionNotAdvanced {
              requested: request.version.clone(),
              current: previous_version.clone(),
            }
            .into(),
          );
        }
        ordering_bypassed = true;
      }
    }

    // The progression check already rejects any version at or below the
    // latest release, so an existing identical tag normally surfaces as
    // VersionNotAdvanced. This guard catches the rest of the namespace,
    // e.g. a pre-created tag racing this run.
    let tag_name = format!("{}{}", config.tag_prefix, request.version);
    if !request.flags.force && repo.tag_exists(&tag_name)? {
      return Err(ValidationError::TagAlreadyExists { tag: tag_name }.into());
    }

    let head = repo.head()?;
    let previous_tag = previous.map(|(tag, _)| tag);
    let subjects = repo.commit_subjects_between(previous_tag.as_deref(), &head)?;

    let created_at = Utc::now();
    let tag_message = build_tag_message(&tag_name, &subjects, previous_tag.as_deref(), created_at, &head);

    let archive_prefix = format!("{}-{}", config.project_name, tag_name);
    let releases_dir = repo.work_tree().join(&config.releases_dir);
    let tar_path = releases_dir.join(format!("{}.tar.gz", archive_prefix));
    let zip_path = releases_dir.join(format!("{}.zip", archive_prefix));

    Ok(Self {
      project: config.project_name.clone(),
      version: request.version.clone(),
      tag_name,
      head,
      previous_tag,
      subjects,
      archive_prefix,
      tar_path,
      zip_path,
      tag_message,
      created_at,
      ordering_bypassed,
    })
  }

  /// Short head id for status lines
  pub fn short_head(&self) -> &str {
    self.head.get(..7).unwrap_or(&self.head)
  }
}

/// Compose the annotated-tag message
///
/// Body is the bullet list of commit subjects since the previous release,
/// or `Initial release.` for the first one. The footer pins the UTC
/// timestamp and the full head commit id.
fn build_tag_message(
  tag_name: &str,
  subjects: &[String],
  previous_tag: Option<&str>,
  created_at: DateTime<Utc>,
  head: &str,
) -> String {
  let mut message = format!("Release {}\n\n", tag_name);

  match previous_tag {
    None => message.push_str("Initial release.\n"),
    Some(_) => {
      for subject in subjects {
        message.push_str("- ");
        message.push_str(subject);
        message.push('\n');
      }
      if subjects.is_empty() {
        message.push_str("No changes recorded since the previous release.\n");
      }
    }
  }

  message.push_str(&format!(
    "\nReleased: {}\nCommit: {}\n",
    created_at.format("%Y-%m-%d %H:%M:%S UTC"),
    head
  ));

  message
}
