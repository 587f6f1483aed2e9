//! The immutable input for one release run

use semver::Version;

use crate::core::error::ReleaseResult;
use crate::release::version;

/// Behavior flags for a release run
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseFlags {
  /// Validate and report only; perform no mutating action
  pub dry_run: bool,
  /// Bypass tag-existence and version-ordering checks
  pub force: bool,
  /// Skip archive creation
  pub no_archive: bool,
  /// Push the tag to the remote after creation
  pub push: bool,
}

/// A validated release request
///
/// Built once at the start of a run and never mutated; every pipeline step
/// reads from it.
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
  pub version: Version,
  pub flags: ReleaseFlags,
  pub remote: String,
}

impl ReleaseRequest {
  /// Parse the raw version string and freeze the run's inputs
  pub fn new(raw_version: &str, flags: ReleaseFlags, remote: String) -> ReleaseResult<Self> {
    Ok(Self {
      version: version::parse_version(raw_version)?,
      flags,
      remote,
    })
  }
}
