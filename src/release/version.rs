//! Version parsing and ordering for release tags
//!
//! Versions are plain major.minor.patch triples carried as
//! `semver::Version`, whose ordering is the component-wise comparison the
//! release pipeline needs (major first, then minor, then patch). User input
//! is parsed strictly; existing tag names are parsed leniently so a
//! malformed historical tag cannot wedge the tool.

use semver::Version;

use crate::core::error::{ReleaseResult, ValidationError};

/// Parse a user-supplied version string in strict X.Y.Z form
///
/// Exactly three dot-separated runs of ASCII digits. No `v` prefix, no
/// pre-release or build metadata.
pub fn parse_version(input: &str) -> ReleaseResult<Version> {
  let invalid = || ValidationError::InvalidVersionFormat {
    input: input.to_string(),
  };

  let parts: Vec<&str> = input.split('.').collect();
  if parts.len() != 3 {
    return Err(invalid().into());
  }

  let mut components = [0u64; 3];
  for (i, part) in parts.iter().enumerate() {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
      return Err(invalid().into());
    }
    components[i] = part.parse().map_err(|_| invalid())?;
  }

  Ok(Version::new(components[0], components[1], components[2]))
}

/// Parse a version out of an existing tag name, leniently
///
/// Strips a leading `v` and defaults missing or unparsable components to
/// zero. Strict validation already guards new tags; this only has to make
/// sense of whatever is in the tag namespace.
pub fn parse_tag_version(tag: &str) -> Version {
  let raw = tag.strip_prefix('v').unwrap_or(tag);
  let mut parts = raw.split('.');

  let component = |part: Option<&str>| part.and_then(|p| p.parse::<u64>().ok()).unwrap_or(0);

  let major = component(parts.next());
  let minor = component(parts.next());
  let patch = component(parts.next());

  Version::new(major, minor, patch)
}

/// Latest release among a set of tag names, by parsed version
pub fn latest_release_tag(tags: &[String]) -> Option<(String, Version)> {
  tags
    .iter()
    .map(|tag| (tag.clone(), parse_tag_version(tag)))
    .max_by(|(_, a), (_, b)| a.cmp(b))
}
