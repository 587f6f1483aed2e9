//! Source archive packaging for a tagged release
//!
//! Archives are cut from the tag's tree, never the working directory, so
//! untracked or ignored local files cannot leak into a release. Each
//! archive gets a `.sha256` sidecar in `sha256sum -c` format.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::error::{ArchiveError, ReleaseError, ReleaseResult, ResultExt};
use crate::core::vcs::{ArchiveFormat, RepositoryBackend};
use crate::release::plan::ReleasePlan;
use crate::ui::status::StatusReporter;

/// A packaged release artifact
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseArtifact {
  pub path: PathBuf,
  pub size: u64,
  pub sha256: String,
}

/// Package the tar.gz and zip archives for a validated plan
///
/// In dry-run mode only the intended actions are reported and nothing is
/// written, the releases directory included. A failure on either format is
/// fatal; the already-created tag stays in place.
pub fn package_archives(
  repo: &dyn RepositoryBackend,
  plan: &ReleasePlan,
  reporter: &StatusReporter,
) -> ReleaseResult<Vec<ReleaseArtifact>> {
  let targets = [
    (ArchiveFormat::TarGz, &plan.tar_path),
    (ArchiveFormat::Zip, &plan.zip_path),
  ];

  if reporter.is_dry_run() {
    for (_, path) in &targets {
      reporter.action(&format!("Packaging {}", path.display()));
    }
    return Ok(Vec::new());
  }

  if let Some(dir) = plan.tar_path.parent() {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create releases directory {}", dir.display()))?;
  }

  let mut artifacts = Vec::with_capacity(targets.len());
  for (format, path) in targets {
    reporter.action(&format!("Packaging {}", path.display()));

    repo
      .archive(&plan.tag_name, format, &plan.archive_prefix, path)
      .map_err(|e| {
        ReleaseError::Archive(ArchiveError::CreationFailed {
          path: path.clone(),
          reason: e.to_string(),
        })
      })?;

    artifacts.push(checksum_artifact(path)?);
  }

  Ok(artifacts)
}

/// Stat and checksum one archive, writing its `.sha256` sidecar
fn checksum_artifact(path: &Path) -> ReleaseResult<ReleaseArtifact> {
  let bytes = fs::read(path).with_context(|| format!("Failed to read archive {}", path.display()))?;
  let sha256 = hex::encode(Sha256::digest(&bytes));

  let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
  let sidecar = PathBuf::from(format!("{}.sha256", path.display()));
  fs::write(&sidecar, format!("{}  {}\n", sha256, file_name))
    .with_context(|| format!("Failed to write checksum {}", sidecar.display()))?;

  Ok(ReleaseArtifact {
    path: path.to_path_buf(),
    size: bytes.len() as u64,
    sha256,
  })
}

/// Human-readable size for status lines
pub fn format_size(bytes: u64) -> String {
  const KIB: u64 = 1024;
  const MIB: u64 = 1024 * 1024;

  if bytes >= MIB {
    format!("{:.1} MiB", bytes as f64 / MIB as f64)
  } else if bytes >= KIB {
    format!("{:.1} KiB", bytes as f64 / KIB as f64)
  } else {
    format!("{} B", bytes)
  }
}
