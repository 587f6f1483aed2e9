//! Error types for precommit-release with contextual messages and exit codes
//!
//! Errors are grouped by phase: validation errors abort before any mutation,
//! git and archive errors abort the remaining pipeline steps without rolling
//! back completed ones. Every error that has a concrete next step carries a
//! help message shown alongside it.

use std::fmt;
use std::io;
use std::path::PathBuf;

use semver::Version;

/// Main error type for precommit-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Pre-flight validation errors (no mutation has happened yet)
  Validation(ValidationError),

  /// Git operation errors
  Git(GitError),

  /// Archive packaging errors
  Archive(ArchiveError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Process exit code for a fatal error
  ///
  /// The exit contract is binary: 0 on success, 1 on any fatal error. Push
  /// failures never reach here (they degrade to warnings at the command
  /// layer once the tag exists locally).
  pub fn exit_code(&self) -> i32 {
    1
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Validation(e) => e.help_message(),
      ReleaseError::Git(e) => e.help_message(),
      ReleaseError::Archive(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Validation(e) => write!(f, "{}", e),
      ReleaseError::Git(e) => write!(f, "{}", e),
      ReleaseError::Archive(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<ValidationError> for ReleaseError {
  fn from(err: ValidationError) -> Self {
    ReleaseError::Validation(err)
  }
}

impl From<GitError> for ReleaseError {
  fn from(err: GitError) -> Self {
    ReleaseError::Git(err)
  }
}

impl From<ArchiveError> for ReleaseError {
  fn from(err: ArchiveError) -> Self {
    ReleaseError::Archive(err)
  }
}

/// Pre-flight validation errors
///
/// All of these abort the run before any tag, file, or remote is touched.
#[derive(Debug)]
pub enum ValidationError {
  /// Version string does not match X.Y.Z
  InvalidVersionFormat { input: String },

  /// Not inside a git repository
  NotARepository { path: PathBuf },

  /// Uncommitted changes in the working tree
  DirtyWorkingTree { paths: Vec<String> },

  /// Target tag already exists
  TagAlreadyExists { tag: String },

  /// Requested version does not advance past the latest release
  VersionNotAdvanced { requested: Version, current: Version },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::InvalidVersionFormat { .. } => {
        Some("Use three dot-separated numbers, e.g. 1.4.0".to_string())
      }
      ValidationError::NotARepository { .. } => {
        Some("Run from inside the repository you want to release.".to_string())
      }
      ValidationError::DirtyWorkingTree { .. } => {
        Some("Commit or stash your changes first, or use --dry-run to preview the release.".to_string())
      }
      ValidationError::TagAlreadyExists { tag } => Some(format!(
        "Use --force to delete and recreate {}, or pick the next version.",
        tag
      )),
      ValidationError::VersionNotAdvanced { current, .. } => Some(format!(
        "Pick a version greater than {}, or use --force to re-release.",
        current
      )),
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::InvalidVersionFormat { input } => {
        write!(f, "Invalid version '{}': expected X.Y.Z with numeric components", input)
      }
      ValidationError::NotARepository { path } => {
        write!(f, "Not a git repository: {}", path.display())
      }
      ValidationError::DirtyWorkingTree { paths } => {
        write!(f, "Working tree has uncommitted changes:")?;
        for path in paths {
          write!(f, "\n  {}", path)?;
        }
        Ok(())
      }
      ValidationError::TagAlreadyExists { tag } => {
        write!(f, "Tag {} already exists", tag)
      }
      ValidationError::VersionNotAdvanced { requested, current } => {
        write!(f, "Version {} does not advance past the latest release {}", requested, current)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Annotated tag creation failed
  TagCreationFailed { tag: String, stderr: String },

  /// Push failed
  PushFailed {
    remote: String,
    tag: String,
    stderr: String,
  },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::PushFailed { remote, tag, stderr } => {
        if stderr.contains("permission denied") || stderr.contains("403") {
          Some(format!("Check your access to '{}', then run: git push {} {}", remote, remote, tag))
        } else {
          Some(format!("The tag exists locally; retry with: git push {} {}", remote, tag))
        }
      }
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::TagCreationFailed { tag, stderr } => {
        write!(f, "Failed to create tag {}: {}", tag, stderr)
      }
      GitError::PushFailed { remote, tag, stderr } => {
        write!(f, "Failed to push {} to {}: {}", tag, remote, stderr)
      }
    }
  }
}

/// Archive packaging errors
#[derive(Debug)]
pub enum ArchiveError {
  /// Archive could not be created
  CreationFailed { path: PathBuf, reason: String },
}

impl ArchiveError {
  fn help_message(&self) -> Option<String> {
    match self {
      ArchiveError::CreationFailed { .. } => {
        Some("The tag was created and is kept; fix the cause and re-run with --force.".to_string())
      }
    }
  }
}

impl fmt::Display for ArchiveError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArchiveError::CreationFailed { path, reason } => {
        write!(f, "Failed to create archive {}: {}", path.display(), reason)
      }
    }
  }
}

/// Result type alias for precommit-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
