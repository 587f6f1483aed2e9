//! Leveled status output for release steps
//!
//! Every step writes through the reporter rather than printing directly, so
//! a dry run emits the same message vocabulary as a real run behind a
//! distinct prefix, and `--json` runs stay machine-readable on stdout.

/// Status reporter with dry-run and quiet awareness
#[derive(Debug, Clone, Copy)]
pub struct StatusReporter {
  dry_run: bool,
  /// Suppress stdout chatter (JSON output mode); warnings move to stderr
  quiet: bool,
}

impl StatusReporter {
  pub fn new(dry_run: bool, quiet: bool) -> Self {
    Self { dry_run, quiet }
  }

  pub fn is_dry_run(&self) -> bool {
    self.dry_run
  }

  /// Neutral progress detail
  pub fn info(&self, msg: &str) {
    if !self.quiet {
      println!("   {}", msg);
    }
  }

  /// Completed step
  pub fn success(&self, msg: &str) {
    if !self.quiet {
      println!("✅ {}", msg);
    }
  }

  /// Non-fatal problem; always surfaces, on stderr in quiet mode
  pub fn warning(&self, msg: &str) {
    if self.quiet {
      eprintln!("⚠️  {}", msg);
    } else {
      println!("⚠️  {}", msg);
    }
  }

  /// A mutating action, or its dry-run simulation
  ///
  /// Same message either way; only the prefix differs, so dry-run output
  /// can be diffed against a real run.
  pub fn action(&self, msg: &str) {
    if self.quiet {
      return;
    }
    if self.dry_run {
      println!("🔍 [dry-run] {}", msg);
    } else {
      println!("   {}", msg);
    }
  }
}
