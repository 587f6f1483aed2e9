mod commands;
mod core;
mod release;
mod ui;

use clap::Parser;

use crate::core::error::print_error;

/// Tag, package, and publish releases of the pre-commit-config bundle
#[derive(Parser)]
#[command(name = "precommit-release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Release version in X.Y.Z form (e.g. 1.4.0)
  #[arg(value_name = "VERSION")]
  release_version: String,

  /// Validate and report only; perform no mutating action
  #[arg(long)]
  dry_run: bool,

  /// Bypass tag-existence and version-ordering checks
  #[arg(long)]
  force: bool,

  /// Skip source archive creation
  #[arg(long)]
  no_archive: bool,

  /// Push the created tag to the remote
  #[arg(long)]
  push: bool,

  /// Remote to push to (default: origin, or $GIT_REMOTE)
  #[arg(long, value_name = "NAME")]
  remote: Option<String>,

  /// Print the release plan as JSON instead of the human-readable preview
  #[arg(long)]
  json: bool,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = commands::run_release(
    cli.release_version,
    cli.dry_run,
    cli.force,
    cli.no_archive,
    cli.push,
    cli.remote,
    cli.json,
  );

  if let Err(err) = result {
    print_error(&err);
    std::process::exit(err.exit_code());
  }
}
