//! stagehint - CLI entry point.

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use stagehint::commit::{MessageStyle, analyze, suggest};
use stagehint::config::{Settings, parse_max_suggestions, resolve_git_binary};
use stagehint::session::{LinePrompt, Session, TerminalPrompt, load_staged};
use stagehint::{CommitError, DiffSummary, GitCli, SessionError, Vcs};

/// Suggest commit messages from staged changes.
#[derive(Parser, Debug)]
#[command(name = "stagehint")]
#[command(about = "Suggest commit messages from staged git changes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<OneShot>,

    /// Repository working directory
    #[arg(short = 'C', long = "repo", default_value = ".")]
    repo: PathBuf,

    /// Path to the git binary (defaults to STAGEHINT_GIT, then git on PATH)
    #[arg(long)]
    git: Option<PathBuf>,

    /// Message style
    #[arg(long, value_enum, default_value_t = MessageStyle::Conventional)]
    style: MessageStyle,

    /// Maximum number of suggestions (1-5)
    #[arg(short = 'n', long, default_value = "3", value_parser = parse_max_suggestions)]
    max: usize,

    /// Print one-shot output as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Non-interactive commands. Without one, the interactive session starts.
#[derive(Subcommand, Debug, Clone, Copy)]
enum OneShot {
    /// Print suggestions for the staged changes and exit
    Suggest,
    /// Print a summary of the staged changes and exit
    Analyze,
}

#[derive(Serialize)]
struct SuggestionOutput {
    category: String,
    description: String,
    message: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let git = resolve_git_binary(cli.git.as_deref()).context("git is required")?;

    let mut settings = Settings::new(git, cli.repo.clone());
    settings.style = cli.style;
    settings.max_suggestions = cli.max;

    let vcs = GitCli::new(&settings.git_binary, &settings.workdir);

    match cli.command {
        Some(command) => run_one_shot(command, &vcs, &settings, cli.json),
        None => run_interactive(vcs, settings),
    }
}

/// Logs go to stderr so stdout carries only suggestions and reports.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn run_interactive(vcs: GitCli, settings: Settings) -> Result<()> {
    let stdout = io::stdout();

    if io::stdin().is_terminal() {
        Session::new(vcs, TerminalPrompt::new(), stdout.lock(), settings).run()?;
    } else {
        let prompt = LinePrompt::new(io::stdin().lock());
        Session::new(vcs, prompt, stdout.lock(), settings).run()?;
    }
    Ok(())
}

fn run_one_shot(command: OneShot, vcs: &GitCli, settings: &Settings, json: bool) -> Result<()> {
    let Some(summary) =
        one_shot_summary(vcs, &settings.workdir, json).context("Failed to read staged changes")?
    else {
        println!("{}", CommitError::NoStagedChanges);
        return Ok(());
    };

    if json {
        println!("{}", render_json(command, &summary, settings)?);
        return Ok(());
    }

    match command {
        OneShot::Suggest => {
            for s in suggest(&summary, settings.max_suggestions) {
                println!("{}", s.render(settings.style));
            }
        }
        OneShot::Analyze => println!("{}", analyze(&summary).render()),
    }
    Ok(())
}

/// Staged changes for a one-shot command.
///
/// `None` means nothing is staged and the guidance message should be shown.
/// JSON consumers get an empty summary instead, so they always see a result.
fn one_shot_summary(
    vcs: &impl Vcs,
    workdir: &Path,
    json: bool,
) -> Result<Option<DiffSummary>, SessionError> {
    match load_staged(vcs, workdir) {
        Ok(summary) => Ok(Some(summary)),
        Err(SessionError::Commit(CommitError::NoStagedChanges)) if json => {
            Ok(Some(DiffSummary::default()))
        }
        Err(SessionError::Commit(CommitError::NoStagedChanges)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn render_json(command: OneShot, summary: &DiffSummary, settings: &Settings) -> serde_json::Result<String> {
    match command {
        OneShot::Suggest => {
            let output: Vec<SuggestionOutput> = suggest(summary, settings.max_suggestions)
                .iter()
                .map(|s| SuggestionOutput {
                    category: s.category.to_string(),
                    description: s.description.clone(),
                    message: s.render(settings.style),
                })
                .collect();
            serde_json::to_string_pretty(&output)
        }
        OneShot::Analyze => serde_json::to_string_pretty(&analyze(summary)),
    }
}
