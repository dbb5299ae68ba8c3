//! CLI for the staging deploy checklist.
//!
//! Reads the open checklist issue, adds pull requests and deploy blockers to
//! it, posts comments, and prints production release notes.

use clap::{CommandFactory, Parser, Subcommand};
use deploy_checklist::{
    release_body, ChecklistUpdater, CommentSummary, OctocrabRepositoryApi, RepositorySettings,
    RunnerError, UpdateConfig, UpdateSummary,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Deploy Checklist - Maintain the staging deploy checklist issue.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the repository settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the parsed checklist as JSON.
    Show,

    /// Add entries to the checklist and regenerate its body.
    Update {
        /// Pull request URL to add (repeatable).
        #[arg(long = "pull-request")]
        pull_requests: Vec<String>,

        /// Deploy blocker URL to add (repeatable).
        #[arg(long = "deploy-blocker")]
        deploy_blockers: Vec<String>,

        /// Preview the new body without writing it.
        #[arg(long)]
        dry_run: bool,
    },

    /// Post a comment on issues or pull requests.
    Comment {
        /// Repository to comment in (defaults to the configured repo).
        #[arg(long)]
        repo: Option<String>,

        /// Issue or pull request number (repeatable).
        #[arg(long = "number", required = true)]
        numbers: Vec<u64>,

        /// Comment body.
        #[arg(long)]
        message: String,

        /// Maximum concurrent API requests.
        #[arg(long, default_value_t = 5)]
        concurrency: usize,
    },

    /// Print production release notes for the given pull request numbers.
    ReleaseBody {
        /// Pull request numbers.
        #[arg(required = true)]
        numbers: Vec<u64>,
    },
}

/// How a run ended.
enum Outcome {
    /// Everything succeeded.
    Success,
    /// The run finished but something was skipped or failed.
    Partial,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(Outcome::Success) => ExitCode::from(0),
        Ok(Outcome::Partial) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output) on stderr
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<Outcome, RunnerError> {
    let settings = match &args.config {
        Some(path) => RepositorySettings::load(path)?,
        None => RepositorySettings::default(),
    };

    if let Command::ReleaseBody { numbers } = &args.command {
        println!("{}", release_body(&settings, numbers));
        return Ok(Outcome::Success);
    }

    let Some(token) = args.token else {
        Args::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "a GitHub token is required: pass --token or set GITHUB_TOKEN",
            )
            .exit();
    };

    let api = OctocrabRepositoryApi::with_token(token, settings.clone())?;
    let updater = ChecklistUpdater::new(api, settings.clone());

    match args.command {
        Command::Show => {
            let (issue, checklist) = updater.current().await?;
            let output = serde_json::json!({
                "issue": issue,
                "checklist": checklist,
            });
            print_json(&output);
            Ok(Outcome::Success)
        }
        Command::Update {
            pull_requests,
            deploy_blockers,
            dry_run,
        } => {
            let config = UpdateConfig::new()
                .with_pull_requests(pull_requests)
                .with_deploy_blockers(deploy_blockers)
                .with_dry_run(dry_run);
            let summary = updater.update(&config).await?;
            print_update_summary(&summary);
            Ok(if summary.is_partial() {
                Outcome::Partial
            } else {
                Outcome::Success
            })
        }
        Command::Comment {
            repo,
            numbers,
            message,
            concurrency,
        } => {
            let repo = repo.unwrap_or(settings.repo);
            let summary = updater
                .comment_on(&repo, &numbers, &message, concurrency)
                .await;
            print_comment_summary(&summary);
            Ok(if summary.has_failures() {
                Outcome::Partial
            } else {
                Outcome::Success
            })
        }
        Command::ReleaseBody { .. } => Ok(Outcome::Success),
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => error!(error = %e, "Failed to serialize output"),
    }
}

/// Prints the result of an update run.
fn print_update_summary(summary: &UpdateSummary) {
    if summary.dry_run {
        println!("[DRY RUN] Regenerated body for #{}:\n", summary.issue_number);
        for line in summary.body.lines() {
            println!("    {line}");
        }
    }

    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Release: {}", summary.checklist.tag);
    println!("  Pull requests: {}", summary.checklist.pull_requests.len());
    println!("  Internal QA: {}", summary.checklist.internal_qa.len());
    println!(
        "  Deploy blockers: {}",
        summary.checklist.deploy_blockers.len()
    );
    println!(
        "  Body: {}",
        match (summary.body_changed, summary.updated) {
            (false, _) => "unchanged",
            (true, true) => "updated",
            (true, false) => "changed, not written",
        }
    );
    if !summary.notify.is_empty() {
        let mentions: Vec<String> = summary
            .notify
            .iter()
            .map(|login| format!("@{login}"))
            .collect();
        println!("  Notify: {}", mentions.join(", "));
    }
    if summary.is_partial() {
        println!("  Missing metadata: {:?}", summary.missing_metadata);
    }
}

/// Prints the result of a comment batch.
fn print_comment_summary(summary: &CommentSummary) {
    println!("\nSummary:");
    println!("  Comments posted: {}", summary.posted.len());
    println!("  Comments failed: {}", summary.failed.len());
    for (number, error) in &summary.failed {
        println!("    #{number}: {error}");
    }
}
