#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::Context;
use clap::Parser;
use projectlink_core::http::DEFAULT_GRAPHQL_URL;
use projectlink_core::output::json_format::{link_outcome_json, safe_output_escape};
use projectlink_core::output::ActionOutput;
use projectlink_core::{EventPayload, GraphQlClient, InputConfig, LinkOutcome, ProjectLinker};
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "projectlink",
    version,
    about = "Link issues and pull requests to GitHub Projects"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Add the event's issue/PR to the project named after its base branch
    Link(LinkArgs),
}

#[derive(clap::Args)]
struct LinkArgs {
    /// GitHub token for API access
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Repository owner type: orgs/org/organization or users/user
    #[arg(long, env = "PROJECT_LINK_OWNER_TYPE")]
    owner_type: Option<String>,

    /// Labels to filter on (comma-separated)
    #[arg(long, env = "PROJECT_LINK_LABELED", default_value = "")]
    labeled: String,

    /// Label operator: AND, NOT, or empty for any-of
    #[arg(long, env = "PROJECT_LINK_LABEL_OPERATOR", default_value = "")]
    label_operator: String,

    /// Glob the base branch must match
    #[arg(long, env = "PROJECT_LINK_BASE_BRANCH_PATTERN")]
    base_branch_pattern: Option<String>,

    /// Prefix removed from the base branch to form the project name
    #[arg(long, env = "PROJECT_LINK_NAME_PREFIX_REMOVE")]
    name_prefix_remove: Option<String>,

    /// Suffix removed from the base branch to form the project name
    #[arg(long, env = "PROJECT_LINK_NAME_SUFFIX_REMOVE")]
    name_suffix_remove: Option<String>,

    /// Characters replaced with spaces in the project name
    #[arg(long, env = "PROJECT_LINK_REPLACE_WITH_SPACES")]
    replace_with_spaces: Option<String>,

    /// URL of the project to copy when creating a new one
    #[arg(long, env = "PROJECT_LINK_TEMPLATE_PROJECT_URL")]
    template_project_url: Option<String>,

    /// Number of the owner's project to copy when creating a new one
    #[arg(long, env = "PROJECT_LINK_TEMPLATE_PROJECT_NUMBER")]
    template_project_number: Option<String>,

    /// Path to the triggering event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<String>,

    /// GraphQL endpoint
    #[arg(long, env = "GITHUB_GRAPHQL_URL")]
    graphql_url: Option<String>,

    /// Output format: gha, json, text (default: auto-detect)
    #[arg(long, env = "PROJECT_LINK_OUTPUT_FORMAT")]
    output_format: Option<String>,
}

/// Output format for the CLI
enum OutputFormat {
    /// GitHub Actions: write to $GITHUB_OUTPUT + summary to stdout
    Gha,
    /// JSON object to stdout
    Json,
    /// Human-readable text to stdout
    Text,
}

impl OutputFormat {
    fn detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("gha") => OutputFormat::Gha,
            Some("json") => OutputFormat::Json,
            Some("text") => OutputFormat::Text,
            _ => {
                if std::env::var("GITHUB_ACTIONS").is_ok() {
                    OutputFormat::Gha
                } else {
                    OutputFormat::Text
                }
            }
        }
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Link(args) => run_link(args),
    };
    std::process::exit(code);
}

fn init_tracing() {
    let default_level = if std::env::var("RUNNER_DEBUG").as_deref() == Ok("1") {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Filter empty string from Option (env vars may produce "" for empty values)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.trim().is_empty())
}

fn run_link(args: LinkArgs) -> i32 {
    let output_format = OutputFormat::detect(clean_opt(&args.output_format));

    match link(&args) {
        Ok(outcome) => {
            match output_format {
                OutputFormat::Gha => write_gha_output(&outcome),
                OutputFormat::Json => write_json_output(&outcome),
                OutputFormat::Text => write_text_output(&outcome),
            }
            0
        }
        Err(e) => {
            tracing::error!("{e:#}");
            if matches!(output_format, OutputFormat::Gha) {
                println!("::error::{}", safe_output_escape(&format!("{e:#}")));
            }
            1
        }
    }
}

fn link(args: &LinkArgs) -> anyhow::Result<LinkOutcome> {
    let event_path = clean_opt(&args.event_path)
        .context("No event payload: set GITHUB_EVENT_PATH or pass --event-path")?;
    let event = EventPayload::from_path(Path::new(event_path))
        .with_context(|| format!("Failed to load event payload from {event_path}"))?;

    let template_project_number = clean_opt(&args.template_project_number)
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid template-project-number: {raw}"))
        })
        .transpose()?;

    // Borrowing from args
    let config = InputConfig {
        owner_type: clean_opt(&args.owner_type).map(Cow::Borrowed),
        labeled: Cow::Borrowed(&args.labeled),
        label_operator: Cow::Borrowed(&args.label_operator),
        base_branch_pattern: clean_opt(&args.base_branch_pattern).map(Cow::Borrowed),
        name_prefix_remove: clean_opt(&args.name_prefix_remove).map(Cow::Borrowed),
        name_suffix_remove: clean_opt(&args.name_suffix_remove).map(Cow::Borrowed),
        replace_with_spaces: clean_opt(&args.replace_with_spaces).map(Cow::Borrowed),
        template_project_url: clean_opt(&args.template_project_url).map(Cow::Borrowed),
        template_project_number,
    };

    let endpoint = clean_opt(&args.graphql_url).unwrap_or(DEFAULT_GRAPHQL_URL);
    let client = GraphQlClient::new(
        endpoint.to_string(),
        clean_opt(&args.github_token).map(str::to_string),
    );
    tracing::debug!(?client, "GraphQL client");

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create runtime")?;

    let outcome = rt.block_on(ProjectLinker::new(&client, &config).run(&event))?;
    Ok(outcome)
}

/// Write `projectUrl`/`itemId` to $GITHUB_OUTPUT and a summary to stdout
fn write_gha_output(outcome: &LinkOutcome) {
    if let Some(link) = outcome.link() {
        match ActionOutput::from_env() {
            Some(output) => {
                if let Err(e) = output.write_link(link) {
                    eprintln!(
                        "Error: cannot write GITHUB_OUTPUT ({}): {e}",
                        output.path().display()
                    );
                }
            }
            None => {
                eprintln!("Warning: GITHUB_OUTPUT not set, falling back to stdout");
                write_json_output(outcome);
                return;
            }
        }
    }

    write_text_output(outcome);
}

/// Write the outcome as a JSON object to stdout
fn write_json_output(outcome: &LinkOutcome) {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = serde_json::to_writer(&mut lock, &link_outcome_json(outcome));
    let _ = writeln!(lock);
}

/// Write human-readable text to stdout
fn write_text_output(outcome: &LinkOutcome) {
    let stdout = std::io::stdout();
    let mut w = stdout.lock();

    match outcome {
        LinkOutcome::Linked(link) => {
            let _ = writeln!(w, "Project: {}", link.project_url);
            let _ = writeln!(w, "Item: {}", link.item_id);
        }
        LinkOutcome::Skipped(reason) => {
            let _ = writeln!(w, "{reason}");
        }
    }
}
