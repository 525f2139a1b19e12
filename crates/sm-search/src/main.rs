use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use serde_json::{Value, json};
use sm_common::api::{ResultsResponse, ResultsStatus, WorkerCard};
use sm_common::config::{ConfigError, EngineSettings, parse_policy};
use sm_common::dashboard::{DashboardSummary, dashboard_listing};
use sm_common::hire::HireQuote;
use sm_common::logging::{LoggingOptions, init_tracing_subscriber, install_tracing_panic_hook};
use sm_common::matching::{FilterTag, WorkerMatchEngine};
use sm_common::profile::normalize_profiles;
use sm_common::query::SearchQuery;
use sm_common::session::ResultsSession;
use sm_common::source::{JsonFileProfileSource, ProfileSource, ProfileSourceError};
use tracing::info;

const APP_NAME: &str = "sm-search";

#[derive(Debug, Parser)]
#[command(name = "sm-search", about = "Search, rank and quote workers from a profile export")]
struct Cli {
    /// JSON array of worker profile records
    #[arg(long, env = "SM_PROFILES_PATH")]
    profiles: PathBuf,

    /// Rating policy override (search_results | dashboard_listing)
    #[arg(long)]
    policy: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the results-screen pipeline and print the response. Exits
    /// non-zero when the profiles cannot be loaded.
    Search {
        /// Skill names as a JSON array, e.g. '["Painting"]'
        #[arg(long)]
        skills: Option<String>,

        #[arg(long)]
        persons_needed: Option<String>,

        /// Free-text filter over name, skills and location
        #[arg(long, default_value = "")]
        text: String,

        /// Filter tags to toggle on, replacing the default "Highest Rated"
        #[arg(long = "tag")]
        tags: Vec<FilterTag>,
    },
    /// Print dashboard counters and the full listing
    Dashboard,
    /// Quote the cost of hiring one worker
    Hire {
        #[arg(long)]
        worker: String,

        #[arg(long, default_value_t = 1)]
        days: u32,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to load profiles: {0}")]
    Source(#[from] ProfileSourceError),
    #[error("search failed: {0}")]
    LoadFailed(String),
    #[error("no worker with id {0}")]
    UnknownWorker(String),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

fn build_engine(policy: Option<&str>) -> Result<WorkerMatchEngine, CliError> {
    let mut settings = EngineSettings::from_env()?;
    if let Some(name) = policy {
        settings.matching.rating_policy = parse_policy(name)?;
    }
    Ok(WorkerMatchEngine::new(settings.matching))
}

fn build_query(
    skills: Option<&str>,
    persons_needed: Option<&str>,
    text: &str,
    tags: &[FilterTag],
) -> SearchQuery {
    let mut query = SearchQuery::from_navigation(skills, persons_needed);
    if !tags.is_empty() {
        query.clear_filters();
        for tag in tags {
            query.toggle_filter(*tag);
        }
    }
    query.set_free_text(text);
    query
}

async fn search(
    engine: WorkerMatchEngine,
    source: &JsonFileProfileSource,
    query: SearchQuery,
) -> Result<Value, CliError> {
    let mut session = ResultsSession::new(engine, query);
    session.refresh(source).await;
    let response = ResultsResponse::from_view(&session.view(), session.query());
    if response.status == ResultsStatus::LoadFailed {
        let message = response.message.unwrap_or_default();
        return Err(CliError::LoadFailed(message));
    }
    info!(status = ?response.status, count = response.count, "search finished");
    Ok(serde_json::to_value(response)?)
}

async fn dashboard(source: &JsonFileProfileSource) -> Result<Value, CliError> {
    let profiles = normalize_profiles(&source.fetch_all_profiles().await?);
    let summary = DashboardSummary::from_profiles(&profiles);
    let workers: Vec<WorkerCard> = dashboard_listing(&profiles)
        .iter()
        .map(WorkerCard::from)
        .collect();
    Ok(json!({ "summary": summary, "workers": workers }))
}

async fn hire(
    source: &JsonFileProfileSource,
    worker_id: &str,
    days: u32,
) -> Result<Value, CliError> {
    let profiles = normalize_profiles(&source.fetch_all_profiles().await?);
    let worker = profiles
        .iter()
        .find(|profile| profile.id == worker_id)
        .ok_or_else(|| CliError::UnknownWorker(worker_id.to_string()))?;

    let quote = HireQuote::new(worker).with_days(days);
    Ok(json!({
        "quote": quote,
        "days_label": quote.days_label(),
        "total_cost": quote.total_cost(),
        "breakdown": quote.breakdown(),
        "confirmation": quote.confirmation_message(),
    }))
}

async fn run() -> Result<(), CliError> {
    dotenv().ok();
    let logging = LoggingOptions::from_env();
    init_tracing_subscriber(APP_NAME, &logging);
    install_tracing_panic_hook(APP_NAME, &logging);

    let cli = Cli::parse();
    let source = JsonFileProfileSource::new(&cli.profiles);

    let output = match cli.command {
        Command::Search {
            skills,
            persons_needed,
            text,
            tags,
        } => {
            let engine = build_engine(cli.policy.as_deref())?;
            info!(
                policy = engine.rating_policy().name,
                stages = %engine.config().stages,
                "engine configured"
            );
            let query = build_query(skills.as_deref(), persons_needed.as_deref(), &text, &tags);
            search(engine, &source, query).await?
        }
        Command::Dashboard => dashboard(&source).await?,
        Command::Hire { worker, days } => hire(&source, &worker, days).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{APP_NAME} failed: {err}");
        std::process::exit(1);
    }
}
