//! Dead-Seeker main entry point
//!
//! This is the command-line interface (and GitHub Action entry point) of the
//! broken link auditor. Every option falls back to the environment variable
//! the action runner sets for its inputs.

use anyhow::Context;
use clap::Parser;
use dead_seeker::config::{self, parse_flag, split_list, SeekerConfig};
use dead_seeker::output::{log_statistics, CrawlStatistics, LoggingObserver};
use dead_seeker::{ConfigError, DeadSeeker};
use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Exit code when broken links were found
const EXIT_BROKEN_LINKS: u8 = 1;

/// Exit code for invalid configuration
const EXIT_CONFIG_ERROR: u8 = 2;

/// Dead-Seeker: seeks out broken links on a website
///
/// Crawls the given seed addresses, follows links up to the configured depth
/// and exits with a non-zero status if any link is broken.
#[derive(Parser, Debug, Default)]
#[command(name = "dead-seeker")]
#[command(version)]
#[command(about = "Seeks out broken links on a website", long_about = None)]
struct Cli {
    /// Seed addresses to crawl
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Comma-separated seed addresses
    #[arg(long, env = "INPUT_WEBSITE_URL")]
    website_url: Option<String>,

    /// Path to TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of attempts per request
    #[arg(long, env = "INPUT_MAX_RETRIES")]
    max_retries: Option<String>,

    /// Maximum total retry time per request, in seconds
    #[arg(long, env = "INPUT_MAX_RETRY_TIME")]
    max_retry_time: Option<String>,

    /// Crawl depth; negative means unlimited
    #[arg(long, env = "INPUT_MAX_DEPTH", allow_hyphen_values = true)]
    max_depth: Option<String>,

    /// Only follow links starting with one of these (comma-separated)
    #[arg(long, env = "INPUT_INCLUDE_URL_PREFIX")]
    include_prefix: Option<String>,

    /// Never follow links starting with one of these (comma-separated)
    #[arg(long, env = "INPUT_EXCLUDE_URL_PREFIX")]
    exclude_prefix: Option<String>,

    /// Only follow links ending with one of these (comma-separated)
    #[arg(long, env = "INPUT_INCLUDE_URL_SUFFIX")]
    include_suffix: Option<String>,

    /// Never follow links ending with one of these (comma-separated)
    #[arg(long, env = "INPUT_EXCLUDE_URL_SUFFIX")]
    exclude_suffix: Option<String>,

    /// Only follow links containing one of these (comma-separated)
    #[arg(long, env = "INPUT_INCLUDE_URL_CONTAINED")]
    include_contained: Option<String>,

    /// Never follow links containing one of these (comma-separated)
    #[arg(long, env = "INPUT_EXCLUDE_URL_CONTAINED")]
    exclude_contained: Option<String>,

    /// HTML attributes scanned for links (comma-separated)
    #[arg(long, env = "INPUT_SEARCH_ATTRS")]
    search_attrs: Option<String>,

    /// Concurrent requests per host; 0 disables the cap
    #[arg(long, env = "INPUT_CONNECT_LIMIT_PER_HOST")]
    connect_limit_per_host: Option<String>,

    /// Request timeout, in seconds
    #[arg(long, env = "INPUT_TIMEOUT")]
    timeout: Option<String>,

    /// Concurrent requests across the run; 0 disables the cap
    #[arg(long, env = "INPUT_MAX_CONCURRENT_REQUESTS")]
    max_concurrent_requests: Option<String>,

    /// Always GET on-site pages instead of sending HEAD first
    #[arg(long, env = "INPUT_ALWAYS_GET_ONSITE")]
    always_get_onsite: Option<String>,

    /// Resolve links to absolute addresses before applying link rules
    #[arg(long, env = "INPUT_RESOLVE_BEFORE_FILTER")]
    resolve_before_filter: Option<String>,

    /// User-Agent header sent with every request
    #[arg(long, env = "INPUT_WEB_AGENT_STRING")]
    agent: Option<String>,

    /// Log verbosity: a truthy value or a level name (trace..critical)
    #[arg(
        short,
        long,
        env = "INPUT_VERBOSE",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    verbose: Option<String>,

    /// Print failures as GitHub workflow error annotations
    #[arg(long)]
    annotate: bool,
}

impl Cli {
    /// Seed addresses from the positional arguments and `--website-url`
    fn seeds(&self) -> Vec<String> {
        let mut seeds: Vec<String> = self
            .urls
            .iter()
            .flat_map(|url| split_list(url))
            .collect();
        if let Some(list) = present(&self.website_url) {
            seeds.extend(split_list(list));
        }
        seeds
    }

    /// Applies command-line and environment inputs on top of `config`
    fn apply(&self, config: &mut SeekerConfig) -> Result<(), ConfigError> {
        if let Some(value) = present(&self.max_retries) {
            config.max_retries = parse_number("max-retries", value)?;
        }
        if let Some(value) = present(&self.max_retry_time) {
            config.max_retry_time = parse_number("max-retry-time", value)?;
        }
        if let Some(value) = present(&self.max_depth) {
            config.max_depth = parse_number("max-depth", value)?;
        }
        if let Some(value) = present(&self.connect_limit_per_host) {
            config.connect_limit_per_host = parse_number("connect-limit-per-host", value)?;
        }
        if let Some(value) = present(&self.timeout) {
            config.timeout = parse_number("timeout", value)?;
        }
        if let Some(value) = present(&self.max_concurrent_requests) {
            config.max_concurrent_requests = parse_number("max-concurrent-requests", value)?;
        }

        if let Some(value) = present(&self.include_prefix) {
            config.include_prefix = split_list(value);
        }
        if let Some(value) = present(&self.exclude_prefix) {
            config.add_exclude_prefix(split_list(value));
        }
        if let Some(value) = present(&self.include_suffix) {
            config.include_suffix = split_list(value);
        }
        if let Some(value) = present(&self.exclude_suffix) {
            config.exclude_suffix = split_list(value);
        }
        if let Some(value) = present(&self.include_contained) {
            config.include_contained = split_list(value);
        }
        if let Some(value) = present(&self.exclude_contained) {
            config.exclude_contained = split_list(value);
        }
        if let Some(value) = present(&self.search_attrs) {
            config.search_attrs = split_list(value);
        }

        if let Some(value) = present(&self.always_get_onsite) {
            config.always_get_onsite = parse_flag(value);
        }
        if let Some(value) = present(&self.resolve_before_filter) {
            config.resolve_before_filter = parse_flag(value);
        }
        if let Some(value) = present(&self.agent) {
            config.agent = value.to_string();
        }

        Ok(())
    }
}

/// Treats an empty input the same as a missing one
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number<T>(name: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e| {
        ConfigError::Validation(format!("{} must be a number, got '{}': {}", name, value, e))
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose.as_deref());

    let outcome = run(&cli).await;
    if let Err(e) = &outcome {
        tracing::error!("{:#}", e);
    }
    ExitCode::from(exit_status(&outcome))
}

/// Maps the outcome of a run to the process exit status
fn exit_status(outcome: &anyhow::Result<bool>) -> u8 {
    match outcome {
        Ok(true) => 0,
        Ok(false) => EXIT_BROKEN_LINKS,
        Err(e) if e.downcast_ref::<ConfigError>().is_some() => EXIT_CONFIG_ERROR,
        Err(_) => EXIT_BROKEN_LINKS,
    }
}

/// Runs the crawl; returns true if no broken link was found
async fn run(cli: &Cli) -> anyhow::Result<bool> {
    let config = build_config(cli)?;
    let seeds = cli.seeds();
    config::validate_seeds(&seeds).context("Invalid website URL")?;

    let annotate = cli.annotate || running_in_github_actions();
    tracing::info!("Seeking broken links from: {}", seeds.join(", "));

    let seeker = DeadSeeker::new(config);
    let observer = LoggingObserver::new(annotate);
    let results = seeker
        .seek(seeds, Some(&observer))
        .await
        .context("Failed to start crawl")?;

    let stats = CrawlStatistics::from_results(&results);
    log_statistics(&stats, annotate);

    Ok(results.is_healthy())
}

/// Builds the run configuration: defaults, then the config file, then inputs
fn build_config(cli: &Cli) -> anyhow::Result<SeekerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            config::read_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => SeekerConfig::default(),
    };

    cli.apply(&mut config).context("Invalid input")?;
    config::validate(&config).context("Invalid configuration")?;

    tracing::debug!("Configuration: {:?}", config);
    Ok(config)
}

fn running_in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Maps the verbosity input to a log level
///
/// Truthy values mean `info`; level names are taken as is, `critical`
/// meaning `error`. Anything else logs errors only.
fn log_level(verbosity: Option<&str>) -> &'static str {
    let Some(value) = verbosity.map(str::trim) else {
        return "error";
    };
    if parse_flag(value) {
        return "info";
    }

    match value.to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        _ => "error",
    }
}

/// Sets up logging based on verbosity
///
/// Lines carry the message only so workflow annotations reach the runner
/// untouched.
fn setup_logging(verbosity: Option<&str>) {
    let level = log_level(verbosity);
    let filter = EnvFilter::new(format!("dead_seeker={},error", level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(false)
        .without_time()
        .init();
}
