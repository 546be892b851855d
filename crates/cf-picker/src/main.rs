use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod cookies;
mod output;

use cfp_api::{build_touched_set, load_catalog, ApiClient, ApiSettings, HttpTransport};
use cfp_config::RunConfig;
use cfp_core::{seeded_rng, select_problems, Constraints, ExclusionEngine, Selection};
use cli::{Cli, OutputFormat};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match RunConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    };

    let picks = match run(&config, &cli).await {
        Ok(picks) => picks,
        Err(e) => {
            // InvalidHandle and CatalogUnavailable carry their own
            // self-identifying messages; nothing generic to add here.
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let rendered = match cli.format {
        OutputFormat::Text => output::render_text(&config.ratings, &picks),
        OutputFormat::Json => match output::render_json(&config.ratings, &picks) {
            Ok(rendered) => rendered,
            Err(e) => {
                eprintln!("Error: {e:#}");
                std::process::exit(1);
            }
        },
    };
    print!("{rendered}");

    if picks.iter().all(|pick| pick.problem().is_none()) {
        std::process::exit(1);
    }
}

async fn run(config: &RunConfig, cli: &Cli) -> Result<Vec<Selection>> {
    let cookie_header = match &config.network.cookie_file {
        Some(path) => cookies::cookie_header_from_file(path)?,
        None => None,
    };
    let transport = HttpTransport::new(
        Duration::from_secs(config.network.timeout_secs),
        &config.network.user_agent,
        cookie_header.as_deref(),
    )?;
    let client = ApiClient::new(
        transport,
        ApiSettings {
            hosts: config.network.api_hosts.clone(),
            min_interval: Duration::from_millis(config.network.min_interval_ms),
            page_size: config.network.page_size,
            max_pages_per_user: config.network.max_pages_per_user,
        },
    );

    let touched = build_touched_set(&client, &config.handles).await?;
    let catalog = load_catalog(&client).await?;

    let constraints = Constraints {
        year_min: config.year_min,
        year_max: config.year_max,
        exclude_contest_ids: config.exclude_contest_ids.iter().copied().collect(),
        exclude_name_patterns: config.exclude_contest_name_patterns.clone(),
        distinct_contest: config.distinct_contest,
        distinct_tags: config.distinct_tags,
        tag_caps: config.tag_caps.clone(),
        seed: cli.seed.or(config.seed),
    };
    let engine = ExclusionEngine::new(&touched, &constraints);
    let mut rng = seeded_rng(constraints.seed);
    Ok(select_problems(
        &config.ratings,
        &catalog,
        &engine,
        &constraints,
        &mut rng,
    ))
}

fn init_tracing(verbose: bool) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .ok();
}
