mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use director_agent::{
    CollectionService, Director, ErsatztvClient, OllamaClient, RunMode, TunarrClient,
};
use director_catalog::{
    CatalogProvider, RadarrClient, SonarrClient, SummaryOptions, genre_stats, load_catalog,
};
use director_core::{Catalog, CollectionTarget, ConfigError, DirectorConfig, ThemeSpec};
use tracing::{error, info};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "program-director",
    about = "Build themed playlists for your TV channels from your media library"
)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = "/app/config/config.toml")]
    config: PathBuf,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate playlists and write them to the collection service
    Generate {
        /// Generate for a single theme
        #[arg(short, long, conflicts_with = "all_themes")]
        theme: Option<String>,
        /// Generate for every configured theme
        #[arg(short, long)]
        all_themes: bool,
        /// Print suggestions without writing collections
        #[arg(short = 'n', long)]
        dry_run: bool,
        /// Print the run results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load the library and print its highlights
    Scan,
    /// List configured themes
    Themes,
    /// Check connectivity to the model and the catalog providers
    Check,
}

/// Problems that are the operator's to fix. These exit with status 1 before
/// any theme runs.
#[derive(Debug, Error)]
enum UsageError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
    #[error("specify --theme NAME or --all-themes")]
    NoThemeSelected,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env is optional.
    dotenvy::dotenv().ok();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<UsageError>() {
                Some(usage) => eprintln!("error: {usage}"),
                None => error!(error = %format!("{e:#}"), "program-director failed"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = DirectorConfig::load(&cli.config).map_err(UsageError::from)?;
    info!(path = %cli.config.display(), themes = config.themes.len(), "configuration loaded");

    match cli.command {
        Command::Generate {
            theme,
            all_themes,
            dry_run,
            json,
        } => {
            let themes = select_themes(&config, theme.as_deref(), all_themes)?;
            let mode = if dry_run { RunMode::Preview } else { RunMode::Apply };
            generate(&config, &themes, mode, json).await
        }
        Command::Scan => {
            config.require_provider_keys().map_err(UsageError::from)?;
            let catalog = fetch_catalog(&config).await?;
            print!("{}", output::scan_report(&catalog, &genre_stats(&catalog)));
            Ok(ExitCode::SUCCESS)
        }
        Command::Themes => {
            config.require_themes().map_err(UsageError::from)?;
            println!("Configured themes ({}):", config.themes.len());
            for theme in &config.themes {
                println!("  {}", output::theme(theme));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => check(&config).await,
    }
}

fn select_themes(
    config: &DirectorConfig,
    name: Option<&str>,
    all: bool,
) -> Result<Vec<ThemeSpec>, UsageError> {
    config.require_themes()?;
    config.require_provider_keys()?;

    match (name, all) {
        (_, true) => Ok(config.themes.clone()),
        (Some(name), false) => config
            .theme(name)
            .cloned()
            .map(|t| vec![t])
            .ok_or_else(|| UsageError::UnknownTheme(name.to_string())),
        (None, false) => Err(UsageError::NoThemeSelected),
    }
}

async fn fetch_catalog(config: &DirectorConfig) -> anyhow::Result<Catalog> {
    let radarr = RadarrClient::new(&config.radarr.url, &config.radarr.api_key)?;
    let sonarr = SonarrClient::new(&config.sonarr.url, &config.sonarr.api_key)?;
    let catalog = load_catalog(&[&radarr, &sonarr])
        .await
        .context("failed to load media catalog")?;
    Ok(catalog)
}

fn collection_service(config: &DirectorConfig) -> anyhow::Result<Box<dyn CollectionService>> {
    let service: Box<dyn CollectionService> = match config.collections.target {
        CollectionTarget::Ersatztv => Box::new(ErsatztvClient::new(&config.ersatztv.url)?),
        CollectionTarget::Tunarr => Box::new(TunarrClient::new(&config.tunarr.url)?),
    };
    Ok(service)
}

async fn generate(
    config: &DirectorConfig,
    themes: &[ThemeSpec],
    mode: RunMode,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let catalog = fetch_catalog(config).await?;
    let model = OllamaClient::new(&config.ollama)?;
    let collections = collection_service(config)?;
    let options = SummaryOptions::from(config.summary.clone());
    let director = Director::new(&catalog, &options, &model, collections.as_ref());

    info!(
        themes = themes.len(),
        target = %config.collections.target,
        dry_run = mode == RunMode::Preview,
        "starting playlist run"
    );
    let results = director.run_all(themes, mode).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(ExitCode::SUCCESS);
    }

    let preview = mode == RunMode::Preview;
    for result in &results {
        println!("{}", output::result_line(result, preview));
        if preview && let Some(s) = &result.suggestion {
            println!("{}", output::suggestion(s));
        }
    }
    let succeeded = results.iter().filter(|r| r.success).count();
    if !preview {
        println!("{succeeded}/{} themes applied", results.len());
    }
    Ok(ExitCode::SUCCESS)
}

async fn check(config: &DirectorConfig) -> anyhow::Result<ExitCode> {
    let mut healthy = true;

    let model = OllamaClient::new(&config.ollama)?;
    match model.health_check().await {
        Ok(()) => println!(
            "ollama ({}): ok, model {} installed",
            config.ollama.url, config.ollama.model
        ),
        Err(e) => {
            healthy = false;
            println!("ollama ({}): FAILED: {e}", config.ollama.url);
        }
    }

    let radarr = RadarrClient::new(&config.radarr.url, &config.radarr.api_key)?;
    let sonarr = SonarrClient::new(&config.sonarr.url, &config.sonarr.api_key)?;
    let providers: [(&dyn CatalogProvider, &str); 2] =
        [(&radarr, config.radarr.url.as_str()), (&sonarr, config.sonarr.url.as_str())];
    for (provider, url) in providers {
        match provider.health_check().await {
            Ok(()) => println!("{} ({url}): ok", provider.name()),
            Err(e) => {
                healthy = false;
                println!("{} ({url}): FAILED: {e}", provider.name());
            }
        }
    }

    Ok(if healthy {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
