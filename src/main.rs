use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use phonochart::alert::LogAlerter;
use phonochart::audio::RodioPlayer;
use phonochart::catalog::{Group, SymbolCatalog};
use phonochart::chart::{ChartPage, ContainerId, NewElement, RenderTarget};
use phonochart::cli::{CatalogArgs, ChartArgs, Cli, Command, PlayArgs, PlaybackArgs};
use phonochart::config::AppConfig;
use phonochart::error::ConfigError;
use phonochart::sequencer::{FollowAlongSequencer, ReplayOutcome};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Chart(args) => handle_chart(&args),
        Command::List(args) => handle_list(&args),
        Command::Play(args) => handle_play(&args),
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("phonochart=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_chart(args: &ChartArgs) -> Result<()> {
    let config = build_config(&args.playback)?
        .with_voice_timing(args.voice_poll_ms, args.voice_timeout_ms);
    config.validate().context("Invalid chart configuration")?;
    let catalog = config.load_catalog().context("Failed to load catalog")?;
    phonochart::ui::launch_ui(&config, catalog)?;
    Ok(())
}

fn handle_list(args: &CatalogArgs) -> Result<()> {
    let catalog = load_catalog(args)?;
    for group in Group::ALL {
        println!("{group}:");
        for entry in catalog.group(group) {
            println!("  /{}/  {}", entry.symbol, entry.audio);
        }
    }
    Ok(())
}

fn handle_play(args: &PlayArgs) -> Result<()> {
    let catalog = load_catalog(&args.playback.catalog)?;
    let entries = catalog.resolve_all(&args.symbols)?;

    let config = build_config(&args.playback)?;
    let mut page = ChartPage::new();
    for entry in entries {
        page.append(
            ContainerId::FollowAlong,
            NewElement {
                symbol: entry.symbol.clone(),
                audio_path: entry.audio.clone(),
                interactive: false,
            },
        )?;
    }

    let player = Arc::new(RodioPlayer::new(&config.assets_root));
    let sequencer = FollowAlongSequencer::new(page.into_shared(), player, Arc::new(LogAlerter))
        .with_pause(config.pause);
    match sequencer.replay_selected() {
        ReplayOutcome::Completed { played, failed } => {
            println!("Played {played} of {} clips", played + failed);
            ensure!(failed == 0, "{failed} clip(s) failed to play");
        }
        ReplayOutcome::AlreadyReplaying => bail!("A replay is already running"),
    }
    Ok(())
}

fn load_catalog(args: &CatalogArgs) -> Result<SymbolCatalog> {
    match &args.catalog {
        Some(path) => SymbolCatalog::load(path)
            .with_context(|| format!("Failed to load catalog {:?}", path)),
        None => Ok(SymbolCatalog::default()),
    }
}

fn build_config(args: &PlaybackArgs) -> Result<AppConfig> {
    let config = match AppConfig::from_override(args.assets_path.clone()) {
        Err(ConfigError::AssetsNotFound) => {
            let cwd: PathBuf =
                std::env::current_dir().context("Failed to resolve working directory")?;
            warn!(
                dir = %cwd.display(),
                "no assets directory found; resolving clips from working directory"
            );
            AppConfig::from_override(Some(cwd))?
        }
        other => other.context("Failed to resolve assets directory")?,
    };
    Ok(config
        .with_catalog(args.catalog.catalog.clone())
        .with_pause_ms(args.pause_ms))
}
