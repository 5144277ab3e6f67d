//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_core::events::events::{
    DatasetLoaded, DetailClosed, DetailRequested, FiltersApplied, HighlightChanged,
};
use cv_core::{Coordinator, EventBus, ViewKind, ViewRegistry};
use cv_data::{
    load_with_fallback, DataConfig, DatasetSource, JsonFileSource, LoadedDataset, SyntheticSource,
};
use cv_views::{register_views, CivilianImpactView, MapView, TimelineView, UncertaintyView};

mod command;
mod config;

use command::Command;
use config::DashboardConfig;

/// How often due highlight timers are checked
const TICK_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Parser)]
#[command(name = "conflict-dashboard")]
#[command(
    about = "Linked views over UCDP conflict data, driven from the terminal",
    long_about = None
)]
struct Cli {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the dataset JSON files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Skip the dataset files and generate sample data
    #[arg(long)]
    synthetic: bool,

    /// Seed for generated sample data
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Command line flags win over the config file
    fn apply(&self, config: &mut DashboardConfig) {
        if let Some(data_dir) = &self.data_dir {
            config.data.data_dir = data_dir.clone();
        }
        if self.seed.is_some() {
            config.data.seed = self.seed;
        }
    }
}

/// Load the dataset. A failure carries the single fatal notice.
async fn load_dataset(config: &DataConfig, synthetic_only: bool) -> Result<LoadedDataset> {
    let synthetic = SyntheticSource::new(config.seed);
    let loaded = if synthetic_only {
        load_with_fallback(&synthetic, None).await
    } else {
        let files = JsonFileSource::new(config);
        let fallback = config
            .synthetic_fallback
            .then_some(&synthetic as &dyn DatasetSource);
        load_with_fallback(&files, fallback).await
    };
    loaded.context("Unable to load conflict data")
}

/// Print what the detail panel and the summary line would show
fn subscribe_output(bus: &EventBus) {
    bus.on::<DatasetLoaded, _>(|event| {
        info!(
            "Dataset from {}: {} events, {} conflicts, {} monthly records",
            event.source_name, event.event_count, event.conflict_count, event.monthly_count
        );
    });
    bus.on::<FiltersApplied, _>(|event| println!("{}", event.summary));
    bus.on::<DetailRequested, _>(|event| println!("{}", event.detail));
    bus.on::<DetailClosed, _>(|_| println!("Detail panel closed"));
    bus.on::<HighlightChanged, _>(|event| match (event.conflict, event.origin) {
        (Some(conflict), Some(origin)) => {
            println!("Highlighting conflict {} (from {})", conflict, origin)
        }
        _ => println!("Highlight cleared"),
    });
}

fn describe(views: &ViewRegistry, kind: ViewKind) -> Option<String> {
    match kind {
        ViewKind::Map => views.view::<MapView>(kind).map(ToString::to_string),
        ViewKind::Timeline => views.view::<TimelineView>(kind).map(ToString::to_string),
        ViewKind::CivilianImpact => views.view::<CivilianImpactView>(kind).map(ToString::to_string),
        ViewKind::Uncertainty => views.view::<UncertaintyView>(kind).map(ToString::to_string),
    }
}

async fn handle(coordinator: &mut Coordinator, command: Command) -> Result<()> {
    match command {
        Command::Intent(intent) => coordinator.dispatch(intent),
        Command::Wait(duration) => {
            tokio::time::sleep(duration).await;
            coordinator.tick();
        }
        Command::Show(kind) => {
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => ViewKind::ALL.to_vec(),
            };
            for kind in kinds {
                match describe(coordinator.views(), kind) {
                    Some(text) => println!("{}", text),
                    None => println!("{}: unavailable", kind),
                }
            }
        }
        Command::Status => {
            println!("{}", serde_json::to_string_pretty(coordinator.state())?);
            println!("{}", coordinator.summary());
        }
        Command::Help => println!("{}", command::HELP),
        Command::Quit => {}
    }
    Ok(())
}

/// Let pending highlight timers run out
async fn drain_timers(coordinator: &mut Coordinator) {
    while let Some(deadline) = coordinator.next_deadline() {
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
        coordinator.tick();
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let loaded = load_dataset(&config.data, cli.synthetic).await?;
    if loaded.from_fallback {
        info!("Using sample data");
    }

    let bus = Arc::new(EventBus::new());
    subscribe_output(&bus);
    bus.publish(DatasetLoaded {
        source_name: loaded.source_name.clone(),
        event_count: loaded.dataset.events.len(),
        conflict_count: loaded.dataset.conflicts.len(),
        monthly_count: loaded.dataset.monthly_deaths.len(),
    });

    let mut views = ViewRegistry::new();
    register_views(&mut views, &config.views);

    let mut coordinator = Coordinator::new(Arc::new(loaded.dataset), views)
        .with_timing(config.highlight.timing())
        .with_event_bus(bus);
    coordinator.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("Input closed");
                    break;
                };
                match command::parse(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => handle(&mut coordinator, command).await?,
                    Ok(None) => {}
                    Err(e) => println!("{}", e),
                }
            }
            _ = ticker.tick() => coordinator.tick(),
        }
    }

    drain_timers(&mut coordinator).await;
    info!("Shutting down");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting conflict dashboard");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(cli))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_failed_load_has_one_notice() {
        let dir = TempDir::new().unwrap();
        let config = DataConfig {
            data_dir: dir.path().to_path_buf(),
            synthetic_fallback: false,
            ..DataConfig::default()
        };

        let error = load_dataset(&config, false).await.unwrap_err();
        assert_eq!(error.to_string(), "Unable to load conflict data");
        let causes: Vec<String> = error.chain().map(ToString::to_string).collect();
        assert_eq!(causes.len(), 2);
        assert!(causes[1].starts_with("No dataset available"));
    }

    #[tokio::test]
    async fn test_missing_files_fall_back() {
        let dir = TempDir::new().unwrap();
        let config = DataConfig {
            data_dir: dir.path().to_path_buf(),
            seed: Some(5),
            ..DataConfig::default()
        };

        let loaded = load_dataset(&config, false).await.unwrap();
        assert!(loaded.from_fallback);
        assert!(!loaded.dataset.conflicts.is_empty());
    }
}
