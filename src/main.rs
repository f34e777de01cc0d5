//! Midday CLI
//!
//! Runs the dashboard refresh loop against an in-memory display and prints
//! what it rendered. Also exposes the theme preference, chart configurations
//! and spending lookups.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use midday::model::usd_grouped;
use midday::{
    command_channel, describe, ChartDataAdapter, Config, Dashboard, FileStore, KeyValueStore,
    LoggingConfig, MemoryStore, MemorySurface, MockDataGenerator, SeriesSelector,
    SpendingPeriod, TextChartBackend, Theme, ThemeStore,
};

#[derive(Parser)]
#[command(name = "midday")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mock finance dashboard with periodic refresh")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, then ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the dashboard refresh loop
    Run {
        /// Stop after this many seconds (default: until Ctrl-C)
        #[arg(short, long)]
        duration: Option<u64>,
        /// Seed for reproducible mock data
        #[arg(long)]
        seed: Option<u64>,
        /// Theme to switch to on start (light, dark)
        #[arg(short, long)]
        theme: Option<String>,
        /// Series to chart (revenue, profit, expense, burn_rate)
        #[arg(short, long)]
        series: Option<String>,
        /// Spending period (last_30d, last_3m, last_6m)
        #[arg(short, long)]
        period: Option<String>,
        /// Keep the theme preference in memory only
        #[arg(long)]
        ephemeral: bool,
    },

    /// Show or change the theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Print the chart configuration for a series as JSON
    Chart {
        /// Series key (revenue, profit, expense, burn_rate)
        #[arg(default_value = "revenue")]
        series: String,
        /// Theme (default: stored preference)
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Print the spending breakdown for a period
    Spending {
        /// Period key (last_30d, last_3m, last_6m)
        #[arg(default_value = "last_30d")]
        period: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the stored theme
    Get,
    /// Store a theme (light, dark)
    Set { theme: String },
    /// Switch to the other theme
    Toggle,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    init_logging(&config.logging);

    match cli.command {
        Commands::Run {
            duration,
            seed,
            theme,
            series,
            period,
            ephemeral,
        } => {
            let store = open_store(&config, ephemeral)?;
            let generator = match seed {
                Some(seed) => MockDataGenerator::seeded(seed),
                None => MockDataGenerator::from_entropy(),
            };

            let mut dashboard = Dashboard::new(
                &config.dashboard,
                store,
                Box::new(MemorySurface::dashboard_layout()),
                Box::new(TextChartBackend),
                generator,
            );

            dashboard.start();
            if let Some(theme) = theme {
                dashboard.set_theme(Theme::from_key(&theme));
            }
            if let Some(series) = series {
                dashboard.switch_chart(SeriesSelector::from_key(&series));
            }
            if let Some(period) = period {
                dashboard.select_period(SpendingPeriod::from_key(&period));
            }

            tracing::info!("Midday Dashboard v{} running", env!("CARGO_PKG_VERSION"));

            let (handle, commands) = command_channel();
            let running = tokio::spawn(dashboard.run(commands));

            match duration {
                Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
                None => tokio::signal::ctrl_c()
                    .await
                    .context("waiting for Ctrl-C")?,
            }

            tracing::info!("Shutting down...");
            handle.shutdown()?;
            let dashboard = running.await.context("dashboard task failed")?;

            let stats = dashboard.tick_stats();
            println!("{}", describe(dashboard.renderer().surface()));
            println!(
                "theme={} series={} transaction_ticks={} balance_ticks={}",
                dashboard.theme(),
                dashboard.series(),
                stats.transaction_ticks,
                stats.balance_ticks
            );
        }

        Commands::Theme { action } => {
            let mut themes = ThemeStore::new(open_store(&config, false)?);
            match action {
                ThemeAction::Get => println!("{}", themes.get()),
                ThemeAction::Set { theme } => {
                    let theme = Theme::from_key(&theme);
                    themes.set(theme);
                    println!("{}", theme);
                }
                ThemeAction::Toggle => println!("{}", themes.toggle()),
            }
        }

        Commands::Chart { series, theme } => {
            let theme = match theme {
                Some(theme) => Theme::from_key(&theme),
                None => ThemeStore::new(open_store(&config, false)?).get(),
            };
            let chart = ChartDataAdapter.build_config(&SeriesSelector::from_key(&series), theme);
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }

        Commands::Spending { period } => {
            let period = SpendingPeriod::from_key(&period);
            let breakdown = period.breakdown();
            println!("{:<12} {:>12}", "Category", period.as_key());
            println!("{}", "-".repeat(25));
            let rows = [
                ("Software", breakdown.software),
                ("Marketing", breakdown.marketing),
                ("Office", breakdown.office),
                ("Total", breakdown.total()),
            ];
            for (label, amount) in rows {
                println!("{:<12} {:>12}", label, usd_grouped(amount));
            }
        }

        Commands::Config { output } => {
            let content = midday::config::generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn open_store(config: &Config, ephemeral: bool) -> Result<Box<dyn KeyValueStore>> {
    if ephemeral {
        return Ok(Box::new(MemoryStore::new()));
    }

    let data_dir = config.store.data_path();
    let store = FileStore::open(&data_dir)
        .with_context(|| format!("opening preference store in {}", data_dir.display()))?;
    tracing::debug!("Preference store: {:?}", store.path());
    Ok(Box::new(store))
}

fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("midday={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
