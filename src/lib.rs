//! # Midday
//!
//! Refresh and render core of a mock finance dashboard: theme handling, a
//! chart widget fed by fixed monthly series, and periodically refreshed mock
//! data (account balance, transaction feed, spending breakdown).
//!
//! ## Modules
//!
//! - [`model`]: View-model types (theme, series, transactions, balance)
//! - [`store`]: Key-value persistence for the theme preference
//! - [`theme`]: Theme store with change notification
//! - [`mock`]: Random transactions and balance fluctuations
//! - [`chart`]: Chart configuration adapter and chart widget
//! - [`surface`]: Display element tree the renderer writes into
//! - [`render`]: View renderer enforcing display invariants
//! - [`scheduler`]: Cancellable refresh timers
//! - [`dashboard`]: Application context and run loop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use midday::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::default();
//!     let dashboard = Dashboard::new(
//!         &config.dashboard,
//!         Box::new(MemoryStore::new()),
//!         Box::new(MemorySurface::dashboard_layout()),
//!         Box::new(TextChartBackend),
//!         MockDataGenerator::from_entropy(),
//!     );
//!
//!     let (handle, commands) = command_channel();
//!     let running = tokio::spawn(dashboard.run(commands));
//!
//!     handle.toggle_theme().unwrap();
//!     handle.switch_chart(SeriesSelector::Profit).unwrap();
//!     handle.shutdown().unwrap();
//!
//!     let dashboard = running.await.unwrap();
//!     println!("{}", describe(dashboard.renderer().surface()));
//! }
//! ```

pub mod chart;
pub mod config;
pub mod dashboard;
pub mod mock;
pub mod model;
pub mod render;
pub mod scheduler;
pub mod store;
pub mod surface;
pub mod theme;

// Re-export top-level types for convenience
pub use model::{
    AccountBalance, ChartSeries, SeriesSelector, SpendingBreakdown, SpendingPeriod, Theme,
    Transaction, TransactionCategory, TransactionFeed,
};

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, StoreResult};

pub use theme::{ThemeStore, THEME_KEY};

pub use mock::MockDataGenerator;

pub use chart::{ChartBackend, ChartConfig, ChartDataAdapter, ChartHandle, Palette, TextChartBackend};

pub use surface::{describe, DisplaySurface, Element, MemorySurface};

pub use render::ViewRenderer;

pub use scheduler::{RefreshScheduler, RefreshTick, ScheduleConfig, TickStats, TimerHandle, TimerSet};

pub use dashboard::{command_channel, Command, Dashboard, DashboardClosed, DashboardHandle};

pub use config::{Config, ConfigError, DashboardConfig, LoggingConfig, StoreConfig};
