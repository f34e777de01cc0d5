//! Chart Data Adapter
//!
//! Maps a series selector and theme to a chart configuration in the shape a
//! line-chart widget consumes (`type`, `data.labels`, `data.datasets[]`,
//! `options`). The mapping is a pure function: equal inputs give equal
//! configs.
//!
//! # Example
//!
//! ```rust
//! use midday::chart::ChartDataAdapter;
//! use midday::model::{SeriesSelector, Theme};
//!
//! let config = ChartDataAdapter.build_config(&SeriesSelector::Profit, Theme::Dark);
//! assert_eq!(config.data.labels.len(), 12);
//! assert_eq!(config.data.datasets[0].label, "Profit");
//! assert_eq!(config.data.datasets[0].border_color, "#ffffff");
//! ```

pub mod widget;

pub use widget::{ChartBackend, ChartHandle, TextChart, TextChartBackend};

use serde::Serialize;

use crate::model::{usd_grouped, ChartSeries, SeriesSelector, Theme};

/// Line, fill, tick and grid colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub line: &'static str,
    pub fill: &'static str,
    pub text: &'static str,
    pub grid: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Palette {
                line: "#000000",
                fill: "rgba(0, 0, 0, 0.1)",
                text: "#000000",
                grid: "rgba(0, 0, 0, 0.1)",
            },
            Theme::Dark => Palette {
                line: "#ffffff",
                fill: "rgba(255, 255, 255, 0.1)",
                text: "#ffffff",
                grid: "rgba(255, 255, 255, 0.1)",
            },
        }
    }
}

/// Kind of chart the widget draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
}

/// Complete chart configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub fill: bool,
    pub tension: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub grid: GridOptions,
    pub ticks: TickOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridOptions {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickOptions {
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<TickFormat>,
}

/// How axis tick values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickFormat {
    /// Grouped whole dollars, e.g. `$13,500`
    Currency,
}

impl TickFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            TickFormat::Currency => usd_grouped(value),
        }
    }
}

impl ChartConfig {
    /// The dataset being charted
    pub fn primary(&self) -> Option<&Dataset> {
        self.data.datasets.first()
    }

    /// Format a y-axis value the way the ticks display it
    pub fn format_y(&self, value: f64) -> String {
        match self.options.scales.y.ticks.format {
            Some(format) => format.format(value),
            None => format!("{}", value),
        }
    }
}

/// Builds chart configurations from the mock series
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartDataAdapter;

impl ChartDataAdapter {
    pub fn build_config(&self, selector: &SeriesSelector, theme: Theme) -> ChartConfig {
        let series = ChartSeries::for_selector(selector);
        let palette = Palette::for_theme(theme);

        ChartConfig {
            kind: ChartKind::Line,
            data: ChartData {
                labels: series.labels.iter().map(|l| l.to_string()).collect(),
                datasets: vec![Dataset {
                    label: selector.label().to_string(),
                    data: series.values.to_vec(),
                    border_color: palette.line.to_string(),
                    background_color: palette.fill.to_string(),
                    border_width: 2,
                    fill: true,
                    tension: 0.4,
                }],
            },
            options: Self::options(&palette),
        }
    }

    fn options(palette: &Palette) -> ChartOptions {
        let axis = |format: Option<TickFormat>| Axis {
            grid: GridOptions {
                color: palette.grid.to_string(),
            },
            ticks: TickOptions {
                color: palette.text.to_string(),
                format,
            },
        };

        ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                legend: Legend { display: false },
            },
            scales: Scales {
                x: axis(None),
                y: axis(Some(TickFormat::Currency)),
            },
        }
    }
}
