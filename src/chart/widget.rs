//! Chart Widget
//!
//! The renderer talks to charts through `ChartBackend::create` and
//! `ChartHandle::update`. `TextChartBackend` draws a sparkline with an axis
//! summary into display elements.

use super::ChartConfig;
use crate::surface::Element;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Creates chart instances
pub trait ChartBackend: Send {
    fn create(&mut self, target: &str, config: &ChartConfig) -> Box<dyn ChartHandle>;
}

/// A live chart instance
pub trait ChartHandle: Send {
    /// Replace data and options
    fn update(&mut self, config: &ChartConfig);

    fn config(&self) -> &ChartConfig;

    /// Visible state of the chart
    fn draw(&self) -> Vec<Element>;
}

/// Backend producing [`TextChart`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct TextChartBackend;

impl ChartBackend for TextChartBackend {
    fn create(&mut self, target: &str, config: &ChartConfig) -> Box<dyn ChartHandle> {
        tracing::debug!(target = %target, "Creating text chart");
        Box::new(TextChart::new(target, config.clone()))
    }
}

/// Sparkline chart
#[derive(Debug, Clone)]
pub struct TextChart {
    target: String,
    config: ChartConfig,
    updates: u64,
}

impl TextChart {
    pub fn new(target: impl Into<String>, config: ChartConfig) -> Self {
        Self {
            target: target.into(),
            config,
            updates: 0,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of `update` calls since creation
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl ChartHandle for TextChart {
    fn update(&mut self, config: &ChartConfig) {
        self.config = config.clone();
        self.updates += 1;
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn draw(&self) -> Vec<Element> {
        let Some(dataset) = self.config.primary() else {
            return vec![Element::new("chart-empty").text("No data")];
        };

        let (min, max) = dataset
            .data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });

        let x_axis = self.config.options.scales.x.ticks.color.clone();
        let y_axis = &self.config.options.scales.y;

        let mut elements = vec![
            Element::new("chart-title")
                .text(dataset.label.clone())
                .attr("color", dataset.border_color.clone()),
            Element::new("chart-line")
                .text(sparkline(&dataset.data))
                .attr("color", dataset.border_color.clone())
                .attr("fill", dataset.background_color.clone()),
        ];

        let labels = &self.config.data.labels;
        if let (Some(first), Some(last)) = (labels.first(), labels.last()) {
            elements.push(
                Element::new("chart-x-axis")
                    .text(format!("{} .. {}", first, last))
                    .attr("color", x_axis),
            );
        }

        if min.is_finite() && max.is_finite() {
            elements.push(
                Element::new("chart-y-axis")
                    .text(format!(
                        "{} .. {}",
                        self.config.format_y(min),
                        self.config.format_y(max)
                    ))
                    .attr("color", y_axis.ticks.color.clone())
                    .attr("grid", y_axis.grid.color.clone()),
            );
        }

        elements
    }
}

/// One block character per value, scaled between the series min and max
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    let span = max - min;
    let top = (SPARK_LEVELS.len() - 1) as f64;

    values
        .iter()
        .map(|v| {
            if span <= 0.0 || !span.is_finite() {
                SPARK_LEVELS[0]
            } else {
                SPARK_LEVELS[(((v - min) / span) * top).round() as usize]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartDataAdapter;
    use crate::model::{SeriesSelector, Theme};

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[0.0, 7.0]), "▁█");
        assert_eq!(sparkline(&[0.0, 0.0, 0.0]), "▁▁▁");
        assert_eq!(sparkline(&[]), "");
        assert_eq!(sparkline(&[1.0, 2.0, 3.0]).chars().count(), 3);
    }

    #[test]
    fn test_draw_revenue() {
        let config = ChartDataAdapter.build_config(&SeriesSelector::Revenue, Theme::Light);
        let chart = TextChart::new("main-chart", config);
        let drawn = chart.draw();

        assert_eq!(drawn[0].text, "Revenue");
        assert_eq!(drawn[1].text.chars().count(), 12);
        assert!(drawn[1].text.ends_with('█'));
        assert_eq!(drawn[2].text, "Jan .. Dec");
        assert_eq!(drawn[3].text, "$5,000 .. $13,500");
        assert_eq!(drawn[3].attributes["color"], "#000000");
    }

    #[test]
    fn test_update_replaces_config() {
        let mut backend = TextChartBackend;
        let light = ChartDataAdapter.build_config(&SeriesSelector::Revenue, Theme::Light);
        let dark = ChartDataAdapter.build_config(&SeriesSelector::Profit, Theme::Dark);

        let mut handle = backend.create("main-chart", &light);
        assert_eq!(handle.config(), &light);

        handle.update(&dark);
        assert_eq!(handle.config(), &dark);
        assert_eq!(handle.draw()[0].text, "Profit");
        assert_eq!(handle.draw()[0].attributes["color"], "#ffffff");
    }

    #[test]
    fn test_update_counter() {
        let config = ChartDataAdapter.build_config(&SeriesSelector::Expense, Theme::Light);
        let mut chart = TextChart::new("main-chart", config.clone());
        chart.update(&config);
        chart.update(&config);
        assert_eq!(chart.updates(), 2);
        assert_eq!(chart.target(), "main-chart");
    }
}
