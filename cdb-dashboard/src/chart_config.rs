//! Chart.js configuration objects.
//!
//! These serialize to exactly the JSON `new Chart(canvas, config)` expects.
//! The one thing JSON cannot carry is a callback, so polar-area charts ship
//! their pre-computed percentage strings in `percentLabels` and the browser
//! bridge installs a tooltip callback that reads them.

use crate::aggregate::{percent_labels, RankedEntry};
use crate::kind::ChartKind;
use crate::palette::palette;
use crate::series::SeriesPoint;
use serde::Serialize;
use std::collections::BTreeMap;

/// Colour of single-series charts.
pub const SERIES_COLOR: &str = "#1d4ed8";

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
#[serde(untagged)]
pub enum Colors {
    One(String),
    Each(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
    pub background_color: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_axis: Option<&'static str>,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub scales: BTreeMap<&'static str, Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Toggle,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toggle {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

impl Title {
    fn shown(text: impl Into<String>) -> Self {
        Title {
            display: true,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<TimeScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeScale {
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    pub precision: u32,
}

fn count_axis() -> Axis {
    Axis {
        begin_at_zero: Some(true),
        ticks: Some(Ticks { precision: 0 }),
        ..Axis::default()
    }
}

/// Distribution chart for one aggregate field.
pub fn aggregate_chart(field: &str, entries: &[RankedEntry], kind: ChartKind) -> ChartConfig {
    let labels = entries.iter().map(|e| e.label.clone()).collect();
    let data = entries.iter().map(|e| e.value).collect();

    let mut scales = BTreeMap::new();
    if kind == ChartKind::Bar {
        scales.insert("y", count_axis());
    }
    let percent = (kind == ChartKind::PolarArea).then(|| percent_labels(entries));

    ChartConfig {
        kind,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: field.to_string(),
                data,
                background_color: Colors::Each(palette(entries.len())),
                border_color: None,
                border_width: 1,
                point_radius: None,
                tension: None,
                fill: None,
                percent_labels: percent,
            }],
        },
        options: ChartOptions {
            responsive: true,
            index_axis: None,
            plugins: Plugins {
                legend: Toggle {
                    display: kind.shows_legend(),
                },
                title: Title::shown(format!("Distribuzione per {}", field)),
            },
            scales,
        },
    }
}

/// Daily new-condition counts as a time-indexed line.
pub fn incidence_chart(points: &[SeriesPoint], condition: &str) -> ChartConfig {
    let mut scales = BTreeMap::new();
    scales.insert(
        "x",
        Axis {
            axis_type: Some("time"),
            time: Some(TimeScale { unit: "day" }),
            title: Some(Title::shown("Data")),
            ..Axis::default()
        },
    );
    scales.insert("y", count_axis());

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: points.iter().map(|p| p.label.clone()).collect(),
            datasets: vec![Dataset {
                label: format!("Nuovi casi {}", condition),
                data: points.iter().map(|p| p.value).collect(),
                background_color: Colors::One(SERIES_COLOR.to_string()),
                border_color: Some(SERIES_COLOR.to_string()),
                border_width: 2,
                point_radius: Some(2.0),
                tension: Some(0.1),
                fill: Some(false),
                percent_labels: None,
            }],
        },
        options: ChartOptions {
            responsive: true,
            index_axis: None,
            plugins: Plugins {
                legend: Toggle { display: false },
                title: Title::shown(format!("Incidenza giornaliera {}", condition)),
            },
            scales,
        },
    }
}

/// Horizontal bars, one per category, in the order given.
pub fn horizontal_bar_chart(points: &[SeriesPoint], title: &str, series_label: &str) -> ChartConfig {
    let mut scales = BTreeMap::new();
    scales.insert("x", count_axis());

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: points.iter().map(|p| p.label.clone()).collect(),
            datasets: vec![Dataset {
                label: series_label.to_string(),
                data: points.iter().map(|p| p.value).collect(),
                background_color: Colors::Each(palette(points.len())),
                border_color: None,
                border_width: 1,
                point_radius: None,
                tension: None,
                fill: None,
                percent_labels: None,
            }],
        },
        options: ChartOptions {
            responsive: true,
            index_axis: Some("y"),
            plugins: Plugins {
                legend: Toggle { display: false },
                title: Title::shown(title),
            },
            scales,
        },
    }
}

pub fn province_chart(points: &[SeriesPoint]) -> ChartConfig {
    horizontal_bar_chart(points, "Pazienti per provincia", "Pazienti")
}

pub fn comparison_chart(points: &[SeriesPoint], condition: &str) -> ChartConfig {
    horizontal_bar_chart(
        points,
        &format!("Confronto incidenza {}", condition),
        "Nuovi casi",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::rank;
    use serde_json::json;

    fn ranked(json: &str) -> Vec<RankedEntry> {
        rank(&serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_gender_polar_area_config() {
        let entries = ranked(r#"{"M": 120, "F": 130}"#);
        let config = aggregate_chart("gender", &entries, ChartKind::PolarArea);
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["type"], "polarArea");
        assert_eq!(value["data"]["labels"], json!(["F", "M"]));
        assert_eq!(value["data"]["datasets"][0]["data"], json!([130, 120]));
        assert_eq!(
            value["data"]["datasets"][0]["percentLabels"],
            json!(["52.0 %", "48.0 %"])
        );
        assert_eq!(value["options"]["plugins"]["legend"]["display"], true);
        assert!(value["options"].get("scales").is_none());
    }

    #[test]
    fn test_bar_config_hides_legend_and_starts_at_zero() {
        let entries = ranked(r#"{"0-17": 3, "18-39": 10, "40-64": 8, "65+": 4}"#);
        let config = aggregate_chart("age_group", &entries, ChartKind::Bar);
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["options"]["plugins"]["legend"]["display"], false);
        assert_eq!(value["options"]["scales"]["y"]["beginAtZero"], true);
        assert!(value["data"]["datasets"][0].get("percentLabels").is_none());
        assert_eq!(
            value["data"]["datasets"][0]["backgroundColor"]
                .as_array()
                .map(|a| a.len()),
            Some(4)
        );
    }

    #[test]
    fn test_doughnut_shows_legend_without_scales() {
        let entries = ranked(r#"{"Concluso": 3, "In corso": 1}"#);
        let config = aggregate_chart("status", &entries, ChartKind::Doughnut);
        assert!(config.options.plugins.legend.display);
        assert!(config.options.scales.is_empty());
        assert_eq!(config.options.plugins.title.text, "Distribuzione per status");
    }

    #[test]
    fn test_incidence_chart_is_daily_time_line() {
        let points = vec![
            SeriesPoint {
                label: "2026-10-15".to_string(),
                value: 2,
            },
            SeriesPoint {
                label: "2026-10-16".to_string(),
                value: 0,
            },
        ];
        let value = serde_json::to_value(incidence_chart(&points, "U07.1")).unwrap();
        assert_eq!(value["type"], "line");
        assert_eq!(value["options"]["scales"]["x"]["type"], "time");
        assert_eq!(value["options"]["scales"]["x"]["time"]["unit"], "day");
        assert_eq!(value["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(value["data"]["datasets"][0]["pointRadius"], 2.0);
    }

    #[test]
    fn test_comparison_chart_is_horizontal() {
        let points = vec![
            SeriesPoint {
                label: "a".to_string(),
                value: 1,
            },
            SeriesPoint {
                label: "b".to_string(),
                value: 2,
            },
        ];
        let config = comparison_chart(&points, "U07.1");
        assert_eq!(config.kind, ChartKind::Bar);
        assert_eq!(config.options.index_axis, Some("y"));
        assert_eq!(config.data.datasets[0].data, vec![1, 2]);
    }
}
