use serde::{Deserialize, Serialize};

/// Above this many categories a circular chart becomes unreadable.
pub const MAX_CIRCULAR_LABELS: usize = 12;

/// Chart.js chart types the dashboard draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Bar,
    Doughnut,
    PolarArea,
    Line,
}

impl ChartKind {
    /// Circular charts identify categories through the legend.
    pub fn shows_legend(&self) -> bool {
        matches!(self, ChartKind::Doughnut | ChartKind::PolarArea)
    }
}

/// Pick the chart type for an aggregate of `field` with `label_count` categories.
pub fn chart_kind(field: &str, label_count: usize, force: Option<ChartKind>) -> ChartKind {
    if let Some(kind) = force {
        return kind;
    }
    match field {
        "gender" => ChartKind::PolarArea,
        "age_group" => ChartKind::Bar,
        _ if label_count > MAX_CIRCULAR_LABELS => ChartKind::Bar,
        _ => ChartKind::Doughnut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forced_kind_wins() {
        assert_eq!(chart_kind("gender", 2, Some(ChartKind::Line)), ChartKind::Line);
        assert_eq!(chart_kind("status", 40, Some(ChartKind::Doughnut)), ChartKind::Doughnut);
    }

    #[test]
    fn test_field_specific_kinds() {
        assert_eq!(chart_kind("gender", 50, None), ChartKind::PolarArea);
        assert_eq!(chart_kind("age_group", 1, None), ChartKind::Bar);
    }

    #[test]
    fn test_label_count_threshold() {
        assert_eq!(chart_kind("status", 12, None), ChartKind::Doughnut);
        assert_eq!(chart_kind("status", 13, None), ChartKind::Bar);
        assert_eq!(chart_kind("code", 0, None), ChartKind::Doughnut);
    }

    #[test]
    fn test_kind_serializes_as_chartjs_type() {
        assert_eq!(serde_json::to_string(&ChartKind::PolarArea).unwrap(), "\"polarArea\"");
        assert_eq!(serde_json::to_string(&ChartKind::Bar).unwrap(), "\"bar\"");
    }
}
