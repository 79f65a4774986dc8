//! The fetch -> derive -> draw cycle for every dashboard chart.
//!
//! Each render catches its own failures: it logs, raises a single toast when
//! the requested chart could not be drawn, and leaves whatever the canvas
//! showed before in place. Empty payloads are logged only.

use crate::aggregate::{apply_names, is_coded_field, rank};
use crate::chart_config::{aggregate_chart, comparison_chart, incidence_chart, province_chart, ChartConfig};
use crate::config::DashboardConfig;
use crate::kind::chart_kind;
use crate::listing::{tabulate, ResourceTable};
use crate::notify::{render_failure_toast, Notifier};
use crate::periods::{PeriodInputs, PeriodRequest};
use crate::registry::{ChartRegistry, RequestToken};
use crate::series::{comparison_points, incidence_points, province_points};
use crate::surface::ChartSurface;
use cdb_api::models::{KpiSummary, ResourceKind};
use cdb_api::{ApiClient, HttpTransport};
use cdb_utils::DateRange;
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A new chart now owns the canvas.
    Drawn,
    /// The backend had nothing to show; the previous chart was kept.
    Empty,
    /// The inputs were incomplete; nothing was requested.
    Skipped,
    /// A newer request for the same canvas was issued meanwhile.
    Superseded,
    /// The render failed and the operator was notified.
    Failed,
}

/// Result of a comparison render plus the inputs it actually used.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOutcome {
    pub outcome: RenderOutcome,
    /// Set whenever a request was made; differs from the given inputs when auto-filled.
    pub inputs: Option<PeriodInputs>,
}

pub struct Renderer<T: HttpTransport, S: ChartSurface, N: Notifier> {
    client: ApiClient<T>,
    surface: S,
    notifier: N,
    config: DashboardConfig,
    registry: RefCell<ChartRegistry<S::Handle>>,
}

impl<T: HttpTransport, S: ChartSurface, N: Notifier> Renderer<T, S, N> {
    pub fn new(client: ApiClient<T>, surface: S, notifier: N, config: DashboardConfig) -> Self {
        Self {
            client,
            surface,
            notifier,
            config,
            registry: RefCell::new(ChartRegistry::new()),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn is_bound(&self, canvas_id: &str) -> bool {
        self.registry.borrow().is_bound(canvas_id)
    }

    /// Distribution of `field` drawn as bar, doughnut or polar-area chart.
    pub async fn render_aggregate(&self, canvas_id: &str, field: &str) -> RenderOutcome {
        let token = self.begin(canvas_id);
        let payload = match self.client.aggregate(field).await {
            Ok(payload) => payload,
            Err(e) => {
                return self.failed(&token, &format!("la distribuzione per {}", field), e.detail())
            }
        };
        if !self.is_current(&token) {
            return self.superseded(&token);
        }
        if payload.is_empty() {
            warn!("No data for aggregate field {}", field);
            return RenderOutcome::Empty;
        }

        let mut entries = rank(&payload);
        if is_coded_field(field) {
            let codes: Vec<String> = entries.iter().map(|e| e.key.clone()).collect();
            match self.client.code_names(&codes).await {
                Ok(names) => apply_names(&mut entries, &names),
                Err(e) => warn!(
                    "Name lookup for {} codes failed, showing raw codes: {}",
                    codes.len(),
                    e
                ),
            }
        }

        let kind = chart_kind(field, entries.len(), None);
        debug!("Drawing {} ({} categories) as {:?}", field, entries.len(), kind);
        self.draw(&token, &aggregate_chart(field, &entries, kind))
    }

    /// New conditions per day over the last `days` days ending at `today`.
    pub async fn render_incidence(&self, canvas_id: &str, days: u32, today: NaiveDate) -> RenderOutcome {
        let range = match DateRange::ending_at(today, days) {
            Ok(range) => range,
            Err(e) => {
                warn!("Invalid incidence window of {} days: {}", days, e);
                self.notifier
                    .notify(render_failure_toast("l'incidenza giornaliera", &e.to_string()));
                return RenderOutcome::Failed;
            }
        };
        let token = self.begin(canvas_id);
        let condition = self.config.condition_code.as_str();
        let series = match self.client.daily_incidence(&range, condition).await {
            Ok(series) => series,
            Err(e) => return self.failed(&token, "l'incidenza giornaliera", e.detail()),
        };
        if !self.is_current(&token) {
            return self.superseded(&token);
        }
        if series.is_empty() {
            warn!(
                "No incidence data for {} between {} and {}",
                condition,
                range.start_iso(),
                range.end_iso()
            );
            return RenderOutcome::Empty;
        }
        self.draw(&token, &incidence_chart(&incidence_points(&series), condition))
    }

    /// Patients per province.
    pub async fn render_provinces(&self, canvas_id: &str) -> RenderOutcome {
        let token = self.begin(canvas_id);
        let rows = match self.client.patients_by_province().await {
            Ok(rows) => rows,
            Err(e) => return self.failed(&token, "i pazienti per provincia", e.detail()),
        };
        if !self.is_current(&token) {
            return self.superseded(&token);
        }
        if rows.is_empty() {
            warn!("No province data");
            return RenderOutcome::Empty;
        }
        self.draw(&token, &province_chart(&province_points(&rows)))
    }

    /// Condition counts of two operator-chosen periods, side by side.
    pub async fn render_comparison(
        &self,
        canvas_id: &str,
        inputs: &PeriodInputs,
        today: NaiveDate,
    ) -> ComparisonOutcome {
        let (first, second, used) = match inputs.resolve(today) {
            Ok(PeriodRequest::Skip) => {
                debug!("Comparison inputs incomplete, keeping current chart");
                return ComparisonOutcome {
                    outcome: RenderOutcome::Skipped,
                    inputs: None,
                };
            }
            Ok(PeriodRequest::Compare {
                first,
                second,
                inputs,
            }) => (first, second, inputs),
            Err(e) => {
                warn!("Invalid comparison periods: {}", e);
                self.notifier
                    .notify(render_failure_toast("il confronto tra periodi", &e.to_string()));
                return ComparisonOutcome {
                    outcome: RenderOutcome::Failed,
                    inputs: None,
                };
            }
        };

        let token = self.begin(canvas_id);
        let condition = self.config.condition_code.as_str();
        let outcome = match self
            .client
            .incidence_comparison(&first, &second, condition)
            .await
        {
            Ok(periods) if self.is_current(&token) => {
                let points = comparison_points(&periods, &first, &second);
                self.draw(&token, &comparison_chart(&points, condition))
            }
            Ok(_) => self.superseded(&token),
            Err(e) => self.failed(&token, "il confronto tra periodi", e.detail()),
        };
        ComparisonOutcome {
            outcome,
            inputs: Some(used),
        }
    }

    /// Summary counts for the KPI cards; `None` keeps the cards as they are.
    pub async fn load_kpis(&self) -> Option<KpiSummary> {
        match self.client.stats().await {
            Ok(summary) => Some(summary),
            Err(e) => {
                error!("Failed to load KPI summary: {}", e);
                self.notifier
                    .notify(render_failure_toast("gli indicatori", &e.detail()));
                None
            }
        }
    }

    /// Raw resources of `kind` flattened into table rows.
    pub async fn load_table(&self, kind: ResourceKind) -> Option<ResourceTable> {
        match self.client.list_resources(kind).await {
            Ok(resources) => {
                info!("Loaded {} {} resources", resources.len(), kind);
                Some(tabulate(kind, &resources))
            }
            Err(e) => {
                error!("Failed to list {} resources: {}", kind, e);
                self.notifier
                    .notify(render_failure_toast(&format!("l'elenco {}", kind), &e.detail()));
                None
            }
        }
    }

    fn begin(&self, canvas_id: &str) -> RequestToken {
        self.registry.borrow_mut().begin(canvas_id)
    }

    fn is_current(&self, token: &RequestToken) -> bool {
        self.registry.borrow().is_current(token)
    }

    fn superseded(&self, token: &RequestToken) -> RenderOutcome {
        debug!(
            "Discarding response #{} for {}: superseded",
            token.seq(),
            token.canvas()
        );
        RenderOutcome::Superseded
    }

    fn failed(&self, token: &RequestToken, what: &str, reason: impl Display) -> RenderOutcome {
        if !self.is_current(token) {
            return self.superseded(token);
        }
        error!("Failed to load {} for {}: {}", what, token.canvas(), reason);
        self.notifier
            .notify(render_failure_toast(what, &reason.to_string()));
        RenderOutcome::Failed
    }

    fn draw(&self, token: &RequestToken, config: &ChartConfig) -> RenderOutcome {
        let mut registry = self.registry.borrow_mut();
        if !registry.is_current(token) {
            drop(registry);
            return self.superseded(token);
        }
        let canvas = token.canvas();
        match registry.replace(canvas, || self.surface.draw(canvas, config)) {
            Ok(()) => RenderOutcome::Drawn,
            Err(e) => {
                drop(registry);
                error!("{}", e);
                self.notifier
                    .notify(render_failure_toast("il grafico", &e.reason));
                RenderOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ChartKind;
    use crate::notify::ToastLevel;
    use crate::testing::{Event, RecordingNotifier, RecordingSurface};
    use cdb_api::fake::FakeTransport;

    type TestRenderer = Renderer<FakeTransport, RecordingSurface, RecordingNotifier>;

    fn renderer(fake: FakeTransport) -> (TestRenderer, RecordingSurface, RecordingNotifier) {
        let surface = RecordingSurface::default();
        let notifier = RecordingNotifier::default();
        let renderer = Renderer::new(
            ApiClient::new(fake, ""),
            surface.clone(),
            notifier.clone(),
            DashboardConfig::default(),
        );
        (renderer, surface, notifier)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[tokio::test]
    async fn test_gender_renders_polar_area_with_percentages() {
        let fake = FakeTransport::new().reply("/api/stats/aggregate/gender", 200, r#"{"M": 120, "F": 130}"#);
        let (renderer, surface, notifier) = renderer(fake);

        let outcome = renderer.render_aggregate("chart1", "gender").await;

        assert_eq!(outcome, RenderOutcome::Drawn);
        let config = surface.last_config("chart1").unwrap();
        assert_eq!(config.kind, ChartKind::PolarArea);
        assert_eq!(config.data.labels, vec!["F", "M"]);
        assert_eq!(
            config.data.datasets[0].percent_labels,
            Some(vec!["52.0 %".to_string(), "48.0 %".to_string()])
        );
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_rerender_destroys_previous_chart_first() {
        let fake = FakeTransport::new()
            .reply("/api/stats/aggregate/gender", 200, r#"{"M": 1, "F": 2}"#)
            .reply("/api/stats/aggregate/status", 200, r#"{"Concluso": 4}"#);
        let (renderer, surface, _) = renderer(fake);

        renderer.render_aggregate("chart1", "gender").await;
        renderer.render_aggregate("chart1", "status").await;

        assert_eq!(
            surface.events(),
            vec![
                Event::Draw { canvas: "chart1".to_string(), id: 1 },
                Event::Destroy { canvas: "chart1".to_string(), id: 1 },
                Event::Draw { canvas: "chart1".to_string(), id: 2 },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_distribution_keeps_previous_chart() {
        let fake = FakeTransport::new().reply("/api/stats/aggregate/status", 200, r#"{"Concluso": 4}"#);
        let (renderer, surface, notifier) = renderer(fake);
        renderer.render_aggregate("chart2", "status").await;

        renderer
            .client()
            .transport()
            .set_reply("/api/stats/aggregate/status", 200, "{}");
        let outcome = renderer.render_aggregate("chart2", "status").await;

        assert_eq!(outcome, RenderOutcome::Empty);
        assert_eq!(surface.destroys(), 0);
        assert!(renderer.is_bound("chart2"));
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_chart_and_notifies_once() {
        let fake = FakeTransport::new().reply("/api/stats/aggregate/status", 200, r#"{"Concluso": 4}"#);
        let (renderer, surface, notifier) = renderer(fake);
        renderer.render_aggregate("chart2", "status").await;

        renderer
            .client()
            .transport()
            .set_reply("/api/stats/aggregate/status", 500, r#"{"detail": "db down"}"#);
        let outcome = renderer.render_aggregate("chart2", "status").await;

        assert_eq!(outcome, RenderOutcome::Failed);
        assert_eq!(surface.destroys(), 0);
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert!(toasts[0].text.contains("db down"));
    }

    #[tokio::test]
    async fn test_coded_field_uses_resolved_names() {
        let fake = FakeTransport::new()
            .reply("/api/stats/aggregate/code", 200, r#"{"718-7": 3, "2345-7": 9}"#)
            .reply(
                "/api/loinc-codes/names",
                200,
                r#"[{"code": "2345-7", "display": "Glucose [Mass/volume] in Serum or Plasma"}]"#,
            );
        let (renderer, surface, _) = renderer(fake);

        renderer.render_aggregate("chart1", "code").await;

        let config = surface.last_config("chart1").unwrap();
        assert_eq!(
            config.data.labels,
            vec!["Glucose [Mass/volume] in Serum or Plasma", "718-7"]
        );
        let lookups = renderer.client().transport().requests_to("/api/loinc-codes/names");
        assert_eq!(lookups, vec!["/api/loinc-codes/names?codes=2345-7%2C718-7"]);
    }

    #[tokio::test]
    async fn test_name_lookup_failure_falls_back_to_codes() {
        let fake = FakeTransport::new()
            .reply("/api/stats/aggregate/code", 200, r#"{"718-7": 3}"#)
            .fail("/api/loinc-codes/names", "timeout");
        let (renderer, surface, notifier) = renderer(fake);

        let outcome = renderer.render_aggregate("chart1", "code").await;

        assert_eq!(outcome, RenderOutcome::Drawn);
        assert_eq!(surface.last_config("chart1").unwrap().data.labels, vec!["718-7"]);
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_slow_older_response_is_discarded() {
        let fake = FakeTransport::new()
            .reply("/api/stats/aggregate/gender", 200, r#"{"M": 1, "F": 2}"#)
            .delay("/api/stats/aggregate/gender", 5)
            .reply("/api/stats/aggregate/status", 200, r#"{"Concluso": 4}"#);
        let (renderer, surface, _) = renderer(fake);

        let (older, newer) = tokio::join!(
            renderer.render_aggregate("chart1", "gender"),
            renderer.render_aggregate("chart1", "status"),
        );

        assert_eq!(older, RenderOutcome::Superseded);
        assert_eq!(newer, RenderOutcome::Drawn);
        assert_eq!(surface.configs().len(), 1);
        assert_eq!(surface.last_config("chart1").unwrap().data.labels, vec!["Concluso"]);
    }

    #[tokio::test]
    async fn test_missing_canvas_is_reported() {
        let fake = FakeTransport::new().reply("/api/stats/aggregate/status", 200, r#"{"Concluso": 4}"#);
        let (renderer, _, notifier) = renderer(fake);

        let outcome = renderer.render_aggregate("missing", "status").await;

        assert_eq!(outcome, RenderOutcome::Failed);
        assert!(!renderer.is_bound("missing"));
        assert_eq!(notifier.toasts().len(), 1);
    }

    #[tokio::test]
    async fn test_incidence_requests_inclusive_window() {
        let fake = FakeTransport::new().reply(
            "/dashboard/conditions/daily-incidence",
            200,
            r#"[{"date": "2026-10-10", "value": 1}, {"date": "2026-10-16", "value": 0}]"#,
        );
        let (renderer, surface, _) = renderer(fake);

        let outcome = renderer.render_incidence("incidenceChart", 7, today()).await;

        assert_eq!(outcome, RenderOutcome::Drawn);
        assert_eq!(
            renderer.client().transport().requests(),
            vec!["/dashboard/conditions/daily-incidence?start=2026-10-10&end=2026-10-16&condition=U07.1"]
        );
        let config = surface.last_config("incidenceChart").unwrap();
        assert_eq!(config.kind, ChartKind::Line);
        assert_eq!(config.data.labels, vec!["2026-10-10", "2026-10-16"]);
    }

    #[tokio::test]
    async fn test_oversized_incidence_window_notifies_without_fetch() {
        let (renderer, surface, notifier) = renderer(FakeTransport::new());

        let outcome = renderer
            .render_incidence("incidenceChart", 200_000_000, today())
            .await;

        assert_eq!(outcome, RenderOutcome::Failed);
        assert!(renderer.client().transport().requests().is_empty());
        assert!(surface.events().is_empty());
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
    }

    #[tokio::test]
    async fn test_provinces_use_placeholder_for_missing_names() {
        let fake = FakeTransport::new().reply(
            "/dashboard/patients/by-province",
            200,
            r#"[{"province": "Sassari", "value": 4}, {"province": null, "value": 2}]"#,
        );
        let (renderer, surface, _) = renderer(fake);

        renderer.render_provinces("provinceChart").await;

        let config = surface.last_config("provinceChart").unwrap();
        assert_eq!(config.data.labels, vec!["Sassari", "-"]);
        assert_eq!(config.options.index_axis, Some("y"));
    }

    #[tokio::test]
    async fn test_empty_comparison_inputs_auto_fill_and_fetch_once() {
        let fake = FakeTransport::new().reply(
            "/dashboard/conditions/incidence-period",
            200,
            r#"[{"period": "Periodo 1", "value": 4}, {"period": "Periodo 2", "value": 6}]"#,
        );
        let (renderer, surface, _) = renderer(fake);

        let result = renderer
            .render_comparison("comparisonChart", &PeriodInputs::default(), today())
            .await;

        assert_eq!(result.outcome, RenderOutcome::Drawn);
        assert_eq!(result.inputs, Some(PeriodInputs::defaults(today()).unwrap()));
        assert_eq!(
            renderer.client().transport().requests(),
            vec!["/dashboard/conditions/incidence-period?start1=2026-10-02&end1=2026-10-09&start2=2026-10-09&end2=2026-10-16&condition=U07.1"]
        );
        let config = surface.last_config("comparisonChart").unwrap();
        assert_eq!(
            config.data.labels,
            vec!["2026-10-02 → 2026-10-09", "2026-10-09 → 2026-10-16"]
        );
        assert_eq!(config.data.datasets[0].data, vec![4, 6]);
    }

    #[tokio::test]
    async fn test_partial_comparison_inputs_do_nothing() {
        let (renderer, surface, notifier) = renderer(FakeTransport::new());
        let inputs = PeriodInputs {
            start1: "2026-10-01".to_string(),
            ..PeriodInputs::default()
        };

        let result = renderer.render_comparison("comparisonChart", &inputs, today()).await;

        assert_eq!(result.outcome, RenderOutcome::Skipped);
        assert!(renderer.client().transport().requests().is_empty());
        assert!(surface.events().is_empty());
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_inverted_comparison_notifies_without_fetch() {
        let (renderer, surface, notifier) = renderer(FakeTransport::new());
        let inputs = PeriodInputs {
            start1: "2026-10-09".to_string(),
            end1: "2026-10-02".to_string(),
            start2: "2026-10-09".to_string(),
            end2: "2026-10-16".to_string(),
        };

        let result = renderer.render_comparison("comparisonChart", &inputs, today()).await;

        assert_eq!(result.outcome, RenderOutcome::Failed);
        assert_eq!(result.inputs, None);
        assert!(renderer.client().transport().requests().is_empty());
        assert!(surface.events().is_empty());
        let toasts = notifier.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert!(toasts[0].text.contains("2026-10-09"));
    }

    #[tokio::test]
    async fn test_kpi_failure_notifies_and_returns_none() {
        let fake = FakeTransport::new().fail("/api/stats", "offline");
        let (renderer, _, notifier) = renderer(fake);

        assert_eq!(renderer.load_kpis().await, None);
        assert_eq!(notifier.toasts().len(), 1);
    }

    #[tokio::test]
    async fn test_table_listing() {
        let fake = FakeTransport::new().reply(
            "/test/data/encounters",
            200,
            r#"[{"identifier": [{"value": "enc-1"}], "status": "finished", "class": {"code": "AMB"}}]"#,
        );
        let (renderer, _, _) = renderer(fake);

        let table = renderer.load_table(ResourceKind::Encounter).await.unwrap();
        assert_eq!(table.rows[0][0], "enc-1");
        assert_eq!(table.rows[0][2], "AMB");
        assert_eq!(table.rows[0][5], "-");
    }
}
