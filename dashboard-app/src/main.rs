//! Clinical Data Dashboard
//!
//! KPI cards, two aggregate distribution charts, the daily incidence of the
//! tracked condition, patients per province, a two-period comparison and a
//! raw resource table. Everything is fetched from the backend API and drawn
//! with Chart.js.
//!
//! Data flow:
//! 1. On mount: load the glue scripts, wait for Chart.js, fetch the KPIs.
//! 2. Each chart has its own effect keyed on its inputs; a changed selection
//!    re-fetches and redraws only that chart.
//! 3. The comparison runs once on load (auto-filling the last two weeks) and
//!    again whenever the compare button is pressed.

use cdb_dashboard::DashboardConfig;
use cdb_ui::components::{
    ChartCanvas, ChartHeader, ErrorDisplay, FieldSelector, KpiCards, LoadingSpinner,
    PeriodPicker, ResourceTableView, WindowSelector,
};
use cdb_ui::js_bridge;
use cdb_ui::state::{load_config, web_renderer, AppState, WebRenderer};
use cdb_utils::dates::today;
use dioxus::prelude::*;
use log::info;
use std::rc::Rc;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";
const DATE_ADAPTER_URL: &str =
    "https://cdn.jsdelivr.net/npm/chartjs-adapter-date-fns@3.0.0/dist/chartjs-adapter-date-fns.bundle.min.js";
const TOASTIFY_JS_URL: &str = "https://cdn.jsdelivr.net/npm/toastify-js@1.12.0/src/toastify.min.js";
const TOASTIFY_CSS_URL: &str = "https://cdn.jsdelivr.net/npm/toastify-js@1.12.0/src/toastify.min.css";

const CHART1: &str = "chart1";
const CHART2: &str = "chart2";
const INCIDENCE_CHART: &str = "incidenceChart";
const PROVINCE_CHART: &str = "provinceChart";
const COMPARISON_CHART: &str = "comparisonChart";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("dashboard-root"))
        .launch(App);
}

/// Draw the comparison from the current inputs and write back auto-filled dates.
async fn compare_periods(renderer: Rc<WebRenderer>, mut state: AppState) {
    let inputs = state.periods.peek().clone();
    let result = renderer
        .render_comparison(COMPARISON_CHART, &inputs, today())
        .await;
    if let Some(used) = result.inputs {
        if used != inputs {
            state.periods.set(used);
        }
    }
}

#[component]
fn App() -> Element {
    let config: DashboardConfig = use_hook(load_config);
    let mut state = use_context_provider(|| AppState::new(&config));
    let renderer: Rc<WebRenderer> = use_context_provider(|| Rc::new(web_renderer(config.clone())));

    // ─── Effect 1: bridge scripts, Chart.js, KPIs ───
    let r = renderer.clone();
    use_effect(move || {
        let renderer = r.clone();
        spawn(async move {
            js_bridge::load_scripts();
            if let Err(e) = js_bridge::wait_for_global("Chart").await {
                state.error_msg.set(Some(format!("Chart.js non disponibile: {}", e)));
                return;
            }
            info!("Chart.js ready");
            state.ready.set(true);
            if let Some(summary) = renderer.load_kpis().await {
                state.kpis.set(Some(summary));
            }
        });
    });

    // ─── Effect 2: first aggregate chart ───
    let r = renderer.clone();
    use_effect(move || {
        let field = (state.field1)();
        if !(state.ready)() {
            return;
        }
        let renderer = r.clone();
        spawn(async move {
            renderer.render_aggregate(CHART1, &field).await;
        });
    });

    // ─── Effect 3: second aggregate chart ───
    let r = renderer.clone();
    use_effect(move || {
        let field = (state.field2)();
        if !(state.ready)() {
            return;
        }
        let renderer = r.clone();
        spawn(async move {
            renderer.render_aggregate(CHART2, &field).await;
        });
    });

    // ─── Effect 4: daily incidence ───
    let r = renderer.clone();
    use_effect(move || {
        let days = (state.incidence_days)();
        if !(state.ready)() {
            return;
        }
        let renderer = r.clone();
        spawn(async move {
            renderer.render_incidence(INCIDENCE_CHART, days, today()).await;
        });
    });

    // ─── Effect 5: provinces and the initial comparison ───
    let r = renderer.clone();
    use_effect(move || {
        if !(state.ready)() {
            return;
        }
        let renderer = r.clone();
        spawn(async move {
            renderer.render_provinces(PROVINCE_CHART).await;
            compare_periods(renderer, state).await;
        });
    });

    // ─── Effect 6: resource table ───
    let r = renderer.clone();
    use_effect(move || {
        let kind = (state.table_kind)();
        let renderer = r.clone();
        spawn(async move {
            let table = renderer.load_table(kind).await;
            if table.is_some() {
                state.table.set(table);
            }
        });
    });

    let r = renderer.clone();
    let on_compare = move |_| {
        spawn(compare_periods(r.clone(), state));
    };

    let loading = !(state.ready)();
    let condition = format!("Condizione {}", config.condition_code);

    // ─── Render ───
    rsx! {
        document::Script { src: CHART_JS_URL }
        document::Script { src: DATE_ADAPTER_URL }
        document::Script { src: TOASTIFY_JS_URL }
        document::Stylesheet { href: TOASTIFY_CSS_URL }

        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay {
                    message: err.clone(),
                    on_dismiss: move |_| state.error_msg.set(None),
                }
            }

            if loading {
                LoadingSpinner { message: "Caricamento di Chart.js...".to_string() }
            }

            KpiCards { separator: config.thousands_separator }

            div {
                style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px;",
                div {
                    ChartHeader { title: "Distribuzione".to_string() }
                    FieldSelector {
                        id: "aggregationField1".to_string(),
                        selected: (state.field1)(),
                        on_select: move |field: String| state.field1.set(field),
                    }
                    ChartCanvas { id: CHART1.to_string(), loading }
                }
                div {
                    ChartHeader { title: "Distribuzione".to_string() }
                    FieldSelector {
                        id: "aggregationField2".to_string(),
                        selected: (state.field2)(),
                        on_select: move |field: String| state.field2.set(field),
                    }
                    ChartCanvas { id: CHART2.to_string(), loading }
                }
            }

            ChartHeader {
                title: "Incidenza giornaliera".to_string(),
                subtitle: condition.clone(),
            }
            WindowSelector { choices: config.incidence_day_choices.clone() }
            ChartCanvas { id: INCIDENCE_CHART.to_string(), loading }

            ChartHeader { title: "Pazienti per provincia".to_string() }
            ChartCanvas { id: PROVINCE_CHART.to_string(), loading, height: 420 }

            ChartHeader {
                title: "Confronto tra periodi".to_string(),
                subtitle: condition,
            }
            PeriodPicker { on_compare }
            ChartCanvas { id: COMPARISON_CHART.to_string(), loading, height: 200 }

            ChartHeader { title: "Risorse".to_string() }
            ResourceTableView {}
        }
    }
}
