//! Reusable Dioxus RSX components for the dashboard apps.

mod chart_canvas;
mod chart_header;
mod check_panel;
mod error_display;
mod field_selector;
mod kpi_cards;
mod loading_spinner;
mod period_picker;
mod resource_table;
mod upload_form;
mod window_selector;

pub use chart_canvas::ChartCanvas;
pub use chart_header::ChartHeader;
pub use check_panel::CheckPanel;
pub use error_display::ErrorDisplay;
pub use field_selector::FieldSelector;
pub use kpi_cards::KpiCards;
pub use loading_spinner::LoadingSpinner;
pub use period_picker::PeriodPicker;
pub use resource_table::ResourceTableView;
pub use upload_form::UploadForm;
pub use window_selector::WindowSelector;
