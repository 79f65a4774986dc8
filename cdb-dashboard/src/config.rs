use serde::{Deserialize, Serialize};

/// Runtime settings shared by the browser apps and the CLI.
///
/// Every field has a default, so a partial JSON object (for example a
/// `window.CDB_CONFIG` set by the page) only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Prefix for every backend URL; empty means same origin.
    pub api_base: String,
    /// Condition code tracked by the incidence and comparison charts.
    pub condition_code: String,
    /// Initial daily-incidence window, in days.
    pub incidence_days: u32,
    /// Windows offered in the incidence selector.
    pub incidence_day_choices: Vec<u32>,
    /// Upload errors listed before truncating.
    pub error_list_limit: usize,
    pub success_toast_ms: u32,
    pub thousands_separator: char,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            condition_code: "U07.1".to_string(),
            incidence_days: 30,
            incidence_day_choices: vec![7, 14, 30, 90],
            error_list_limit: 15,
            success_toast_ms: 3500,
            thousands_separator: '.',
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
