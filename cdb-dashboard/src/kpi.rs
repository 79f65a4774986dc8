use cdb_api::models::KpiSummary;
use cdb_utils::format::format_count;

/// The four KPI display slots of the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KpiSlot {
    Patients,
    Encounters,
    Observations,
    Conditions,
}

impl KpiSlot {
    pub const ALL: [KpiSlot; 4] = [
        KpiSlot::Patients,
        KpiSlot::Encounters,
        KpiSlot::Observations,
        KpiSlot::Conditions,
    ];

    /// Element id the page markup binds this slot to.
    pub fn dom_id(&self) -> &'static str {
        match self {
            KpiSlot::Patients => "kpiPatients",
            KpiSlot::Encounters => "kpiIncontri",
            KpiSlot::Observations => "kpiParametri",
            KpiSlot::Conditions => "kpiCondizioni",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            KpiSlot::Patients => "Pazienti",
            KpiSlot::Encounters => "Incontri",
            KpiSlot::Observations => "Parametri",
            KpiSlot::Conditions => "Condizioni",
        }
    }

    pub fn value(&self, summary: &KpiSummary) -> u64 {
        match self {
            KpiSlot::Patients => summary.patients,
            KpiSlot::Encounters => summary.encounters,
            KpiSlot::Observations => summary.observations,
            KpiSlot::Conditions => summary.conditions,
        }
    }

    pub fn text(&self, summary: &KpiSummary, separator: char) -> String {
        format_count(self.value(summary), separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_text_is_localized() {
        let summary = KpiSummary {
            patients: 12500,
            encounters: 3,
            observations: 1_048_576,
            conditions: 0,
        };
        let texts: Vec<String> = KpiSlot::ALL
            .iter()
            .map(|slot| slot.text(&summary, '.'))
            .collect();
        assert_eq!(texts, vec!["12.500", "3", "1.048.576", "0"]);
    }

    #[test]
    fn test_slot_ids_match_page_markup() {
        let ids: Vec<&str> = KpiSlot::ALL.iter().map(KpiSlot::dom_id).collect();
        assert_eq!(ids, vec!["kpiPatients", "kpiIncontri", "kpiParametri", "kpiCondizioni"]);
    }
}
