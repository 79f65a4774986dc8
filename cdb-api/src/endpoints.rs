//! URL catalogue for the dashboard backend.

use crate::error::{ApiError, Result};
use crate::models::{CheckKind, ResourceKind, UploadTarget};
use cdb_utils::DateRange;
use url::form_urlencoded;

/// Builds request URLs against a base (empty for same-origin browser calls).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn url_with_query(&self, path: &str, pairs: &[(&str, &str)]) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        format!("{}{}?{}", self.base, path, query)
    }

    pub fn stats(&self) -> String {
        self.url("/api/stats")
    }

    pub fn aggregate(&self, field: &str) -> Result<String> {
        let valid = !field.is_empty()
            && field
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(ApiError::InvalidInput(format!(
                "aggregate field {:?} is not a plain identifier",
                field
            )));
        }
        Ok(self.url(&format!("/api/stats/aggregate/{}", field)))
    }

    pub fn code_names(&self, codes: &[String]) -> String {
        let joined = codes.join(",");
        self.url_with_query("/api/loinc-codes/names", &[("codes", &joined)])
    }

    pub fn daily_incidence(&self, range: &DateRange, condition: &str) -> String {
        let start = range.start_iso();
        let end = range.end_iso();
        self.url_with_query(
            "/dashboard/conditions/daily-incidence",
            &[("start", &start), ("end", &end), ("condition", condition)],
        )
    }

    pub fn patients_by_province(&self) -> String {
        self.url("/dashboard/patients/by-province")
    }

    pub fn incidence_comparison(
        &self,
        first: &DateRange,
        second: &DateRange,
        condition: &str,
    ) -> String {
        let (start1, end1) = (first.start_iso(), first.end_iso());
        let (start2, end2) = (second.start_iso(), second.end_iso());
        self.url_with_query(
            "/dashboard/conditions/incidence-period",
            &[
                ("start1", &start1),
                ("end1", &end1),
                ("start2", &start2),
                ("end2", &end2),
                ("condition", condition),
            ],
        )
    }

    pub fn resource_listing(&self, kind: ResourceKind) -> Result<String> {
        let segment = kind.listing_segment().ok_or_else(|| {
            ApiError::InvalidInput(format!("no raw listing exists for {} resources", kind))
        })?;
        Ok(self.url(&format!("/test/data/{}", segment)))
    }

    pub fn check(&self, kind: CheckKind) -> String {
        self.url(&format!("/api/test/{}", kind.path_segment()))
    }

    pub fn upload(&self, target: UploadTarget) -> String {
        match target {
            UploadTarget::Csv(kind) => self.url(&format!("/api/upload/{}/csv", kind.as_str())),
            UploadTarget::JsonBulk => self.url("/api/upload/json/bulk"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(a: (i32, u32, u32), b: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(a.0, a.1, a.2).unwrap(),
            NaiveDate::from_ymd_opt(b.0, b.1, b.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_base_trailing_slash_is_trimmed() {
        let endpoints = Endpoints::new("http://localhost:8000/");
        assert_eq!(endpoints.stats(), "http://localhost:8000/api/stats");
        assert_eq!(Endpoints::new("").stats(), "/api/stats");
    }

    #[test]
    fn test_aggregate_rejects_path_injection() {
        let endpoints = Endpoints::new("");
        assert_eq!(
            endpoints.aggregate("age_group").unwrap(),
            "/api/stats/aggregate/age_group"
        );
        assert!(endpoints.aggregate("../stats").is_err());
        assert!(endpoints.aggregate("").is_err());
    }

    #[test]
    fn test_incidence_query_parameters() {
        let endpoints = Endpoints::new("");
        let url = endpoints.daily_incidence(&range((2026, 10, 10), (2026, 10, 16)), "U07.1");
        assert_eq!(
            url,
            "/dashboard/conditions/daily-incidence?start=2026-10-10&end=2026-10-16&condition=U07.1"
        );
    }

    #[test]
    fn test_comparison_query_parameters() {
        let endpoints = Endpoints::new("");
        let url = endpoints.incidence_comparison(
            &range((2026, 10, 2), (2026, 10, 9)),
            &range((2026, 10, 9), (2026, 10, 16)),
            "U07.1",
        );
        assert_eq!(
            url,
            "/dashboard/conditions/incidence-period?start1=2026-10-02&end1=2026-10-09&start2=2026-10-09&end2=2026-10-16&condition=U07.1"
        );
    }

    #[test]
    fn test_code_names_joins_codes() {
        let endpoints = Endpoints::new("");
        let url = endpoints.code_names(&["718-7".to_string(), "2345-7".to_string()]);
        assert_eq!(url, "/api/loinc-codes/names?codes=718-7%2C2345-7");
    }

    #[test]
    fn test_upload_and_listing_paths() {
        let endpoints = Endpoints::new("");
        assert_eq!(
            endpoints.upload(UploadTarget::Csv(ResourceKind::Condition)),
            "/api/upload/condition/csv"
        );
        assert_eq!(endpoints.upload(UploadTarget::JsonBulk), "/api/upload/json/bulk");
        assert_eq!(
            endpoints.resource_listing(ResourceKind::Encounter).unwrap(),
            "/test/data/encounters"
        );
        assert!(endpoints.resource_listing(ResourceKind::Condition).is_err());
    }
}
