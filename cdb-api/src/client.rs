//! Typed access to every backend endpoint the dashboard consumes.

use crate::endpoints::Endpoints;
use crate::error::{ApiError, Result};
use crate::models::{
    AggregatePayload, CheckKind, CheckReport, CodeDisplay, CodeNames, DailyIncidence, KpiSummary,
    PeriodComparison, ProvinceCount, ResourceKind, UploadResult, UploadTarget,
};
use crate::transport::{HttpReply, HttpTransport};
use cdb_utils::DateRange;
use log::debug;
use serde::de::DeserializeOwned;

pub struct ApiClient<T> {
    transport: T,
    endpoints: Endpoints,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, base: impl Into<String>) -> Self {
        Self {
            transport,
            endpoints: Endpoints::new(base),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url` and decode its JSON body.
    ///
    /// A non-success status fails with [`ApiError::Status`] carrying the
    /// status code and body text. No retries and no timeout.
    pub async fn fetch_json<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        debug!("GET {}", url);
        let reply = self.transport.get(url).await?;
        decode_reply(url, reply)
    }

    pub async fn stats(&self) -> Result<KpiSummary> {
        self.fetch_json(&self.endpoints.stats()).await
    }

    pub async fn aggregate(&self, field: &str) -> Result<AggregatePayload> {
        let url = self.endpoints.aggregate(field)?;
        self.fetch_json(&url).await
    }

    /// Display names for `codes`. An empty slice resolves without a request.
    pub async fn code_names(&self, codes: &[String]) -> Result<CodeNames> {
        if codes.is_empty() {
            return Ok(CodeNames::default());
        }
        let list: Vec<CodeDisplay> = self.fetch_json(&self.endpoints.code_names(codes)).await?;
        Ok(CodeNames::from(list))
    }

    pub async fn daily_incidence(
        &self,
        range: &DateRange,
        condition: &str,
    ) -> Result<Vec<DailyIncidence>> {
        self.fetch_json(&self.endpoints.daily_incidence(range, condition))
            .await
    }

    pub async fn patients_by_province(&self) -> Result<Vec<ProvinceCount>> {
        self.fetch_json(&self.endpoints.patients_by_province()).await
    }

    /// Condition counts for two periods; the backend must answer with exactly two.
    pub async fn incidence_comparison(
        &self,
        first: &DateRange,
        second: &DateRange,
        condition: &str,
    ) -> Result<[PeriodComparison; 2]> {
        let url = self
            .endpoints
            .incidence_comparison(first, second, condition);
        let periods: Vec<PeriodComparison> = self.fetch_json(&url).await?;
        let count = periods.len();
        <[PeriodComparison; 2]>::try_from(periods).map_err(|_| ApiError::Shape {
            url,
            message: format!("expected two periods, got {}", count),
        })
    }

    pub async fn list_resources(&self, kind: ResourceKind) -> Result<Vec<serde_json::Value>> {
        let url = self.endpoints.resource_listing(kind)?;
        self.fetch_json(&url).await
    }

    pub async fn run_check(&self, kind: CheckKind) -> Result<CheckReport> {
        let url = self.endpoints.check(kind);
        let body: serde_json::Value = self.fetch_json(&url).await?;
        let count = body
            .get(kind.count_field())
            .and_then(serde_json::Value::as_u64)
            .ok_or_else(|| ApiError::Shape {
                url: url.clone(),
                message: format!("missing or non-numeric '{}'", kind.count_field()),
            })?;
        let entries = body
            .get(kind.entries_field())
            .and_then(serde_json::Value::as_array)
            .cloned()
            .unwrap_or_default();
        Ok(CheckReport {
            kind,
            count,
            entries,
        })
    }

    pub async fn upload(&self, target: UploadTarget, form: T::Form) -> Result<UploadResult> {
        let url = self.endpoints.upload(target);
        debug!("POST {}", url);
        let reply = self.transport.post_form(&url, form).await?;
        decode_reply(&url, reply)
    }
}

fn decode_reply<R: DeserializeOwned>(url: &str, reply: HttpReply) -> Result<R> {
    if !reply.is_success() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: reply.status,
            body: reply.body,
        });
    }
    serde_json::from_str(&reply.body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeTransport;
    use chrono::NaiveDate;

    fn client(fake: FakeTransport) -> ApiClient<FakeTransport> {
        ApiClient::new(fake, "")
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_json_reports_status_and_body() {
        let fake = FakeTransport::new().reply("/api/stats", 503, "maintenance");
        let err = client(fake).stats().await.unwrap_err();
        match err {
            ApiError::Status { status, body, .. } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_decode_error() {
        let fake = FakeTransport::new().reply("/api/stats", 200, r#"{"patients": "many"}"#);
        let err = client(fake).stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let fake = FakeTransport::new().fail("/api/stats", "connection refused");
        let err = client(fake).stats().await.unwrap_err();
        assert_eq!(err.detail(), "connection refused");
    }

    #[tokio::test]
    async fn test_code_names_skips_request_for_no_codes() {
        let api = client(FakeTransport::new());
        let names = api.code_names(&[]).await.unwrap();
        assert!(names.0.is_empty());
        assert!(api.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_comparison_requires_two_periods() {
        let fake = FakeTransport::new().reply(
            "/dashboard/conditions/incidence-period",
            200,
            r#"[{"period": "Periodo 1", "value": 4}]"#,
        );
        let first = DateRange::new(day(2), day(9)).unwrap();
        let second = DateRange::new(day(9), day(16)).unwrap();
        let err = client(fake)
            .incidence_comparison(&first, &second, "U07.1")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Shape { .. }));
    }

    #[tokio::test]
    async fn test_run_check_uses_authoritative_counter() {
        let fake = FakeTransport::new().reply(
            "/api/test/observation-values",
            200,
            r#"{"sinvalid_count": 0, "invalid_count": 2, "invalid_entries": [{"id": "o1"}, {"id": "o2"}]}"#,
        );
        let report = client(fake)
            .run_check(CheckKind::ObservationValues)
            .await
            .unwrap();
        assert_eq!(report.count, 2);
        assert_eq!(report.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_run_check_missing_counter_is_shape_error() {
        let fake = FakeTransport::new().reply("/api/test/encounter-links", 200, r#"{"message": "ok"}"#);
        let err = client(fake)
            .run_check(CheckKind::EncounterLinks)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Shape { .. }));
    }

    #[tokio::test]
    async fn test_upload_rejection_carries_detail() {
        let fake = FakeTransport::new().reply(
            "/api/upload/encounter/csv",
            400,
            r#"{"detail": "Le intestazioni del file CSV non corrispondono alla risorsa Encounter."}"#,
        );
        let err = client(fake)
            .upload(UploadTarget::Csv(ResourceKind::Encounter), "encounters.csv".to_string())
            .await
            .unwrap_err();
        assert!(err.detail().starts_with("Le intestazioni"));
    }
}
