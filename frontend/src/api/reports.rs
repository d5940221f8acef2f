use reqwest::Method;

use super::{
    client::ApiClient,
    types::{ApiError, DailyReportItem, ReportKind},
};

impl ApiClient {
    pub async fn daily_report(&self) -> Result<Vec<DailyReportItem>, ApiError> {
        let builder = self.request(Method::GET, "/api/reportes/dia").await;
        self.send_json(builder).await
    }

    /// Raw PDF bytes of one of the printable reports.
    pub async fn report_pdf(&self, kind: ReportKind) -> Result<Vec<u8>, ApiError> {
        let builder = self.request(Method::GET, kind.path()).await;
        self.send_bytes(builder).await
    }
}
