use crate::domain::model::PeriodTable;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Retrieves the raw HTML of a page. Retries and connection handling live behind this seam.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String>;
}

pub trait SourceProvider: Send + Sync {
    fn sala_url_template(&self) -> &str;
    fn sala_detail_url_template(&self) -> &str;
    fn comisiones_url_template(&self) -> &str;
    fn periods(&self) -> &PeriodTable;
}
