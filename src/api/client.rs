use super::models::*;
use crate::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DnsApiClient {
    /// All zones visible to the account, first page of up to 1000.
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    async fn list_dns_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>>;

    async fn create_dns_record(
        &self,
        zone_id: &str,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> Result<()>;

    /// `record.id` and `record.zone_id` must be set.
    async fn update_dns_record(&self, record: &DnsRecord) -> Result<()>;

    /// `record.id` and `record.zone_id` must be set.
    async fn delete_dns_record(&self, record: &DnsRecord) -> Result<()>;
}
