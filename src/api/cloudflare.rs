use super::{client::DnsApiClient, models::*};
use crate::error::{Error, Result};
use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Largest page the API hands out; anything beyond it is not fetched.
const PAGE_SIZE: u32 = 1000;

/// Client for the Cloudflare v4 API, authenticated with an account email
/// and global API key.
#[derive(Debug, Clone)]
pub struct CloudflareClient {
    client: reqwest::Client,
    api_base: String,
    auth_email: String,
    auth_key: String,
}

#[async_trait]
impl DnsApiClient for CloudflareClient {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.get_list(&format!("/zones?per_page={}", PAGE_SIZE)).await
    }

    async fn list_dns_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.get_list(&format!(
            "/zones/{}/dns_records?per_page={}",
            zone_id, PAGE_SIZE
        ))
        .await
    }

    async fn create_dns_record(
        &self,
        zone_id: &str,
        name: &str,
        record_type: &str,
        content: &str,
    ) -> Result<()> {
        let record = DnsRecord::new(name, record_type, content);
        let response = self
            .request(Method::POST, &format!("/zones/{}/dns_records", zone_id))
            .json(&record)
            .send()
            .await?;

        Self::expect_ok(response).await
    }

    async fn update_dns_record(&self, record: &DnsRecord) -> Result<()> {
        let response = self
            .request(Method::PUT, &Self::record_path(record))
            .json(record)
            .send()
            .await?;

        Self::expect_ok(response).await
    }

    async fn delete_dns_record(&self, record: &DnsRecord) -> Result<()> {
        let response = self
            .request(Method::DELETE, &Self::record_path(record))
            .send()
            .await?;

        Self::expect_ok(response).await
    }
}

impl CloudflareClient {
    pub fn new(auth_email: impl Into<String>, auth_key: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), auth_email, auth_key)
    }

    /// Use a preconfigured transport (proxy, timeouts, TLS settings).
    pub fn with_http_client(
        client: reqwest::Client,
        auth_email: impl Into<String>,
        auth_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: API_BASE_URL.to_string(),
            auth_email: auth_email.into(),
            auth_key: auth_key.into(),
        }
    }

    /// Point the client at another endpoint, e.g. a mock server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn record_path(record: &DnsRecord) -> String {
        format!("/zones/{}/dns_records/{}", record.zone_id, record.id)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .header("X-Auth-Email", &self.auth_email)
            .header("X-Auth-Key", &self.auth_key)
    }

    // The status is not checked here; whatever comes back is decoded.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let response = self.request(Method::GET, path).send().await?;
        debug!("Response status: {}", response.status());

        let body = response.bytes().await?;
        let parsed = ApiResponse::<T>::from_slice(&body)?;

        if !parsed.success {
            warn!("API reported failure for {}: {:?}", path, parsed.errors);
        }

        Ok(parsed.result)
    }

    async fn expect_ok(response: Response) -> Result<()> {
        let status = response.status();
        debug!("Response status: {}", status);

        let error = (status != StatusCode::OK).then(|| {
            let reason = response.extensions().get::<ReasonPhrase>();
            Error::from_status(status, reason.map(ReasonPhrase::as_bytes))
        });

        // Drain the body so the connection goes back to the pool.
        match response.text().await {
            Ok(text) => debug!("Response body: {}", text),
            Err(e) => debug!("Discarding unreadable response body: {}", e),
        }

        match error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

