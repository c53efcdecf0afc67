use crate::config::AppConfig;
use crate::model::FetchError;
use crate::scraper::traits::PageFetcher;

use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fetches the vendor's compatibility search page over HTTP.
pub struct VendorFetcher {
    client: Client,
    url: String,
    timeout_seconds: u64,
}

impl VendorFetcher {
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: config.vendor_url.clone(),
            timeout_seconds: config.timeout_seconds,
        })
    }

    fn build_request(&self, query: Option<&str>) -> RequestBuilder {
        match query.filter(|q| !q.is_empty()) {
            // .form() sets Content-Type: application/x-www-form-urlencoded
            Some(q) => self.client.post(&self.url).form(&[("model", q)]),
            None => self.client.get(&self.url),
        }
    }

    fn map_error(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout {
                url: self.url.clone(),
                seconds: self.timeout_seconds,
            }
        } else {
            FetchError::Http(e.to_string())
        }
    }
}

#[async_trait::async_trait]
impl PageFetcher for VendorFetcher {
    async fn fetch(&self, query: Option<&str>) -> Result<String, FetchError> {
        let request = self.build_request(query);
        debug!("Fetching {} (query: {:?})", self.url, query);

        let response = request.send().await.map_err(|e| {
            warn!("Fetch of {} failed: {}", self.url, e);
            self.map_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Vendor responded [{}] for {}", status, self.url);
            return Err(FetchError::InvalidResponse {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;
        info!("Fetched {} bytes from {} [{}]", body.len(), self.url, status);
        Ok(body)
    }
}
