use crate::config::SourceConfig;
use crate::fetcher::traits::PriceSource;
use crate::model::{FetchError, FetchRequest};
use crate::utils::date_to_timestamp;
use chrono::Duration;
use reqwest::{Client, Url};
use std::time::Duration as StdDuration;
use tracing::{debug, warn};

/// Daily bars from the Yahoo Finance chart endpoint.
pub struct YahooSource {
    client: Client,
    base_url: String,
}

impl YahooSource {
    pub fn new(cfg: &SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(&cfg.user_agent)
            .timeout(StdDuration::from_secs(cfg.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.clone(),
        })
    }

    /// The request end date is inclusive, so period2 points at the following midnight.
    fn build_url(&self, req: &FetchRequest) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| FetchError::Http(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Http(format!("unusable base url: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", req.symbol.as_str()]);

        let period1 = date_to_timestamp(req.start);
        let period2 = date_to_timestamp(req.end + Duration::days(1));
        url.query_pairs_mut()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", "1d")
            .append_pair("includePrePost", "false");

        Ok(url)
    }
}

#[async_trait::async_trait]
impl PriceSource for YahooSource {
    async fn fetch(&self, req: &FetchRequest) -> Result<String, FetchError> {
        let url = self.build_url(req)?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{}: provider responded [{}]", req.symbol, status);
            return Err(FetchError::InvalidResponse(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
