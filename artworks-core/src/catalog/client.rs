use crate::config::CatalogConfig;
use crate::error::CatalogError;
use log::debug;
use std::sync::{Mutex, PoisonError};
use time::OffsetDateTime;
use tokio::time::Instant;

const ACCEPT: &str = "application/json";
const MAX_API_HISTORY: usize = 100;

#[derive(Debug, Clone)]
pub struct ApiCall {
    pub url: String,
    pub timestamp: OffsetDateTime,
    pub status_code: u16,
    pub success: bool,
}

/// HTTP client for the artwork catalog.
///
/// Requests from one client are spaced by `CatalogConfig::cooldown`; every
/// request (failed or not) lands in a bounded call history.
#[derive(Debug)]
pub struct ArticClient {
    client: reqwest::Client,
    config: CatalogConfig,
    // Blocking mutexes: only held to read or bump a value, never across an await
    last_call: Mutex<Option<Instant>>,
    history: Mutex<Vec<ApiCall>>,
}

impl ArticClient {
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        config.validate()?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_str(&config.user_agent)
                .map_err(|e| CatalogError::Config(format!("Invalid user agent: {}", e)))?,
        );
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static(ACCEPT),
        );

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(ArticClient {
            client,
            config,
            last_call: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    async fn wait_for_turn(&self) {
        let next_call = {
            let mut last = self.last_call.lock().unwrap_or_else(PoisonError::into_inner);
            let now = Instant::now();
            let next = match *last {
                Some(previous) => (previous + self.config.cooldown).max(now),
                None => now,
            };
            *last = Some(next);
            next
        };
        tokio::time::sleep_until(next_call).await;
    }

    /// GET `url` with `query`; a non-2xx answer is turned into `CatalogError::Status`.
    pub async fn call(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, CatalogError> {
        let request = self.client.get(url).query(query).build()?;
        let full_url = request.url().to_string();

        self.wait_for_turn().await;
        debug!("calling artwork catalog: {}", full_url);

        let timestamp = OffsetDateTime::now_utc();
        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                self.record_call(ApiCall {
                    url: full_url.clone(),
                    timestamp,
                    status_code: status.as_u16(),
                    success: status.is_success(),
                });

                if status.is_success() {
                    Ok(response)
                } else {
                    Err(CatalogError::Status {
                        url: full_url,
                        status: status.as_u16(),
                    })
                }
            }
            Err(e) => {
                self.record_call(ApiCall {
                    url: full_url,
                    timestamp,
                    status_code: 0, // no response received
                    success: false,
                });
                Err(CatalogError::Network(e))
            }
        }
    }

    fn record_call(&self, api_call: ApiCall) {
        if let Ok(mut history) = self.history.lock() {
            history.push(api_call);
            if history.len() > MAX_API_HISTORY {
                let excess = history.len() - MAX_API_HISTORY;
                history.drain(0..excess);
            }
        }
    }

    /// Get the API call history for debugging purposes
    pub fn call_history(&self) -> Vec<ApiCall> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }

    pub fn clear_call_history(&self) {
        if let Ok(mut history) = self.history.lock() {
            history.clear();
        }
    }
}
