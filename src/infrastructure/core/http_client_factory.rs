use anyhow::{Context, Result};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;
use url::Url;

/// Timeouts and retry budget for outbound HTTP.
#[derive(Debug, Clone, Copy)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub max_retries: u32,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_retries: 3,
        }
    }
}

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Client for exchange polling: transient failures (5xx, 429, connect
    /// errors) are retried with exponential backoff.
    pub fn create_client(settings: HttpSettings) -> ClientWithMiddleware {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(settings.max_retries);

        ClientBuilder::new(Self::create_plain_client(settings))
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }

    /// Client without retries, for fire-and-forget calls.
    pub fn create_plain_client(settings: HttpSettings) -> Client {
        Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(settings.timeout)
            .connect_timeout(settings.timeout.min(Duration::from_secs(10)))
            .build()
            .unwrap_or_else(|_| Client::new())
    }
}

/// Appends percent-encoded query parameters to `base_url`.
///
/// reqwest-middleware's builder has no `.query()`, so the URL is assembled
/// up front.
pub fn build_url_with_query<K, V>(base_url: &str, params: &[(K, V)]) -> Result<String>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = Url::parse(base_url).with_context(|| format!("Invalid URL: {}", base_url))?;
    if !params.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    }
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_appends_params() {
        let url = build_url_with_query(
            "https://contract.mexc.com/api/v1/contract/kline/BTC_USDT",
            &[("interval", "Day1"), ("limit", "300")],
        )
        .unwrap();
        assert_eq!(
            url,
            "https://contract.mexc.com/api/v1/contract/kline/BTC_USDT?interval=Day1&limit=300"
        );
    }

    #[test]
    fn test_build_url_encodes_values() {
        let url = build_url_with_query("https://example.com/x", &[("q", "a b&c")]).unwrap();
        assert_eq!(url, "https://example.com/x?q=a+b%26c");
    }

    #[test]
    fn test_build_url_without_params() {
        let params: [(&str, &str); 0] = [];
        let url = build_url_with_query("https://example.com/x", &params).unwrap();
        assert_eq!(url, "https://example.com/x");
    }

    #[test]
    fn test_build_url_rejects_garbage() {
        assert!(build_url_with_query("not a url", &[("a", "b")]).is_err());
    }
}
