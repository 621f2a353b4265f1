use super::types::AnimationRequest;
use crate::config::Config;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LottieError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("LottieFiles API responded with status: {status}")]
    UpstreamStatus { status: u16, body: String },
}

pub struct LottieClient {
    client: Client,
    config: Config,
}

impl LottieClient {
    pub fn new(config: Config) -> Result<Self, LottieError> {
        let client = Client::builder()
            .user_agent(concat!("lottie-proxy/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn fetch(&self, request: &AnimationRequest) -> Result<Value, LottieError> {
        let url = self.endpoint_for(request);
        tracing::debug!("Fetching {} listing from {}", request.kind(), url);
        self.get_json(&url).await
    }

    /// Percent-encodes with `encodeURIComponent` rules, so spaces become `%20`.
    pub fn endpoint_for(&self, request: &AnimationRequest) -> String {
        let base = self.config.lottie_api_url.trim_end_matches('/');
        match request {
            AnimationRequest::Search { query, kind } => format!(
                "{}/search?q={}&type={}",
                base,
                urlencoding::encode(query),
                urlencoding::encode(kind)
            ),
            AnimationRequest::Popular { kind } => match &self.config.lottie_popular_url {
                Some(featured_url) => featured_url.clone(),
                None => format!("{}/popular?type={}", base, urlencoding::encode(kind)),
            },
        }
    }

    /// The featured resource ignores `type`, so every popular request shares one entry.
    pub fn cache_key(&self, request: &AnimationRequest) -> String {
        match request {
            AnimationRequest::Popular { .. } if self.config.lottie_popular_url.is_some() => {
                "popular".to_string()
            }
            _ => request.cache_key(),
        }
    }

    async fn get_json(&self, url: &str) -> Result<Value, LottieError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LottieError::UpstreamStatus { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(popular_url: Option<&str>) -> Config {
        Config {
            lottie_api_url: "https://lottiefiles.com/api/v2/".to_string(),
            lottie_popular_url: popular_url.map(str::to_string),
            cache_ttl_secs: 3600,
            cache_max_entries: 100,
            request_timeout_secs: 5,
            bind_addr: "127.0.0.1:0".to_string(),
        }
    }

    #[test]
    fn test_search_endpoint_encodes_query() {
        let client = LottieClient::new(config(None)).unwrap();
        let request = AnimationRequest::Search {
            query: "happy robot & co/2".to_string(),
            kind: "animation".to_string(),
        };

        assert_eq!(
            client.endpoint_for(&request),
            "https://lottiefiles.com/api/v2/search?q=happy%20robot%20%26%20co%2F2&type=animation"
        );
    }

    #[test]
    fn test_popular_endpoint_uses_base_by_default() {
        let client = LottieClient::new(config(None)).unwrap();
        let request = AnimationRequest::Popular { kind: "sticker".to_string() };

        assert_eq!(
            client.endpoint_for(&request),
            "https://lottiefiles.com/api/v2/popular?type=sticker"
        );
    }

    #[test]
    fn test_popular_endpoint_prefers_featured_resource() {
        let client =
            LottieClient::new(config(Some("https://cdn.example.com/featured.json"))).unwrap();
        let request = AnimationRequest::Popular { kind: "animation".to_string() };

        assert_eq!(client.endpoint_for(&request), "https://cdn.example.com/featured.json");
    }

    #[test]
    fn test_cache_key_shares_featured_resource_across_types() {
        let featured =
            LottieClient::new(config(Some("https://cdn.example.com/featured.json"))).unwrap();
        let endpoint = LottieClient::new(config(None)).unwrap();
        let sticker = AnimationRequest::Popular { kind: "sticker".to_string() };
        let search = AnimationRequest::Search {
            query: "robot".to_string(),
            kind: "sticker".to_string(),
        };

        assert_eq!(featured.cache_key(&sticker), "popular");
        assert_eq!(featured.cache_key(&search), "search:sticker:robot");
        assert_eq!(endpoint.cache_key(&sticker), "popular:sticker");
    }

    #[test]
    fn test_upstream_status_message_mentions_code() {
        let err = LottieError::UpstreamStatus { status: 503, body: "down".to_string() };
        assert_eq!(err.to_string(), "LottieFiles API responded with status: 503");
    }
}
