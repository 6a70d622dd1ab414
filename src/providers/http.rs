use super::source::{GeocodeQuery, MapProvider, SearchQuery};
use crate::core::config::ProviderConfig;
use crate::rendering::RenderRequest;
use crate::{MapError, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Shared blocking HTTP client. Building it once avoids the cost of TLS and
/// connection pool setup for every request.
static HTTP_CLIENT: OnceCell<Client> = OnceCell::new();

fn http_client() -> Result<&'static Client> {
    HTTP_CLIENT.get_or_try_init(|| {
        Client::builder()
            .user_agent(concat!("mapview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(MapError::from)
    })
}

/// [`MapProvider`] talking to the configured HTTP endpoints
#[derive(Debug, Clone)]
pub struct HttpProvider {
    config: ProviderConfig,
}

impl HttpProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn get(&self, url: &str, params: &[(&str, String)]) -> Result<Response> {
        log::debug!("GET {} {:?}", url, params);
        let response = http_client()?
            .get(url)
            .query(params)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(MapError::Provider(format!("{} returned HTTP {}", url, status)));
        }
        Ok(response)
    }

    fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<serde_json::Value> {
        let body = self.get(url, params)?.json::<serde_json::Value>()?;
        Ok(body)
    }
}

impl Default for HttpProvider {
    fn default() -> Self {
        Self::new(ProviderConfig::default())
    }
}

impl MapProvider for HttpProvider {
    fn fetch_image(&self, request: &RenderRequest) -> Result<Vec<u8>> {
        let bytes = self
            .get(&self.config.static_map_url, &request.query_params())?
            .bytes()?;
        log::info!("downloaded map image ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }

    fn search(&self, query: &SearchQuery) -> Result<serde_json::Value> {
        let mut params = vec![
            ("text", query.text.clone()),
            ("lang", query.language.clone()),
            ("results", query.results.to_string()),
        ];
        if let Some(key) = &self.config.search_api_key {
            params.push(("apikey", key.clone()));
        }
        self.get_json(&self.config.search_url, &params)
    }

    fn geocode(&self, query: &GeocodeQuery) -> Result<serde_json::Value> {
        let mut params = vec![
            ("geocode", query.geocode.clone()),
            ("format", "json".to_string()),
        ];
        if let Some(key) = &self.config.geocoder_api_key {
            params.push(("apikey", key.clone()));
        }
        self.get_json(&self.config.geocoder_url, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_provider_is_an_error() {
        let provider = HttpProvider::new(ProviderConfig {
            geocoder_url: "http://127.0.0.1:9/".to_string(),
            timeout_secs: 1,
            ..ProviderConfig::default()
        });

        let result = provider.geocode(&GeocodeQuery::address("Moscow"));
        assert!(matches!(result, Err(MapError::Network(_))));
    }
}
