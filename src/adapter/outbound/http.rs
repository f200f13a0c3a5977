//! REST client for the bot server.
//!
//! Implements [`BotApi`] over `reqwest`. Each method sends exactly one
//! request; a non-2xx status and an undecodable body are errors.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::{BotConfig, StatusReport};
use crate::error::{ApiError, ConfigError, Result};
use crate::port::{BotApi, Endpoint, Method};

/// HTTP implementation of the bot server port.
#[derive(Debug, Clone)]
pub struct HttpBotApi {
    client: Client,
    base_url: Url,
}

impl HttpBotApi {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client that sends through an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("unsupported scheme '{}'", base_url.scheme()),
            }
            .into());
        }
        // Endpoint paths are joined relative to the base, so a base with a
        // path prefix must end in '/' to keep it.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    /// Server base URL, always ending in `/`.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of `endpoint`.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url> {
        Ok(self.base_url.join(endpoint.path().trim_start_matches('/'))?)
    }

    fn request(&self, endpoint: Endpoint) -> std::result::Result<RequestBuilder, ApiError> {
        let url = self
            .endpoint_url(endpoint)
            .map_err(|err| ApiError::Decode {
                endpoint,
                reason: format!("cannot build request URL: {err}"),
            })?;
        debug!(endpoint = %endpoint, url = %url, "Sending request");
        Ok(match endpoint.method() {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        })
    }

    async fn send<T: DeserializeOwned>(
        endpoint: Endpoint,
        request: RequestBuilder,
    ) -> std::result::Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|source| ApiError::Transport { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|err| ApiError::Decode {
            endpoint,
            reason: err.to_string(),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
    ) -> std::result::Result<T, ApiError> {
        let request = self.request(endpoint)?;
        Self::send(endpoint, request).await
    }
}

#[async_trait]
impl BotApi for HttpBotApi {
    async fn fetch_config(&self) -> std::result::Result<BotConfig, ApiError> {
        self.call(Endpoint::FetchConfig).await
    }

    async fn save_config(&self, config: &BotConfig) -> std::result::Result<Value, ApiError> {
        let request = self.request(Endpoint::SaveConfig)?.json(config);
        Self::send(Endpoint::SaveConfig, request).await
    }

    async fn start_bot(&self) -> std::result::Result<Value, ApiError> {
        self.call(Endpoint::StartBot).await
    }

    async fn stop_bot(&self) -> std::result::Result<Value, ApiError> {
        self.call(Endpoint::StopBot).await
    }

    async fn kill_bot(&self) -> std::result::Result<Value, ApiError> {
        self.call(Endpoint::KillBot).await
    }

    async fn fetch_status(&self) -> std::result::Result<StatusReport, ApiError> {
        self.call(Endpoint::Status).await
    }
}
