//! Host Bus Client
//!
//! An HTTP client for the panel host, covering device lookup, the command
//! stream long-poll, and outbound event publication.

use crate::consts::cli_consts::{command_stream, http};
use crate::host::HostBus;
use crate::host::error::HostError;
use crate::host::protocol::{CommandBatch, DeviceRecord, PanelEvent};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

// User-Agent string with client version
const USER_AGENT: &str = concat!("tiledeck/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HostClient {
    client: Client,
    base_url: String,
}

impl HostClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(Duration::from_secs(http::CONNECT_TIMEOUT_SECS))
                .timeout(Duration::from_secs(http::REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url,
        }
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, HostError> {
        serde_json::from_slice(bytes).map_err(HostError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, HostError> {
        if !response.status().is_success() {
            return Err(HostError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, HostError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }

    async fn post_request_no_response<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<(), HostError> {
        let url = self.build_url(endpoint);
        let response = self
            .client
            .post(&url)
            .header("User-Agent", USER_AGENT)
            .json(body)
            .send()
            .await?;

        Self::handle_response_status(response).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl HostBus for HostClient {
    /// Resolve a device id to its stable connection identifier.
    async fn lookup_device(&self, device_id: &str) -> Result<DeviceRecord, HostError> {
        let endpoint = format!("v1/devices/{}", device_id);
        self.get_request(&endpoint).await
    }

    /// Long-poll the next batch of panel commands past `cursor`.
    async fn poll_commands(
        &self,
        connection_id: &str,
        cursor: u64,
    ) -> Result<CommandBatch, HostError> {
        let endpoint = format!(
            "v1/panels/{}/commands?cursor={}&wait={}",
            connection_id,
            cursor,
            command_stream::LONG_POLL_WAIT_SECS
        );
        self.get_request(&endpoint).await
    }

    /// Publish an outbound panel event envelope.
    async fn publish_event(&self, event: &PanelEvent) -> Result<(), HostError> {
        let endpoint = format!("v1/panels/{}/events", event.connection_id);
        self.post_request_no_response(&endpoint, event).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Should join base URLs and endpoints without duplicate slashes.
    fn test_build_url() {
        let client = HostClient::new("http://host.local:8093/".to_string());
        assert_eq!(
            client.build_url("/v1/devices/abc"),
            "http://host.local:8093/v1/devices/abc"
        );
    }
}
