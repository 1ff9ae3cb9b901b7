//! HTTP gateway client: GET the expanded URL, or POST `{data, sender}` when
//! the template has no `{data}` placeholder.

use crate::ports::outbound::{GatewayError, GatewayMethod, GatewayRequest, OffchainGateway};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct PostBody {
    data: Bytes,
    sender: Address,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    data: Bytes,
}

pub struct HttpGateway {
    client: reqwest::Client,
}

impl HttpGateway {
    /// `timeout` bounds the whole exchange; the service applies its own
    /// per-URL budget on top.
    pub fn new(timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl OffchainGateway for HttpGateway {
    async fn fetch(&self, request: &GatewayRequest) -> Result<Bytes, GatewayError> {
        debug!(url = %request.url, method = ?request.method, "Gateway request");
        let builder = match request.method {
            GatewayMethod::Get => self.client.get(&request.url),
            GatewayMethod::Post => self.client.post(&request.url).json(&PostBody {
                data: request.call_data.clone(),
                sender: request.sender,
            }),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        parse_body(&text)
    }
}

fn parse_body(text: &str) -> Result<Bytes, GatewayError> {
    serde_json::from_str::<GatewayResponse>(text)
        .map(|r| r.data)
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}
