//! Scripted off-chain gateway, keyed by URL template.

use crate::ports::outbound::{GatewayError, GatewayRequest, OffchainGateway};
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use shared_types::Bytes;
use std::collections::HashMap;

/// What a scripted route does when fetched.
#[derive(Debug, Clone)]
pub enum GatewayBehavior {
    Respond(Bytes),
    Fail(GatewayError),
    /// Never answers; exercises the caller's timeout
    Hang,
}

/// In-memory gateway. Unrouted templates fail with a transport error.
#[derive(Default)]
pub struct InMemoryGateway {
    routes: RwLock<HashMap<String, GatewayBehavior>>,
    requests: Mutex<Vec<GatewayRequest>>,
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, template: &str, behavior: GatewayBehavior) {
        self.routes.write().insert(template.to_owned(), behavior);
    }

    /// Requests seen so far, in arrival order.
    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl OffchainGateway for InMemoryGateway {
    async fn fetch(&self, request: &GatewayRequest) -> Result<Bytes, GatewayError> {
        self.requests.lock().push(request.clone());
        let behavior = self.routes.read().get(&request.template).cloned();
        match behavior {
            Some(GatewayBehavior::Respond(body)) => Ok(body),
            Some(GatewayBehavior::Fail(err)) => Err(err),
            Some(GatewayBehavior::Hang) => futures::future::pending().await,
            None => Err(GatewayError::Transport(format!(
                "no route for {}",
                request.template
            ))),
        }
    }
}
