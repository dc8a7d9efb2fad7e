//! Webhook server for receiving WhatsApp messages

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::error::{Result, WhatsAppError};
use crate::handler::InteractionHandler;
use crate::response::OutboundMessage;
use crate::types::InboundMessage;

/// Webhook server state
#[derive(Clone)]
pub struct WebhookState {
    pub handler: Arc<InteractionHandler>,
}

/// Create webhook router
pub fn create_webhook_router(state: WebhookState) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Webhook server
pub struct WebhookServer {
    addr: SocketAddr,
    state: WebhookState,
}

impl WebhookServer {
    /// Create a new webhook server
    pub fn new(addr: SocketAddr, handler: Arc<InteractionHandler>) -> Self {
        Self {
            addr,
            state: WebhookState { handler },
        }
    }

    /// Start the webhook server
    pub async fn start(self) -> Result<()> {
        info!("Starting WhatsApp webhook server on {}", self.addr);

        let app = create_webhook_router(self.state);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| WhatsAppError::Config(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| WhatsAppError::Http(e.to_string()))?;

        Ok(())
    }
}

/// Handle incoming WhatsApp webhook
async fn handle_webhook(
    State(state): State<Arc<WebhookState>>,
    body: Bytes,
) -> Result<Json<OutboundMessage>> {
    let msg = parse_inbound(&body).inspect_err(|e| warn!("Rejected webhook payload: {}", e))?;

    let (Some(from), Some(message_type)) = (msg.from.as_deref(), msg.message_type.as_deref())
    else {
        let err = WhatsAppError::MalformedInput("`from` and `type` are required".to_string());
        warn!("Rejected webhook payload: {}", err);
        return Err(err);
    };

    info!("Received WhatsApp {} message from {}", message_type, from);

    match state.handler.handle(from, message_type, msg.text_body()).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            match &e {
                WhatsAppError::MalformedInput(_) => warn!("Rejected message from {}: {}", from, e),
                _ => error!("Error handling message from {}: {}", from, e),
            }
            Err(e)
        }
    }
}

fn parse_inbound(body: &[u8]) -> Result<InboundMessage> {
    serde_json::from_slice(body).map_err(|e| WhatsAppError::MalformedInput(e.to_string()))
}

/// Liveness probe
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
