//! WhatsApp bot wrapper

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use faq_core::Config;

use crate::error::Result;
use crate::faq::FaqMatcher;
use crate::handler::InteractionHandler;
use crate::session::{RedisSessionStore, SessionStore};
use crate::webhook::WebhookServer;

/// WhatsApp bot wrapper
pub struct WhatsAppBot {
    handler: Arc<InteractionHandler>,
    port: u16,
}

impl WhatsAppBot {
    /// Create a new WhatsApp bot
    pub fn new(session_store: Arc<dyn SessionStore>, faq: Arc<FaqMatcher>, port: u16) -> Self {
        Self {
            handler: Arc::new(InteractionHandler::new(session_store, faq)),
            port,
        }
    }

    /// Create a bot backed by Redis with the built-in FAQ table
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = RedisSessionStore::new(&config.redis)?;
        let faq = FaqMatcher::default();

        info!(
            "Session store: redis at {}:{}",
            config.redis.host, config.redis.port
        );
        info!("Loaded {} FAQ entries: {:?}", faq.len(), faq.questions());

        Ok(Self::new(Arc::new(store), Arc::new(faq), config.server.port))
    }

    /// Start the bot (webhook server)
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = ([0, 0, 0, 0], self.port).into();
        let server = WebhookServer::new(addr, self.handler);

        server.start().await
    }

    /// Get the interaction handler for direct use
    pub fn handler(&self) -> Arc<InteractionHandler> {
        Arc::clone(&self.handler)
    }
}
