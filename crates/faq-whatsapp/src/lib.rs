//! faq-whatsapp: WhatsApp FAQ bot for faq-gateway
//!
//! This crate answers inbound WhatsApp webhook messages from a static
//! FAQ table, keeping per-number sessions in an expiring Redis entry.

pub mod bot;
pub mod error;
pub mod faq;
pub mod handler;
pub mod response;
pub mod session;
pub mod types;
pub mod webhook;

#[cfg(test)]
pub(crate) mod test_support;

pub use bot::WhatsAppBot;
pub use error::{Result, WhatsAppError};
pub use faq::FaqMatcher;
pub use handler::InteractionHandler;
pub use response::{OutboundMessage, text_response};
pub use session::{InMemorySessionStore, RedisSessionStore, Session, SessionStore};
pub use webhook::WebhookServer;
