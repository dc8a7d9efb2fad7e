//! Inbound message handling
//!
//! One call per inbound message: load or create the session, stamp it,
//! answer from the FAQ table (text) or with a fixed prompt (anything else),
//! save the session and return the reply.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, WhatsAppError};
use crate::faq::FaqMatcher;
use crate::response::{OutboundMessage, text_response};
use crate::session::SessionStore;
use crate::types::MessageType;

/// Reply to any message that is not plain text
pub const NON_TEXT_PROMPT: &str =
    "Please send a text message with your question or type 'Speak to Support'.";

/// Message handler for WhatsApp
pub struct InteractionHandler {
    session_store: Arc<dyn SessionStore>,
    faq: Arc<FaqMatcher>,
}

impl InteractionHandler {
    /// Create a new message handler
    pub fn new(session_store: Arc<dyn SessionStore>, faq: Arc<FaqMatcher>) -> Self {
        Self { session_store, faq }
    }

    /// Process one inbound message and build the reply
    ///
    /// A `text` message without a body is rejected with
    /// [`WhatsAppError::MalformedInput`] before the session store is touched.
    /// Store failures propagate as [`WhatsAppError::StoreUnavailable`].
    pub async fn handle(
        &self,
        phone_number: &str,
        message_type: &str,
        message_text: Option<&str>,
    ) -> Result<OutboundMessage> {
        let message_type = MessageType::from(message_type);

        let text = match (&message_type, message_text) {
            (MessageType::Text, None) => {
                return Err(WhatsAppError::MalformedInput(
                    "text message without a body".to_string(),
                ));
            }
            (MessageType::Text, Some(text)) => Some(text),
            (MessageType::Other(_), _) => None,
        };

        let mut session = self.session_store.get_or_create(phone_number).await?;
        session.touch();

        let response = match text {
            Some(text) => {
                let answer = self.faq.answer(text);
                debug!("FAQ lookup for {}: {:?}", phone_number, text.trim());
                text_response(phone_number, answer)
            }
            None => text_response(phone_number, NON_TEXT_PROMPT),
        };

        self.session_store.save(&session).await?;

        info!("Answered {} message from {}", message_type, phone_number);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::faq::FALLBACK_ANSWER;
    use crate::session::{InMemorySessionStore, SESSION_TTL};
    use crate::test_support::UnreachableStore;

    const SUPPORT_ANSWER: &str = "You can contact us by emailing support@udiwonder.com or by replying 'Speak to Support' here on WhatsApp.";

    fn handler_with(store: Arc<dyn SessionStore>) -> InteractionHandler {
        InteractionHandler::new(store, Arc::new(FaqMatcher::default()))
    }

    #[tokio::test]
    async fn test_text_faq_answer() {
        let handler = handler_with(Arc::new(InMemorySessionStore::new()));
        let response = handler
            .handle("+1234567890", "text", Some("How do I contact support?"))
            .await
            .unwrap();

        assert_eq!(response.to, "+1234567890");
        assert_eq!(response.message_type, "text");
        assert_eq!(response.text.body, SUPPORT_ANSWER);
    }

    #[tokio::test]
    async fn test_text_fallback() {
        let handler = handler_with(Arc::new(InMemorySessionStore::new()));
        let response = handler
            .handle("+1234567890", "text", Some("gibberish"))
            .await
            .unwrap();
        assert_eq!(response.text.body, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_empty_text_is_fallback() {
        let handler = handler_with(Arc::new(InMemorySessionStore::new()));
        let response = handler
            .handle("+1234567890", "text", Some("   "))
            .await
            .unwrap();
        assert_eq!(response.text.body, FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_non_text_prompt() {
        let handler = handler_with(Arc::new(InMemorySessionStore::new()));

        let image = handler.handle("+1234567890", "image", Some("")).await.unwrap();
        assert_eq!(image.text.body, NON_TEXT_PROMPT);

        let audio = handler
            .handle("+1234567890", "audio", Some("How do I contact support?"))
            .await
            .unwrap();
        assert_eq!(audio.text.body, NON_TEXT_PROMPT);

        let location = handler.handle("+1234567890", "location", None).await.unwrap();
        assert_eq!(location.text.body, NON_TEXT_PROMPT);
    }

    #[tokio::test]
    async fn test_type_is_case_sensitive() {
        let handler = handler_with(Arc::new(InMemorySessionStore::new()));
        let response = handler
            .handle("+1234567890", "TEXT", Some("How do I contact support?"))
            .await
            .unwrap();
        assert_eq!(response.text.body, NON_TEXT_PROMPT);
    }

    #[tokio::test]
    async fn test_missing_text_body() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(store.clone());

        let result = handler.handle("+1234567890", "text", None).await;
        assert!(matches!(result, Err(WhatsAppError::MalformedInput(_))));
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_store_unavailable() {
        let handler = handler_with(Arc::new(UnreachableStore));
        let result = handler
            .handle("+1234567890", "text", Some("How do I contact support?"))
            .await;
        assert!(matches!(result, Err(WhatsAppError::StoreUnavailable(_))));
    }

    #[tokio::test]
    async fn test_session_created_and_touched() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(store.clone());

        handler
            .handle("+1234567890", "text", Some("hello"))
            .await
            .unwrap();
        let first = store.get_or_create("+1234567890").await.unwrap();
        assert_eq!(first.current_state, "INITIAL");
        assert!(first.context.is_empty());

        handler
            .handle("+1234567890", "image", None)
            .await
            .unwrap();
        let second = store.get_or_create("+1234567890").await.unwrap();
        assert!(second.last_interaction >= first.last_interaction);
        assert_eq!(store.session_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_interaction_resets_ttl() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(store.clone());

        handler
            .handle("+1234567890", "text", Some("hello"))
            .await
            .unwrap();
        assert_eq!(store.ttl("+1234567890").await.unwrap(), Some(SESSION_TTL));

        tokio::time::advance(Duration::from_secs(5 * 3600)).await;
        assert_eq!(
            store.ttl("+1234567890").await.unwrap(),
            Some(SESSION_TTL - Duration::from_secs(5 * 3600))
        );

        handler
            .handle("+1234567890", "text", Some("hello again"))
            .await
            .unwrap();
        assert_eq!(store.ttl("+1234567890").await.unwrap(), Some(SESSION_TTL));
    }
}
