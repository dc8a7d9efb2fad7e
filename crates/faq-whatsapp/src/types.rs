//! Inbound webhook payload types

use std::fmt;

use serde::Deserialize;

/// Inbound message as posted to the webhook
///
/// ```json
/// { "from": "+1234567890", "type": "text", "message": { "text": { "body": "..." } } }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub from: Option<String>,
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    #[serde(default)]
    pub message: Option<InboundContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundContent {
    #[serde(default)]
    pub text: Option<InboundText>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundText {
    #[serde(default)]
    pub body: Option<String>,
}

impl InboundMessage {
    /// Text body, if the payload carries one
    pub fn text_body(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|m| m.text.as_ref())
            .and_then(|t| t.body.as_deref())
    }
}

/// Declared type of an inbound message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Text,
    /// image, audio, location, ...
    Other(String),
}

impl From<&str> for MessageType {
    fn from(value: &str) -> Self {
        match value {
            "text" => MessageType::Text,
            other => MessageType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::Text => write!(f, "text"),
            MessageType::Other(kind) => write!(f, "{}", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_message() {
        let body = r#"{"from":"+1234567890","type":"text","message":{"text":{"body":"Hi"}}}"#;
        let msg: InboundMessage = serde_json::from_str(body).unwrap();

        assert_eq!(msg.from.as_deref(), Some("+1234567890"));
        assert_eq!(msg.message_type.as_deref(), Some("text"));
        assert_eq!(msg.text_body(), Some("Hi"));
    }

    #[test]
    fn test_parse_without_message() {
        let body = r#"{"from":"+1234567890","type":"image"}"#;
        let msg: InboundMessage = serde_json::from_str(body).unwrap();
        assert_eq!(msg.text_body(), None);
    }

    #[test]
    fn test_message_type_is_case_sensitive() {
        assert_eq!(MessageType::from("text"), MessageType::Text);
        assert_eq!(
            MessageType::from("Text"),
            MessageType::Other("Text".to_string())
        );
        assert_eq!(MessageType::from("image").to_string(), "image");
    }
}
