//! WhatsApp Cloud API reply payloads

use serde::{Deserialize, Serialize};

/// Outgoing text message in the WhatsApp Cloud API schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub messaging_product: String,
    pub recipient_type: String,
    pub to: String,
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: TextBody,
}

/// Text message body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBody {
    pub body: String,
}

/// Build a text reply addressed to `phone_number`
pub fn text_response(phone_number: &str, body: &str) -> OutboundMessage {
    OutboundMessage {
        messaging_product: "whatsapp".to_string(),
        recipient_type: "individual".to_string(),
        to: phone_number.to_string(),
        message_type: "text".to_string(),
        text: TextBody {
            body: body.to_string(),
        },
    }
}
