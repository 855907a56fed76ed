//! Twilio WhatsApp channel — REST send + inbound webhook payload.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use promemo_core::config::TwilioConfig;
use promemo_core::error::{PromemoError, Result};
use promemo_core::traits::Transport;
use promemo_core::types::IncomingMessage;

const API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// WhatsApp transport over the Twilio Messages API.
pub struct TwilioWhatsApp {
    config: TwilioConfig,
    client: reqwest::Client,
}

impl TwilioWhatsApp {
    pub fn new(config: TwilioConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
            .build()
            .map_err(|e| PromemoError::channel(format!("HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{API_BASE}/Accounts/{}/Messages.json", self.config.account_sid)
    }
}

#[async_trait]
impl Transport for TwilioWhatsApp {
    fn name(&self) -> &str {
        "twilio-whatsapp"
    }

    async fn send(&self, recipient: &str, body: &str) -> Result<()> {
        let form = [
            ("From", self.config.from_number.as_str()),
            ("To", recipient),
            ("Body", body),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&form)
            .send()
            .await
            .map_err(|e| PromemoError::channel(format!("Twilio send failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PromemoError::channel(format!("Twilio {status}: {text}")));
        }
        Ok(())
    }
}

/// Inbound Twilio webhook form payload. Only the fields the service
/// consumes; Twilio sends many more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioInbound {
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "From", default)]
    pub from: String,
}

impl TwilioInbound {
    pub fn into_incoming(self) -> IncomingMessage {
        IncomingMessage::new("whatsapp", self.from, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_url_embeds_account_sid() {
        let channel = TwilioWhatsApp::new(TwilioConfig {
            account_sid: "AC123".into(),
            auth_token: "secret".into(),
            from_number: "whatsapp:+1444".into(),
            http_timeout_secs: 5,
        })
        .unwrap();

        assert_eq!(
            channel.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
        assert_eq!(channel.name(), "twilio-whatsapp");
    }

    #[test]
    fn test_inbound_maps_to_incoming_message() {
        let payload = TwilioInbound {
            body: "add Math 2025-03-20 09:30 x".into(),
            from: "whatsapp:+1555".into(),
        };
        let msg = payload.into_incoming();
        assert_eq!(msg.channel, "whatsapp");
        assert_eq!(msg.sender, "whatsapp:+1555");
        assert_eq!(msg.content, "add Math 2025-03-20 09:30 x");
    }

    #[test]
    fn test_inbound_missing_fields_default_empty() {
        let payload: TwilioInbound = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.body, "");
        assert_eq!(payload.from, "");
    }
}
