//! Wire types for inbound interactions and their responses.
//!
//! Discord delivers one interaction per webhook request and expects exactly
//! one response within a short window. The raw option list is parsed into the
//! typed [`BridgeCommand`] union so handlers never look fields up by string
//! name.

use serde::{Deserialize, Serialize};

/// Interaction type sent for endpoint validation pings.
pub const INTERACTION_TYPE_PING: u8 = 1;
/// Interaction type for application (slash) commands.
pub const INTERACTION_TYPE_COMMAND: u8 = 2;

/// Response type acknowledging a ping.
const RESPONSE_TYPE_PONG: u8 = 1;
/// Response type carrying a channel message.
const RESPONSE_TYPE_MESSAGE: u8 = 4;
/// Message flag marking a response as visible only to the invoking user.
const FLAG_EPHEMERAL: u64 = 1 << 6;

/// Raw interaction payload as delivered by the webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionPayload {
    pub id: String,
    /// Continuation token for follow-up messages; unused for immediate
    /// responses but part of the wire contract.
    pub token: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub member: Option<InteractionMember>,
    #[serde(default)]
    pub data: Option<InteractionData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionMember {
    pub user: InteractionUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionUser {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub options: Vec<InteractionOption>,
}

/// A parsed bridge subcommand with its typed options.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeCommand {
    /// Link the guild to an organization by external handle. Omitting the
    /// handle targets a personal account, which is not supported yet.
    Connect { organization: Option<String> },
    /// Report the current link, organization, and bot health.
    Status,
    /// Remove the guild's organization link.
    Disconnect,
    /// Usage text; also the fallback for absent or unknown subcommands.
    Help { unknown: Option<String> },
}

impl BridgeCommand {
    /// Parses the subcommand out of the interaction data.
    ///
    /// The first option is treated as the subcommand name; anything absent
    /// or unrecognized routes to help.
    pub fn parse(data: &InteractionData) -> Self {
        let Some(subcommand) = data.options.first() else {
            return Self::Help { unknown: None };
        };

        match subcommand.name.as_str() {
            "connect" => {
                let organization = subcommand
                    .options
                    .iter()
                    .find(|option| option.name == "organization")
                    .and_then(|option| option.value.as_ref())
                    .and_then(|value| value.as_str())
                    .map(|handle| handle.to_string());
                Self::Connect { organization }
            }
            "status" => Self::Status,
            "disconnect" => Self::Disconnect,
            "help" => Self::Help { unknown: None },
            other => Self::Help {
                unknown: Some(other.to_string()),
            },
        }
    }
}

/// Outbound interaction response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionResponseData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponseData {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
}

impl InteractionResponse {
    /// Acknowledges an endpoint validation ping.
    pub fn pong() -> Self {
        Self {
            kind: RESPONSE_TYPE_PONG,
            data: None,
        }
    }

    /// Message visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: RESPONSE_TYPE_MESSAGE,
            data: Some(InteractionResponseData {
                content: content.into(),
                flags: Some(FLAG_EPHEMERAL),
            }),
        }
    }

    /// Message visible to the whole channel.
    pub fn public(content: impl Into<String>) -> Self {
        Self {
            kind: RESPONSE_TYPE_MESSAGE,
            data: Some(InteractionResponseData {
                content: content.into(),
                flags: None,
            }),
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        self.data
            .as_ref()
            .and_then(|data| data.flags)
            .map(|flags| flags & FLAG_EPHEMERAL != 0)
            .unwrap_or(false)
    }

    /// Response text, empty for pongs.
    pub fn content(&self) -> &str {
        self.data.as_ref().map(|data| data.content.as_str()).unwrap_or("")
    }
}
