//! Wire model for the FCM legacy HTTP API.
//!
//! `HttpMessage` is the multicast request body; `BatchResponse` is what the
//! connection server answers with. Empty/zero fields are omitted on the way out
//! and defaulted on the way in.

use serde::{Deserialize, Serialize};

/// Free-form data payload of a message.
pub type Data = serde_json::Map<String, serde_json::Value>;

/// A multicast downstream message addressed to a list of registration tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpMessage {
    /// Recipient tokens. Order matters: `BatchResponse::results[i]` answers `registration_ids[i]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registration_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse_key: Option<String>,
    /// "normal" or "high".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub content_available: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub mutable_content: bool,
    /// Seconds the message is kept if the device is offline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_live: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restricted_package_name: Option<String>,
    /// Ask the server to validate without delivering.
    #[serde(default, skip_serializing_if = "is_false")]
    pub dry_run: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl HttpMessage {
    pub fn new(
        registration_ids: Vec<String>,
        data: Option<Data>,
        notification: Option<Notification>,
    ) -> Self {
        Self {
            registration_ids,
            data,
            notification,
            ..Default::default()
        }
    }

    /// Same payload, different recipients. Used to narrow a batch for the next attempt.
    pub fn with_recipients(&self, registration_ids: Vec<String>) -> Self {
        Self {
            registration_ids,
            ..self.clone()
        }
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The notification payload of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_loc_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_loc_args: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_loc_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_loc_args: Option<String>,
}

impl Notification {
    pub fn simple(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            body: Some(body.into()),
            ..Default::default()
        }
    }
}

/// Connection server response to a multicast request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub multicast_id: i64,
    #[serde(default)]
    pub success: u32,
    #[serde(default)]
    pub failure: u32,
    #[serde(default)]
    pub canonical_ids: u32,
    /// One entry per token sent, in the same order.
    #[serde(default)]
    pub results: Vec<RecipientResult>,
    /// Topic messages answer with a single id/error instead of `results`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchResponse {
    /// No failures and no canonical ids: nothing to reconcile.
    pub fn is_clean(&self) -> bool {
        self.failure == 0 && self.canonical_ids == 0
    }
}

/// Status of one recipient within a multicast response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Canonical replacement for the token that was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RecipientResult {
    pub fn delivered(message_id: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            ..Default::default()
        }
    }

    pub fn renamed(message_id: impl Into<String>, new_token: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            registration_id: Some(new_token.into()),
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            error: Some(reason.into()),
            ..Default::default()
        }
    }
}
