use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Lead category a webhook delivery belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LeadKind {
    #[serde(rename = "retired")]
    Retired,
    #[serde(rename = "athletes-rights")]
    AthletesRights,
}

impl LeadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadKind::Retired => "retired",
            LeadKind::AthletesRights => "athletes-rights",
        }
    }
}

impl fmt::Display for LeadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body posted to the per-category webhook receiver.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookPayload {
    #[serde(rename = "type")]
    pub kind: LeadKind,

    /// The stored lead record, as returned by the API.
    pub data: Value,

    /// RFC 3339 UTC with milliseconds ("2025-06-15T12:00:00.000Z")
    pub timestamp: String,
}

impl WebhookPayload {
    pub fn new(kind: LeadKind, data: Value, at: DateTime<Utc>) -> Self {
        Self {
            kind,
            data,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// What happened to a single delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// No receiver configured for this category.
    NotConfigured,
    /// Circuit breaker is open; nothing was sent.
    Skipped,
    Failed(String),
}
