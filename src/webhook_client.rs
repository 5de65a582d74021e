use crate::circuit_breaker::{create_webhook_circuit_breaker, WebhookCircuitBreaker};
use crate::config::Config;
use crate::errors::AppError;
use crate::webhook_models::{DeliveryOutcome, LeadKind, WebhookPayload};
use chrono::Utc;
use failsafe::futures::CircuitBreaker;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Forwards stored leads to the configured per-category receivers.
#[derive(Clone)]
pub struct WebhookClient {
    client: reqwest::Client,
    retired_url: Option<Url>,
    athletes_rights_url: Option<Url>,
    breaker: Arc<WebhookCircuitBreaker>,
}

impl WebhookClient {
    /// Creates a new `WebhookClient`.
    ///
    /// # Arguments
    ///
    /// * `retired_url` - Receiver for retirement leads, if any.
    /// * `athletes_rights_url` - Receiver for athletes-rights leads, if any.
    /// * `timeout` - Per-request timeout.
    pub fn new(
        retired_url: Option<Url>,
        athletes_rights_url: Option<Url>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            retired_url,
            athletes_rights_url,
            breaker: Arc::new(create_webhook_circuit_breaker()),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(
            config.webhook_retired_url.clone(),
            config.webhook_athletes_rights_url.clone(),
            config.webhook_timeout,
        )
    }

    fn url_for(&self, kind: LeadKind) -> Option<&Url> {
        match kind {
            LeadKind::Retired => self.retired_url.as_ref(),
            LeadKind::AthletesRights => self.athletes_rights_url.as_ref(),
        }
    }

    /// Delivers one record and reports what happened. Never returns an error:
    /// failures are logged and surfaced as [`DeliveryOutcome::Failed`].
    pub async fn send(&self, kind: LeadKind, data: Value) -> DeliveryOutcome {
        let Some(url) = self.url_for(kind) else {
            tracing::info!("Webhook URL for {} leads not configured", kind);
            return DeliveryOutcome::NotConfigured;
        };

        let payload = WebhookPayload::new(kind, data, Utc::now());

        match self.breaker.call(self.post(url, &payload)).await {
            Ok(()) => {
                tracing::info!("Webhook sent successfully to: {}", url);
                DeliveryOutcome::Delivered
            }
            Err(failsafe::Error::Rejected) => {
                tracing::warn!(
                    "Webhook circuit open, skipping {} delivery to {}",
                    kind,
                    url
                );
                DeliveryOutcome::Skipped
            }
            Err(failsafe::Error::Inner(e)) => {
                tracing::error!("Error sending webhook to {}: {}", url, e);
                DeliveryOutcome::Failed(e.to_string())
            }
        }
    }

    /// Fire-and-forget delivery of a stored record; the caller's response
    /// does not wait for the receiver.
    pub fn dispatch<T: Serialize>(&self, kind: LeadKind, record: &T) {
        let data = match serde_json::to_value(record) {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Failed to serialize {} lead for webhook: {}", kind, e);
                return;
            }
        };

        let client = self.clone();
        tokio::spawn(async move {
            client.send(kind, data).await;
        });
    }

    async fn post(&self, url: &Url, payload: &WebhookPayload) -> Result<(), AppError> {
        let response = self.client.post(url.clone()).json(payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalApiError(format!(
                "Webhook receiver returned {}: {}",
                status, error_text
            )));
        }

        Ok(())
    }
}
