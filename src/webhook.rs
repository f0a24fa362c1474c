use std::rc::Rc;

use async_trait::async_trait;
use gloo_net::http::Request;
use log::{debug, info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::lead::LeadSubmission;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to encode lead: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("webhook answered with status {0}")]
    Status(u16),
}

#[derive(Clone, Debug, PartialEq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait LeadTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<WebhookResponse, SubmitError>;
}

pub struct FetchTransport;

#[async_trait(?Send)]
impl LeadTransport for FetchTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<WebhookResponse, SubmitError> {
        let response = Request::post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| SubmitError::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(WebhookResponse { status, body })
    }
}

#[derive(Clone)]
pub struct WebhookClient {
    url: String,
    transport: Rc<dyn LeadTransport>,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, transport: impl LeadTransport + 'static) -> Self {
        Self {
            url: url.into(),
            transport: Rc::new(transport),
        }
    }

    pub fn fetch(url: impl Into<String>) -> Self {
        Self::new(url, FetchTransport)
    }

    // Ok(None): 2xx without a JSON body
    pub async fn submit(&self, lead: &LeadSubmission) -> Result<Option<Value>, SubmitError> {
        let body = serde_json::to_value(lead)?;
        info!("Sending {} form data: {}", lead.form.form_type(), body);

        let response = self.transport.post_json(&self.url, &body).await?;
        info!("Response status: {}", response.status);

        if !response.is_success() {
            return Err(SubmitError::Status(response.status));
        }

        match serde_json::from_str::<Value>(&response.body) {
            Ok(data) => {
                debug!("Response data: {}", data);
                Ok(Some(data))
            }
            Err(e) => {
                warn!("Webhook accepted the lead but sent no JSON: {}", e);
                Ok(None)
            }
        }
    }
}

impl PartialEq for WebhookClient {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
            && Rc::as_ptr(&self.transport) as *const () == Rc::as_ptr(&other.transport) as *const ()
    }
}
