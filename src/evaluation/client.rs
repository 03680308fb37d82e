//! Remote evaluator trait and its HTTP backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::EvaluationError;

use super::payload::EvaluationPayload;

/// Opaque evaluation report returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluationResult(pub Value);

impl EvaluationResult {
    /// `readiness.overall_score`, if the report carries one.
    pub fn overall_score(&self) -> Option<f64> {
        self.0.get("readiness")?.get("overall_score")?.as_f64()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Something that can evaluate a finished quiz.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, payload: &EvaluationPayload) -> Result<EvaluationResult, EvaluationError>;
}

/// POSTs the payload to the evaluate operation over HTTP.
pub struct HttpEvaluator {
    client: reqwest::Client,
    url: String,
}

impl HttpEvaluator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.evaluate_url())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    async fn evaluate(&self, payload: &EvaluationPayload) -> Result<EvaluationResult, EvaluationError> {
        let resp = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| EvaluationError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), url = %self.url, "Evaluation request rejected");
            return Err(EvaluationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| EvaluationError::InvalidResponse {
                reason: e.to_string(),
            })?;
        Ok(EvaluationResult(value))
    }
}
