use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use shared::{ClassificationResult, EmotionScore};
use std::time::Duration;
use url::Url;

use super::{ClassificationError, EmotionClassifier};
use crate::config::ClassifierConfig;
use crate::imaging::Bitmap;

/// Hosted image-classification model reached over HTTP.
pub struct HuggingFaceClassifier {
    client: reqwest::Client,
    url: Url,
    model: String,
    api_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceReply {
    Scores(Vec<EmotionScore>),
    Failure { error: serde_json::Value },
}

impl HuggingFaceClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self, ClassificationError> {
        let url = model_url(&config.endpoint, &config.model)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassificationError::Init(format!("HTTP client: {}", e)))?;

        if config.api_token.is_none() {
            log::warn!("No HF_API_TOKEN set; hosted inference may reject anonymous requests");
        }

        Ok(Self {
            client,
            url,
            model: config.model.clone(),
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl EmotionClassifier for HuggingFaceClassifier {
    fn name(&self) -> &str {
        &self.model
    }

    async fn classify(&self, bitmap: &Bitmap) -> Result<ClassificationResult, ClassificationError> {
        let png = bitmap.to_png()?;

        let mut request = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "image/png")
            .body(png);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        parse_reply(status, &body)
    }
}

pub(crate) fn model_url(endpoint: &str, model: &str) -> Result<Url, ClassificationError> {
    let joined = format!(
        "{}/{}",
        endpoint.trim_end_matches('/'),
        model.trim_start_matches('/')
    );
    Url::parse(&joined)
        .map_err(|e| ClassificationError::Init(format!("invalid classifier URL {}: {}", joined, e)))
}

pub(crate) fn parse_reply(status: u16, body: &[u8]) -> Result<ClassificationResult, ClassificationError> {
    let reply = serde_json::from_slice::<InferenceReply>(body);
    let success = (200..300).contains(&status);

    match reply {
        Ok(InferenceReply::Failure { error }) => Err(ClassificationError::Remote {
            status,
            message: error_text(&error),
        }),
        _ if !success => Err(ClassificationError::Remote {
            status,
            message: String::from_utf8_lossy(body).chars().take(200).collect(),
        }),
        Ok(InferenceReply::Scores(scores)) => Ok(ClassificationResult::new(scores)?),
        Err(e) => Err(ClassificationError::MalformedResponse(e.to_string())),
    }
}

fn error_text(error: &serde_json::Value) -> String {
    match error {
        serde_json::Value::String(message) => message.clone(),
        serde_json::Value::Array(messages) => messages
            .iter()
            .map(error_text)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
