use std::{fmt, time::Duration};

use reqwest::{Client, StatusCode};

use crate::{
    report::truncate_chars,
    types::{SummarizationParameters, SummarizationRequest, SummaryItem},
    Summarizer, SummaryResponse,
};

pub const DEFAULT_API_BASE: &str = "https://router.huggingface.co/hf-inference/models";
pub const DEFAULT_SUMMARIZER_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_CLASSIFIER_MODEL: &str = "facebook/bart-large-mnli";

/// Connection settings for the Hugging Face inference router.
///
/// Built once at startup and handed to [`HuggingFaceClient::new`]; the
/// client never mutates it.
#[derive(Clone)]
pub struct HuggingFaceConfig {
    api_base: String,
    token: String,
    summarizer_model: String,
    classifier_model: String,
    timeout: Duration,
    parameters: SummarizationParameters,
}

impl HuggingFaceConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            token: token.into(),
            summarizer_model: DEFAULT_SUMMARIZER_MODEL.into(),
            classifier_model: DEFAULT_CLASSIFIER_MODEL.into(),
            timeout: Self::DEFAULT_TIMEOUT,
            parameters: SummarizationParameters::default(),
        }
    }

    pub fn with_api_base(mut self, url: impl Into<String>) -> Self {
        self.api_base = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_summarizer_model(mut self, model: impl Into<String>) -> Self {
        self.summarizer_model = model.into();
        self
    }

    pub fn with_classifier_model(mut self, model: impl Into<String>) -> Self {
        self.classifier_model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_parameters(mut self, parameters: SummarizationParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn summarizer_model(&self) -> &str {
        &self.summarizer_model
    }

    /// Classification model id. No request uses it yet.
    pub fn classifier_model(&self) -> &str {
        &self.classifier_model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn parameters(&self) -> &SummarizationParameters {
        &self.parameters
    }

    pub fn summarizer_url(&self) -> String {
        format!("{}/{}", self.api_base, self.summarizer_model)
    }
}

impl fmt::Debug for HuggingFaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HuggingFaceConfig")
            .field("api_base", &self.api_base)
            .field("token", &"<redacted>")
            .field("summarizer_model", &self.summarizer_model)
            .field("classifier_model", &self.classifier_model)
            .field("timeout", &self.timeout)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Outcome of a summarization call that did not produce a summary.
///
/// The `Display` output of each variant is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum HuggingFaceError {
    /// HTTP 503: the model is still being loaded on the inference backend
    #[error("Model is loading. Wait 20 seconds and try again.")]
    ModelLoading,
    #[error("Error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response from summarization model: {0}")]
    Parse(String),
}

impl HuggingFaceError {
    /// Only a loading model is worth retrying later; nothing retries automatically.
    pub fn is_transient(&self) -> bool {
        matches!(self, HuggingFaceError::ModelLoading)
    }
}

/// Body text of a rejected request, or the reason it could not be read.
fn api_error_body(body: reqwest::Result<String>) -> String {
    body.inspect_err(|e| tracing::error!(error = %e, "Failed to read error response body"))
        .unwrap_or_else(|e| format!("failed to read response body: {e}"))
}

#[derive(Debug, Clone)]
pub struct HuggingFaceClient {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceClient {
    pub fn new(config: HuggingFaceConfig) -> Result<Self, HuggingFaceError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .inspect_err(|e| tracing::error!(error = %e, "Failed to build http client"))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }

    /// Sends `inputs` as-is to the summarizer model and returns the first summary.
    #[tracing::instrument(skip_all, fields(model = %self.config.summarizer_model, input_chars = inputs.chars().count()))]
    pub async fn send_summarization_request(&self, inputs: &str) -> Result<String, HuggingFaceError> {
        let body = SummarizationRequest {
            inputs,
            parameters: &self.config.parameters,
        };

        let resp = self
            .client
            .post(self.config.summarizer_url())
            .bearer_auth(&self.config.token)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::SERVICE_UNAVAILABLE => {
                tracing::warn!("Summarization model is still loading");
                return Err(HuggingFaceError::ModelLoading);
            }
            status => {
                let body = api_error_body(resp.text().await);
                tracing::error!(status = status.as_u16(), %body, "Summarization request rejected");
                return Err(HuggingFaceError::Api {
                    status: status.as_u16(),
                    body,
                });
            }
        }

        let text = resp.text().await?;
        let items = serde_json::from_str::<Vec<SummaryItem>>(&text).map_err(|e| {
            tracing::error!(error = %e, body = %text, "Failed to parse summarization response");
            HuggingFaceError::Parse(e.to_string())
        })?;

        items
            .into_iter()
            .next()
            .map(|item| item.summary_text)
            .ok_or_else(|| HuggingFaceError::Parse("empty summary list".into()))
    }
}

impl Summarizer for HuggingFaceClient {
    type Error = HuggingFaceError;

    async fn summarize(&self, content: &str) -> Result<SummaryResponse, Self::Error> {
        let inputs = truncate_chars(content, Self::INPUT_CHAR_LIMIT);
        let summary = self.send_summarization_request(inputs).await?;

        Ok(SummaryResponse { summary })
    }
}
