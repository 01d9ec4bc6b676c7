use std::sync::{Arc, Mutex};

use campaign_pulse::{huggingface::HuggingFaceError, Summarizer, SummaryResponse};

/// Records every report it is asked to summarize and answers like the
/// inference API would, either with a fixed summary or a rejected status.
#[derive(Clone)]
pub struct MockSummarizer {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub reject_with_status: Option<u16>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            reject_with_status: None,
        }
    }

    pub fn rejecting(status: u16) -> Self {
        Self {
            summary: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            reject_with_status: Some(status),
        }
    }
}

impl Summarizer for MockSummarizer {
    type Error = HuggingFaceError;

    async fn summarize(&self, content: &str) -> Result<SummaryResponse, Self::Error> {
        self.calls.lock().unwrap().push(content.to_string());
        match self.reject_with_status {
            Some(503) => Err(HuggingFaceError::ModelLoading),
            Some(status) => Err(HuggingFaceError::Api {
                status,
                body: "mock rejection".to_string(),
            }),
            None => Ok(SummaryResponse {
                summary: self.summary.clone(),
            }),
        }
    }
}
