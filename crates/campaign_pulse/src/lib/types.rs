//! Wire types for the Hugging Face inference API.

use serde::{Deserialize, Serialize};

/// Generation parameters sent with every summarization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarizationParameters {
    pub max_length: u32,
    pub min_length: u32,
    /// `false` selects greedy decoding
    pub do_sample: bool,
}

impl Default for SummarizationParameters {
    fn default() -> Self {
        Self {
            max_length: 180,
            min_length: 60,
            do_sample: false,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummarizationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: &'a SummarizationParameters,
}

/// One element of the summarization response array.
#[derive(Debug, Deserialize)]
pub struct SummaryItem {
    pub summary_text: String,
}
