use std::{fmt::Display, future::Future};

use serde::{Deserialize, Serialize};

pub trait Summarizer {
    /// Input beyond this many characters is dropped before sending
    const INPUT_CHAR_LIMIT: usize = 1000;

    type Error: Display;

    fn summarize(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
