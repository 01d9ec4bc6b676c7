mod error;
pub mod dashboard;
pub mod format;
pub mod kpi;
mod llm;
mod processor;
pub mod report;
pub mod tracing;
pub mod types;

pub use error::Error;
pub use kpi::{compute_kpis, KpiSummary};
pub use llm::huggingface;
pub use llm::summarizer::{Summarizer, SummaryResponse};
pub use processor::{builder::CampaignAnalyzerBuilder, CampaignAnalysis, CampaignAnalyzer};
pub use report::{build_report_text, group_by_channel, ChannelBreakdown};
