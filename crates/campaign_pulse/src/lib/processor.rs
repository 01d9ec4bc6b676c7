use std::collections::BTreeMap;

use anyhow::Context;
use campaign_datastore::{Campaign, DataStore};
use serde::Serialize;

use crate::{
    kpi::{compute_kpis, KpiSummary},
    report::{format_report, group_by_channel, ChannelBreakdown},
    Summarizer, SummaryResponse,
};

pub mod builder;

/// Everything derived from one load of the dataset.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignAnalysis {
    pub campaigns: Vec<Campaign>,
    pub kpis: KpiSummary,
    pub channels: BTreeMap<String, ChannelBreakdown>,
    /// Narrative handed to the summarizer
    pub report_text: String,
}

/// Loads campaigns from a [`DataStore`], aggregates them and, when a
/// [`Summarizer`] is attached, summarizes the resulting report on demand.
#[derive(Debug)]
pub struct CampaignAnalyzer<D, S = ()>
where
    D: DataStore + Send + Sync,
{
    store: D,
    summarizer: S,
}

impl<D, S> CampaignAnalyzer<D, S>
where
    D: DataStore + Send + Sync,
{
    /// Reloads the dataset and recomputes every aggregate; nothing is cached
    /// between calls.
    #[tracing::instrument(skip(self))]
    pub async fn analyze(&self) -> anyhow::Result<CampaignAnalysis> {
        let campaigns = self
            .store
            .load_campaigns()
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to load campaigns"))
            .context("Failed to load campaigns")?;

        let kpis = compute_kpis(&campaigns)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to compute KPIs"))?;
        let channels = group_by_channel(&campaigns)
            .inspect_err(|e| tracing::error!(error = %e, "Failed to group campaigns by channel"))?;
        let report_text = format_report(&kpis, &channels);

        tracing::info!(
            campaigns = campaigns.len(),
            channels = channels.len(),
            "Campaign analysis complete"
        );

        Ok(CampaignAnalysis {
            campaigns,
            kpis,
            channels,
            report_text,
        })
    }
}

impl<D, S> CampaignAnalyzer<D, S>
where
    D: DataStore + Send + Sync,
    S: Summarizer,
{
    /// Issues a single summarization request for the analysis' report text.
    #[tracing::instrument(skip_all)]
    pub async fn summarize(&self, analysis: &CampaignAnalysis) -> Result<SummaryResponse, S::Error> {
        let summary = self
            .summarizer
            .summarize(&analysis.report_text)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize campaign report"))?;

        tracing::info!(summary_chars = summary.summary.chars().count(), "Summary generated");
        Ok(summary)
    }
}
