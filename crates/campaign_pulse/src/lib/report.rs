//! # Report Text
//!
//! Builds the narrative report sent to the summarization model: an overall
//! KPI section followed by a per-channel breakdown.

use std::collections::BTreeMap;

use campaign_datastore::{round2, Campaign};
use itertools::Itertools;
use serde::Serialize;

use crate::{
    error::Error,
    format::{format_amount, format_count, format_metric, render_table, Align},
    kpi::{checked_total, mean, KpiSummary},
};

/// Aggregates of all campaigns that ran on one channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelBreakdown {
    /// Mean of the defined per-campaign ROAS values
    pub avg_roas: Option<f64>,
    pub total_spend: f64,
    pub total_conversions: u64,
    pub campaign_count: usize,
}

/// Groups campaigns by channel, keyed and ordered by channel name.
///
/// Fails with [`Error::CountOverflow`] when a channel's conversions do not
/// fit a `u64` total.
pub fn group_by_channel(campaigns: &[Campaign]) -> Result<BTreeMap<String, ChannelBreakdown>, Error> {
    campaigns
        .iter()
        .into_group_map_by(|c| c.channel().to_string())
        .into_iter()
        .map(|(channel, group)| {
            let breakdown = ChannelBreakdown {
                avg_roas: mean(group.iter().filter_map(|c| c.roas)).map(round2),
                total_spend: round2(group.iter().map(|c| c.record.spend_inr).sum()),
                total_conversions: checked_total(
                    group.iter().map(|c| c.record.conversions),
                    "conversions",
                )?,
                campaign_count: group.len(),
            };
            Ok((channel, breakdown))
        })
        .collect()
}

/// Builds the report text for `campaigns` and their precomputed `kpis`.
pub fn build_report_text(campaigns: &[Campaign], kpis: &KpiSummary) -> Result<String, Error> {
    Ok(format_report(kpis, &group_by_channel(campaigns)?))
}

/// Renders the report from already aggregated KPIs and channel breakdowns.
pub fn format_report(kpis: &KpiSummary, channels: &BTreeMap<String, ChannelBreakdown>) -> String {
    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "n/a".to_string());

    let breakdown = render_table(
        &[
            ("channel", Align::Left),
            ("avg_roas", Align::Right),
            ("total_spend", Align::Right),
            ("total_conversions", Align::Right),
        ],
        &channels
            .iter()
            .map(|(channel, b)| {
                vec![
                    channel.clone(),
                    format_metric(b.avg_roas, ""),
                    format_amount(b.total_spend),
                    format_count(b.total_conversions),
                ]
            })
            .collect_vec(),
    );

    format!(
        "Marketing Campaign Performance Report:\n\
         \n\
         Total spend: INR {}\n\
         Total revenue: INR {}\n\
         Overall ROAS: {}\n\
         Total impressions: {}\n\
         Total conversions: {}\n\
         Average CTR: {}\n\
         Best performing channel: {}\n\
         Worst performing channel: {}\n\
         \n\
         Channel breakdown:\n\
         {breakdown}\n",
        format_amount(kpis.total_spend),
        format_amount(kpis.total_revenue),
        format_metric(kpis.overall_roas, "x"),
        format_count(kpis.total_impressions),
        format_count(kpis.total_conversions),
        format_metric(kpis.avg_ctr, "%"),
        or_na(&kpis.best_channel),
        or_na(&kpis.worst_channel),
    )
}

/// Returns at most the first `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
