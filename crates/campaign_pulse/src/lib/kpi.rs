//! # KPI Engine
//!
//! Aggregates a campaign dataset into a fixed set of headline KPIs.

use campaign_datastore::{round2, Campaign};
use serde::Serialize;

use crate::error::Error;

/// Aggregate KPIs over the whole dataset.
///
/// Ratios whose denominator is zero, and aggregates over metrics that are
/// undefined for every campaign, are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_spend: f64,
    pub total_revenue: f64,
    /// `total_revenue / total_spend`
    pub overall_roas: Option<f64>,
    pub total_impressions: u64,
    pub total_conversions: u64,
    /// Mean of the defined per-campaign CTRs
    pub avg_ctr: Option<f64>,
    /// Channel of the first campaign with the highest ROAS
    pub best_channel: Option<String>,
    /// Channel of the first campaign with the lowest ROAS
    pub worst_channel: Option<String>,
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Sums `values`, failing instead of wrapping when the total exceeds `u64`.
pub(crate) fn checked_total(
    mut values: impl Iterator<Item = u64>,
    field: &'static str,
) -> Result<u64, Error> {
    values
        .try_fold(0u64, |total, v| total.checked_add(v))
        .ok_or(Error::CountOverflow { field })
}

/// Computes the KPI summary for a dataset.
///
/// # Returns
/// * `Ok(KpiSummary)` for a dataset with at least one campaign.
/// * `Err(Error::EmptyDataset)` when `campaigns` is empty.
/// * `Err(Error::CountOverflow)` when impressions or conversions do not fit a `u64` total.
#[tracing::instrument(skip_all, fields(campaigns = campaigns.len()))]
pub fn compute_kpis(campaigns: &[Campaign]) -> Result<KpiSummary, Error> {
    if campaigns.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let total_spend: f64 = campaigns.iter().map(|c| c.record.spend_inr).sum();
    let total_revenue: f64 = campaigns.iter().map(|c| c.record.revenue_inr).sum();
    let total_impressions = checked_total(campaigns.iter().map(|c| c.record.impressions), "impressions")?;
    let total_conversions = checked_total(campaigns.iter().map(|c| c.record.conversions), "conversions")?;

    let overall_roas = (total_spend != 0.0).then(|| round2(total_revenue / total_spend));
    let avg_ctr = mean(campaigns.iter().filter_map(|c| c.ctr_pct)).map(round2);

    let rated = || {
        campaigns
            .iter()
            .filter_map(|c| c.roas.map(|roas| (c.channel(), roas)))
    };
    // max_by keeps the last of equal maxima, so scan in reverse to keep the first
    let best_channel = rated()
        .rev()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(channel, _)| channel.to_string());
    let worst_channel = rated()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(channel, _)| channel.to_string());

    Ok(KpiSummary {
        total_spend,
        total_revenue,
        overall_roas,
        total_impressions,
        total_conversions,
        avg_ctr,
        best_channel,
        worst_channel,
    })
}
