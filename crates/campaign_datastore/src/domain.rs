use serde::{Deserialize, Serialize};

use crate::DataStoreError;

/// Rounds to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `None` when the denominator is zero; the ratio is undefined.
fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

/// A single row of the campaign dataset, exactly as it appears in the CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub campaign_name: String,
    pub channel: String,
    #[serde(rename = "type")]
    pub campaign_type: String,
    pub impressions: u64,
    /// Expected to be `<= impressions`; not enforced
    pub clicks: u64,
    pub conversions: u64,
    pub spend_inr: f64,
    pub revenue_inr: f64,
    pub content_description: String,
}

impl CampaignRecord {
    /// Checks the monetary columns are finite and non-negative.
    ///
    /// Counts are unsigned and need no check.
    pub fn validate(&self) -> Result<(), DataStoreError> {
        for (field, value) in [("spend_inr", self.spend_inr), ("revenue_inr", self.revenue_inr)] {
            if !value.is_finite() || value < 0.0 {
                return Err(DataStoreError::Invalid {
                    campaign: self.campaign_name.clone(),
                    field,
                });
            }
        }
        Ok(())
    }
}

/// A campaign record enriched with its derived metrics.
///
/// Metrics are computed once at construction and rounded to 2 decimals.
/// A metric whose denominator is zero is `None` (undefined) and is skipped
/// by every downstream aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Campaign {
    #[serde(flatten)]
    pub record: CampaignRecord,
    /// `clicks / impressions * 100`
    pub ctr_pct: Option<f64>,
    /// `conversions / clicks * 100`
    pub conversion_rate_pct: Option<f64>,
    /// `revenue_inr / spend_inr`
    pub roas: Option<f64>,
}

impl Campaign {
    pub fn new(record: CampaignRecord) -> Self {
        let ctr_pct = ratio(record.clicks as f64, record.impressions as f64)
            .map(|r| round2(r * 100.0));
        let conversion_rate_pct = ratio(record.conversions as f64, record.clicks as f64)
            .map(|r| round2(r * 100.0));
        let roas = ratio(record.revenue_inr, record.spend_inr).map(round2);

        Campaign {
            record,
            ctr_pct,
            conversion_rate_pct,
            roas,
        }
    }

    pub fn channel(&self) -> &str {
        &self.record.channel
    }

    pub fn name(&self) -> &str {
        &self.record.campaign_name
    }

    /// True when any derived metric could not be computed.
    pub fn has_undefined_metrics(&self) -> bool {
        self.ctr_pct.is_none() || self.conversion_rate_pct.is_none() || self.roas.is_none()
    }
}

impl TryFrom<CampaignRecord> for Campaign {
    type Error = DataStoreError;

    fn try_from(record: CampaignRecord) -> Result<Self, Self::Error> {
        record.validate()?;
        Ok(Campaign::new(record))
    }
}
