use crate::{datastore::DataStore, Campaign, CampaignRecord};

/// The built-in five-campaign demo dataset.
///
/// Totals: spend INR 255,000, revenue INR 1,352,000.
pub fn sample_campaigns() -> Vec<Campaign> {
    let rows: [(&str, &str, &str, u64, u64, u64, f64, f64, &str); 5] = [
        (
            "Summer Awareness - Instagram",
            "Instagram",
            "Awareness",
            120_000,
            4_800,
            96,
            50_000.0,
            192_000.0,
            "Promoted brand awareness for mutual funds targeting young investors in metro cities.",
        ),
        (
            "Conversion Push - Google Ads",
            "Google Ads",
            "Conversion",
            85_000,
            6_800,
            544,
            80_000.0,
            544_000.0,
            "Ran conversion ads for SIP sign-ups targeting working professionals aged 25-35.",
        ),
        (
            "Re-engagement - Email",
            "Email",
            "Retention",
            40_000,
            2_800,
            196,
            20_000.0,
            196_000.0,
            "Sent re-engagement emails to inactive users with personalised fund recommendations.",
        ),
        (
            "Brand Recall - YouTube",
            "YouTube",
            "Awareness",
            200_000,
            5_000,
            75,
            90_000.0,
            150_000.0,
            "YouTube pre-roll ads to improve brand recall among first-time investors.",
        ),
        (
            "Referral Drive - WhatsApp",
            "WhatsApp",
            "Referral",
            30_000,
            1_800,
            270,
            15_000.0,
            270_000.0,
            "WhatsApp referral campaign asking existing users to invite friends for bonus rewards.",
        ),
    ];

    rows.into_iter()
        .map(
            |(name, channel, campaign_type, impressions, clicks, conversions, spend, revenue, description)| {
                Campaign::new(CampaignRecord {
                    campaign_name: name.into(),
                    channel: channel.into(),
                    campaign_type: campaign_type.into(),
                    impressions,
                    clicks,
                    conversions,
                    spend_inr: spend,
                    revenue_inr: revenue,
                    content_description: description.into(),
                })
            },
        )
        .collect()
}

/// Serves [`sample_campaigns`]; used when no input file is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleDataStore;

impl DataStore for SampleDataStore {
    async fn load_campaigns(&self) -> anyhow::Result<Vec<Campaign>> {
        let campaigns = sample_campaigns();
        tracing::info!(count = campaigns.len(), "Loaded sample campaigns");
        Ok(campaigns)
    }
}
