use std::future::Future;

pub mod file;
pub mod sample;

/// Columns every campaign CSV must carry, matched by exact name.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "campaign_name",
    "channel",
    "type",
    "impressions",
    "clicks",
    "conversions",
    "spend_inr",
    "revenue_inr",
    "content_description",
];

/// Derived columns appended when campaigns are written out.
/// Ignored on read; metrics are always recomputed.
pub const DERIVED_COLUMNS: [&str; 3] = ["ctr_pct", "conversion_rate_pct", "roas"];

pub trait DataStore {
    fn load_campaigns(&self) -> impl Future<Output = anyhow::Result<Vec<crate::Campaign>>> + Send;
}

impl<T: DataStore + Send + Sync> DataStore for &T {
    async fn load_campaigns(&self) -> anyhow::Result<Vec<crate::Campaign>> {
        (**self).load_campaigns().await
    }
}
