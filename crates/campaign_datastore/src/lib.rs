//! # Campaign DataStore
//!
//! Domain types for marketing campaign records and the sources they are
//! loaded from.
//!
//! Campaigns are read from delimited text (CSV) with a fixed header schema,
//! validated, and enriched with per-campaign derived metrics (CTR,
//! conversion rate, ROAS). A built-in sample dataset with the same schema
//! is available for demos and as a downloadable template.

mod datastore;
mod domain;
mod error;

pub use datastore::file::{parse_campaigns, write_campaigns, CsvDataStore};
pub use datastore::sample::{sample_campaigns, SampleDataStore};
pub use datastore::{DataStore, DERIVED_COLUMNS, REQUIRED_COLUMNS};
pub use domain::{round2, Campaign, CampaignRecord};
pub use error::DataStoreError;
