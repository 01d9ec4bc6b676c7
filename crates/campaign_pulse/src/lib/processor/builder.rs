use campaign_datastore::DataStore;

use crate::{CampaignAnalyzer, Summarizer};

/// Typestate builder for [`CampaignAnalyzer`].
///
/// A store is required before `build`; the summarizer is optional and only
/// unlocks [`CampaignAnalyzer::summarize`].
pub struct CampaignAnalyzerBuilder<D = (), S = ()> {
    store: D,
    summarizer: S,
}

impl CampaignAnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            store: (),
            summarizer: (),
        }
    }
}

impl Default for CampaignAnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, S> CampaignAnalyzerBuilder<D, S> {
    pub fn store<D2: DataStore + Send + Sync>(self, store: D2) -> CampaignAnalyzerBuilder<D2, S> {
        CampaignAnalyzerBuilder {
            store,
            summarizer: self.summarizer,
        }
    }

    pub fn summarizer<S2: Summarizer>(self, summarizer: S2) -> CampaignAnalyzerBuilder<D, S2> {
        CampaignAnalyzerBuilder {
            store: self.store,
            summarizer,
        }
    }
}

impl<D, S> CampaignAnalyzerBuilder<D, S>
where
    D: DataStore + Send + Sync,
{
    pub fn build(self) -> CampaignAnalyzer<D, S> {
        CampaignAnalyzer {
            store: self.store,
            summarizer: self.summarizer,
        }
    }
}
