use std::sync::{Arc, Mutex};

use campaign_datastore::{sample_campaigns, Campaign, DataStore};

#[derive(Clone)]
pub struct MockDataStore {
    pub campaigns: Vec<Campaign>,
    pub loads: Arc<Mutex<usize>>,
    pub fail_with: Option<String>,
}

impl Default for MockDataStore {
    fn default() -> Self {
        Self::new(sample_campaigns())
    }
}

impl MockDataStore {
    pub fn new(campaigns: Vec<Campaign>) -> Self {
        Self {
            campaigns,
            loads: Arc::new(Mutex::new(0)),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::new(Vec::new())
        }
    }
}

impl DataStore for MockDataStore {
    async fn load_campaigns(&self) -> anyhow::Result<Vec<Campaign>> {
        *self.loads.lock().unwrap() += 1;
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(self.campaigns.clone())
    }
}
