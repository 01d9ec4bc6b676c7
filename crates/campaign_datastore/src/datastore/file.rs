use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use itertools::Itertools;

use crate::{
    datastore::{DataStore, DERIVED_COLUMNS, REQUIRED_COLUMNS},
    Campaign, CampaignRecord, DataStoreError,
};

/// Parses campaigns from CSV with a header row.
///
/// Missing required columns fail before any row is read. Extra columns are
/// ignored and derived metrics are always recomputed from the raw columns.
pub fn parse_campaigns<R: Read>(reader: R) -> Result<Vec<Campaign>, DataStoreError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    let missing = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| column.to_string())
        .collect_vec();

    if !missing.is_empty() {
        tracing::error!(?missing, "Campaign CSV is missing required columns");
        return Err(DataStoreError::MissingColumns(missing));
    }

    csv_reader
        .deserialize::<CampaignRecord>()
        .enumerate()
        .map(|(idx, result)| -> Result<Campaign, DataStoreError> {
            let record = result.map_err(|source| DataStoreError::Row {
                // header is line 1
                line: source
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(idx as u64 + 2),
                source,
            })?;

            let campaign = Campaign::try_from(record)?;
            if campaign.has_undefined_metrics() {
                tracing::warn!(
                    campaign = %campaign.name(),
                    "Zero impressions, clicks or spend; affected metrics are undefined"
                );
            }
            Ok(campaign)
        })
        .collect()
}

/// Writes campaigns using the input schema, followed by the derived columns.
pub fn write_campaigns<W: Write>(writer: W, campaigns: &[Campaign]) -> Result<(), DataStoreError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(REQUIRED_COLUMNS.iter().chain(DERIVED_COLUMNS.iter()))?;

    let metric = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    for campaign in campaigns {
        let record = &campaign.record;
        csv_writer.write_record([
            record.campaign_name.clone(),
            record.channel.clone(),
            record.campaign_type.clone(),
            record.impressions.to_string(),
            record.clicks.to_string(),
            record.conversions.to_string(),
            record.spend_inr.to_string(),
            record.revenue_inr.to_string(),
            record.content_description.clone(),
            metric(campaign.ctr_pct),
            metric(campaign.conversion_rate_pct),
            metric(campaign.roas),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Campaigns stored in a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvDataStore {
    path: PathBuf,
}

impl CsvDataStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataStore for CsvDataStore {
    async fn load_campaigns(&self) -> anyhow::Result<Vec<Campaign>> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, path = ?self.path, "Failed to read campaign file"))
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let campaigns = parse_campaigns(bytes.as_slice())
            .inspect_err(|e| tracing::error!(error = %e, path = ?self.path, "Failed to parse campaign file"))
            .context("Failed to parse campaign CSV")?;

        tracing::info!(count = campaigns.len(), path = ?self.path, "Loaded campaigns");

        Ok(campaigns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "campaign_name,channel,type,impressions,clicks,conversions,spend_inr,revenue_inr,content_description";

    #[test]
    fn test_parses_rows_and_derives_metrics() {
        let csv = format!(
            "{HEADER}\n\
             Launch,Instagram,Awareness,1000,50,5,100,250,\"Reels, stories and posts\"\n\
             Nurture,Email,Retention,400,40,10,50,400,Weekly digest\n"
        );

        let campaigns = parse_campaigns(csv.as_bytes()).expect("Failed to parse campaigns");

        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].channel(), "Instagram");
        assert_eq!(campaigns[0].record.content_description, "Reels, stories and posts");
        assert_eq!(campaigns[0].ctr_pct, Some(5.0));
        assert_eq!(campaigns[0].roas, Some(2.5));
        assert_eq!(campaigns[1].conversion_rate_pct, Some(25.0));
        assert_eq!(campaigns[1].roas, Some(8.0));
    }

    #[test]
    fn test_header_only_yields_no_campaigns() {
        let campaigns = parse_campaigns(HEADER.as_bytes()).expect("Header-only CSV should parse");
        assert!(campaigns.is_empty());
    }

    #[test]
    fn test_missing_columns_fail_fast() {
        let csv = "campaign_name,channel,impressions,clicks\nA,Email,10,1\n";

        let result = parse_campaigns(csv.as_bytes());

        match result {
            Err(DataStoreError::MissingColumns(missing)) => {
                assert_eq!(
                    missing,
                    vec![
                        "type",
                        "conversions",
                        "spend_inr",
                        "revenue_inr",
                        "content_description"
                    ]
                );
            }
            other => panic!("Expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_reports_all_columns_missing() {
        let result = parse_campaigns("".as_bytes());

        assert!(
            matches!(result, Err(DataStoreError::MissingColumns(ref m)) if m.len() == REQUIRED_COLUMNS.len())
        );
    }

    #[test]
    fn test_headers_are_trimmed_and_extra_columns_ignored() {
        let csv = " campaign_name , channel ,type,impressions,clicks,conversions,spend_inr,revenue_inr,content_description,roas\n\
                   A , Email ,Retention,100,10,1,10,20,desc,999\n";

        let campaigns = parse_campaigns(csv.as_bytes()).expect("Failed to parse campaigns");

        assert_eq!(campaigns[0].channel(), "Email");
        assert_eq!(campaigns[0].roas, Some(2.0), "roas must be recomputed");
    }

    #[test]
    fn test_malformed_row_reports_line_number() {
        let csv = format!(
            "{HEADER}\n\
             A,Email,Retention,100,10,1,10,20,ok\n\
             B,Email,Retention,lots,10,1,10,20,bad impressions\n"
        );

        let result = parse_campaigns(csv.as_bytes());

        assert!(
            matches!(result, Err(DataStoreError::Row { line: 3, .. })),
            "Expected row error at line 3, got {result:?}"
        );
    }

    #[test]
    fn test_negative_spend_is_rejected() {
        let csv = format!("{HEADER}\nA,Email,Retention,100,10,1,-10,20,desc\n");

        let result = parse_campaigns(csv.as_bytes());

        assert!(matches!(result, Err(DataStoreError::Invalid { field: "spend_inr", .. })));
    }

    #[test]
    fn test_written_campaigns_carry_derived_columns() {
        let csv = format!("{HEADER}\nA,Email,Retention,0,0,0,0,20,desc\n");
        let campaigns = parse_campaigns(csv.as_bytes()).unwrap();

        let mut out = Vec::new();
        write_campaigns(&mut out, &campaigns).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(format!("{HEADER},ctr_pct,conversion_rate_pct,roas").as_str())
        );
        // undefined metrics are written as empty cells
        assert_eq!(lines.next(), Some("A,Email,Retention,0,0,0,0,20,desc,,,"));
    }

    #[tokio::test]
    async fn test_csv_datastore_loads_file() {
        let path = std::env::temp_dir().join(format!(
            "campaign-datastore-test-{}.csv",
            std::process::id()
        ));
        std::fs::write(&path, format!("{HEADER}\nA,Email,Retention,100,10,1,10,20,desc\n")).unwrap();

        let store = CsvDataStore::new(&path);
        let campaigns = store.load_campaigns().await;
        std::fs::remove_file(&path).ok();

        let campaigns = campaigns.expect("Failed to load campaigns");
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].name(), "A");
    }

    #[tokio::test]
    async fn test_csv_datastore_missing_file_errors() {
        let store = CsvDataStore::new("/nonexistent/campaigns.csv");

        let err = store.load_campaigns().await.unwrap_err();

        assert!(format!("{err:#}").contains("/nonexistent/campaigns.csv"));
    }
}
