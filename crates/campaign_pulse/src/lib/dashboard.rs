//! Terminal rendering of an analysis: a KPI panel and the campaign table.

use std::cmp::Ordering;

use campaign_datastore::Campaign;
use itertools::Itertools;

use crate::{
    format::{format_amount, format_count, format_metric, render_table, Align},
    CampaignAnalysis, KpiSummary,
};

pub fn render_kpis(kpis: &KpiSummary) -> String {
    let or_na = |value: &Option<String>| value.as_deref().unwrap_or("n/a").to_string();

    render_table(
        &[("Metric", Align::Left), ("Value", Align::Right)],
        &[
            vec!["Total Spend".into(), format!("Rs.{}", format_amount(kpis.total_spend))],
            vec!["Total Revenue".into(), format!("Rs.{}", format_amount(kpis.total_revenue))],
            vec!["Overall ROAS".into(), format_metric(kpis.overall_roas, "x")],
            vec!["Total Conversions".into(), format_count(kpis.total_conversions)],
            vec!["Avg CTR".into(), format_metric(kpis.avg_ctr, "%")],
            vec!["Best Channel".into(), or_na(&kpis.best_channel)],
            vec!["Worst Channel".into(), or_na(&kpis.worst_channel)],
        ],
    )
}

/// Highest ROAS first; campaigns with undefined ROAS go last, ties keep input order.
fn by_roas_desc(a: &&Campaign, b: &&Campaign) -> Ordering {
    match (a.roas, b.roas) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn render_campaign_table(campaigns: &[Campaign]) -> String {
    let rows = campaigns
        .iter()
        .sorted_by(by_roas_desc)
        .map(|c| {
            vec![
                c.record.campaign_name.clone(),
                c.record.channel.clone(),
                c.record.campaign_type.clone(),
                format_metric(c.roas, ""),
                format_metric(c.ctr_pct, ""),
                format_amount(c.record.spend_inr),
                format_amount(c.record.revenue_inr),
            ]
        })
        .collect_vec();

    render_table(
        &[
            ("campaign_name", Align::Left),
            ("channel", Align::Left),
            ("type", Align::Left),
            ("roas", Align::Right),
            ("ctr_pct", Align::Right),
            ("spend_inr", Align::Right),
            ("revenue_inr", Align::Right),
        ],
        &rows,
    )
}

pub fn render_dashboard(analysis: &CampaignAnalysis) -> String {
    format!(
        "Campaign KPIs\n\
         {}\n\
         \n\
         Campaign Data ({} campaigns)\n\
         {}\n",
        render_kpis(&analysis.kpis),
        analysis.campaigns.len(),
        render_campaign_table(&analysis.campaigns),
    )
}

#[cfg(test)]
mod tests {
    use campaign_datastore::{sample_campaigns, CampaignRecord};

    use super::*;
    use crate::compute_kpis;

    #[test]
    fn test_kpi_panel() {
        let kpis = compute_kpis(&sample_campaigns()).unwrap();
        let panel = render_kpis(&kpis);

        assert!(panel.contains("Rs.255,000"));
        assert!(panel.contains("Rs.1,352,000"));
        assert!(panel.contains("5.3x"));
        assert!(panel.contains("1,181"));
        assert!(panel.contains("5.5%"));
        assert!(panel.lines().any(|l| l.starts_with("Best Channel") && l.ends_with("WhatsApp")));
        assert!(panel.lines().any(|l| l.starts_with("Worst Channel") && l.ends_with("YouTube")));
    }

    #[test]
    fn test_campaign_table_sorted_by_roas_descending() {
        let mut campaigns = sample_campaigns();
        campaigns.push(Campaign::new(CampaignRecord {
            campaign_name: "Organic - Blog".into(),
            channel: "Blog".into(),
            campaign_type: "Awareness".into(),
            impressions: 1_000,
            clicks: 10,
            conversions: 1,
            spend_inr: 0.0,
            revenue_inr: 500.0,
            content_description: String::new(),
        }));

        let table = render_campaign_table(&campaigns);
        let names = table
            .lines()
            .skip(1)
            .map(|line| line.split("  ").next().unwrap_or_default().trim())
            .collect_vec();

        assert_eq!(
            names,
            vec![
                "Referral Drive - WhatsApp",
                "Re-engagement - Email",
                "Conversion Push - Google Ads",
                "Summer Awareness - Instagram",
                "Brand Recall - YouTube",
                "Organic - Blog",
            ]
        );
        assert!(table.lines().last().unwrap().contains("n/a"));
    }
}
