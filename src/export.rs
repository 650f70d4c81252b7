use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::insight::Insight;
use crate::models::{CampaignRecord, CompanySummary, Platform, PlatformRollup, TrendReport};
use crate::rank;
use crate::rollup;
use crate::trend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Serialize)]
struct CsvOut<'a> {
    #[serde(rename = "Campaign Title")]
    title: &'a str,
    #[serde(rename = "Platform")]
    platform: Platform,
    #[serde(rename = "Engagement Rate")]
    engagement_rate: f64,
    #[serde(rename = "Reach")]
    reach: f64,
    #[serde(rename = "Impressions")]
    impressions: f64,
    #[serde(rename = "ROI")]
    roi: f64,
    #[serde(rename = "Budget")]
    budget: f64,
    #[serde(rename = "Start Date")]
    start_date: &'a str,
    #[serde(rename = "End Date")]
    end_date: &'a str,
}

pub fn write_csv<W: Write>(writer: W, campaigns: &[CampaignRecord]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for campaign in campaigns {
        writer.serialize(CsvOut {
            title: &campaign.title,
            platform: campaign.platform,
            engagement_rate: campaign.engagement_rate,
            reach: campaign.reach,
            impressions: campaign.impressions,
            roi: campaign.roi,
            budget: campaign.budget,
            start_date: campaign.start_date.as_deref().unwrap_or_default(),
            end_date: campaign.end_date.as_deref().unwrap_or_default(),
        })?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    pub include_campaigns: bool,
    pub include_insights: bool,
    pub format: ExportFormat,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub company: &'a str,
    pub summary: CompanySummary<'a>,
    pub campaigns: &'a [CampaignRecord],
    pub insights: &'a [Insight],
    pub platforms: Vec<PlatformRollup>,
    pub trends: TrendReport,
    pub generated_at: DateTime<Utc>,
    pub export_format: ExportFormat,
}

pub fn build_export<'a>(
    company: &'a str,
    campaigns: &'a [CampaignRecord],
    insights: &'a [Insight],
    options: ExportOptions,
    generated_at: DateTime<Utc>,
) -> ExportDocument<'a> {
    ExportDocument {
        company,
        summary: rank::summarize(campaigns),
        campaigns: if options.include_campaigns { campaigns } else { &[] },
        insights: if options.include_insights { insights } else { &[] },
        platforms: rollup::build_platform_rollups(campaigns),
        trends: trend::build_monthly_trends(campaigns),
        generated_at,
        export_format: options.format,
    }
}
