use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::insight::Insight;
use crate::models::{CampaignRecord, Platform};
use crate::sentiment::PaidPost;

#[derive(Deserialize)]
#[serde(untagged)]
enum CampaignDocument {
    List(Vec<CampaignRecord>),
    Analysis { campaigns: Vec<CampaignRecord> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PaidPostDocument {
    List(Vec<PaidPost>),
    Wrapped {
        #[serde(rename = "paidPosts")]
        paid_posts: Vec<PaidPost>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InsightDocument {
    List(Vec<Insight>),
    Wrapped { insights: Vec<Insight> },
}

/// Row layout written by `export::write_csv`.
#[derive(Debug, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "Campaign Title")]
    pub title: String,
    #[serde(rename = "Platform")]
    pub platform: Platform,
    #[serde(rename = "Engagement Rate")]
    pub engagement_rate: f64,
    #[serde(rename = "Reach")]
    pub reach: f64,
    #[serde(rename = "Impressions")]
    pub impressions: f64,
    #[serde(rename = "ROI")]
    pub roi: f64,
    #[serde(rename = "Budget")]
    pub budget: f64,
    #[serde(rename = "Start Date")]
    pub start_date: Option<String>,
    #[serde(rename = "End Date")]
    pub end_date: Option<String>,
}

impl CsvRow {
    fn into_record(self) -> CampaignRecord {
        CampaignRecord {
            id: format!("import-{}", Uuid::new_v4()),
            company_name: String::new(),
            platform: self.platform,
            title: self.title,
            description: String::new(),
            engagement_rate: self.engagement_rate,
            reach: self.reach,
            impressions: self.impressions,
            clicks: 0.0,
            shares: 0.0,
            comments: 0.0,
            likes: 0.0,
            ctr: 0.0,
            cpm: 0.0,
            roi: self.roi,
            budget: self.budget,
            start_date: self.start_date,
            end_date: self.end_date,
            objective: String::new(),
            target_audience: String::new(),
        }
    }
}

pub fn load_campaigns(path: &Path) -> anyhow::Result<Vec<CampaignRecord>> {
    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));

    let campaigns = if is_csv {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        read_campaigns_csv(file).with_context(|| format!("invalid CSV in {}", path.display()))?
    } else {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        parse_campaigns_json(&raw).with_context(|| format!("invalid JSON in {}", path.display()))?
    };

    debug!(count = campaigns.len(), path = %path.display(), "loaded campaigns");
    Ok(campaigns)
}

/// Accepts a bare array or an analysis object with a `campaigns` field.
pub fn parse_campaigns_json(raw: &str) -> anyhow::Result<Vec<CampaignRecord>> {
    let document: CampaignDocument = serde_json::from_str(raw)?;
    Ok(match document {
        CampaignDocument::List(campaigns) => campaigns,
        CampaignDocument::Analysis { campaigns } => campaigns,
    })
}

pub fn read_campaigns_csv<R: Read>(reader: R) -> anyhow::Result<Vec<CampaignRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut campaigns = Vec::new();

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result.with_context(|| format!("row {}", line + 1))?;
        campaigns.push(row.into_record());
    }

    Ok(campaigns)
}

pub fn load_paid_posts(path: &Path) -> anyhow::Result<Vec<PaidPost>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document: PaidPostDocument = serde_json::from_str(&raw)
        .with_context(|| format!("invalid paid post JSON in {}", path.display()))?;
    Ok(match document {
        PaidPostDocument::List(posts) => posts,
        PaidPostDocument::Wrapped { paid_posts } => paid_posts,
    })
}

pub fn load_insights(path: &Path) -> anyhow::Result<Vec<Insight>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_insights_json(&raw).with_context(|| format!("invalid insight JSON in {}", path.display()))
}

/// Accepts a bare array or an object with an `insights` field.
pub fn parse_insights_json(raw: &str) -> anyhow::Result<Vec<Insight>> {
    let document: InsightDocument = serde_json::from_str(raw)?;
    Ok(match document {
        InsightDocument::List(insights) => insights,
        InsightDocument::Wrapped { insights } => insights,
    })
}
