use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Twitter,
    Linkedin,
    Tiktok,
    Youtube,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One campaign as supplied by the upstream generator. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub id: String,
    #[serde(default)]
    pub company_name: String,
    pub platform: Platform,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub engagement_rate: f64,
    pub reach: f64,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub clicks: f64,
    #[serde(default)]
    pub shares: f64,
    #[serde(default)]
    pub comments: f64,
    #[serde(default)]
    pub likes: f64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub cpm: f64,
    pub roi: f64,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub objective: String,
    #[serde(default)]
    pub target_audience: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RankMetric {
    Engagement,
    Reach,
    Roi,
}

impl RankMetric {
    pub fn value_of(&self, record: &CampaignRecord) -> f64 {
        match self {
            RankMetric::Engagement => record.engagement_rate,
            RankMetric::Reach => record.reach,
            RankMetric::Roi => record.roi,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRollup {
    pub platform: Platform,
    pub campaign_count: usize,
    pub average_engagement: f64,
    pub total_reach: f64,
    pub average_roi: f64,
    pub total_budget: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRollup {
    pub key: MonthKey,
    pub label: String,
    pub average_engagement: f64,
    pub total_reach: f64,
    pub campaign_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendDelta {
    pub engagement: f64,
    pub reach: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    #[serde(flatten)]
    pub rollup: MonthlyRollup,
    pub delta: Option<TrendDelta>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRecord {
    pub index: usize,
    pub id: String,
    #[serde(serialize_with = "serialize_reason")]
    pub reason: RecordError,
}

fn serialize_reason<S: serde::Serializer>(reason: &RecordError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(reason)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub months: Vec<MonthlyTrend>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub campaign: &'a CampaignRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary<'a> {
    pub total_campaigns: usize,
    pub avg_engagement_rate: f64,
    pub total_reach: f64,
    pub total_impressions: f64,
    pub best_performing: Option<&'a CampaignRecord>,
}
