use std::cmp::Ordering;

use crate::models::{CampaignRecord, CompanySummary, Platform, RankMetric, RankedEntry};

#[derive(Debug, Clone, Copy)]
pub struct RankQuery {
    pub metric: RankMetric,
    pub platform: Option<Platform>,
    pub limit: Option<usize>,
}

impl RankQuery {
    pub fn by(metric: RankMetric) -> Self {
        Self {
            metric,
            platform: None,
            limit: None,
        }
    }
}

/// Filter, then stable sort descending by the metric, then truncate.
pub fn rank_campaigns<'a>(records: &'a [CampaignRecord], query: &RankQuery) -> Vec<RankedEntry<'a>> {
    let mut matching: Vec<&CampaignRecord> = records
        .iter()
        .filter(|record| query.platform.map_or(true, |p| record.platform == p))
        .collect();

    matching.sort_by(|a, b| descending_nan_last(query.metric.value_of(a), query.metric.value_of(b)));

    if let Some(limit) = query.limit {
        matching.truncate(limit);
    }

    matching
        .into_iter()
        .enumerate()
        .map(|(index, campaign)| RankedEntry {
            rank: index + 1,
            campaign,
        })
        .collect()
}

/// Descending order for metric values with every NaN after every number.
/// Equal values compare `Equal`, so a stable sort keeps their input order.
pub fn descending_nan_last(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// First campaign holding the highest engagement rate. NaN rates never win.
pub fn best_performing(records: &[CampaignRecord]) -> Option<&CampaignRecord> {
    let mut iter = records.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |best, current| {
        if descending_nan_last(current.engagement_rate, best.engagement_rate) == Ordering::Less {
            current
        } else {
            best
        }
    }))
}

pub fn summarize(records: &[CampaignRecord]) -> CompanySummary<'_> {
    let total_campaigns = records.len();
    let engagement_sum: f64 = records.iter().map(|r| r.engagement_rate).sum();

    CompanySummary {
        total_campaigns,
        avg_engagement_rate: if total_campaigns == 0 {
            0.0
        } else {
            engagement_sum / total_campaigns as f64
        },
        total_reach: records.iter().map(|r| r.reach).sum(),
        total_impressions: records.iter().map(|r| r.impressions).sum(),
        best_performing: best_performing(records),
    }
}
