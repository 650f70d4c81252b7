//! Per-platform performance rollups.

use std::collections::HashMap;

use crate::models::{CampaignRecord, Platform, PlatformRollup};
use crate::rank::descending_nan_last;

/// Running sums for one platform bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlatformAccumulator {
    pub count: usize,
    pub engagement_sum: f64,
    pub reach_sum: f64,
    pub roi_sum: f64,
    pub budget_sum: f64,
}

impl PlatformAccumulator {
    pub fn absorb(self, record: &CampaignRecord) -> Self {
        Self {
            count: self.count + 1,
            engagement_sum: self.engagement_sum + record.engagement_rate,
            reach_sum: self.reach_sum + record.reach,
            roi_sum: self.roi_sum + record.roi,
            budget_sum: self.budget_sum + record.budget,
        }
    }

    /// Divides sums into averages. Returns `None` for an empty bucket.
    pub fn finalize(self, platform: Platform) -> Option<PlatformRollup> {
        if self.count == 0 {
            return None;
        }
        let count = self.count as f64;
        Some(PlatformRollup {
            platform,
            campaign_count: self.count,
            average_engagement: self.engagement_sum / count,
            total_reach: self.reach_sum,
            average_roi: self.roi_sum / count,
            total_budget: self.budget_sum,
        })
    }
}

/// Groups records by platform, keeping the order in which each platform first appears.
pub fn accumulate_by_platform(records: &[CampaignRecord]) -> Vec<(Platform, PlatformAccumulator)> {
    let mut positions: HashMap<Platform, usize> = HashMap::new();
    let mut buckets: Vec<(Platform, PlatformAccumulator)> = Vec::new();

    for record in records {
        let slot = *positions.entry(record.platform).or_insert_with(|| {
            buckets.push((record.platform, PlatformAccumulator::default()));
            buckets.len() - 1
        });
        let (_, acc) = &mut buckets[slot];
        *acc = acc.absorb(record);
    }

    buckets
}

pub fn build_platform_rollups(records: &[CampaignRecord]) -> Vec<PlatformRollup> {
    let mut rollups: Vec<PlatformRollup> = accumulate_by_platform(records)
        .into_iter()
        .filter_map(|(platform, acc)| acc.finalize(platform))
        .collect();

    // sort_by is stable: tied platforms keep first-seen order
    rollups.sort_by(|a, b| descending_nan_last(a.average_engagement, b.average_engagement));
    rollups
}

pub fn max_average_engagement(rollups: &[PlatformRollup]) -> Option<f64> {
    rollups.iter().map(|r| r.average_engagement).reduce(f64::max)
}

pub fn max_total_reach(rollups: &[PlatformRollup]) -> Option<f64> {
    rollups.iter().map(|r| r.total_reach).reduce(f64::max)
}

/// Bar width as a percentage of `max`, or 0 when there is nothing to scale against.
pub fn bar_width(value: f64, max: Option<f64>) -> f64 {
    match max {
        Some(max) if max > 0.0 && max.is_finite() && value.is_finite() => {
            (value / max * 100.0).clamp(0.0, 100.0)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::fixture;

    #[test]
    fn ties_keep_first_seen_platform() {
        let records = vec![
            fixture("a", Platform::Facebook, 3.0, 100.0, "2024-11-01"),
            fixture("b", Platform::Instagram, 4.0, 100.0, "2024-11-01"),
            fixture("c", Platform::Facebook, 5.0, 100.0, "2024-11-01"),
            fixture("d", Platform::Instagram, 4.0, 100.0, "2024-11-01"),
        ];

        let rollups = build_platform_rollups(&records);
        assert_eq!(rollups.len(), 2);
        assert_eq!(rollups[0].platform, Platform::Facebook);
        assert_eq!(rollups[1].platform, Platform::Instagram);
        assert!((rollups[0].average_engagement - 4.0).abs() < 0.001);
        assert!((rollups[1].average_engagement - 4.0).abs() < 0.001);
    }

    #[test]
    fn rollups_sum_and_average_per_platform() {
        let mut first = fixture("a", Platform::Tiktok, 2.0, 1_000.0, "2024-11-01");
        first.roi = 3.0;
        first.budget = 500.0;
        let mut second = fixture("b", Platform::Tiktok, 6.0, 3_000.0, "2024-12-01");
        second.roi = 5.0;
        second.budget = 1_500.0;
        let third = fixture("c", Platform::Youtube, 9.0, 10.0, "2024-12-01");

        let rollups = build_platform_rollups(&[first, second, third]);
        assert_eq!(rollups[0].platform, Platform::Youtube);
        let tiktok = &rollups[1];
        assert_eq!(tiktok.campaign_count, 2);
        assert!((tiktok.average_engagement - 4.0).abs() < 0.001);
        assert!((tiktok.total_reach - 4_000.0).abs() < 0.001);
        assert!((tiktok.average_roi - 4.0).abs() < 0.001);
        assert!((tiktok.total_budget - 2_000.0).abs() < 0.001);
    }

    #[test]
    fn counts_cover_every_record_and_order_descends() {
        let records = crate::seed::sample_campaigns("Acme");
        let rollups = build_platform_rollups(&records);

        let total: usize = rollups.iter().map(|r| r.campaign_count).sum();
        assert_eq!(total, records.len());
        for pair in rollups.windows(2) {
            assert!(pair[0].average_engagement >= pair[1].average_engagement);
        }
        assert_eq!(rollups, build_platform_rollups(&records));
    }

    #[test]
    fn empty_input_has_no_rollups_or_maximum() {
        let rollups = build_platform_rollups(&[]);
        assert!(rollups.is_empty());
        assert_eq!(max_average_engagement(&rollups), None);
        assert_eq!(max_total_reach(&rollups), None);
        assert_eq!(bar_width(5.0, None), 0.0);
    }

    #[test]
    fn empty_accumulator_does_not_finalize() {
        assert_eq!(PlatformAccumulator::default().finalize(Platform::Twitter), None);
    }

    #[test]
    fn bar_width_scales_against_maximum() {
        assert!((bar_width(2.5, Some(5.0)) - 50.0).abs() < 0.001);
        assert_eq!(bar_width(2.5, Some(0.0)), 0.0);
    }

    #[test]
    fn nan_platform_average_sorts_last() {
        let records = vec![
            fixture("a", Platform::Facebook, f64::NAN, 100.0, "2024-11-01"),
            fixture("b", Platform::Instagram, 2.0, 100.0, "2024-11-01"),
            fixture("c", Platform::Youtube, f64::INFINITY, 100.0, "2024-11-01"),
            fixture("d", Platform::Twitter, 4.0, 100.0, "2024-11-01"),
        ];

        let rollups = build_platform_rollups(&records);
        let order: Vec<Platform> = rollups.iter().map(|r| r.platform).collect();
        assert_eq!(
            order,
            vec![Platform::Youtube, Platform::Twitter, Platform::Instagram, Platform::Facebook]
        );
        assert_eq!(bar_width(f64::NAN, Some(4.0)), 0.0);
        assert_eq!(bar_width(4.0, Some(f64::INFINITY)), 0.0);
    }
}
