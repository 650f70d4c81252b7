//! Month-over-month trend rollups.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::error::RecordError;
use crate::models::{
    CampaignRecord, MonthKey, MonthlyRollup, MonthlyTrend, SkippedRecord, TrendDelta, TrendReport,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthAccumulator {
    pub count: usize,
    pub engagement_sum: f64,
    pub reach_sum: f64,
}

impl MonthAccumulator {
    pub fn absorb(self, record: &CampaignRecord) -> Self {
        Self {
            count: self.count + 1,
            engagement_sum: self.engagement_sum + record.engagement_rate,
            reach_sum: self.reach_sum + record.reach,
        }
    }

    pub fn finalize(self, key: MonthKey) -> Option<MonthlyRollup> {
        if self.count == 0 {
            return None;
        }
        Some(MonthlyRollup {
            key,
            label: month_label(key),
            average_engagement: self.engagement_sum / self.count as f64,
            total_reach: self.reach_sum,
            campaign_count: self.count,
        })
    }
}

const NAIVE_STAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Accepts RFC 3339, naive `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]` with an optional
/// trailing `Z`, or a bare `YYYY-MM-DD`.
pub fn parse_start_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.date_naive());
    }
    let naive = value.strip_suffix('Z').unwrap_or(value);
    NAIVE_STAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|stamp| stamp.date())
        .or_else(|| NaiveDate::parse_from_str(value, "%Y-%m-%d").ok())
}

pub fn month_key(record: &CampaignRecord) -> Result<MonthKey, RecordError> {
    let raw = match record.start_date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(RecordError::MissingStartDate),
    };
    let date = parse_start_date(raw).ok_or_else(|| RecordError::UnparseableStartDate {
        value: raw.to_string(),
    })?;
    Ok(MonthKey {
        year: date.year(),
        month: date.month(),
    })
}

/// Display label such as `Jan 2025`.
pub fn month_label(key: MonthKey) -> String {
    NaiveDate::from_ymd_opt(key.year, key.month, 1)
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("{}-{:02}", key.year, key.month))
}

pub fn accumulate_by_month(
    records: &[CampaignRecord],
) -> (BTreeMap<MonthKey, MonthAccumulator>, Vec<SkippedRecord>) {
    let mut buckets: BTreeMap<MonthKey, MonthAccumulator> = BTreeMap::new();
    let mut skipped = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match month_key(record) {
            Ok(key) => {
                let acc = buckets.entry(key).or_default();
                *acc = acc.absorb(record);
            }
            Err(reason) => {
                warn!(index, id = %record.id, %reason, "skipping campaign in monthly trends");
                skipped.push(SkippedRecord {
                    index,
                    id: record.id.clone(),
                    reason,
                });
            }
        }
    }

    (buckets, skipped)
}

pub fn build_monthly_trends(records: &[CampaignRecord]) -> TrendReport {
    let (buckets, skipped) = accumulate_by_month(records);

    // BTreeMap iterates in (year, month) order
    let rollups: Vec<MonthlyRollup> = buckets
        .into_iter()
        .filter_map(|(key, acc)| acc.finalize(key))
        .collect();

    let mut months = Vec::with_capacity(rollups.len());
    let mut previous: Option<&MonthlyRollup> = None;
    for rollup in &rollups {
        let delta = previous.map(|prev| TrendDelta {
            engagement: rollup.average_engagement - prev.average_engagement,
            reach: rollup.total_reach - prev.total_reach,
        });
        months.push(MonthlyTrend {
            rollup: rollup.clone(),
            delta,
        });
        previous = Some(rollup);
    }

    TrendReport { months, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;
    use crate::seed::fixture;

    #[test]
    fn months_sort_by_calendar_across_years() {
        let records = vec![
            fixture("a", Platform::Facebook, 5.0, 300.0, "2025-01-15"),
            fixture("b", Platform::Facebook, 3.0, 100.0, "2024-11-03"),
            fixture("c", Platform::Instagram, 4.0, 200.0, "2024-12-20T10:00:00Z"),
            fixture("d", Platform::Instagram, 6.0, 50.0, "2025-01-02"),
        ];

        let report = build_monthly_trends(&records);
        let labels: Vec<&str> = report.months.iter().map(|m| m.rollup.label.as_str()).collect();
        assert_eq!(labels, vec!["Nov 2024", "Dec 2024", "Jan 2025"]);

        let january = &report.months[2].rollup;
        assert_eq!(january.campaign_count, 2);
        assert!((january.average_engagement - 5.5).abs() < 0.001);
        assert!((january.total_reach - 350.0).abs() < 0.001);
    }

    #[test]
    fn same_month_name_in_different_years_stays_apart() {
        let records = vec![
            fixture("a", Platform::Twitter, 1.0, 10.0, "2025-03-01"),
            fixture("b", Platform::Twitter, 2.0, 10.0, "2024-03-01"),
        ];

        let report = build_monthly_trends(&records);
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].rollup.label, "Mar 2024");
        assert_eq!(report.months[1].rollup.label, "Mar 2025");
    }

    #[test]
    fn deltas_follow_previous_month() {
        let records = crate::seed::sample_campaigns("Acme");
        let report = build_monthly_trends(&records);

        assert!(report.months.len() > 1);
        assert_eq!(report.months[0].delta, None);
        for pair in report.months.windows(2) {
            let delta = pair[1].delta.expect("later months carry a delta");
            let expected =
                pair[1].rollup.average_engagement - pair[0].rollup.average_engagement;
            assert!((delta.engagement - expected).abs() < 1e-9);
            let expected_reach = pair[1].rollup.total_reach - pair[0].rollup.total_reach;
            assert!((delta.reach - expected_reach).abs() < 1e-9);
        }
    }

    #[test]
    fn malformed_dates_are_skipped_not_fatal() {
        let mut missing = fixture("missing", Platform::Linkedin, 2.0, 10.0, "");
        missing.start_date = None;
        let records = vec![
            fixture("ok", Platform::Linkedin, 2.0, 10.0, "2024-11-01"),
            fixture("bad", Platform::Linkedin, 2.0, 10.0, "next tuesday"),
            missing,
        ];

        let report = build_monthly_trends(&records);
        assert_eq!(report.months.len(), 1);
        assert_eq!(report.months[0].rollup.campaign_count, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].index, 1);
        assert_eq!(
            report.skipped[0].reason,
            RecordError::UnparseableStartDate {
                value: "next tuesday".to_string()
            }
        );
        assert_eq!(report.skipped[1].reason, RecordError::MissingStartDate);
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = build_monthly_trends(&[]);
        assert!(report.months.is_empty());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn parses_supported_timestamp_shapes() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 5);
        assert_eq!(parse_start_date("2024-12-05"), expected);
        assert_eq!(parse_start_date("2024-12-05T08:30:00"), expected);
        assert_eq!(parse_start_date("2024-12-05T08:30:00.250Z"), expected);
        assert_eq!(parse_start_date("2024-12-05 08:30:00"), expected);
        assert_eq!(parse_start_date("2024-12-05T08:30Z"), expected);
        assert_eq!(parse_start_date("2024-12-05 08:30"), expected);
        assert_eq!(parse_start_date("12/05/2024"), None);
    }

    #[test]
    fn rebuilding_from_same_input_is_identical() {
        let mut records = crate::seed::sample_campaigns("Acme");
        records.push(fixture("undated", Platform::Youtube, 1.0, 1.0, "someday"));

        assert_eq!(build_monthly_trends(&records), build_monthly_trends(&records));
    }
}
