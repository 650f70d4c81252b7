use std::fmt::Write;

use crate::format::{
    format_currency, format_number, format_percent, format_signed_number, format_signed_percent,
};
use crate::insight::{self, Insight};
use crate::models::{CampaignRecord, RankMetric};
use crate::rank::{self, RankQuery};
use crate::rollup;
use crate::trend;

pub fn build_report(
    company: &str,
    campaigns: &[CampaignRecord],
    insights: &[Insight],
    top: usize,
) -> String {
    let summary = rank::summarize(campaigns);
    let platforms = rollup::build_platform_rollups(campaigns);
    let trends = trend::build_monthly_trends(campaigns);
    let leaders = rank::rank_campaigns(
        campaigns,
        &RankQuery {
            limit: Some(top),
            ..RankQuery::by(RankMetric::Engagement)
        },
    );

    let mut output = String::new();

    let _ = writeln!(output, "# Campaign Analysis: {company}");
    let _ = writeln!(
        output,
        "{} campaigns, {} avg engagement, {} reach, {} impressions",
        summary.total_campaigns,
        format_percent(summary.avg_engagement_rate),
        format_number(summary.total_reach),
        format_number(summary.total_impressions)
    );
    if let Some(best) = summary.best_performing {
        let _ = writeln!(
            output,
            "Best performer: {} on {} ({})",
            best.title,
            best.platform,
            format_percent(best.engagement_rate)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Platform Performance");

    if platforms.is_empty() {
        let _ = writeln!(output, "No campaigns to compare.");
    } else {
        let max_engagement = rollup::max_average_engagement(&platforms);
        let max_reach = rollup::max_total_reach(&platforms);
        for platform in &platforms {
            let _ = writeln!(
                output,
                "- {}: {} campaigns, {} engagement ({:.0}% bar), {} reach ({:.0}% bar), {:.1}x ROI, {} budget",
                platform.platform,
                platform.campaign_count,
                format_percent(platform.average_engagement),
                rollup::bar_width(platform.average_engagement, max_engagement),
                format_number(platform.total_reach),
                rollup::bar_width(platform.total_reach, max_reach),
                platform.average_roi,
                format_currency(platform.total_budget)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Monthly Trends");

    if trends.months.is_empty() {
        let _ = writeln!(output, "No dated campaigns.");
    } else {
        for month in &trends.months {
            let rollup = &month.rollup;
            let change = match month.delta {
                Some(delta) => format!(
                    " ({} engagement, {} reach)",
                    format_signed_percent(delta.engagement),
                    format_signed_number(delta.reach)
                ),
                None => String::new(),
            };
            let _ = writeln!(
                output,
                "- {}: {} campaigns, {} engagement, {} reach{}",
                rollup.label,
                rollup.campaign_count,
                format_percent(rollup.average_engagement),
                format_number(rollup.total_reach),
                change
            );
        }
    }

    if !trends.skipped.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Skipped Campaigns");
        for skipped in &trends.skipped {
            let _ = writeln!(output, "- {} (row {}): {}", skipped.id, skipped.index + 1, skipped.reason);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top Performing Campaigns");

    if leaders.is_empty() {
        let _ = writeln!(output, "No campaigns recorded.");
    } else {
        for entry in &leaders {
            let _ = writeln!(
                output,
                "{}. {} ({}) {} engagement, {} reach",
                entry.rank,
                entry.campaign.title,
                entry.campaign.platform,
                format_percent(entry.campaign.engagement_rate),
                format_number(entry.campaign.reach)
            );
        }
    }

    if !insights.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Insights");
        for item in insight::by_impact(insights) {
            let _ = writeln!(
                output,
                "- [{} impact, {}] {}: {} ({:.0}% confidence)",
                item.impact, item.kind, item.title, item.recommendation, item.confidence
            );
        }
    }

    output
}
