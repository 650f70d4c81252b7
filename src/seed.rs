use uuid::Uuid;

use crate::models::{CampaignRecord, Platform};

const SEED_NAMESPACE: u128 = 0x3d7f_5d6f_24f7_4e8e_8b4b_3e7e_44b4_a700;

/// Fixed mock dataset standing in for the generated analysis.
pub fn sample_campaigns(company: &str) -> Vec<CampaignRecord> {
    let rows: [(Platform, &str, &str, f64, f64, f64, f64, &str, &str, &str); 8] = [
        (
            Platform::Instagram,
            "Holiday Glow Reels",
            "Short-form reels featuring the winter collection",
            6.8,
            1_250_000.0,
            4.2,
            45_000.0,
            "2024-11-04",
            "2024-11-30",
            "Awareness",
        ),
        (
            Platform::Facebook,
            "Black Friday Countdown",
            "Carousel ads counting down to doorbuster deals",
            3.1,
            2_400_000.0,
            3.6,
            80_000.0,
            "2024-11-18",
            "2024-11-29",
            "Conversions",
        ),
        (
            Platform::Tiktok,
            "Unbox the Season",
            "Creator unboxing challenge with branded sound",
            9.4,
            3_100_000.0,
            5.1,
            60_000.0,
            "2024-12-01T09:00:00Z",
            "2024-12-24T23:59:00Z",
            "Engagement",
        ),
        (
            Platform::Youtube,
            "Gift Guide Series",
            "Three-part pre-roll series on gifting",
            2.4,
            1_800_000.0,
            2.2,
            95_000.0,
            "2024-12-05",
            "2024-12-22",
            "Consideration",
        ),
        (
            Platform::Linkedin,
            "Year in Review",
            "Employer brand recap for professional audiences",
            1.9,
            420_000.0,
            1.8,
            25_000.0,
            "2024-12-16",
            "2025-01-10",
            "Brand",
        ),
        (
            Platform::Instagram,
            "New Year, New Routine",
            "Story ads with swipe-up to the January edit",
            5.6,
            980_000.0,
            3.9,
            38_000.0,
            "2025-01-03",
            "2025-01-31",
            "Traffic",
        ),
        (
            Platform::Twitter,
            "Resolution Threads",
            "Promoted threads with customer resolutions",
            2.7,
            650_000.0,
            1.4,
            18_000.0,
            "2025-01-08",
            "2025-01-25",
            "Engagement",
        ),
        (
            Platform::Tiktok,
            "Winter Sale Duets",
            "Duet prompts promoting clearance pricing",
            7.9,
            2_200_000.0,
            4.7,
            52_000.0,
            "2025-01-15",
            "2025-02-05",
            "Conversions",
        ),
    ];

    rows.into_iter()
        .enumerate()
        .map(
            |(i, (platform, title, description, engagement, reach, roi, budget, start, end, objective))| {
                let impressions = reach * 1.6;
                let clicks = (impressions * engagement / 400.0).round();
                CampaignRecord {
                    id: Uuid::from_u128(SEED_NAMESPACE + i as u128).to_string(),
                    company_name: company.to_string(),
                    platform,
                    title: title.to_string(),
                    description: description.to_string(),
                    engagement_rate: engagement,
                    reach,
                    impressions,
                    clicks,
                    shares: (clicks * 0.12).round(),
                    comments: (clicks * 0.08).round(),
                    likes: (clicks * 0.9).round(),
                    ctr: clicks / impressions * 100.0,
                    cpm: budget / impressions * 1_000.0,
                    roi,
                    budget,
                    start_date: Some(start.to_string()),
                    end_date: Some(end.to_string()),
                    objective: objective.to_string(),
                    target_audience: "Adults 18-34 interested in lifestyle".to_string(),
                }
            },
        )
        .collect()
}

#[cfg(test)]
pub fn fixture(
    id: &str,
    platform: Platform,
    engagement_rate: f64,
    reach: f64,
    start_date: &str,
) -> CampaignRecord {
    CampaignRecord {
        id: id.to_string(),
        company_name: "Acme".to_string(),
        platform,
        title: format!("Campaign {id}"),
        description: String::new(),
        engagement_rate,
        reach,
        impressions: reach * 2.0,
        clicks: 0.0,
        shares: 0.0,
        comments: 0.0,
        likes: 0.0,
        ctr: 0.0,
        cpm: 0.0,
        roi: engagement_rate / 2.0,
        budget: 1_000.0,
        start_date: Some(start_date.to_string()),
        end_date: None,
        objective: String::new(),
        target_audience: String::new(),
    }
}
