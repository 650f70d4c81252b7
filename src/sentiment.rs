//! Paid-post comment sentiment.
//!
//! `top_comments` and `comments` come from the generator independently; the
//! former is not guaranteed to be drawn from the latter.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub likes: f64,
    #[serde(default)]
    pub replies: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub sentiment: Sentiment,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub follower_count: f64,
    #[serde(default)]
    pub is_influencer: bool,
}

/// Percentages reported by the generator alongside each post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentShare {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostMetrics {
    pub likes: f64,
    pub shares: f64,
    pub comments: f64,
    pub saves: f64,
    pub reactions: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AudienceInsights {
    pub top_demographics: Vec<String>,
    pub engagement_by_age: BTreeMap<String, f64>,
    pub top_locations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaidPost {
    pub id: String,
    #[serde(default)]
    pub campaign_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub platform: Platform,
    #[serde(default)]
    pub ad_type: Option<String>,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub clicks: f64,
    #[serde(default)]
    pub conversions: f64,
    #[serde(default)]
    pub engagement: f64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub cpm: f64,
    #[serde(default)]
    pub cpc: f64,
    #[serde(default)]
    pub roi: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub metrics: PostMetrics,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub top_comments: Vec<Comment>,
    #[serde(default)]
    pub comment_sentiment: SentimentShare,
    #[serde(default)]
    pub audience_insights: AudienceInsights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RoiTier {
    High,
    Medium,
    Low,
}

impl RoiTier {
    pub fn from_roi(roi: f64) -> Self {
        if roi > 200.0 {
            RoiTier::High
        } else if roi > 100.0 {
            RoiTier::Medium
        } else {
            RoiTier::Low
        }
    }
}

/// Counts derived from the comments actually present on a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SentimentBreakdown {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub share: SentimentShare,
}

pub fn sentiment_breakdown(post: &PaidPost) -> SentimentBreakdown {
    let mut breakdown = SentimentBreakdown::default();
    for comment in &post.comments {
        match comment.sentiment {
            Sentiment::Positive => breakdown.positive += 1,
            Sentiment::Negative => breakdown.negative += 1,
            Sentiment::Neutral => breakdown.neutral += 1,
        }
    }
    breakdown.total = post.comments.len();

    if breakdown.total > 0 {
        let total = breakdown.total as f64;
        breakdown.share = SentimentShare {
            positive: breakdown.positive as f64 / total * 100.0,
            negative: breakdown.negative as f64 / total * 100.0,
            neutral: breakdown.neutral as f64 / total * 100.0,
        };
    }
    breakdown
}

pub fn filter_comments(post: &PaidPost, sentiment: Option<Sentiment>) -> Vec<&Comment> {
    post.comments
        .iter()
        .filter(|comment| sentiment.map_or(true, |s| comment.sentiment == s))
        .collect()
}

pub fn top_comments(post: &PaidPost, n: usize) -> &[Comment] {
    &post.top_comments[..n.min(post.top_comments.len())]
}

/// Everything the sentiment view shows for one post.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSentiment<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub platform: Platform,
    pub roi_tier: RoiTier,
    pub ctr: f64,
    pub metrics: PostMetrics,
    /// Percentages as reported by the generator.
    pub reported: SentimentShare,
    /// Counts and percentages from the comments present on the post.
    pub computed: SentimentBreakdown,
    pub filter: Option<Sentiment>,
    pub comments: Vec<&'a Comment>,
    pub top_comments: &'a [Comment],
    pub top_demographics: &'a [String],
    pub top_locations: &'a [String],
}

pub fn post_sentiment(post: &PaidPost, filter: Option<Sentiment>) -> PostSentiment<'_> {
    PostSentiment {
        id: &post.id,
        title: &post.title,
        platform: post.platform,
        roi_tier: RoiTier::from_roi(post.roi),
        ctr: post.ctr,
        metrics: post.metrics,
        reported: post.comment_sentiment,
        computed: sentiment_breakdown(post),
        filter,
        comments: filter_comments(post, filter),
        top_comments: top_comments(post, 3),
        top_demographics: &post.audience_insights.top_demographics,
        top_locations: &post.audience_insights.top_locations,
    }
}
