//! Generated recommendations shown next to a company's campaigns.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Performance,
    Audience,
    Content,
    Timing,
    Budget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InsightKind::Performance => "performance",
            InsightKind::Audience => "audience",
            InsightKind::Content => "content",
            InsightKind::Timing => "timing",
            InsightKind::Budget => "budget",
        })
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Impact::High => "high",
            Impact::Medium => "medium",
            Impact::Low => "low",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recommendation: String,
    pub impact: Impact,
    #[serde(default)]
    pub confidence: f64,
}

/// High impact first; input order is kept within an impact level.
pub fn by_impact(insights: &[Insight]) -> Vec<&Insight> {
    let mut ordered: Vec<&Insight> = insights.iter().collect();
    ordered.sort_by_key(|insight| insight.impact);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insight(id: &str, impact: Impact) -> Insight {
        Insight {
            id: id.to_string(),
            kind: InsightKind::Timing,
            title: "Post earlier".to_string(),
            description: String::new(),
            recommendation: "Shift launches to 9am".to_string(),
            impact,
            confidence: 0.8,
        }
    }

    #[test]
    fn deserializes_generator_shape() {
        let raw = r#"{
            "id": "i-1",
            "type": "budget",
            "title": "Rebalance spend",
            "description": "TikTok returns more per dollar",
            "recommendation": "Move 10% of YouTube budget",
            "impact": "high",
            "confidence": 87
        }"#;
        let parsed: Insight = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.kind, InsightKind::Budget);
        assert_eq!(parsed.impact, Impact::High);
        assert!((parsed.confidence - 87.0).abs() < 0.001);
    }

    #[test]
    fn high_impact_comes_first_and_ties_keep_order() {
        let insights = vec![
            insight("low", Impact::Low),
            insight("high-1", Impact::High),
            insight("medium", Impact::Medium),
            insight("high-2", Impact::High),
        ];
        let ids: Vec<&str> = by_impact(&insights).iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["high-1", "high-2", "medium", "low"]);
    }
}
