//! Kit rating summaries.

use crate::ids::SetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single customer review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: i64,
    /// Star rating, 1 to 5.
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn author(&self) -> &str {
        self.customer_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Anonymous")
    }

    /// Rating rendered as filled and empty stars.
    pub fn stars(&self) -> String {
        let filled = self.rating.min(5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

/// Aggregate rating for one kit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetRatingSummary {
    pub set_id: SetId,
    /// Mean rating; absent when the kit has no reviews.
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl SetRatingSummary {
    pub fn has_reviews(&self) -> bool {
        self.review_count > 0
    }

    /// Average rounded to one decimal, e.g. `"4.3"`, or `"No ratings yet"`.
    pub fn average_label(&self) -> String {
        match self.average_rating {
            Some(avg) if self.has_reviews() && avg.is_finite() => format!("{avg:.1}"),
            _ => "No ratings yet".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary() {
        let json = r#"{
            "set_id": 12,
            "average_rating": 4.333,
            "review_count": 3,
            "reviews": [
                {"id": 1, "rating": 5, "comment": "Great kit", "customer_name": "Sam",
                 "created_at": "2026-05-02T10:00:00Z"},
                {"id": 2, "rating": 4},
                {"id": 3, "rating": 4, "customer_name": ""}
            ]
        }"#;
        let summary: SetRatingSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.set_id, SetId::new(12));
        assert_eq!(summary.average_label(), "4.3");
        assert_eq!(summary.reviews[0].author(), "Sam");
        assert_eq!(summary.reviews[2].author(), "Anonymous");
        assert_eq!(summary.reviews[1].stars(), "★★★★☆");
        assert!(summary.reviews[0].created_at.is_some());
    }

    #[test]
    fn test_unrated_kit() {
        let summary: SetRatingSummary = serde_json::from_str(r#"{"set_id": 4}"#).unwrap();
        assert!(!summary.has_reviews());
        assert_eq!(summary.average_label(), "No ratings yet");
    }
}
