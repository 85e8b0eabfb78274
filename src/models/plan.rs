use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MonthKey;

/// How a category's spending is laid out over a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Behavior {
    /// Whole amount on one anchor day.
    #[serde(alias = "fixed")]
    Fixed,
    /// Even shares across weekdays.
    #[serde(alias = "spread")]
    Spread,
    /// A handful of larger shares, weekends first.
    #[serde(alias = "clustered")]
    Clustered,
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "FIXED",
            Self::Spread => "SPREAD",
            Self::Clustered => "CLUSTERED",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Behavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIXED" => Ok(Self::Fixed),
            "SPREAD" => Ok(Self::Spread),
            "CLUSTERED" => Ok(Self::Clustered),
            other => Err(format!("unknown behavior '{other}'")),
        }
    }
}

/// One category's monthly budget as handed over by the budgeting side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPlan {
    pub category_id: String,
    pub monthly_total: Decimal,
    pub frequency: i64,          // occurrences per month
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior_override: Option<Behavior>,
}

impl CategoryPlan {
    pub fn new(category_id: impl Into<String>, monthly_total: Decimal, frequency: i64) -> Self {
        Self {
            category_id: category_id.into(),
            monthly_total,
            frequency,
            behavior_override: None,
        }
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior_override = Some(behavior);
        self
    }
}

/// A full distribution request as read from disk by the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionRequest {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub categories: Vec<CategoryPlan>,
}

impl DistributionRequest {
    pub fn month_key(&self) -> MonthKey {
        MonthKey::new(self.user_id.clone(), self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behavior_accepts_either_case() {
        let b: Behavior = serde_json::from_str("\"CLUSTERED\"").unwrap();
        assert_eq!(b, Behavior::Clustered);
        let b: Behavior = serde_json::from_str("\"fixed\"").unwrap();
        assert_eq!(b, Behavior::Fixed);
        assert_eq!("Spread".parse::<Behavior>().unwrap(), Behavior::Spread);
        assert!("weekly".parse::<Behavior>().is_err());
    }

    #[test]
    fn request_parses_from_json() {
        let raw = r#"{
            "user_id": "u-42",
            "year": 2025,
            "month": 9,
            "categories": [
                {"category_id": "rent", "monthly_total": "1500", "frequency": 1, "behavior_override": "FIXED"},
                {"category_id": "coffee", "monthly_total": 600, "frequency": 20}
            ]
        }"#;
        let req: DistributionRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.categories.len(), 2);
        assert_eq!(req.categories[0].behavior_override, Some(Behavior::Fixed));
        assert_eq!(req.categories[1].monthly_total, Decimal::new(600, 0));
        assert_eq!(req.categories[1].behavior_override, None);
        assert_eq!(req.month_key(), MonthKey::new("u-42", 2025, 9));
    }
}
