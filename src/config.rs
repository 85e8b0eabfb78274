use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::policy::BehaviorPolicy;
use crate::error::{DistributionError, Result};
use crate::models::Money;

pub const ENV_FLOOR: &str = "SPENDING_CALENDAR_FLOOR";
pub const ENV_CLUSTER_CAP: &str = "SPENDING_CALENDAR_CLUSTER_CAP";
pub const ENV_ANCHOR_DAY: &str = "SPENDING_CALENDAR_ANCHOR_DAY";

pub const DEFAULT_CLUSTER_CAP: usize = 4;
pub const DEFAULT_ANCHOR_DAY: u32 = 1;

const MAX_DAYS_IN_MONTH: i64 = 31;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Minimum total every day must reach after reconciliation.
    pub floor_amount: Money,
    /// Anchor day per FIXED category. Days past month end clamp to the last day.
    pub fixed_anchor_days: BTreeMap<String, u32>,
    /// Anchor for FIXED categories missing from `fixed_anchor_days`.
    pub default_anchor_day: u32,
    /// Upper bound on the number of CLUSTERED days.
    pub cluster_cap: usize,
    pub behaviors: BehaviorPolicy,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        let fixed_anchor_days = [("rent", 1), ("mortgage", 1)]
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        Self {
            floor_amount: Money::zero(),
            fixed_anchor_days,
            default_anchor_day: DEFAULT_ANCHOR_DAY,
            cluster_cap: DEFAULT_CLUSTER_CAP,
            behaviors: BehaviorPolicy::standard(),
        }
    }
}

impl DistributionConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| DistributionError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DistributionError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    /// Defaults with any `SPENDING_CALENDAR_*` variables applied on top.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    pub(crate) fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_FLOOR) {
            self.floor_amount = raw
                .parse()
                .map_err(|e| DistributionError::InvalidConfig(format!("{ENV_FLOOR}: {e}")))?;
        }
        if let Some(raw) = lookup(ENV_CLUSTER_CAP) {
            self.cluster_cap = raw
                .trim()
                .parse()
                .map_err(|e| DistributionError::InvalidConfig(format!("{ENV_CLUSTER_CAP}: {e}")))?;
        }
        if let Some(raw) = lookup(ENV_ANCHOR_DAY) {
            self.default_anchor_day = raw
                .trim()
                .parse()
                .map_err(|e| DistributionError::InvalidConfig(format!("{ENV_ANCHOR_DAY}: {e}")))?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.floor_amount.is_negative() {
            return Err(DistributionError::InvalidConfig(format!(
                "floor_amount must not be negative, got {}",
                self.floor_amount
            )));
        }
        // a month's floor requirement must fit in cents
        if self.floor_amount.checked_mul(MAX_DAYS_IN_MONTH).is_none() {
            return Err(DistributionError::InvalidConfig(format!(
                "floor_amount {} is out of range",
                self.floor_amount
            )));
        }
        if self.cluster_cap == 0 {
            return Err(DistributionError::InvalidConfig("cluster_cap must be at least 1".into()));
        }
        check_anchor("default_anchor_day", self.default_anchor_day)?;
        for (category, day) in &self.fixed_anchor_days {
            check_anchor(category, *day)?;
        }
        Ok(())
    }

    pub fn anchor_day_for(&self, category_id: &str) -> u32 {
        self.fixed_anchor_days
            .get(category_id)
            .copied()
            .unwrap_or(self.default_anchor_day)
    }

    pub fn with_floor(mut self, floor: Money) -> Self {
        self.floor_amount = floor;
        self
    }

    pub fn with_anchor(mut self, category: impl Into<String>, day: u32) -> Self {
        self.fixed_anchor_days.insert(category.into(), day);
        self
    }

    pub fn with_cluster_cap(mut self, cap: usize) -> Self {
        self.cluster_cap = cap;
        self
    }
}

fn check_anchor(name: &str, day: u32) -> Result<()> {
    if (1..=31).contains(&day) {
        Ok(())
    } else {
        Err(DistributionError::InvalidConfig(format!(
            "anchor day for '{name}' must be between 1 and 31, got {day}"
        )))
    }
}
