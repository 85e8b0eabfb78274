use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Behavior, CalendarMonth, Money};

/// Ledger category used for floor transfers and shortfalls.
pub const DISCRETIONARY: &str = "discretionary";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerReason {
    Rounding,
    FloorTransfer,
    FloorShortfall,
}

impl LedgerReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LedgerReason::Rounding => "rounding",
            LedgerReason::FloorTransfer => "floor_transfer",
            LedgerReason::FloorShortfall => "floor_shortfall",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub category: String,
    pub from_day: Option<NaiveDate>,
    pub to_day: Option<NaiveDate>,
    pub amount: Money,
    pub reason: LedgerReason,
}

impl LedgerEntry {
    /// Leftover cents of an even split, credited to `day`.
    pub fn rounding(category: &str, day: NaiveDate, amount: Money) -> Self {
        Self {
            category: category.to_string(),
            from_day: None,
            to_day: Some(day),
            amount,
            reason: LedgerReason::Rounding,
        }
    }

    pub fn floor_transfer(from: NaiveDate, to: NaiveDate, amount: Money) -> Self {
        Self {
            category: DISCRETIONARY.to_string(),
            from_day: Some(from),
            to_day: Some(to),
            amount,
            reason: LedgerReason::FloorTransfer,
        }
    }

    pub fn floor_shortfall(day: NaiveDate, missing: Money) -> Self {
        Self {
            category: DISCRETIONARY.to_string(),
            from_day: None,
            to_day: Some(day),
            amount: missing,
            reason: LedgerReason::FloorShortfall,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayShortfall {
    pub date: NaiveDate,
    pub missing: Money,
}

/// Days the floor pass could not lift, because the month's money ran out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorShortfall {
    pub floor: Money,
    pub days: Vec<DayShortfall>,
    pub total_missing: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    ZeroFrequency,
    NoCandidateDays,
}

impl UnplacedReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnplacedReason::ZeroFrequency => "zero_frequency",
            UnplacedReason::NoCandidateDays => "no_candidate_days",
        }
    }
}

/// A category that received no days, with the amount left unallocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnplacedCategory {
    pub category: String,
    pub behavior: Behavior,
    pub amount: Money,
    pub reason: UnplacedReason,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionResult {
    pub calendar: CalendarMonth,
    pub ledger: Vec<LedgerEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unplaced: Vec<UnplacedCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortfall: Option<FloorShortfall>,
}

impl DistributionResult {
    pub fn category_total(&self, category: &str) -> Money {
        self.calendar.category_total(category)
    }

    /// Day numbers carrying a non-zero share of `category`.
    pub fn funded_days(&self, category: &str) -> Vec<u32> {
        self.calendar
            .days()
            .iter()
            .filter(|d| d.allocation(category).is_positive())
            .map(|d| d.day())
            .collect()
    }

    pub fn discretionary_net(&self) -> Money {
        self.calendar.discretionary_net()
    }

    pub fn entries(&self, reason: LedgerReason) -> impl Iterator<Item = &LedgerEntry> {
        self.ledger.iter().filter(move |e| e.reason == reason)
    }

    pub fn has_shortfall(&self) -> bool {
        self.shortfall.is_some()
    }
}
