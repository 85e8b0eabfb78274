use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _ => DayType::Weekday,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekday => "weekday",
            Self::Weekend => "weekend",
        }
    }
}

/// Identity of one distribution run: whose month, and which month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(user_id: impl Into<String>, year: i32, month: u32) -> Self {
        Self { user_id: user_id.into(), year, month }
    }
}

/// One calendar date and everything allocated to it.
///
/// Category allocations are never negative. The discretionary adjustment is
/// the signed floor-transfer bucket; it nets to zero across a month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    date: NaiveDate,
    day_type: DayType,
    allocations: BTreeMap<String, Money>,
    discretionary: Money,
}

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            day_type: DayType::of(date),
            allocations: BTreeMap::new(),
            discretionary: Money::zero(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Day of month, starting at 1.
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn day_type(&self) -> DayType {
        self.day_type
    }

    pub fn is_weekend(&self) -> bool {
        self.day_type == DayType::Weekend
    }

    pub fn allocations(&self) -> &BTreeMap<String, Money> {
        &self.allocations
    }

    pub fn allocation(&self, category: &str) -> Money {
        self.allocations.get(category).copied().unwrap_or_default()
    }

    pub fn discretionary(&self) -> Money {
        self.discretionary
    }

    pub fn category_sum(&self) -> Money {
        self.allocations.values().sum()
    }

    pub fn total(&self) -> Money {
        self.category_sum() + self.discretionary
    }

    pub(crate) fn allocate(&mut self, category: &str, amount: Money) {
        if amount.is_zero() {
            return;
        }
        *self.allocations.entry(category.to_string()).or_default() += amount;
    }

    pub(crate) fn adjust_discretionary(&mut self, delta: Money) {
        self.discretionary += delta;
    }
}

impl Serialize for CalendarDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CalendarDay", 6)?;
        s.serialize_field("date", &self.date)?;
        s.serialize_field("day", &self.day())?;
        s.serialize_field("day_type", &self.day_type)?;
        s.serialize_field("categories", &self.allocations)?;
        s.serialize_field("discretionary", &self.discretionary)?;
        s.serialize_field("total", &self.total())?;
        s.end()
    }
}

/// The ordered day grid for one user's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarMonth {
    #[serde(flatten)]
    key: MonthKey,
    days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn new(key: MonthKey, days: Vec<CalendarDay>) -> Self {
        Self { key, days }
    }

    pub fn key(&self) -> &MonthKey {
        &self.key
    }

    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Looks a day up by its day of month.
    pub fn day(&self, day: u32) -> Option<&CalendarDay> {
        self.days.get((day as usize).checked_sub(1)?)
    }

    pub(crate) fn day_mut(&mut self, day: u32) -> Option<&mut CalendarDay> {
        self.days.get_mut((day as usize).checked_sub(1)?)
    }

    pub(crate) fn days_mut(&mut self) -> &mut [CalendarDay] {
        &mut self.days
    }

    pub fn days_of_type(&self, day_type: DayType) -> Vec<u32> {
        self.days
            .iter()
            .filter(|d| d.day_type == day_type)
            .map(CalendarDay::day)
            .collect()
    }

    pub fn all_days(&self) -> Vec<u32> {
        self.days.iter().map(CalendarDay::day).collect()
    }

    pub fn category_total(&self, category: &str) -> Money {
        self.days.iter().map(|d| d.allocation(category)).sum()
    }

    pub fn discretionary_net(&self) -> Money {
        self.days.iter().map(CalendarDay::discretionary).sum()
    }

    pub fn total(&self) -> Money {
        self.days.iter().map(CalendarDay::total).sum()
    }
}
