//! Per-behavior placement of one category's monthly total.
//!
//! Each function only computes where the money goes; the engine applies the
//! resulting [`Placement`] to the month once every plan has been validated.

use crate::engine::selector::{self, SelectionSeed};
use crate::models::{Behavior, CalendarMonth, DayType, Money, UnplacedReason};

/// Shares for one category, keyed by day of month, in ascending day order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub behavior: Behavior,
    pub shares: Vec<(u32, Money)>,
    /// Leftover cents of the even split and the day that absorbed them.
    pub rounding: Option<(u32, Money)>,
}

impl Placement {
    pub fn total(&self) -> Money {
        self.shares.iter().map(|(_, m)| *m).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Placed(Placement),
    Unplaced(UnplacedReason),
}

/// Whole amount on the anchor day, clamped to the month's last day.
pub fn place_fixed(month: &CalendarMonth, total: Money, anchor_day: u32) -> Outcome {
    if month.is_empty() {
        return Outcome::Unplaced(UnplacedReason::NoCandidateDays);
    }
    let day = anchor_day.clamp(1, month.len() as u32);
    Outcome::Placed(Placement {
        behavior: Behavior::Fixed,
        shares: vec![(day, total)],
        rounding: None,
    })
}

/// Even split over `min(frequency, weekdays)` weekdays.
pub fn place_spread(month: &CalendarMonth, seed: SelectionSeed, total: Money, frequency: u64) -> Outcome {
    let weekdays = month.days_of_type(DayType::Weekday);
    if frequency == 0 {
        return Outcome::Unplaced(UnplacedReason::ZeroFrequency);
    }
    let target = clamp_count(frequency, weekdays.len());
    let picked = selector::select(seed, &weekdays, target, &weekdays);
    split_evenly(Behavior::Spread, total, picked)
}

/// Even split over up to `cluster_cap` days, weekends first, weekdays as overflow.
///
/// A positive frequency below the cap narrows the day count further. Frequency
/// 0 leaves the cap alone, so a clustered total is always placed.
pub fn place_clustered(
    month: &CalendarMonth,
    seed: SelectionSeed,
    total: Money,
    frequency: u64,
    cluster_cap: usize,
) -> Outcome {
    let all_days = month.all_days();
    let weekends = month.days_of_type(DayType::Weekend);
    let target = cluster_target(frequency, cluster_cap).min(all_days.len());
    let picked = selector::select(seed, &all_days, target, &weekends);
    split_evenly(Behavior::Clustered, total, picked)
}

fn clamp_count(frequency: u64, available: usize) -> usize {
    usize::try_from(frequency).unwrap_or(usize::MAX).min(available)
}

pub fn cluster_target(frequency: u64, cluster_cap: usize) -> usize {
    match frequency {
        0 => cluster_cap,
        f => clamp_count(f, cluster_cap),
    }
}

/// Quotient to every day, remainder cents to the earliest day.
fn split_evenly(behavior: Behavior, total: Money, mut days: Vec<u32>) -> Outcome {
    if days.is_empty() {
        return Outcome::Unplaced(UnplacedReason::NoCandidateDays);
    }
    days.sort_unstable();

    let count = days.len() as i64;
    let cents = total.cents();
    let quotient = cents / count;
    let remainder = cents - quotient * count;

    let mut shares: Vec<(u32, Money)> = days
        .iter()
        .map(|d| (*d, Money::from_cents(quotient)))
        .collect();
    let rounding = (remainder > 0).then(|| {
        shares[0].1 = Money::from_cents(quotient + remainder);
        (days[0], Money::from_cents(remainder))
    });

    Outcome::Placed(Placement { behavior, shares, rounding })
}
