//! Floor reconciliation.
//!
//! Lifts every day below the floor by moving discretionary money off the days
//! with the most surplus. Only the signed discretionary bucket moves; category
//! allocations are left exactly as placed. Running the pass again on its own
//! output is a no-op.

use tracing::{debug, warn};

use crate::models::{CalendarDay, CalendarMonth, DayShortfall, FloorShortfall, LedgerEntry, Money};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub transfers: Vec<LedgerEntry>,
    pub shortfall: Option<FloorShortfall>,
}

impl Reconciliation {
    /// Transfers followed by one shortfall entry per unresolved day.
    pub fn into_ledger(self) -> Vec<LedgerEntry> {
        let mut ledger = self.transfers;
        if let Some(shortfall) = self.shortfall {
            ledger.extend(
                shortfall
                    .days
                    .iter()
                    .map(|d| LedgerEntry::floor_shortfall(d.date, d.missing)),
            );
        }
        ledger
    }
}

/// Deficit days are visited in date order. Each draws from the day with the
/// largest surplus over the floor (earliest date on ties) until it reaches the
/// floor or no day has anything left to give. Donors never drop below the
/// floor, so days above twice the floor are always drained first.
pub fn reconcile_floor(month: &mut CalendarMonth, floor: Money) -> Reconciliation {
    if !floor.is_positive() {
        return Reconciliation::default();
    }
    let floor_cents = floor.cents();
    let days = month.days_mut();
    let mut transfers = Vec::new();

    for idx in 0..days.len() {
        loop {
            let need = floor_cents - days[idx].total().cents();
            if need <= 0 {
                break;
            }
            let Some(donor) = richest_donor(days, floor_cents) else {
                break;
            };
            let headroom = days[donor].total().cents() - floor_cents;
            let amount = Money::from_cents(need.min(headroom));

            days[donor].adjust_discretionary(-amount);
            days[idx].adjust_discretionary(amount);
            debug!(
                from = %days[donor].date(),
                to = %days[idx].date(),
                %amount,
                "floor transfer"
            );
            transfers.push(LedgerEntry::floor_transfer(days[donor].date(), days[idx].date(), amount));
        }
    }

    let shortfall = collect_shortfall(days, floor);
    if let Some(s) = &shortfall {
        warn!(
            days = s.days.len(),
            total_missing = %s.total_missing,
            %floor,
            "monthly totals cannot cover the daily floor"
        );
    }

    Reconciliation { transfers, shortfall }
}

fn richest_donor(days: &[CalendarDay], floor_cents: i64) -> Option<usize> {
    days.iter()
        .enumerate()
        .map(|(i, d)| (i, d.total().cents() - floor_cents))
        .filter(|(_, surplus)| *surplus > 0)
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
        .map(|(i, _)| i)
}

fn collect_shortfall(days: &[CalendarDay], floor: Money) -> Option<FloorShortfall> {
    let missing: Vec<DayShortfall> = days
        .iter()
        .filter(|d| d.total() < floor)
        .map(|d| DayShortfall { date: d.date(), missing: floor - d.total() })
        .collect();
    if missing.is_empty() {
        return None;
    }
    let total_missing = missing.iter().map(|d| d.missing).sum();
    Some(FloorShortfall { floor, days: missing, total_missing })
}
