//! Plain-text rendering of grids and distribution results.

use std::fmt::Write;

use crate::cli::util::{fmt_money, iso, iso_or_dash, weekday_short};
use crate::models::{CalendarDay, DistributionResult};

pub fn render_grid(days: &[CalendarDay]) -> String {
    let mut out = String::new();
    for d in days {
        let _ = writeln!(out, "{}  {}  {}", iso(&d.date()), weekday_short(&d.date()), d.day_type().as_str());
    }
    let weekends = days.iter().filter(|d| d.is_weekend()).count();
    let _ = writeln!(out, "{} days: {} weekdays, {} weekend days", days.len(), days.len() - weekends, weekends);
    out
}

pub fn render_result(result: &DistributionResult) -> String {
    let mut out = String::new();
    let key = result.calendar.key();
    let _ = writeln!(out, "Spending calendar for {} ({}-{:02})", key.user_id, key.year, key.month);
    let _ = writeln!(out);

    // ---------- Days ----------
    for d in result.calendar.days() {
        let categories = d
            .allocations()
            .iter()
            .map(|(c, m)| format!("{c}={}", fmt_money(m)))
            .collect::<Vec<_>>()
            .join(", ");
        let discretionary = if d.discretionary().is_zero() {
            String::new()
        } else {
            format!("  [discretionary {}]", fmt_money(&d.discretionary()))
        };
        let _ = writeln!(
            out,
            "{}  {}  {:<7}  {:>10}  {}{}",
            iso(&d.date()),
            weekday_short(&d.date()),
            d.day_type().as_str(),
            fmt_money(&d.total()),
            categories,
            discretionary
        );
    }
    let _ = writeln!(out, "Month total: {}", fmt_money(&result.calendar.total()));

    // ---------- Ledger ----------
    if !result.ledger.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Ledger:");
        for e in &result.ledger {
            let _ = writeln!(
                out,
                "  {:<15} {:<14} {} -> {}  {}",
                e.reason.as_str(),
                e.category,
                iso_or_dash(&e.from_day),
                iso_or_dash(&e.to_day),
                fmt_money(&e.amount)
            );
        }
    }

    if !result.unplaced.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unplaced:");
        for u in &result.unplaced {
            let _ = writeln!(out, "  {} ({}) {} {}", u.category, u.behavior, fmt_money(&u.amount), u.reason.as_str());
        }
    }

    if let Some(s) = &result.shortfall {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "WARNING: {} day(s) below the {} floor, {} missing in total",
            s.days.len(),
            fmt_money(&s.floor),
            fmt_money(&s.total_missing)
        );
    }
    out
}
