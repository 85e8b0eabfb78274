use chrono::{Datelike, NaiveDate};

use crate::error::{DistributionError, Result};
use crate::models::CalendarDay;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2200;

/// Builds the ordered days of `year`-`month`, each tagged weekday or weekend.
pub fn build(year: i32, month: u32) -> Result<Vec<CalendarDay>> {
    let first = first_day(year, month)?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(CalendarDay::new)
        .collect())
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = first_day(year, month)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| DistributionError::calendar(year, month, "date out of range"))?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

fn first_day(year: i32, month: u32) -> Result<NaiveDate> {
    if !(1..=12).contains(&month) {
        return Err(DistributionError::calendar(year, month, "month must be between 1 and 12"));
    }
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(DistributionError::calendar(
            year,
            month,
            format!("year must be between {MIN_YEAR} and {MAX_YEAR}"),
        ));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DistributionError::calendar(year, month, "date out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayType;

    #[test]
    fn september_2025_has_22_weekdays() {
        let days = build(2025, 9).unwrap();
        assert_eq!(days.len(), 30);
        assert_eq!(days[0].day(), 1);
        assert_eq!(days[29].day(), 30);
        let weekends = days.iter().filter(|d| d.day_type() == DayType::Weekend).count();
        assert_eq!(weekends, 8);
        assert_eq!(days.len() - weekends, 22);
    }

    #[test]
    fn days_are_in_date_order() {
        let days = build(2024, 2).unwrap();
        assert_eq!(days.len(), 29);
        assert!(days.windows(2).all(|w| w[0].date() < w[1].date()));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2025, 12).unwrap(), 31);
        assert_eq!(days_in_month(2025, 4).unwrap(), 30);
    }

    #[test]
    fn rejects_bad_month_and_year() {
        assert!(matches!(build(2025, 0), Err(DistributionError::InvalidCalendar { .. })));
        assert!(matches!(build(2025, 13), Err(DistributionError::InvalidCalendar { .. })));
        assert!(matches!(build(1800, 5), Err(DistributionError::InvalidCalendar { .. })));
        assert!(matches!(build(MAX_YEAR + 1, 5), Err(DistributionError::InvalidCalendar { .. })));
    }

    #[test]
    fn same_input_same_grid() {
        assert_eq!(build(2026, 10).unwrap(), build(2026, 10).unwrap());
    }
}
