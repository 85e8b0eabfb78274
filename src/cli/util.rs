use chrono::{Datelike, NaiveDate};

use crate::models::Money;

pub fn fmt_money(m: &Money) -> String {
    m.to_string()
}

pub fn iso(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

pub fn weekday_short(d: &NaiveDate) -> String {
    d.weekday().to_string()
}

/// `Some(day)` rendered as ISO, `None` as a dash.
pub fn iso_or_dash(d: &Option<NaiveDate>) -> String {
    d.as_ref().map(iso).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        let d = NaiveDate::from_ymd_opt(2025, 9, 6).unwrap();
        assert_eq!(iso(&d), "2025-09-06");
        assert_eq!(weekday_short(&d), "Sat");
        assert_eq!(iso_or_dash(&None), "-");
        assert_eq!(fmt_money(&Money::from_cents(4000)), "40.00");
    }
}
