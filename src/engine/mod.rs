//! Monthly budget to calendar distribution.
//!
//! `distribute` is a pure function of its inputs: it builds a fresh grid,
//! places every category by its behavior, runs one floor reconciliation pass
//! and returns the month by value. Nothing is cached between calls.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::DistributionConfig;
use crate::error::{DistributionError, Result};
use crate::models::{
    Behavior, CalendarMonth, CategoryPlan, DistributionRequest, DistributionResult, LedgerEntry,
    Money, MonthKey, UnplacedCategory,
};

pub mod allocate;
pub mod grid;
pub mod policy;
pub mod reconcile;
pub mod selector;

use allocate::Outcome;
use selector::SelectionSeed;

/// A plan that passed validation, with its total converted to cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPlan {
    pub category_id: String,
    pub monthly_total: Money,
    pub frequency: u64,
    pub behavior_override: Option<Behavior>,
}

/// Checks every plan up front so a bad one fails the request before any
/// placement. The result is sorted by category id.
pub fn validate_plans(plans: &[CategoryPlan]) -> Result<Vec<ValidatedPlan>> {
    let mut seen = BTreeSet::new();
    let mut validated = Vec::with_capacity(plans.len());
    let mut month_total = Money::zero();

    for plan in plans {
        let id = plan.category_id.as_str();
        if id.trim().is_empty() {
            return Err(DistributionError::plan(id, "category id must not be empty"));
        }
        if !seen.insert(id) {
            return Err(DistributionError::plan(id, "category appears more than once"));
        }
        if plan.monthly_total.is_sign_negative() && !plan.monthly_total.is_zero() {
            return Err(DistributionError::plan(
                id,
                format!("monthly_total must not be negative, got {}", plan.monthly_total),
            ));
        }
        if plan.frequency < 0 {
            return Err(DistributionError::plan(
                id,
                format!("frequency must not be negative, got {}", plan.frequency),
            ));
        }
        let monthly_total =
            Money::from_decimal(plan.monthly_total).map_err(|e| DistributionError::plan(id, e.to_string()))?;
        // every day total and reconciliation sum is bounded by the month's sum
        month_total = month_total.checked_add(monthly_total).ok_or_else(|| {
            DistributionError::plan(id, "sum of monthly totals exceeds the representable range")
        })?;

        validated.push(ValidatedPlan {
            category_id: plan.category_id.clone(),
            monthly_total,
            frequency: plan.frequency as u64,
            behavior_override: plan.behavior_override,
        });
    }

    validated.sort_by(|a, b| a.category_id.cmp(&b.category_id));
    Ok(validated)
}

pub fn distribute(
    plans: &[CategoryPlan],
    key: &MonthKey,
    config: &DistributionConfig,
) -> Result<DistributionResult> {
    config.validate()?;
    let days = grid::build(key.year, key.month)?;
    let plans = validate_plans(plans)?;

    info!(
        user_id = %key.user_id,
        year = key.year,
        month = key.month,
        categories = plans.len(),
        "distributing monthly budget"
    );

    let mut month = CalendarMonth::new(key.clone(), days);
    let mut ledger = Vec::new();
    let mut unplaced = Vec::new();

    for plan in &plans {
        let behavior = plan
            .behavior_override
            .unwrap_or_else(|| config.behaviors.classify(&plan.category_id));
        let seed = SelectionSeed::derive(&key.user_id, key.year, key.month, &plan.category_id);

        let outcome = match behavior {
            Behavior::Fixed => allocate::place_fixed(
                &month,
                plan.monthly_total,
                config.anchor_day_for(&plan.category_id),
            ),
            Behavior::Spread => allocate::place_spread(&month, seed, plan.monthly_total, plan.frequency),
            Behavior::Clustered => allocate::place_clustered(
                &month,
                seed,
                plan.monthly_total,
                plan.frequency,
                config.cluster_cap,
            ),
        };

        match outcome {
            Outcome::Placed(placement) => {
                let remainder = placement.rounding.map(|(_, m)| m).unwrap_or_default();
                debug!(
                    category = %plan.category_id,
                    %behavior,
                    days = placement.shares.len(),
                    %remainder,
                    "category placed"
                );
                for (day, amount) in &placement.shares {
                    if let Some(d) = month.day_mut(*day) {
                        d.allocate(&plan.category_id, *amount);
                    }
                }
                if let Some((day, amount)) = placement.rounding {
                    if let Some(d) = month.day(day) {
                        ledger.push(LedgerEntry::rounding(&plan.category_id, d.date(), amount));
                    }
                }
            }
            Outcome::Unplaced(reason) => {
                debug!(category = %plan.category_id, %behavior, ?reason, "category not placed");
                unplaced.push(UnplacedCategory {
                    category: plan.category_id.clone(),
                    behavior,
                    amount: plan.monthly_total,
                    reason,
                });
            }
        }
    }

    let reconciliation = reconcile::reconcile_floor(&mut month, config.floor_amount);
    let shortfall = reconciliation.shortfall.clone();
    let transfers = reconciliation.transfers.len();
    ledger.extend(reconciliation.into_ledger());

    info!(
        user_id = %key.user_id,
        year = key.year,
        month = key.month,
        transfers,
        unplaced = unplaced.len(),
        shortfall = shortfall.is_some(),
        "distribution complete"
    );

    Ok(DistributionResult { calendar: month, ledger, unplaced, shortfall })
}

/// Convenience wrapper for a request read from disk.
pub fn distribute_request(request: &DistributionRequest, config: &DistributionConfig) -> Result<DistributionResult> {
    distribute(&request.categories, &request.month_key(), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn plan(id: &str, cents: i64, frequency: i64) -> CategoryPlan {
        CategoryPlan::new(id, Decimal::new(cents, 2), frequency)
    }

    #[test]
    fn validation_sorts_and_converts() {
        let plans = vec![plan("dining", 45_000, 12), plan("coffee", 60_000, 20)];
        let v = validate_plans(&plans).unwrap();
        assert_eq!(v[0].category_id, "coffee");
        assert_eq!(v[0].monthly_total.cents(), 60_000);
        assert_eq!(v[1].frequency, 12);
    }

    #[test]
    fn validation_rejects_bad_plans() {
        for bad in [
            vec![plan("rent", -1, 1)],
            vec![plan("rent", 100, -1)],
            vec![plan("  ", 100, 1)],
            vec![plan("rent", 100, 1), plan("rent", 200, 1)],
            vec![CategoryPlan::new("rent", Decimal::new(1001, 3), 1)],
        ] {
            assert!(matches!(validate_plans(&bad), Err(DistributionError::InvalidPlan { .. })));
        }
    }

    #[test]
    fn validation_rejects_overflowing_month() {
        let plans = vec![plan("rent", i64::MAX - 10, 1), plan("mortgage", 11, 1)];
        let err = validate_plans(&plans).unwrap_err();
        assert_eq!(
            err,
            DistributionError::InvalidPlan {
                category: "mortgage".into(),
                reason: "sum of monthly totals exceeds the representable range".into(),
            }
        );
        assert!(validate_plans(&[plan("rent", i64::MAX - 10, 1), plan("mortgage", 10, 1)]).is_ok());
    }

    #[test]
    fn negative_zero_total_is_accepted() {
        let negative_zero: Decimal = "-0.00".parse().unwrap();
        let plans = vec![CategoryPlan::new("rent", negative_zero, 1)];
        assert!(validate_plans(&plans).is_ok());
    }

    #[test]
    fn bad_plan_fails_whole_request() {
        let plans = vec![plan("coffee", 60_000, 20), plan("rent", -100, 1)];
        let err = distribute(&plans, &MonthKey::new("u", 2025, 9), &DistributionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            DistributionError::InvalidPlan {
                category: "rent".into(),
                reason: "monthly_total must not be negative, got -1.00".into(),
            }
        );
    }

    #[test]
    fn override_beats_policy_table() {
        let plans = vec![plan("rent", 90_000, 3).with_behavior(Behavior::Spread)];
        let result = distribute(&plans, &MonthKey::new("u", 2025, 9), &DistributionConfig::default()).unwrap();
        assert_eq!(result.funded_days("rent").len(), 3);
    }

    #[test]
    fn unplaced_categories_are_recorded() {
        let plans = vec![plan("coffee", 60_000, 0)];
        let result = distribute(&plans, &MonthKey::new("u", 2025, 9), &DistributionConfig::default()).unwrap();
        assert_eq!(result.unplaced.len(), 1);
        assert_eq!(result.unplaced[0].amount.cents(), 60_000);
        assert!(result.category_total("coffee").is_zero());
    }

    #[test]
    fn bad_calendar_is_rejected() {
        let err = distribute(&[], &MonthKey::new("u", 2025, 13), &DistributionConfig::default()).unwrap_err();
        assert!(matches!(err, DistributionError::InvalidCalendar { month: 13, .. }));
    }
}
