//! Spreads a user's monthly category budgets across the days of a calendar
//! month, deterministically and without losing a cent.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use config::DistributionConfig;
pub use engine::policy::BehaviorPolicy;
pub use engine::reconcile::reconcile_floor;
pub use engine::{distribute, distribute_request};
pub use error::{DistributionError, Result};
pub use models::{
    Behavior, CalendarDay, CalendarMonth, CategoryPlan, DayShortfall, DayType, DistributionRequest,
    DistributionResult, FloorShortfall, LedgerEntry, LedgerReason, Money, MoneyError, MonthKey,
    UnplacedCategory, UnplacedReason, DISCRETIONARY,
};
