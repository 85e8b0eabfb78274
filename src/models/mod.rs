pub mod money;
pub mod calendar;
pub mod plan;
pub mod ledger;


pub use money::{Money, MoneyError};
pub use calendar::{CalendarDay, CalendarMonth, DayType, MonthKey};
pub use plan::{Behavior, CategoryPlan, DistributionRequest};
pub use ledger::{
    DayShortfall, DistributionResult, FloorShortfall, LedgerEntry, LedgerReason,
    UnplacedCategory, UnplacedReason, DISCRETIONARY,
};
