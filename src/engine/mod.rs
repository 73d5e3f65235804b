//! Liquidity engine
//!
//! Pure date arithmetic and survival-budget computation. Nothing in this
//! module touches storage or the wall clock; callers pass "today" in.

pub mod calendar;
pub mod liquidity;

pub use calendar::{days_in_month, days_until, deadline_date, has_day_changed};
pub use liquidity::{
    IncomeWindow, LiquidityEngine, LiquidityReport, LiquiditySnapshot, ObligationOutlook,
    DEFAULT_UNCONSTRAINED_DIVISOR,
};
