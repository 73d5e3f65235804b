//! Service layer for JournalMe
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, score keeping, day boundaries and cross-entity
//! operations such as clearing income into the balance.

pub mod advisor;
pub mod day;
pub mod debt;
pub mod finance;
pub mod goal;
pub mod income;
pub mod journal;
pub mod obligation;
pub mod task;

pub use advisor::{
    AdvisorService, CommandPlanner, Plan, PlanContext, PlanGenerator, PlanSource, StaticPlanner,
};
pub use day::{DayOutcome, DayService, TaskJudgement};
pub use debt::DebtService;
pub use finance::FinanceService;
pub use goal::GoalService;
pub use income::IncomeService;
pub use journal::JournalService;
pub use obligation::ObligationService;
pub use task::TaskService;
