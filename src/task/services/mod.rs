//! Application services for the task board.

mod board;
mod planner;

pub use board::TaskBoardService;
pub use planner::{
    PlanOutcome, PlanRequest, PlanningError, PlanningResult, PlanningService,
    REMEMBERED_SUBMISSIONS,
};
