pub mod annuity;
pub mod error;
pub mod simulation;
pub mod types;

pub use error::LoanGuardError;
pub use simulation::{
    simulate_overpayment, LoanParameters, ScheduleDetail, ScheduleEntry, SimulationSummary,
};
pub use types::*;

/// Standard result type for all loanguard operations
pub type LoanGuardResult<T> = Result<T, LoanGuardError>;
