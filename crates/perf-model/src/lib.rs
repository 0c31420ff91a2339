pub mod employee;
pub mod normality;
pub mod tier;

pub use employee::{EMPLOYEE_ID_FIELD, EmployeeRecord, REQUIRED_FIELDS, SCORE_FIELDS, ScoredEmployee};
pub use normality::{NormalityResult, SelectionError, SelectionOutcome, StrategyFailure};
pub use tier::{CategorizedEmployee, PerformanceTier, TierThresholds};
