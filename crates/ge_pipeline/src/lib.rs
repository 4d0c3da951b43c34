//! ge_pipeline: one simulation session over a loaded catalog.
//!
//! `Simulation` owns the catalog, params and ledger. Every accepted mutation
//! recomputes the aggregate and then notifies subscribed observers; rejected
//! mutations change nothing and notify no one. JSON/hashing lives in `ge_io`,
//! math in `ge_algo`.

#![forbid(unsafe_code)]

use thiserror::Error;

use ge_algo::{AggregateError, AssignError};

pub mod validate;
pub mod simulation;
pub mod build_result;

pub use build_result::{build_result, LedgerRow, Rejection, ResultDoc, WinnerRow};
pub use simulation::{Cause, DistrictView, Recomputed, Simulation, SimulationObserver};
pub use validate::{validate_catalog, EntityRef, Severity, ValidationIssue, ValidationReport};

/// Single error surface for a simulation session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The ledger refused the assignment; state is unchanged.
    #[error("rejected: {0}")]
    Rejected(#[from] AssignError),

    /// Malformed caller input (blank district, bad party token, pct > 100).
    #[error("invalid input: {0}")]
    Input(String),

    /// The catalog failed validation for a reason other than seat totals.
    #[error("invalid catalog: {0}")]
    Validation(String),

    /// Seat totals do not reconcile with the size of Parliament.
    #[error("data integrity: {0}")]
    DataIntegrity(String),

    #[error(transparent)]
    Io(#[from] ge_io::IoError),
}

impl EngineError {
    /// True for errors the caller can shrug off and keep simulating.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::Rejected(_) | EngineError::Input(_))
    }
}

impl From<AggregateError> for EngineError {
    fn from(e: AggregateError) -> Self {
        EngineError::DataIntegrity(e.to_string())
    }
}

impl From<ge_core::CoreError> for EngineError {
    fn from(e: ge_core::CoreError) -> Self {
        EngineError::Input(e.to_string())
    }
}
