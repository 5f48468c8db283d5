//! Domain layer: the storage port, the intake service, and report
//! aggregation.

pub mod error;
pub mod ports;
pub mod reports;
pub mod service;

pub use error::StoreError;
pub use ports::BeneficiaryStore;
pub use service::{IntakeService, NextCaseNumber};
