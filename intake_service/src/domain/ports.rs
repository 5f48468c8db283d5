//! Storage port: the single interface every backend implements.
//!
//! Callers never branch on backend identity; Postgres, MySQL, the
//! unconfigured placeholder and the in-memory test store all sit behind this
//! trait.

use crate::domain::error::Result;
use models_intake::{Beneficiary, BeneficiaryDraft, BeneficiaryPatch};

/// Persistence operations for beneficiary records.
pub trait BeneficiaryStore: Send + Sync + 'static {
    /// All records, newest first.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Beneficiary>>> + Send;

    /// A single record, or `None` when the id is unknown. Not-found is not
    /// an error.
    fn get(&self, id: &str) -> impl std::future::Future<Output = Result<Option<Beneficiary>>> + Send;

    /// Insert a new record, returning the stored form with generated id and
    /// creation timestamp.
    fn create(
        &self,
        draft: BeneficiaryDraft,
    ) -> impl std::future::Future<Output = Result<Beneficiary>> + Send;

    /// Apply a partial update in a single statement. Only fields present in
    /// the patch are modified. Returns `None` when the id is unknown.
    fn update(
        &self,
        id: &str,
        patch: BeneficiaryPatch,
    ) -> impl std::future::Future<Output = Result<Option<Beneficiary>>> + Send;

    /// Delete a record, returning whether a row was removed.
    fn delete(&self, id: &str) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// The highest case number currently stored, or `None` on an empty
    /// table.
    fn max_case_number(&self) -> impl std::future::Future<Output = Result<Option<i64>>> + Send;
}
