//! Outbound adapters: persistence backends implementing
//! [`BeneficiaryStore`].

pub mod memory;
pub mod mysql;
pub mod postgres;

use crate::domain::error::{Result, StoreError};
use crate::domain::ports::BeneficiaryStore;
use models_intake::{Beneficiary, BeneficiaryDraft, BeneficiaryPatch};

pub use memory::MemoryStore;
pub use mysql::MySqlStore;
pub use postgres::PostgresStore;

/// The store selected at startup from `DATABASE_URL`. `Unconfigured` keeps
/// the service up without a database: every operation reports
/// [`StoreError::Unconfigured`] and the HTTP layer degrades reads and
/// rejects writes.
pub enum Store {
    Postgres(PostgresStore),
    MySql(MySqlStore),
    Unconfigured,
}

impl BeneficiaryStore for Store {
    async fn list(&self) -> Result<Vec<Beneficiary>> {
        match self {
            Store::Postgres(store) => store.list().await,
            Store::MySql(store) => store.list().await,
            Store::Unconfigured => Err(StoreError::Unconfigured),
        }
    }

    async fn get(&self, id: &str) -> Result<Option<Beneficiary>> {
        match self {
            Store::Postgres(store) => store.get(id).await,
            Store::MySql(store) => store.get(id).await,
            Store::Unconfigured => Err(StoreError::Unconfigured),
        }
    }

    async fn create(&self, draft: BeneficiaryDraft) -> Result<Beneficiary> {
        match self {
            Store::Postgres(store) => store.create(draft).await,
            Store::MySql(store) => store.create(draft).await,
            Store::Unconfigured => Err(StoreError::Unconfigured),
        }
    }

    async fn update(&self, id: &str, patch: BeneficiaryPatch) -> Result<Option<Beneficiary>> {
        match self {
            Store::Postgres(store) => store.update(id, patch).await,
            Store::MySql(store) => store.update(id, patch).await,
            Store::Unconfigured => Err(StoreError::Unconfigured),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        match self {
            Store::Postgres(store) => store.delete(id).await,
            Store::MySql(store) => store.delete(id).await,
            Store::Unconfigured => Err(StoreError::Unconfigured),
        }
    }

    async fn max_case_number(&self) -> Result<Option<i64>> {
        match self {
            Store::Postgres(store) => store.max_case_number().await,
            Store::MySql(store) => store.max_case_number().await,
            Store::Unconfigured => Err(StoreError::Unconfigured),
        }
    }
}
