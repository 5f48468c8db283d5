//! In-memory store used by tests and local development without a database.

use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::error::Result;
use crate::domain::ports::BeneficiaryStore;
use models_intake::{Beneficiary, BeneficiaryDraft, BeneficiaryPatch};

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Beneficiary>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BeneficiaryStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Beneficiary>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().rev().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<Beneficiary>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, draft: BeneficiaryDraft) -> Result<Beneficiary> {
        let record = Beneficiary::from_draft(Uuid::new_v4().to_string(), Utc::now(), draft);
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: BeneficiaryPatch) -> Result<Option<Beneficiary>> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                patch.apply(record);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn max_case_number(&self) -> Result<Option<i64>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().filter_map(|r| r.caso_numero).max())
    }
}
