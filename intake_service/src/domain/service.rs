//! Intake service: the domain operations behind the HTTP handlers.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::error::{Result, StoreError};
use crate::domain::ports::BeneficiaryStore;
use crate::domain::reports::{self, ReportSummary};
use models_intake::{api::BeneficiaryInput, Beneficiary};

/// The next case number to hand to the form, with a marker for whether the
/// value came from the fallback path rather than the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextCaseNumber {
    pub next_case_number: i64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

/// Domain operations over one [`BeneficiaryStore`].
pub struct IntakeService<S> {
    store: S,
}

impl<S: BeneficiaryStore> IntakeService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All records, newest first.
    pub async fn list(&self) -> Result<Vec<Beneficiary>> {
        self.store.list().await
    }

    /// One record, or `None` when unknown.
    pub async fn get(&self, id: &str) -> Result<Option<Beneficiary>> {
        self.store.get(id).await
    }

    /// Normalize UI-shaped input and insert it.
    pub async fn create(&self, input: BeneficiaryInput) -> Result<Beneficiary> {
        self.store.create(input.into_draft()).await
    }

    /// Normalize UI-shaped input into a patch and apply it. An empty patch
    /// is a no-op read, not an error.
    pub async fn update(&self, id: &str, input: BeneficiaryInput) -> Result<Option<Beneficiary>> {
        let patch = input.into_patch();
        if patch.is_empty() {
            return self.store.get(id).await;
        }
        self.store.update(id, patch).await
    }

    /// Delete a record, returning whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.store.delete(id).await
    }

    /// Max stored case number plus one, or 1 on an empty store. Any query
    /// failure falls back to 1 rather than surfacing an error; the form can
    /// always render.
    pub async fn next_case_number(&self) -> NextCaseNumber {
        match self.store.max_case_number().await {
            Ok(Some(max)) => NextCaseNumber {
                next_case_number: max + 1,
                fallback: false,
            },
            Ok(None) => NextCaseNumber {
                next_case_number: 1,
                fallback: false,
            },
            Err(StoreError::Unconfigured) => NextCaseNumber {
                next_case_number: 1,
                fallback: true,
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to read max case number, falling back");
                NextCaseNumber {
                    next_case_number: 1,
                    fallback: true,
                }
            }
        }
    }

    /// Full-collection statistics summary.
    pub async fn report_summary(&self) -> Result<ReportSummary> {
        let records = self.store.list().await?;
        Ok(reports::summarize(&records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::memory::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn input(value: serde_json::Value) -> BeneficiaryInput {
        serde_json::from_value(value).expect("valid input payload")
    }

    #[tokio::test]
    async fn next_case_number_on_empty_store_is_one() {
        let service = IntakeService::new(MemoryStore::default());
        let next = service.next_case_number().await;
        assert_eq!(next.next_case_number, 1);
        assert!(!next.fallback);
    }

    #[tokio::test]
    async fn next_case_number_is_max_plus_one() {
        let service = IntakeService::new(MemoryStore::default());
        service
            .create(input(json!({ "casoNumero": 4 })))
            .await
            .unwrap();
        service
            .create(input(json!({ "casoNumero": 9 })))
            .await
            .unwrap();
        assert_eq!(service.next_case_number().await.next_case_number, 10);
    }

    #[tokio::test]
    async fn empty_partial_update_leaves_record_unchanged() {
        let service = IntakeService::new(MemoryStore::default());
        let created = service
            .create(input(json!({ "nombreApellido": "Ana", "localidad": "Suba" })))
            .await
            .unwrap();

        let updated = service
            .update(&created.id, input(json!({})))
            .await
            .unwrap()
            .expect("record exists");
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn update_modifies_only_present_fields() {
        let service = IntakeService::new(MemoryStore::default());
        let created = service
            .create(input(json!({ "nombreApellido": "Ana", "localidad": "Suba" })))
            .await
            .unwrap();

        let updated = service
            .update(&created.id, input(json!({ "localidad": "Bosa" })))
            .await
            .unwrap()
            .expect("record exists");
        assert_eq!(updated.localidad.as_deref(), Some("Bosa"));
        assert_eq!(updated.nombre_apellido.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let service = IntakeService::new(MemoryStore::default());
        let first = service
            .create(input(json!({ "nombreApellido": "Primero" })))
            .await
            .unwrap();
        let second = service
            .create(input(json!({ "nombreApellido": "Segundo" })))
            .await
            .unwrap();

        let records = service.list().await.unwrap();
        assert_eq!(records[0].id, second.id);
        assert_eq!(records[1].id, first.id);
    }

    #[tokio::test]
    async fn delete_then_get_yields_none() {
        let service = IntakeService::new(MemoryStore::default());
        let created = service.create(input(json!({}))).await.unwrap();
        assert!(service.delete(&created.id).await.unwrap());
        assert_eq!(service.get(&created.id).await.unwrap(), None);
        assert!(!service.delete(&created.id).await.unwrap());
    }
}
