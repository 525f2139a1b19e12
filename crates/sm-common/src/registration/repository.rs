use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use ulid::Ulid;

use super::validation::ContractorForm;

/// A submitted contractor account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorRecord {
    pub id: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub photo: String,
    pub id_proof: String,
    pub account_holder: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub receive_notifications: bool,
    pub share_location_data: bool,
    pub agree_to_terms: bool,
    pub created_at: DateTime<Utc>,
}

impl ContractorRecord {
    /// Builds a record from a validated form. Text values are stored trimmed.
    pub fn from_form(form: &ContractorForm, created_at: DateTime<Utc>) -> Self {
        let text = |value: &str| value.trim().to_string();
        Self {
            id: Ulid::new().to_string(),
            full_name: text(&form.full_name),
            phone: text(&form.phone),
            email: text(&form.email),
            address: text(&form.address),
            city: text(&form.city),
            pincode: text(&form.pincode),
            photo: form.photo.clone().unwrap_or_default(),
            id_proof: form.id_proof.clone().unwrap_or_default(),
            account_holder: text(&form.account_holder),
            account_number: text(&form.account_number),
            ifsc_code: text(&form.ifsc_code),
            bank_name: text(&form.bank_name),
            receive_notifications: form.receive_notifications,
            share_location_data: form.share_location_data,
            agree_to_terms: form.agree_to_terms,
            created_at,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("contractor store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ContractorRepository: Send + Sync {
    async fn add_contractor(&self, record: ContractorRecord) -> Result<(), RepositoryError>;

    async fn list_contractors(&self) -> Result<Vec<ContractorRecord>, RepositoryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryContractorRepository {
    records: RwLock<Vec<ContractorRecord>>,
}

impl InMemoryContractorRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContractorRepository for InMemoryContractorRepository {
    async fn add_contractor(&self, record: ContractorRecord) -> Result<(), RepositoryError> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn list_contractors(&self) -> Result<Vec<ContractorRecord>, RepositoryError> {
        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_repository_keeps_insertion_order() {
        let repo = InMemoryContractorRepository::new();
        let now = Utc::now();

        let mut form = ContractorForm::default();
        form.full_name = " Meera ".into();
        let first = ContractorRecord::from_form(&form, now);
        form.full_name = "Arjun".into();
        let second = ContractorRecord::from_form(&form, now);
        assert_ne!(first.id, second.id);

        repo.add_contractor(first).await.unwrap();
        repo.add_contractor(second).await.unwrap();

        let names: Vec<_> = repo
            .list_contractors()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.full_name)
            .collect();
        assert_eq!(names, vec!["Meera", "Arjun"]);
    }
}
