//! Three-step contractor registration: personal details, bank details and
//! verification uploads.

pub mod repository;
pub mod validation;

use chrono::Utc;
use tracing::{info, instrument, warn};

pub use repository::{
    ContractorRecord, ContractorRepository, InMemoryContractorRepository, RepositoryError,
};
pub use validation::{ContractorForm, FieldErrors, FormField, RegistrationStep, validate_step};

pub const SUCCESS_TITLE: &str = "Registration Successful";
pub const SUCCESS_MESSAGE: &str = "Your contractor account has been created successfully!";

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FieldErrors),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl RegistrationError {
    /// Text for the failure alert.
    pub fn user_message(&self) -> String {
        format!("There was a problem with your registration: {self}")
    }
}

/// Form state plus the current step and the errors shown under fields.
#[derive(Debug, Clone, Default)]
pub struct RegistrationWizard {
    form: ContractorForm,
    step: Option<RegistrationStep>,
    errors: FieldErrors,
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &ContractorForm {
        &self.form
    }

    pub fn step(&self) -> RegistrationStep {
        self.step.unwrap_or(RegistrationStep::FIRST)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Sets a text field and clears its error. Returns `false` when `field`
    /// is not a text field.
    pub fn set_text(&mut self, field: FormField, value: impl Into<String>) -> bool {
        match self.form.text_mut(field) {
            Some(slot) => {
                *slot = value.into();
                self.errors.remove(&field);
                true
            }
            None => false,
        }
    }

    pub fn set_flag(&mut self, field: FormField, value: bool) -> bool {
        match self.form.flag_mut(field) {
            Some(slot) => {
                *slot = value;
                self.errors.remove(&field);
                true
            }
            None => false,
        }
    }

    /// Stores a picked image URI for the photo or ID proof.
    pub fn set_upload(&mut self, field: FormField, uri: Option<String>) -> bool {
        match self.form.upload_mut(field) {
            Some(slot) => {
                *slot = uri;
                self.errors.remove(&field);
                true
            }
            None => false,
        }
    }

    /// Validates the current step and advances on success. On failure the
    /// step's errors replace the shown ones and the step stays put.
    pub fn next(&mut self) -> bool {
        let step = self.step();
        let errors = validate_step(&self.form, step);
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.errors.clear();
        if let Some(next) = step.next() {
            self.step = Some(next);
        }
        true
    }

    /// Goes back one step without validating.
    pub fn previous(&mut self) -> bool {
        match self.step().previous() {
            Some(previous) => {
                self.step = Some(previous);
                true
            }
            None => false,
        }
    }

    /// Validates every step, then stores the contractor. When validation
    /// fails the wizard moves to the earliest step with an error.
    #[instrument(skip_all, fields(step = self.step().number()))]
    pub async fn submit<R>(&mut self, repository: &R) -> Result<ContractorRecord, RegistrationError>
    where
        R: ContractorRepository + ?Sized,
    {
        let mut errors = FieldErrors::new();
        for step in [
            RegistrationStep::PersonalDetails,
            RegistrationStep::BankDetails,
            RegistrationStep::Verification,
        ] {
            errors.extend(validate_step(&self.form, step));
        }

        if let Some(first) = errors.keys().map(|f| RegistrationStep::of_field(*f)).min() {
            warn!(invalid = errors.len(), "registration rejected");
            self.step = Some(first);
            self.errors = errors.clone();
            return Err(RegistrationError::Invalid(errors));
        }

        let record = ContractorRecord::from_form(&self.form, Utc::now());
        repository.add_contractor(record.clone()).await?;
        info!(contractor_id = %record.id, city = %record.city, "contractor registered");
        Ok(record)
    }
}
