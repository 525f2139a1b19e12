use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

static RE_PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
static RE_EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").unwrap());
static RE_PINCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").unwrap());
static RE_ACCOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9,18}$").unwrap());
static RE_IFSC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{4}0[A-Z0-9]{6}$").unwrap());

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FormField {
    FullName,
    Phone,
    Email,
    Address,
    City,
    Pincode,
    Photo,
    IdProof,
    AccountHolder,
    AccountNumber,
    IfscCode,
    BankName,
    ReceiveNotifications,
    ShareLocationData,
    AgreeToTerms,
}

/// Field → message for every field that failed validation.
pub type FieldErrors = BTreeMap<FormField, &'static str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    PersonalDetails,
    BankDetails,
    Verification,
}

impl RegistrationStep {
    pub const FIRST: RegistrationStep = RegistrationStep::PersonalDetails;
    pub const LAST: RegistrationStep = RegistrationStep::Verification;

    /// 1-based position shown in the step indicator.
    pub fn number(&self) -> u8 {
        match self {
            RegistrationStep::PersonalDetails => 1,
            RegistrationStep::BankDetails => 2,
            RegistrationStep::Verification => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RegistrationStep::PersonalDetails => "Personal Details",
            RegistrationStep::BankDetails => "Bank Details",
            RegistrationStep::Verification => "Verification",
        }
    }

    pub fn next(&self) -> Option<RegistrationStep> {
        match self {
            RegistrationStep::PersonalDetails => Some(RegistrationStep::BankDetails),
            RegistrationStep::BankDetails => Some(RegistrationStep::Verification),
            RegistrationStep::Verification => None,
        }
    }

    pub fn previous(&self) -> Option<RegistrationStep> {
        match self {
            RegistrationStep::PersonalDetails => None,
            RegistrationStep::BankDetails => Some(RegistrationStep::PersonalDetails),
            RegistrationStep::Verification => Some(RegistrationStep::BankDetails),
        }
    }

    /// Step on which `field` is edited.
    pub fn of_field(field: FormField) -> RegistrationStep {
        use FormField::*;
        match field {
            FullName | Phone | Email | Address | City | Pincode => {
                RegistrationStep::PersonalDetails
            }
            AccountHolder | AccountNumber | IfscCode | BankName => RegistrationStep::BankDetails,
            Photo | IdProof | ReceiveNotifications | ShareLocationData | AgreeToTerms => {
                RegistrationStep::Verification
            }
        }
    }
}

/// Everything the contractor fills in across the three steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorForm {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    /// Picked image URI.
    pub photo: Option<String>,
    pub id_proof: Option<String>,
    pub account_holder: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub bank_name: String,
    pub receive_notifications: bool,
    pub share_location_data: bool,
    pub agree_to_terms: bool,
}

impl Default for ContractorForm {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            pincode: String::new(),
            photo: None,
            id_proof: None,
            account_holder: String::new(),
            account_number: String::new(),
            ifsc_code: String::new(),
            bank_name: String::new(),
            receive_notifications: true,
            share_location_data: true,
            agree_to_terms: false,
        }
    }
}

impl ContractorForm {
    pub(crate) fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        use FormField::*;
        match field {
            FullName => Some(&mut self.full_name),
            Phone => Some(&mut self.phone),
            Email => Some(&mut self.email),
            Address => Some(&mut self.address),
            City => Some(&mut self.city),
            Pincode => Some(&mut self.pincode),
            AccountHolder => Some(&mut self.account_holder),
            AccountNumber => Some(&mut self.account_number),
            IfscCode => Some(&mut self.ifsc_code),
            BankName => Some(&mut self.bank_name),
            _ => None,
        }
    }

    pub(crate) fn flag_mut(&mut self, field: FormField) -> Option<&mut bool> {
        match field {
            FormField::ReceiveNotifications => Some(&mut self.receive_notifications),
            FormField::ShareLocationData => Some(&mut self.share_location_data),
            FormField::AgreeToTerms => Some(&mut self.agree_to_terms),
            _ => None,
        }
    }

    pub(crate) fn upload_mut(&mut self, field: FormField) -> Option<&mut Option<String>> {
        match field {
            FormField::Photo => Some(&mut self.photo),
            FormField::IdProof => Some(&mut self.id_proof),
            _ => None,
        }
    }
}

fn required_matching(
    errors: &mut FieldErrors,
    field: FormField,
    value: &str,
    missing: &'static str,
    pattern: &Regex,
    invalid: &'static str,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, missing);
    } else if !pattern.is_match(trimmed) {
        errors.insert(field, invalid);
    }
}

fn required(errors: &mut FieldErrors, field: FormField, value: &str, missing: &'static str) {
    if value.trim().is_empty() {
        errors.insert(field, missing);
    }
}

fn has_upload(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|uri| !uri.trim().is_empty())
}

/// Validates the fields of one step. An empty map means the step is valid.
pub fn validate_step(form: &ContractorForm, step: RegistrationStep) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        RegistrationStep::PersonalDetails => {
            required(&mut errors, FormField::FullName, &form.full_name, "Name is required");
            required_matching(
                &mut errors,
                FormField::Phone,
                &form.phone,
                "Phone number is required",
                &RE_PHONE,
                "Enter a valid 10-digit phone number",
            );
            // the email pattern is checked against the untrimmed value
            if form.email.trim().is_empty() {
                errors.insert(FormField::Email, "Email is required");
            } else if !RE_EMAIL.is_match(&form.email) {
                errors.insert(FormField::Email, "Enter a valid email address");
            }
            required(&mut errors, FormField::Address, &form.address, "Address is required");
            required(&mut errors, FormField::City, &form.city, "City is required");
            required_matching(
                &mut errors,
                FormField::Pincode,
                &form.pincode,
                "PIN code is required",
                &RE_PINCODE,
                "Enter a valid 6-digit PIN code",
            );
        }
        RegistrationStep::BankDetails => {
            required(
                &mut errors,
                FormField::AccountHolder,
                &form.account_holder,
                "Account holder name is required",
            );
            required_matching(
                &mut errors,
                FormField::AccountNumber,
                &form.account_number,
                "Account number is required",
                &RE_ACCOUNT,
                "Enter a valid account number",
            );
            required_matching(
                &mut errors,
                FormField::IfscCode,
                &form.ifsc_code,
                "IFSC code is required",
                &RE_IFSC,
                "Enter a valid IFSC code",
            );
            required(&mut errors, FormField::BankName, &form.bank_name, "Bank name is required");
        }
        RegistrationStep::Verification => {
            if !form.agree_to_terms {
                errors.insert(
                    FormField::AgreeToTerms,
                    "You must agree to the terms and conditions",
                );
            }
            if !has_upload(&form.photo) {
                errors.insert(FormField::Photo, "Profile photo is required");
            }
            if !has_upload(&form.id_proof) {
                errors.insert(FormField::IdProof, "ID proof is required");
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> ContractorForm {
        ContractorForm {
            full_name: "Rajesh Sharma".into(),
            phone: "9876543210".into(),
            email: "rajesh@example.in".into(),
            address: "12 MG Road".into(),
            city: "Indore".into(),
            pincode: "452001".into(),
            photo: Some("file:///photo.jpg".into()),
            id_proof: Some("file:///aadhaar.jpg".into()),
            account_holder: "Rajesh Sharma".into(),
            account_number: "123456789012".into(),
            ifsc_code: "SBIN0001234".into(),
            bank_name: "State Bank of India".into(),
            agree_to_terms: true,
            ..ContractorForm::default()
        }
    }

    #[test]
    fn complete_form_passes_every_step() {
        let form = complete_form();
        for step in [
            RegistrationStep::PersonalDetails,
            RegistrationStep::BankDetails,
            RegistrationStep::Verification,
        ] {
            assert!(validate_step(&form, step).is_empty(), "{step:?}");
        }
    }

    #[test]
    fn empty_personal_details_report_required_messages() {
        let errors = validate_step(&ContractorForm::default(), RegistrationStep::PersonalDetails);
        assert_eq!(errors.len(), 6);
        assert_eq!(errors[&FormField::FullName], "Name is required");
        assert_eq!(errors[&FormField::Phone], "Phone number is required");
        assert_eq!(errors[&FormField::Email], "Email is required");
        assert_eq!(errors[&FormField::Pincode], "PIN code is required");
    }

    #[test]
    fn malformed_personal_details_report_format_messages() {
        let mut form = complete_form();
        form.phone = "98765".into();
        form.email = "rajesh@example".into();
        form.pincode = "45200A".into();

        let errors = validate_step(&form, RegistrationStep::PersonalDetails);
        assert_eq!(errors[&FormField::Phone], "Enter a valid 10-digit phone number");
        assert_eq!(errors[&FormField::Email], "Enter a valid email address");
        assert_eq!(errors[&FormField::Pincode], "Enter a valid 6-digit PIN code");
    }

    #[test]
    fn phone_is_trimmed_before_matching() {
        let mut form = complete_form();
        form.phone = " 9876543210 ".into();
        assert!(validate_step(&form, RegistrationStep::PersonalDetails).is_empty());
    }

    #[test]
    fn bank_details_enforce_account_and_ifsc_formats() {
        let mut form = complete_form();
        form.account_number = "12345678".into();
        form.ifsc_code = "sbin0001234".into();

        let errors = validate_step(&form, RegistrationStep::BankDetails);
        assert_eq!(errors[&FormField::AccountNumber], "Enter a valid account number");
        assert_eq!(errors[&FormField::IfscCode], "Enter a valid IFSC code");

        form.ifsc_code = "SBIN1001234".into();
        let errors = validate_step(&form, RegistrationStep::BankDetails);
        assert!(errors.contains_key(&FormField::IfscCode));
    }

    #[test]
    fn verification_requires_terms_and_uploads() {
        let errors = validate_step(&ContractorForm::default(), RegistrationStep::Verification);
        assert_eq!(
            errors[&FormField::AgreeToTerms],
            "You must agree to the terms and conditions"
        );
        assert_eq!(errors[&FormField::Photo], "Profile photo is required");
        assert_eq!(errors[&FormField::IdProof], "ID proof is required");
    }

    #[test]
    fn steps_walk_in_order() {
        assert_eq!(RegistrationStep::FIRST.next(), Some(RegistrationStep::BankDetails));
        assert_eq!(RegistrationStep::LAST.next(), None);
        assert_eq!(RegistrationStep::FIRST.previous(), None);
        assert_eq!(RegistrationStep::of_field(FormField::IfscCode).number(), 2);
        assert_eq!(FormField::IdProof.as_ref(), "idProof");
    }
}
