use crate::domain::{
    entities::{InstallPlan, Replacements},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across callers.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_plan(plan: &InstallPlan) -> Result<(), DomainError> {
        plan.validate()
    }

    pub fn validate_replacements(replacements: &Replacements) -> Result<(), DomainError> {
        replacements.validate()
    }
}
