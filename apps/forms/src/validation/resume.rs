use super::rules::{digits_only, max_length, required, MAX_TEXT_LEN};
use super::ValidationResult;
use crate::models::{ResumeField, ResumeFormValues};

/// Resume schema:
/// - `position`, `category`: required
/// - `salaryExpectations`: digits only (blank allowed)
/// - `summary`: at most `MAX_TEXT_LEN` characters
///
/// Everything else is free text.
pub fn validate_resume(values: &ResumeFormValues) -> ValidationResult<ResumeField> {
    let mut result = ValidationResult::new();

    result.check(ResumeField::Position, required(&values.position));
    result.check(ResumeField::Category, required(&values.category));
    result.check(
        ResumeField::SalaryExpectations,
        digits_only(&values.salary_expectations),
    );
    result.check(ResumeField::Summary, max_length(&values.summary, MAX_TEXT_LEN));

    result
}
