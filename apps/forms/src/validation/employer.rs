use super::rules::{email, max_length, phone, required, url, url_on_host, MAX_TEXT_LEN};
use super::ValidationResult;
use crate::models::{EmployerField, EmployerProfileFormValues};

const LINKEDIN_DOMAIN: &str = "linkedin.com";
const DOU_DOMAIN: &str = "dou.ua";

/// Employer profile schema:
/// - `firstName`, `lastName`, `companyName`: required
/// - `email`: required, well-formed
/// - `phone`: phone number (blank allowed)
/// - `avatar`, `companyLogo`, `companyWebSite`: http(s) URL (blank allowed)
/// - `linkedin`: linkedin.com URL, `companyDouPage`: dou.ua URL (blank allowed)
/// - `companyDescription`: at most `MAX_TEXT_LEN` characters
///
/// `userPosition` is free text. `companyEmployeesCount` is typed as a
/// whole number, so the input binding already guarantees its shape.
pub fn validate_employer_profile(
    values: &EmployerProfileFormValues,
) -> ValidationResult<EmployerField> {
    let mut result = ValidationResult::new();

    result.check(EmployerField::FirstName, required(&values.first_name));
    result.check(EmployerField::LastName, required(&values.last_name));
    result.check(EmployerField::Avatar, url(&values.avatar));
    result.check(EmployerField::Email, email(&values.email));
    result.check(EmployerField::Phone, phone(&values.phone));
    result.check(
        EmployerField::Linkedin,
        url_on_host(&values.linkedin, LINKEDIN_DOMAIN),
    );
    result.check(EmployerField::CompanyName, required(&values.company_name));
    result.check(EmployerField::CompanyLogo, url(&values.company_logo));
    result.check(EmployerField::CompanyWebSite, url(&values.company_web_site));
    result.check(
        EmployerField::CompanyDouPage,
        url_on_host(&values.company_dou_page, DOU_DOMAIN),
    );
    result.check(
        EmployerField::CompanyDescription,
        max_length(&values.company_description, MAX_TEXT_LEN),
    );

    result
}
