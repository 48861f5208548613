use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{kind_mismatch, Entity, EntityId, FieldKind, FieldValue, FormField, FormValues};
use crate::errors::BindError;
use crate::validation::{employer::validate_employer_profile, ValidationResult};

/// Employer account as returned by the API. Most fields are optional
/// because a freshly registered employer has filled in almost nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfile {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub user_position: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_web_site: Option<String>,
    #[serde(default)]
    pub company_dou_page: Option<String>,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub company_employees_count: Option<u32>,
    #[serde(default)]
    pub company_description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Draft of the employer profile form. Serialized as the PATCH body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfileFormValues {
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub user_position: String,
    pub company_name: String,
    pub company_web_site: String,
    pub company_dou_page: String,
    pub company_logo: String,
    pub company_employees_count: u32,
    pub company_description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmployerField {
    FirstName,
    LastName,
    Avatar,
    Email,
    Phone,
    Linkedin,
    UserPosition,
    CompanyName,
    CompanyLogo,
    CompanyWebSite,
    CompanyDouPage,
    CompanyEmployeesCount,
    CompanyDescription,
}

impl FormField for EmployerField {
    const ALL: &'static [Self] = &[
        EmployerField::FirstName,
        EmployerField::LastName,
        EmployerField::Avatar,
        EmployerField::Email,
        EmployerField::Phone,
        EmployerField::Linkedin,
        EmployerField::UserPosition,
        EmployerField::CompanyName,
        EmployerField::CompanyLogo,
        EmployerField::CompanyWebSite,
        EmployerField::CompanyDouPage,
        EmployerField::CompanyEmployeesCount,
        EmployerField::CompanyDescription,
    ];

    fn key(self) -> &'static str {
        match self {
            EmployerField::FirstName => "firstName",
            EmployerField::LastName => "lastName",
            EmployerField::Avatar => "avatar",
            EmployerField::Email => "email",
            EmployerField::Phone => "phone",
            EmployerField::Linkedin => "linkedin",
            EmployerField::UserPosition => "userPosition",
            EmployerField::CompanyName => "companyName",
            EmployerField::CompanyLogo => "companyLogo",
            EmployerField::CompanyWebSite => "companyWebSite",
            EmployerField::CompanyDouPage => "companyDouPage",
            EmployerField::CompanyEmployeesCount => "companyEmployeesCount",
            EmployerField::CompanyDescription => "companyDescription",
        }
    }

    fn label(self) -> &'static str {
        match self {
            EmployerField::FirstName => "First Name",
            EmployerField::LastName => "Last Name",
            EmployerField::Avatar => "Avatar",
            EmployerField::Email => "Email",
            EmployerField::Phone => "Phone",
            EmployerField::Linkedin => "LinkedIn page",
            EmployerField::UserPosition => "Your position in company",
            EmployerField::CompanyName => "Company name",
            EmployerField::CompanyLogo => "Company logo",
            EmployerField::CompanyWebSite => "Company page",
            EmployerField::CompanyDouPage => "Company dou page",
            EmployerField::CompanyEmployeesCount => "Employees count",
            EmployerField::CompanyDescription => "Company description",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            EmployerField::CompanyEmployeesCount => FieldKind::Numeric,
            _ => FieldKind::Text,
        }
    }

    fn placeholder(self) -> Option<&'static str> {
        match self {
            EmployerField::Phone => Some("+3780"),
            EmployerField::Linkedin => Some("https://www.linkedin.com/"),
            EmployerField::UserPosition => Some("HR"),
            EmployerField::CompanyLogo | EmployerField::CompanyWebSite => Some("https://"),
            EmployerField::CompanyDouPage => Some("https://jobs.dou.ua/companies/"),
            EmployerField::CompanyDescription => Some("Description.."),
            _ => None,
        }
    }

    // The login email is managed by the auth flow, not this form.
    fn read_only(self) -> bool {
        matches!(self, EmployerField::Email)
    }
}

impl fmt::Display for EmployerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl EmployerProfileFormValues {
    fn text_slot(&mut self, field: EmployerField) -> Option<&mut String> {
        match field {
            EmployerField::FirstName => Some(&mut self.first_name),
            EmployerField::LastName => Some(&mut self.last_name),
            EmployerField::Avatar => Some(&mut self.avatar),
            EmployerField::Email => Some(&mut self.email),
            EmployerField::Phone => Some(&mut self.phone),
            EmployerField::Linkedin => Some(&mut self.linkedin),
            EmployerField::UserPosition => Some(&mut self.user_position),
            EmployerField::CompanyName => Some(&mut self.company_name),
            EmployerField::CompanyLogo => Some(&mut self.company_logo),
            EmployerField::CompanyWebSite => Some(&mut self.company_web_site),
            EmployerField::CompanyDouPage => Some(&mut self.company_dou_page),
            EmployerField::CompanyDescription => Some(&mut self.company_description),
            EmployerField::CompanyEmployeesCount => None,
        }
    }
}

impl FormValues for EmployerProfileFormValues {
    type Field = EmployerField;

    fn get(&self, field: EmployerField) -> FieldValue {
        match field {
            EmployerField::FirstName => self.first_name.clone().into(),
            EmployerField::LastName => self.last_name.clone().into(),
            EmployerField::Avatar => self.avatar.clone().into(),
            EmployerField::Email => self.email.clone().into(),
            EmployerField::Phone => self.phone.clone().into(),
            EmployerField::Linkedin => self.linkedin.clone().into(),
            EmployerField::UserPosition => self.user_position.clone().into(),
            EmployerField::CompanyName => self.company_name.clone().into(),
            EmployerField::CompanyLogo => self.company_logo.clone().into(),
            EmployerField::CompanyWebSite => self.company_web_site.clone().into(),
            EmployerField::CompanyDouPage => self.company_dou_page.clone().into(),
            EmployerField::CompanyEmployeesCount => self.company_employees_count.into(),
            EmployerField::CompanyDescription => self.company_description.clone().into(),
        }
    }

    fn set(&mut self, field: EmployerField, value: FieldValue) -> Result<(), BindError> {
        match field {
            EmployerField::CompanyEmployeesCount => match value {
                FieldValue::Number(count) => self.company_employees_count = count,
                _ => return Err(kind_mismatch(field)),
            },
            _ => match (value, self.text_slot(field)) {
                (FieldValue::Text(text), Some(slot)) => *slot = text,
                _ => return Err(kind_mismatch(field)),
            },
        }
        Ok(())
    }

    fn validate(&self) -> ValidationResult<EmployerField> {
        validate_employer_profile(self)
    }
}

impl Entity for EmployerProfile {
    type Values = EmployerProfileFormValues;

    const RESOURCE: &'static str = "users/employer";
    const NOTIFICATION_TITLE: &'static str = "Edit user info";
    const SUCCESS_MESSAGE: &'static str = "User data has updated successful";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn form_values(&self) -> EmployerProfileFormValues {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        EmployerProfileFormValues {
            first_name: text(&self.first_name),
            last_name: text(&self.last_name),
            avatar: text(&self.avatar),
            email: text(&self.email),
            phone: text(&self.phone),
            linkedin: text(&self.linkedin),
            user_position: text(&self.user_position),
            company_name: text(&self.company_name),
            company_web_site: text(&self.company_web_site),
            company_dou_page: text(&self.company_dou_page),
            company_logo: text(&self.company_logo),
            company_employees_count: self.company_employees_count.unwrap_or_default(),
            company_description: text(&self.company_description),
        }
    }
}
