use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{kind_mismatch, null_as_default, Entity, EntityId, FieldKind, FieldValue, FormField, FormValues};
use crate::errors::BindError;
use crate::validation::{resume::validate_resume, ValidationResult};

/// Job-seeker resume as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_experience: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub salary_expectations: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relocation: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub english_level: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employment_options: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Draft of the resume form. Serialized as the PATCH body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFormValues {
    pub position: String,
    pub category: String,
    pub work_experience: String,
    pub salary_expectations: String,
    pub country: String,
    pub city: String,
    pub relocation: bool,
    pub english_level: String,
    pub summary: String,
    pub employment_options: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResumeField {
    Position,
    Category,
    WorkExperience,
    SalaryExpectations,
    Country,
    City,
    Relocation,
    EnglishLevel,
    Summary,
    EmploymentOptions,
}

impl FormField for ResumeField {
    const ALL: &'static [Self] = &[
        ResumeField::Position,
        ResumeField::Category,
        ResumeField::WorkExperience,
        ResumeField::SalaryExpectations,
        ResumeField::Country,
        ResumeField::City,
        ResumeField::Relocation,
        ResumeField::EnglishLevel,
        ResumeField::Summary,
        ResumeField::EmploymentOptions,
    ];

    fn key(self) -> &'static str {
        match self {
            ResumeField::Position => "position",
            ResumeField::Category => "category",
            ResumeField::WorkExperience => "workExperience",
            ResumeField::SalaryExpectations => "salaryExpectations",
            ResumeField::Country => "country",
            ResumeField::City => "city",
            ResumeField::Relocation => "relocation",
            ResumeField::EnglishLevel => "englishLevel",
            ResumeField::Summary => "summary",
            ResumeField::EmploymentOptions => "employmentOptions",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ResumeField::Position => "Position",
            ResumeField::Category => "Category",
            ResumeField::WorkExperience => "Work experience",
            ResumeField::SalaryExpectations => "Salary expectations",
            ResumeField::Country => "Country of residence",
            ResumeField::City => "City",
            ResumeField::Relocation => "Relocation",
            ResumeField::EnglishLevel => "English level",
            ResumeField::Summary => "Summary",
            ResumeField::EmploymentOptions => "Employment options",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            ResumeField::Relocation => FieldKind::Flag,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for ResumeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl ResumeFormValues {
    fn text_slot(&mut self, field: ResumeField) -> Option<&mut String> {
        match field {
            ResumeField::Position => Some(&mut self.position),
            ResumeField::Category => Some(&mut self.category),
            ResumeField::WorkExperience => Some(&mut self.work_experience),
            ResumeField::SalaryExpectations => Some(&mut self.salary_expectations),
            ResumeField::Country => Some(&mut self.country),
            ResumeField::City => Some(&mut self.city),
            ResumeField::EnglishLevel => Some(&mut self.english_level),
            ResumeField::Summary => Some(&mut self.summary),
            ResumeField::EmploymentOptions => Some(&mut self.employment_options),
            ResumeField::Relocation => None,
        }
    }
}

impl FormValues for ResumeFormValues {
    type Field = ResumeField;

    fn get(&self, field: ResumeField) -> FieldValue {
        match field {
            ResumeField::Position => self.position.clone().into(),
            ResumeField::Category => self.category.clone().into(),
            ResumeField::WorkExperience => self.work_experience.clone().into(),
            ResumeField::SalaryExpectations => self.salary_expectations.clone().into(),
            ResumeField::Country => self.country.clone().into(),
            ResumeField::City => self.city.clone().into(),
            ResumeField::Relocation => self.relocation.into(),
            ResumeField::EnglishLevel => self.english_level.clone().into(),
            ResumeField::Summary => self.summary.clone().into(),
            ResumeField::EmploymentOptions => self.employment_options.clone().into(),
        }
    }

    fn set(&mut self, field: ResumeField, value: FieldValue) -> Result<(), BindError> {
        match field {
            ResumeField::Relocation => match value {
                FieldValue::Flag(checked) => self.relocation = checked,
                _ => return Err(kind_mismatch(field)),
            },
            _ => match (value, self.text_slot(field)) {
                (FieldValue::Text(text), Some(slot)) => *slot = text,
                _ => return Err(kind_mismatch(field)),
            },
        }
        Ok(())
    }

    fn validate(&self) -> ValidationResult<ResumeField> {
        validate_resume(self)
    }
}

impl Entity for Resume {
    type Values = ResumeFormValues;

    const RESOURCE: &'static str = "resumes";
    const NOTIFICATION_TITLE: &'static str = "Edit resume";
    const SUCCESS_MESSAGE: &'static str = "The resume was successfully updated";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn form_values(&self) -> ResumeFormValues {
        ResumeFormValues {
            position: self.position.clone(),
            category: self.category.clone(),
            work_experience: self.work_experience.clone(),
            salary_expectations: self.salary_expectations.clone(),
            country: self.country.clone(),
            city: self.city.clone(),
            relocation: self.relocation,
            english_level: self.english_level.clone(),
            summary: self.summary.clone(),
            employment_options: self.employment_options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_api_payload() {
        let resume: Resume = serde_json::from_value(json!({
            "_id": "65f1c2",
            "owner": "65aa01",
            "position": "Rust developer",
            "category": "Backend",
            "relocation": true,
            "summary": null,
            "updatedAt": "2024-03-13T10:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(resume.id.as_str(), "65f1c2");
        assert_eq!(resume.position, "Rust developer");
        assert!(resume.relocation);
        assert_eq!(resume.summary, "");
        assert_eq!(resume.city, "");
        assert!(resume.created_at.is_none());
    }

    #[test]
    fn test_form_values_serialize_camel_case() {
        let values = ResumeFormValues {
            work_experience: "3 years".to_string(),
            ..Default::default()
        };
        let body = serde_json::to_value(&values).unwrap();
        assert_eq!(body["workExperience"], "3 years");
        assert_eq!(body["relocation"], false);
        assert_eq!(body.as_object().unwrap().len(), ResumeField::ALL.len());
    }

    #[test]
    fn test_every_field_round_trips_through_get_and_set() {
        let mut values = ResumeFormValues::default();
        for &field in ResumeField::ALL {
            let value = match field.kind() {
                FieldKind::Flag => FieldValue::Flag(true),
                _ => FieldValue::Text(format!("{field}-value")),
            };
            values.set(field, value.clone()).unwrap();
            assert_eq!(values.get(field), value);
        }
    }

    #[test]
    fn test_set_rejects_kind_mismatch() {
        let mut values = ResumeFormValues::default();
        assert_eq!(
            values.set(ResumeField::Relocation, "yes".into()),
            Err(BindError::KindMismatch {
                field: "relocation",
                expected: "boolean"
            })
        );
        assert!(values.set(ResumeField::City, true.into()).is_err());
        assert_eq!(values, ResumeFormValues::default());
    }

    #[test]
    fn test_keys_match_serialized_names() {
        let body = serde_json::to_value(ResumeFormValues::default()).unwrap();
        for field in ResumeField::ALL {
            assert!(body.get(field.key()).is_some(), "missing {field}");
        }
    }
}
