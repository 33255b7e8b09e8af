//! Entity schema for employment certificate letters

use serde_json::{Map, Value};

/// Fields the model is asked to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityField {
    EmployeeName,
    EmployerName,
    JobTitle,
    StartDate,
    EndDate,
    Salary,
    SalaryCurrency,
    ReferenceName,
    ReferenceRole,
}

impl EntityField {
    /// All fields, in prompt order
    pub const ALL: [EntityField; 9] = [
        EntityField::EmployeeName,
        EntityField::EmployerName,
        EntityField::JobTitle,
        EntityField::StartDate,
        EntityField::EndDate,
        EntityField::Salary,
        EntityField::SalaryCurrency,
        EntityField::ReferenceName,
        EntityField::ReferenceRole,
    ];

    /// JSON key
    pub fn key(self) -> &'static str {
        match self {
            Self::EmployeeName => "employee_name",
            Self::EmployerName => "employer_name",
            Self::JobTitle => "job_title",
            Self::StartDate => "start_date",
            Self::EndDate => "end_date",
            Self::Salary => "salary",
            Self::SalaryCurrency => "salary_currency",
            Self::ReferenceName => "reference_name",
            Self::ReferenceRole => "reference_role",
        }
    }

    /// Instruction shown to the model for this field
    pub fn description(self) -> &'static str {
        match self {
            Self::EmployeeName => "Full name of the employee",
            Self::EmployerName => "Name of the company issuing the letter",
            Self::JobTitle => "Position held",
            Self::StartDate => "Start date (YYYY-MM-DD preferred)",
            Self::EndDate => "End date (null if still employed)",
            Self::Salary => "Salary (number or string, null if not present)",
            Self::SalaryCurrency => "ISO 4217 currency code, null if not applicable",
            Self::ReferenceName => "Name of the signer / reference",
            Self::ReferenceRole => "Position of the signer / reference",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Schema as a `{key: description}` JSON object
    pub fn schema_json() -> Value {
        let map: Map<String, Value> = Self::ALL
            .into_iter()
            .map(|field| (field.key().to_string(), Value::from(field.description())))
            .collect();
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for field in EntityField::ALL {
            assert_eq!(EntityField::from_key(field.key()), Some(field));
        }
        assert_eq!(EntityField::from_key("favourite_colour"), None);
    }

    #[test]
    fn test_schema_json_keeps_field_order() {
        let schema = EntityField::schema_json();
        let keys: Vec<&str> = schema
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(keys.first(), Some(&"employee_name"));
        assert_eq!(keys.last(), Some(&"reference_role"));
        assert_eq!(keys.len(), EntityField::ALL.len());
        assert_eq!(schema["job_title"], "Position held");
    }
}
