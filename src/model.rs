//! # Person Model
//!
//! The canonical shapes shared by request validation, storage and the
//! published OpenAPI document. Each derives both `serde` and `ToSchema`, so
//! what the handlers accept is exactly what `/docs` describes.

use crate::error::{PeopleError, PeopleResult};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message returned when `sex` is outside the allowed set
pub const INVALID_SEX_MESSAGE: &str = r#"sex must be "F" or "M""#;

/// Single-character sex code as stored at rest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum Sex {
    F,
    M,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::F => "F",
            Sex::M => "M",
        }
    }

    /// Parses a code case-insensitively (`"f"` and `"F"` both yield `Sex::F`)
    pub fn parse(code: &str) -> Option<Sex> {
        match code.to_uppercase().as_str() {
            "F" => Some(Sex::F),
            "M" => Some(Sex::M),
            _ => None,
        }
    }

    /// Normalizes raw client input. Absent or empty means "no value".
    pub fn from_input(raw: Option<&str>) -> PeopleResult<Option<Sex>> {
        match raw {
            None | Some("") => Ok(None),
            Some(code) => Sex::parse(code)
                .map(Some)
                .ok_or_else(|| PeopleError::Validation(INVALID_SEX_MESSAGE.to_string())),
        }
    }
}

impl ToSql for Sex {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Sex {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = value.as_str()?;
        match code {
            "F" => Ok(Sex::F),
            "M" => Ok(Sex::M),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// A stored person, as returned by `GET /people`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Person {
    /// Server-generated identifier
    #[schema(example = "5f0c6a1e-2b8e-4d0a-9d43-8f1f2c6b7a10")]
    pub id: String,
    #[schema(example = "Ana")]
    pub name: String,
    pub age: Option<i64>,
    pub sex: Option<Sex>,
    pub occupation: Option<String>,
}

impl Person {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            age: row.get("age")?,
            sex: row.get("sex")?,
            occupation: row.get("occupation")?,
        })
    }
}

/// Body of `POST /people`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewPerson {
    #[serde(alias = "nome")]
    #[schema(example = "Ana")]
    pub name: String,
    #[serde(default, alias = "idade")]
    pub age: Option<i64>,
    /// `F` or `M`, case-insensitive
    #[serde(default, alias = "sexo")]
    #[schema(example = "F")]
    pub sex: Option<String>,
    #[serde(default, alias = "ocupacao")]
    pub occupation: Option<String>,
}

/// Body of `PUT /people/{id}`. Every field is written, absent ones as null.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PersonUpdate {
    #[serde(default, alias = "nome")]
    pub name: Option<String>,
    #[serde(default, alias = "idade")]
    pub age: Option<i64>,
    /// `F` or `M`, case-insensitive
    #[serde(default, alias = "sexo")]
    #[schema(example = "M")]
    pub sex: Option<String>,
    #[serde(default, alias = "ocupacao")]
    pub occupation: Option<String>,
}

/// Error body for 400 responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = r#"sex must be "F" or "M""#)]
    pub error: String,
}

/// Normalized column values handed to the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonFields {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub sex: Option<Sex>,
    pub occupation: Option<String>,
}

impl NewPerson {
    pub fn normalize(self) -> PeopleResult<PersonFields> {
        if self.name.is_empty() {
            return Err(PeopleError::Validation("name must not be empty".to_string()));
        }
        let sex = Sex::from_input(self.sex.as_deref())?;

        Ok(PersonFields {
            name: Some(self.name),
            age: self.age,
            sex,
            occupation: self.occupation,
        })
    }
}

impl PersonUpdate {
    pub fn normalize(self) -> PeopleResult<PersonFields> {
        let sex = Sex::from_input(self.sex.as_deref())?;

        Ok(PersonFields {
            name: self.name,
            age: self.age,
            sex,
            occupation: self.occupation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_parse_is_case_insensitive() {
        assert_eq!(Sex::parse("f"), Some(Sex::F));
        assert_eq!(Sex::parse("F"), Some(Sex::F));
        assert_eq!(Sex::parse("m"), Some(Sex::M));
        assert_eq!(Sex::parse("M"), Some(Sex::M));
        assert_eq!(Sex::parse("x"), None);
        assert_eq!(Sex::parse("fm"), None);
    }

    #[test]
    fn test_sex_from_input_empty_is_none() {
        assert_eq!(Sex::from_input(None).unwrap(), None);
        assert_eq!(Sex::from_input(Some("")).unwrap(), None);

        let err = Sex::from_input(Some("x")).unwrap_err();
        assert!(matches!(err, PeopleError::Validation(ref m) if m == INVALID_SEX_MESSAGE));
    }

    #[test]
    fn test_new_person_accepts_original_keys() {
        let person: NewPerson = serde_json::from_str(
            r#"{"nome": "Ana", "idade": 31, "sexo": "f", "ocupacao": "Engenheira"}"#,
        )
        .unwrap();

        let fields = person.normalize().unwrap();
        assert_eq!(fields.name.as_deref(), Some("Ana"));
        assert_eq!(fields.age, Some(31));
        assert_eq!(fields.sex, Some(Sex::F));
        assert_eq!(fields.occupation.as_deref(), Some("Engenheira"));
    }

    #[test]
    fn test_new_person_rejects_empty_name_only() {
        let empty: NewPerson = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(matches!(empty.normalize(), Err(PeopleError::Validation(_))));

        let spaces: NewPerson = serde_json::from_str(r#"{"name": "   "}"#).unwrap();
        let fields = spaces.normalize().unwrap();
        assert_eq!(fields.name.as_deref(), Some("   "));
    }

    #[test]
    fn test_update_keeps_absent_fields_null() {
        let update: PersonUpdate = serde_json::from_str(r#"{"sex": "m"}"#).unwrap();
        let fields = update.normalize().unwrap();
        assert_eq!(
            fields,
            PersonFields {
                sex: Some(Sex::M),
                ..PersonFields::default()
            }
        );
    }

    #[test]
    fn test_person_serializes_nulls() {
        let person = Person {
            id: "abc".into(),
            name: "Ana".into(),
            age: None,
            sex: None,
            occupation: None,
        };
        assert_eq!(
            serde_json::to_value(&person).unwrap(),
            serde_json::json!({
                "id": "abc",
                "name": "Ana",
                "age": null,
                "sex": null,
                "occupation": null
            })
        );
    }
}
