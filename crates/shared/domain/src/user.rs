//! User domain entity and related types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{FIELD_AGE, FIELD_GENDER, FIELD_NAME, FIELD_NATION, PATCHABLE_FIELDS};
use crate::error::{DomainError, DomainResult};

/// Stored user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Unique user identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i32,
    /// Name the record was enriched from
    #[cfg_attr(feature = "openapi", schema(example = "timur"))]
    pub name: String,
    /// Inferred age
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub age: i32,
    /// Inferred gender
    #[cfg_attr(feature = "openapi", schema(example = "male"))]
    pub gender: String,
    /// Most likely nationality (ISO 3166-1 alpha-2)
    #[cfg_attr(feature = "openapi", schema(example = "TR"))]
    pub nation: String,
}

/// Fully enriched record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub nation: String,
}

impl NewUser {
    /// Attach the identifier assigned by storage.
    pub fn with_id(self, id: i32) -> User {
        User {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            nation: self.nation,
        }
    }
}

/// Fields a partial update is allowed to touch.
///
/// Anything that does not parse into one of these never reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchField {
    Name,
    Age,
    Gender,
    Nation,
}

impl PatchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchField::Name => FIELD_NAME,
            PatchField::Age => FIELD_AGE,
            PatchField::Gender => FIELD_GENDER,
            PatchField::Nation => FIELD_NATION,
        }
    }
}

impl FromStr for PatchField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FIELD_NAME => Ok(PatchField::Name),
            FIELD_AGE => Ok(PatchField::Age),
            FIELD_GENDER => Ok(PatchField::Gender),
            FIELD_NATION => Ok(PatchField::Nation),
            _ => Err(DomainError::validation(format!(
                "Invalid field name. Must be one of: {}",
                PATCHABLE_FIELDS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for PatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse update: only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub nation: Option<String>,
}

impl UserPatch {
    /// Build a single-field patch from a raw string value.
    pub fn single(field: PatchField, value: &str) -> DomainResult<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DomainError::validation(format!("Missing value for '{}'", field)));
        }

        let mut patch = UserPatch::default();
        match field {
            PatchField::Name => patch.name = Some(value.to_string()),
            PatchField::Age => {
                let age = value
                    .parse()
                    .map_err(|_| DomainError::validation("Invalid integer value for 'age'"))?;
                patch.age = Some(age);
            }
            PatchField::Gender => patch.gender = Some(value.to_string()),
            PatchField::Nation => patch.nation = Some(value.to_string()),
        }
        Ok(patch)
    }

    /// True when the patch would not change anything
    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Fields carried by this patch, in column order
    pub fn fields(&self) -> Vec<PatchField> {
        let mut fields = Vec::with_capacity(4);
        if self.name.is_some() {
            fields.push(PatchField::Name);
        }
        if self.age.is_some() {
            fields.push(PatchField::Age);
        }
        if self.gender.is_some() {
            fields.push(PatchField::Gender);
        }
        if self.nation.is_some() {
            fields.push(PatchField::Nation);
        }
        fields
    }

    /// Trim every text field and reject the ones left blank.
    pub fn normalized(self) -> DomainResult<Self> {
        Ok(UserPatch {
            name: non_blank(PatchField::Name, self.name)?,
            age: self.age,
            gender: non_blank(PatchField::Gender, self.gender)?,
            nation: non_blank(PatchField::Nation, self.nation)?,
        })
    }
}

fn non_blank(field: PatchField, value: Option<String>) -> DomainResult<Option<String>> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(DomainError::validation(format!(
                    "Missing value for '{}'",
                    field
                )));
            }
            Ok(Some(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            name: "timur".to_string(),
            age: 30,
            gender: "male".to_string(),
            nation: "TR".to_string(),
        }
    }

    #[test]
    fn test_patch_field_allow_list() {
        assert_eq!("name".parse::<PatchField>(), Ok(PatchField::Name));
        assert_eq!("age".parse::<PatchField>(), Ok(PatchField::Age));
        assert_eq!("gender".parse::<PatchField>(), Ok(PatchField::Gender));
        assert_eq!("nation".parse::<PatchField>(), Ok(PatchField::Nation));
    }

    #[test]
    fn test_patch_field_rejects_unknown_columns() {
        for raw in ["drop table users", "id", "NAME", "", "name; --"] {
            let err = raw.parse::<PatchField>().unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{raw} should be rejected");
        }
    }

    #[test]
    fn test_single_patch_parses_age() {
        let patch = UserPatch::single(PatchField::Age, "42").unwrap();
        assert_eq!(patch.age, Some(42));
        assert_eq!(patch.fields(), vec![PatchField::Age]);
    }

    #[test]
    fn test_single_patch_rejects_non_integer_age() {
        let result = UserPatch::single(PatchField::Age, "forty");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_single_patch_rejects_blank_value() {
        let result = UserPatch::single(PatchField::Gender, "  ");
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_empty_patch() {
        assert!(UserPatch::default().is_empty());
        assert!(!UserPatch::single(PatchField::Nation, "KZ").unwrap().is_empty());
    }

    #[test]
    fn test_normalized_trims_text_fields() {
        let patch = UserPatch {
            name: Some("  aigerim ".to_string()),
            age: Some(27),
            nation: Some("KZ\n".to_string()),
            ..Default::default()
        };

        let patch = patch.normalized().unwrap();
        assert_eq!(patch.name.as_deref(), Some("aigerim"));
        assert_eq!(patch.age, Some(27));
        assert_eq!(patch.gender, None);
        assert_eq!(patch.nation.as_deref(), Some("KZ"));
    }

    #[test]
    fn test_normalized_rejects_blank_text() {
        let patch = UserPatch {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            patch.normalized(),
            Err(DomainError::Validation(ref msg)) if msg.contains("'name'")
        ));
    }

    #[test]
    fn test_user_serializes_flat() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 7,
                "name": "timur",
                "age": 30,
                "gender": "male",
                "nation": "TR"
            })
        );
    }
}
