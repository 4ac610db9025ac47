// Field validation for personnel drafts

use crate::record::{Field, RecordDraft};

/// Length of a national id
pub const ID_LEN: usize = 11;

/// First rule a draft violates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("National ID must be exactly 11 digits")]
    InvalidId,

    #[error("Full name cannot be empty")]
    MissingFullName,

    #[error("Full name may only contain letters, digits and spaces")]
    InvalidFullName,

    #[error("Role may only contain letters, digits and spaces")]
    InvalidRole,

    #[error("Phone may only contain digits and spaces")]
    InvalidPhone,
}

impl ValidationError {
    /// Field the failed rule applies to
    pub fn field(&self) -> Field {
        match self {
            ValidationError::InvalidId => Field::Id,
            ValidationError::MissingFullName | ValidationError::InvalidFullName => Field::FullName,
            ValidationError::InvalidRole => Field::Role,
            ValidationError::InvalidPhone => Field::Phone,
        }
    }
}

/// Check a draft against the field rules
///
/// Rules run in a fixed order and the first failure is returned:
/// id format, full name present, full name charset, role charset, phone charset.
/// Role and phone are only checked when non-empty. Dates, IBAN and address are
/// free text. The draft is checked as given; callers trim beforehand.
///
/// Only ASCII `0-9` count as id digits. Other Unicode decimal digits, such as
/// Arabic-Indic ones, are rejected even though the legacy desktop tool let
/// them through.
pub fn validate(draft: &RecordDraft) -> Result<(), ValidationError> {
    if !is_national_id(&draft.id) {
        return Err(ValidationError::InvalidId);
    }

    if draft.full_name.is_empty() {
        return Err(ValidationError::MissingFullName);
    }

    if !is_alphanumeric_with_spaces(&draft.full_name) {
        return Err(ValidationError::InvalidFullName);
    }

    if !draft.role.is_empty() && !is_alphanumeric_with_spaces(&draft.role) {
        return Err(ValidationError::InvalidRole);
    }

    if !draft.phone.is_empty() && !is_digits_with_spaces(&draft.phone) {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(())
}

fn is_national_id(s: &str) -> bool {
    s.len() == ID_LEN && s.chars().all(|c| c.is_ascii_digit())
}

fn is_alphanumeric_with_spaces(s: &str) -> bool {
    s.chars().all(|c| c.is_alphanumeric() || c == ' ')
}

fn is_digits_with_spaces(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit() || c == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> RecordDraft {
        RecordDraft::new("12345678901", "Ayşe Yılmaz")
    }

    #[test]
    fn test_valid_draft_passes() {
        let mut draft = valid_draft();
        draft.role = "Kıdemli Uzman 2".to_string();
        draft.phone = "0532 123 45 67".to_string();
        draft.hire_date = "not a date at all!".to_string();
        draft.iban = "TR-??".to_string();
        draft.address = "Çankaya / Ankara, No:5".to_string();

        assert_eq!(validate(&draft), Ok(()));
    }

    #[test]
    fn test_id_rules() {
        for id in ["", "1234567890", "123456789012", "1234567890a", "12345 78901", "١٢٣٤٥٦٧٨٩٠١"] {
            let mut draft = valid_draft();
            draft.id = id.to_string();
            assert_eq!(validate(&draft), Err(ValidationError::InvalidId), "id {:?}", id);
        }
    }

    #[test]
    fn test_full_name_required() {
        let mut draft = valid_draft();
        draft.full_name = String::new();

        let err = validate(&draft).unwrap_err();
        assert_eq!(err, ValidationError::MissingFullName);
        assert_eq!(err.field(), Field::FullName);
    }

    #[test]
    fn test_full_name_charset() {
        let mut draft = valid_draft();
        draft.full_name = "Ali@Veli".to_string();

        assert_eq!(validate(&draft), Err(ValidationError::InvalidFullName));
    }

    #[test]
    fn test_first_failure_wins() {
        let draft = RecordDraft {
            id: "123".to_string(),
            full_name: "Ali@Veli".to_string(),
            role: "Boss!".to_string(),
            phone: "+90".to_string(),
            ..Default::default()
        };
        assert_eq!(validate(&draft), Err(ValidationError::InvalidId));

        let draft = RecordDraft {
            id: "12345678901".to_string(),
            ..draft
        };
        assert_eq!(validate(&draft), Err(ValidationError::InvalidFullName));

        let draft = RecordDraft {
            full_name: "Ali Veli".to_string(),
            ..draft
        };
        assert_eq!(validate(&draft), Err(ValidationError::InvalidRole));

        let draft = RecordDraft {
            role: "Boss".to_string(),
            ..draft
        };
        assert_eq!(validate(&draft), Err(ValidationError::InvalidPhone));
    }

    #[test]
    fn test_phone_charset() {
        let mut draft = valid_draft();
        draft.phone = "0532-123".to_string();
        let err = validate(&draft).unwrap_err();
        assert_eq!(err.field(), Field::Phone);

        draft.phone = "0532 123".to_string();
        assert!(validate(&draft).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ValidationError::InvalidId.to_string(),
            "National ID must be exactly 11 digits"
        );
        assert_eq!(ValidationError::InvalidRole.field(), Field::Role);
    }
}
