// Personnel record and its raw input form

use serde::{Deserialize, Serialize};

/// One personnel entry, keyed by national id
///
/// Every field is always present on disk; optional fields that were left blank
/// are stored as empty strings. Keys written by the legacy desktop tool are
/// accepted on read and rewritten under the current names on the next save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelRecord {
    #[serde(default, alias = "tc")]
    pub id: String,
    #[serde(default, alias = "ad_soyad")]
    pub full_name: String,
    #[serde(default, alias = "gorevi")]
    pub role: String,
    #[serde(default, alias = "tel")]
    pub phone: String,
    #[serde(default, alias = "ise_giris")]
    pub hire_date: String,
    #[serde(default, alias = "isten_ayrilis")]
    pub termination_date: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default, alias = "adres")]
    pub address: String,
}

impl PersonnelRecord {
    /// Value of a single field
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::FullName => &self.full_name,
            Field::Role => &self.role,
            Field::Phone => &self.phone,
            Field::HireDate => &self.hire_date,
            Field::TerminationDate => &self.termination_date,
            Field::Iban => &self.iban,
            Field::Address => &self.address,
        }
    }
}

/// Raw field values as collected by a front end, before trimming and validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDraft {
    pub id: String,
    pub full_name: String,
    pub role: String,
    pub phone: String,
    pub hire_date: String,
    pub termination_date: String,
    pub iban: String,
    pub address: String,
}

impl RecordDraft {
    /// Draft with only the two required fields filled in
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    /// Copy of this draft with surrounding whitespace stripped from every field
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            full_name: self.full_name.trim().to_string(),
            role: self.role.trim().to_string(),
            phone: self.phone.trim().to_string(),
            hire_date: self.hire_date.trim().to_string(),
            termination_date: self.termination_date.trim().to_string(),
            iban: self.iban.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }

    pub(crate) fn into_record(self) -> PersonnelRecord {
        PersonnelRecord {
            id: self.id,
            full_name: self.full_name,
            role: self.role,
            phone: self.phone,
            hire_date: self.hire_date,
            termination_date: self.termination_date,
            iban: self.iban,
            address: self.address,
        }
    }
}

impl From<PersonnelRecord> for RecordDraft {
    fn from(record: PersonnelRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name,
            role: record.role,
            phone: record.phone,
            hire_date: record.hire_date,
            termination_date: record.termination_date,
            iban: record.iban,
            address: record.address,
        }
    }
}

/// Record fields, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    FullName,
    Role,
    Phone,
    HireDate,
    TerminationDate,
    Iban,
    Address,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Id,
        Field::FullName,
        Field::Role,
        Field::Phone,
        Field::HireDate,
        Field::TerminationDate,
        Field::Iban,
        Field::Address,
    ];

    /// Key used in the storage file and as the export column header
    pub fn key(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::FullName => "full_name",
            Field::Role => "role",
            Field::Phone => "phone",
            Field::HireDate => "hire_date",
            Field::TerminationDate => "termination_date",
            Field::Iban => "iban",
            Field::Address => "address",
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            Field::Id => "National ID",
            Field::FullName => "Full name",
            Field::Role => "Role",
            Field::Phone => "Phone",
            Field::HireDate => "Hire date",
            Field::TerminationDate => "Termination date",
            Field::Iban => "IBAN",
            Field::Address => "Address",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_to_empty() {
        let record: PersonnelRecord = serde_json::from_str(r#"{"id":"12345678901","full_name":"Ali Veli"}"#).unwrap();

        assert_eq!(record.id, "12345678901");
        assert_eq!(record.full_name, "Ali Veli");
        assert_eq!(record.role, "");
        assert_eq!(record.address, "");
    }

    #[test]
    fn test_serialization_writes_every_field() {
        let record = PersonnelRecord {
            id: "12345678901".to_string(),
            full_name: "Ali Veli".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), Field::ALL.len());
        for field in Field::ALL {
            assert!(object.contains_key(field.key()), "missing key {}", field.key());
        }
        assert_eq!(object["termination_date"], "");
    }

    #[test]
    fn test_legacy_keys_are_accepted() {
        let json = r#"{
            "tc": "12345678901",
            "ad_soyad": "Ayşe Yılmaz",
            "gorevi": "Muhasebe",
            "tel": "0532 000 00 00",
            "ise_giris": "01.02.2020",
            "isten_ayrilis": "",
            "iban": "TR00 0000",
            "adres": "Ankara"
        }"#;

        let record: PersonnelRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "12345678901");
        assert_eq!(record.full_name, "Ayşe Yılmaz");
        assert_eq!(record.role, "Muhasebe");
        assert_eq!(record.phone, "0532 000 00 00");
        assert_eq!(record.hire_date, "01.02.2020");
        assert_eq!(record.iban, "TR00 0000");
        assert_eq!(record.address, "Ankara");

        let rewritten = serde_json::to_string(&record).unwrap();
        assert!(rewritten.contains("\"full_name\":\"Ayşe Yılmaz\""));
        assert!(!rewritten.contains("ad_soyad"));
    }

    #[test]
    fn test_draft_trimmed() {
        let draft = RecordDraft {
            id: " 12345678901 ".to_string(),
            full_name: "\tAli Veli\n".to_string(),
            iban: "  ".to_string(),
            ..Default::default()
        };

        let trimmed = draft.trimmed();
        assert_eq!(trimmed.id, "12345678901");
        assert_eq!(trimmed.full_name, "Ali Veli");
        assert_eq!(trimmed.iban, "");
    }

    #[test]
    fn test_field_access_matches_keys() {
        let record = PersonnelRecord {
            id: "1".to_string(),
            full_name: "2".to_string(),
            role: "3".to_string(),
            phone: "4".to_string(),
            hire_date: "5".to_string(),
            termination_date: "6".to_string(),
            iban: "7".to_string(),
            address: "8".to_string(),
        };

        let values: Vec<&str> = Field::ALL.iter().map(|f| record.get(*f)).collect();
        assert_eq!(values, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert_eq!(Field::TerminationDate.to_string(), "Termination date");
    }
}
