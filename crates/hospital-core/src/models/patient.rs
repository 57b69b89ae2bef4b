//! Patient models.

use serde::{Deserialize, Serialize};

choice_enum! {
    /// Patient gender as captured on the registration form.
    Gender ("gender") {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Row identifier
    pub id: i64,
    /// Full name
    pub name: String,
    /// Identity-document number (unique when present)
    pub cnic: Option<String>,
    /// Age in years
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    /// Contact phone
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    /// Registration date (YYYY-MM-DD), defaults to the insert date
    pub registration_date: String,
}

impl Patient {
    /// Display label used in pickers and slips: `name | cnic`.
    pub fn label(&self) -> String {
        match &self.cnic {
            Some(cnic) => format!("{} | {}", self.name, cnic),
            None => self.name.clone(),
        }
    }
}

/// Form data for registering a patient.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub cnic: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    /// Left empty to let the database stamp today's date
    pub registration_date: Option<String>,
}

impl NewPatient {
    /// Create registration data with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Fields to overwrite on an existing patient. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientChanges {
    pub name: Option<String>,
    pub cnic: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

impl PatientChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_patient(cnic: Option<&str>) -> Patient {
        Patient {
            id: 1,
            name: "Ayesha Khan".into(),
            cnic: cnic.map(Into::into),
            age: Some(34),
            gender: Some(Gender::Female),
            phone: Some("0300-1234567".into()),
            address: None,
            email: None,
            registration_date: "2024-03-01".into(),
        }
    }

    #[test]
    fn test_label_with_cnic() {
        let patient = make_patient(Some("35202-1234567-1"));
        assert_eq!(patient.label(), "Ayesha Khan | 35202-1234567-1");
    }

    #[test]
    fn test_label_without_cnic() {
        assert_eq!(make_patient(None).label(), "Ayesha Khan");
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(PatientChanges::default().is_empty());
        let changes = PatientChanges {
            phone: Some("0321-0000000".into()),
            ..Default::default()
        };
        assert!(!changes.is_empty());
    }
}
