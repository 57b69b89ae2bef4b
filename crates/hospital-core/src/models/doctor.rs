//! Doctor models.

use serde::{Deserialize, Serialize};

/// A doctor on staff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    /// Identity-document number (unique when present)
    pub cnic: Option<String>,
    pub specialty: Option<String>,
    /// Department number, unvalidated
    pub dept_id: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Doctor {
    /// Display label: `name | cnic`.
    pub fn label(&self) -> String {
        match &self.cnic {
            Some(cnic) => format!("{} | {}", self.name, cnic),
            None => self.name.clone(),
        }
    }
}

/// Form data for adding a doctor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewDoctor {
    pub name: String,
    pub cnic: Option<String>,
    pub specialty: Option<String>,
    pub dept_id: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl NewDoctor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Fields to overwrite on an existing doctor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DoctorChanges {
    pub name: Option<String>,
    pub cnic: Option<String>,
    pub specialty: Option<String>,
    pub dept_id: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl DoctorChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
