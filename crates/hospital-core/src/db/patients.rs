//! Patient database operations.

use rusqlite::types::Value;

use super::access::push_field;
use super::{Database, DbResult, Table};
use crate::models::{NewPatient, Patient, PatientChanges};

impl Database {
    /// Insert a new patient, returning its identifier.
    pub fn insert_patient(&self, patient: &NewPatient) -> DbResult<i64> {
        let mut fields = vec![("name", Value::from(patient.name.clone()))];
        push_field(&mut fields, "cnic", patient.cnic.clone());
        push_field(&mut fields, "age", patient.age);
        push_field(&mut fields, "gender", patient.gender);
        push_field(&mut fields, "phone", patient.phone.clone());
        push_field(&mut fields, "address", patient.address.clone());
        push_field(&mut fields, "email", patient.email.clone());
        push_field(&mut fields, "registration_date", patient.registration_date.clone());
        self.insert_record(Table::Patients, &fields)
    }

    /// Overwrite the fields set in `changes`.
    pub fn update_patient(&self, id: i64, changes: &PatientChanges) -> DbResult<bool> {
        let mut fields = Vec::new();
        push_field(&mut fields, "name", changes.name.clone());
        push_field(&mut fields, "cnic", changes.cnic.clone());
        push_field(&mut fields, "age", changes.age);
        push_field(&mut fields, "gender", changes.gender);
        push_field(&mut fields, "phone", changes.phone.clone());
        push_field(&mut fields, "address", changes.address.clone());
        push_field(&mut fields, "email", changes.email.clone());
        self.update_record(Table::Patients, id, &fields)
    }

    /// Get a patient by ID.
    pub fn get_patient(&self, id: i64) -> DbResult<Option<Patient>> {
        self.query_one(Table::Patients, id, patient_from_row)
    }

    /// List all patients.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        self.query_rows(Table::Patients, "", [], patient_from_row)
    }

    /// Search patients by name, CNIC or phone (substring match).
    pub fn search_patients(&self, query: &str) -> DbResult<Vec<Patient>> {
        self.search_rows(Table::Patients, query, patient_from_row)
    }

    /// Delete a patient.
    pub fn delete_patient(&self, id: i64) -> DbResult<bool> {
        self.delete_record(Table::Patients, id)
    }
}

fn patient_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get("id")?,
        name: row.get("name")?,
        cnic: row.get("cnic")?,
        age: row.get("age")?,
        gender: row.get("gender")?,
        phone: row.get("phone")?,
        address: row.get("address")?,
        email: row.get("email")?,
        registration_date: row.get("registration_date")?,
    })
}
