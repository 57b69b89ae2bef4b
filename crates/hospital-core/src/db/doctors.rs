//! Doctor database operations.

use rusqlite::types::Value;

use super::access::push_field;
use super::{Database, DbResult, Table};
use crate::models::{Doctor, DoctorChanges, NewDoctor};

impl Database {
    /// Insert a new doctor, returning its identifier.
    pub fn insert_doctor(&self, doctor: &NewDoctor) -> DbResult<i64> {
        let mut fields = vec![("name", Value::from(doctor.name.clone()))];
        push_field(&mut fields, "cnic", doctor.cnic.clone());
        push_field(&mut fields, "specialty", doctor.specialty.clone());
        push_field(&mut fields, "dept_id", doctor.dept_id);
        push_field(&mut fields, "phone", doctor.phone.clone());
        push_field(&mut fields, "email", doctor.email.clone());
        self.insert_record(Table::Doctors, &fields)
    }

    /// Overwrite the fields set in `changes`.
    pub fn update_doctor(&self, id: i64, changes: &DoctorChanges) -> DbResult<bool> {
        let mut fields = Vec::new();
        push_field(&mut fields, "name", changes.name.clone());
        push_field(&mut fields, "cnic", changes.cnic.clone());
        push_field(&mut fields, "specialty", changes.specialty.clone());
        push_field(&mut fields, "dept_id", changes.dept_id);
        push_field(&mut fields, "phone", changes.phone.clone());
        push_field(&mut fields, "email", changes.email.clone());
        self.update_record(Table::Doctors, id, &fields)
    }

    pub fn get_doctor(&self, id: i64) -> DbResult<Option<Doctor>> {
        self.query_one(Table::Doctors, id, doctor_from_row)
    }

    pub fn list_doctors(&self) -> DbResult<Vec<Doctor>> {
        self.query_rows(Table::Doctors, "", [], doctor_from_row)
    }

    /// Search doctors by name, CNIC or specialty.
    pub fn search_doctors(&self, query: &str) -> DbResult<Vec<Doctor>> {
        self.search_rows(Table::Doctors, query, doctor_from_row)
    }

    pub fn delete_doctor(&self, id: i64) -> DbResult<bool> {
        self.delete_record(Table::Doctors, id)
    }
}

fn doctor_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get("id")?,
        name: row.get("name")?,
        cnic: row.get("cnic")?,
        specialty: row.get("specialty")?,
        dept_id: row.get("dept_id")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
    })
}
