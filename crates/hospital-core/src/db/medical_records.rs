//! Medical record database operations.

use rusqlite::types::Value;

use super::access::push_field;
use super::{Database, DbResult, Table};
use crate::models::{MedicalRecord, MedicalRecordChanges, NewMedicalRecord};

impl Database {
    pub fn insert_medical_record(&self, record: &NewMedicalRecord) -> DbResult<i64> {
        let mut fields = vec![
            ("patient_id", Value::from(record.patient_id)),
            ("doctor_id", Value::from(record.doctor_id)),
        ];
        push_field(&mut fields, "diagnosis", record.diagnosis.clone());
        push_field(&mut fields, "treatment", record.treatment.clone());
        push_field(&mut fields, "prescription", record.prescription.clone());
        self.insert_record(Table::MedicalRecords, &fields)
    }

    pub fn update_medical_record(&self, id: i64, changes: &MedicalRecordChanges) -> DbResult<bool> {
        let mut fields = Vec::new();
        push_field(&mut fields, "patient_id", changes.patient_id);
        push_field(&mut fields, "doctor_id", changes.doctor_id);
        push_field(&mut fields, "diagnosis", changes.diagnosis.clone());
        push_field(&mut fields, "treatment", changes.treatment.clone());
        push_field(&mut fields, "prescription", changes.prescription.clone());
        self.update_record(Table::MedicalRecords, id, &fields)
    }

    pub fn get_medical_record(&self, id: i64) -> DbResult<Option<MedicalRecord>> {
        self.query_one(Table::MedicalRecords, id, medical_record_from_row)
    }

    pub fn list_medical_records(&self) -> DbResult<Vec<MedicalRecord>> {
        self.query_rows(Table::MedicalRecords, "", [], medical_record_from_row)
    }

    /// Records for one patient, oldest first.
    pub fn list_medical_records_for_patient(&self, patient_id: i64) -> DbResult<Vec<MedicalRecord>> {
        self.query_rows(
            Table::MedicalRecords,
            "WHERE patient_id = ?",
            [patient_id],
            medical_record_from_row,
        )
    }

    pub fn delete_medical_record(&self, id: i64) -> DbResult<bool> {
        self.delete_record(Table::MedicalRecords, id)
    }
}

fn medical_record_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MedicalRecord> {
    Ok(MedicalRecord {
        id: row.get("id")?,
        patient_id: row.get("patient_id")?,
        doctor_id: row.get("doctor_id")?,
        diagnosis: row.get("diagnosis")?,
        treatment: row.get("treatment")?,
        prescription: row.get("prescription")?,
    })
}
