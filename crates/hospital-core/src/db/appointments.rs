//! Appointment database operations.

use rusqlite::types::Value;
use rusqlite::OptionalExtension;

use super::access::push_field;
use super::{Database, DbResult, Table};
use crate::models::{Appointment, AppointmentChanges, AppointmentDetail, NewAppointment};

/// Appointments left-joined to their patient and doctor.
const DETAIL_QUERY: &str = r#"
    SELECT a.id, a.patient_id, a.doctor_id, a.date, a.time, a.status,
           p.name, p.cnic, d.name, d.cnic
    FROM appointments a
    LEFT JOIN patients p ON p.id = a.patient_id
    LEFT JOIN doctors d ON d.id = a.doctor_id
"#;

impl Database {
    /// Insert an appointment. Date and time are stored as given.
    pub fn insert_appointment(&self, appointment: &NewAppointment) -> DbResult<i64> {
        let fields = vec![
            ("patient_id", Value::from(appointment.patient_id)),
            ("doctor_id", Value::from(appointment.doctor_id)),
            ("date", Value::from(appointment.date.clone())),
            ("time", Value::from(appointment.time.clone())),
            ("status", Value::from(appointment.status)),
        ];
        self.insert_record(Table::Appointments, &fields)
    }

    pub fn update_appointment(&self, id: i64, changes: &AppointmentChanges) -> DbResult<bool> {
        let mut fields = Vec::new();
        push_field(&mut fields, "patient_id", changes.patient_id);
        push_field(&mut fields, "doctor_id", changes.doctor_id);
        push_field(&mut fields, "date", changes.date.clone());
        push_field(&mut fields, "time", changes.time.clone());
        push_field(&mut fields, "status", changes.status);
        self.update_record(Table::Appointments, id, &fields)
    }

    pub fn get_appointment(&self, id: i64) -> DbResult<Option<Appointment>> {
        self.query_one(Table::Appointments, id, appointment_from_row)
    }

    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        self.query_rows(Table::Appointments, "", [], appointment_from_row)
    }

    /// One appointment with patient and doctor names.
    pub fn get_appointment_detail(&self, id: i64) -> DbResult<Option<AppointmentDetail>> {
        let sql = format!("{} WHERE a.id = ?", DETAIL_QUERY);
        self.conn
            .query_row(&sql, [id], detail_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// All appointments with patient and doctor names.
    pub fn list_appointment_details(&self) -> DbResult<Vec<AppointmentDetail>> {
        let sql = format!("{} ORDER BY a.id", DETAIL_QUERY);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], detail_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn delete_appointment(&self, id: i64) -> DbResult<bool> {
        self.delete_record(Table::Appointments, id)
    }
}

fn appointment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get("id")?,
        patient_id: row.get("patient_id")?,
        doctor_id: row.get("doctor_id")?,
        date: row.get("date")?,
        time: row.get("time")?,
        status: row.get("status")?,
    })
}

fn detail_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentDetail> {
    Ok(AppointmentDetail {
        appointment: Appointment {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            doctor_id: row.get(2)?,
            date: row.get(3)?,
            time: row.get(4)?,
            status: row.get(5)?,
        },
        patient_name: row.get(6)?,
        patient_cnic: row.get(7)?,
        doctor_name: row.get(8)?,
        doctor_cnic: row.get(9)?,
    })
}
