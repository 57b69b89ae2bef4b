//! Appointment models.

use serde::{Deserialize, Serialize};

choice_enum! {
    /// Lifecycle state of an appointment.
    #[derive(Default)]
    AppointmentStatus ("appointment status") {
        #[default]
        Scheduled => "Scheduled",
        Completed => "Completed",
        Cancelled => "Cancelled",
    }
}

/// A booked appointment. Patient and doctor are referenced by id only;
/// nothing stops the referenced rows from being deleted later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    /// Calendar date, YYYY-MM-DD
    pub date: String,
    /// Time of day, HH:MM:SS
    pub time: String,
    pub status: AppointmentStatus,
}

/// An appointment joined with whatever is left of its patient and doctor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentDetail {
    pub appointment: Appointment,
    pub patient_name: Option<String>,
    pub patient_cnic: Option<String>,
    pub doctor_name: Option<String>,
    pub doctor_cnic: Option<String>,
}

impl AppointmentDetail {
    /// `name | cnic` for the patient, or a placeholder if the row is gone.
    pub fn patient_label(&self) -> String {
        party_label(
            self.patient_name.as_deref(),
            self.patient_cnic.as_deref(),
            "patient",
            self.appointment.patient_id,
        )
    }

    /// `name | cnic` for the doctor, or a placeholder if the row is gone.
    pub fn doctor_label(&self) -> String {
        party_label(
            self.doctor_name.as_deref(),
            self.doctor_cnic.as_deref(),
            "doctor",
            self.appointment.doctor_id,
        )
    }
}

fn party_label(name: Option<&str>, cnic: Option<&str>, kind: &str, id: i64) -> String {
    match (name, cnic) {
        (Some(name), Some(cnic)) => format!("{} | {}", name, cnic),
        (Some(name), None) => name.to_string(),
        (None, _) => format!("Unknown {} #{}", kind, id),
    }
}

/// Booking form data. Date and time are raw form text, normalised on booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
}

/// Fields to overwrite on an existing appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppointmentChanges {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<AppointmentStatus>,
}

impl AppointmentChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_detail(patient_name: Option<&str>) -> AppointmentDetail {
        AppointmentDetail {
            appointment: Appointment {
                id: 7,
                patient_id: 3,
                doctor_id: 4,
                date: "2024-05-02".into(),
                time: "09:30:00".into(),
                status: AppointmentStatus::Scheduled,
            },
            patient_name: patient_name.map(Into::into),
            patient_cnic: Some("35202-1234567-1".into()),
            doctor_name: Some("Dr. Imran".into()),
            doctor_cnic: None,
        }
    }

    #[test]
    fn test_labels() {
        let detail = make_detail(Some("Ali"));
        assert_eq!(detail.patient_label(), "Ali | 35202-1234567-1");
        assert_eq!(detail.doctor_label(), "Dr. Imran");
    }

    #[test]
    fn test_label_for_deleted_patient() {
        let detail = make_detail(None);
        assert_eq!(detail.patient_label(), "Unknown patient #3");
    }

    #[test]
    fn test_default_status_is_scheduled() {
        assert_eq!(NewAppointment::default().status, AppointmentStatus::Scheduled);
    }
}
