//! Appointment slip integration tests.

use hospital_core::db::Database;
use hospital_core::models::{AppointmentStatus, NewAppointment, NewDoctor, NewPatient};
use hospital_core::slip::SlipGenerator;
use hospital_core::{Hospital, Variant};

fn book(db: &Database) -> i64 {
    let hospital = Hospital::new(db, Variant::Clinic);
    let patient_id = hospital
        .register_patient(&NewPatient {
            cnic: Some("35202-1234567-1".to_string()),
            ..NewPatient::new("Ayesha")
        })
        .unwrap();
    let doctor_id = hospital
        .add_doctor(&NewDoctor {
            cnic: Some("35202-7654321-0".to_string()),
            specialty: Some("Cardiology".to_string()),
            ..NewDoctor::new("Dr. Farooq")
        })
        .unwrap();
    hospital
        .book_appointment(&NewAppointment {
            patient_id,
            doctor_id,
            date: "2024-11-20".to_string(),
            time: "10:45".to_string(),
            status: AppointmentStatus::Scheduled,
        })
        .unwrap()
}

#[test]
fn test_slip_written_as_pdf() {
    let db = Database::open_in_memory().unwrap();
    let id = book(&db);
    let dir = tempfile::tempdir().unwrap();

    let path = SlipGenerator::new(&db, dir.path()).generate(id).unwrap();

    assert_eq!(path, dir.path().join(format!("appointment_{}.pdf", id)));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_slip_overwrites_previous_file() {
    let db = Database::open_in_memory().unwrap();
    let id = book(&db);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("appointment_{}.pdf", id));
    std::fs::write(&path, b"stale").unwrap();

    let hospital = Hospital::new(&db, Variant::Clinic);
    let written = hospital.generate_slip(id, dir.path()).unwrap();

    assert_eq!(written, path);
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[test]
fn test_slip_creates_output_dir() {
    let db = Database::open_in_memory().unwrap();
    let id = book(&db);
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("slips").join("today");

    let path = SlipGenerator::new(&db, &nested).generate(id).unwrap();
    assert!(path.starts_with(&nested));
    assert!(path.exists());
}
