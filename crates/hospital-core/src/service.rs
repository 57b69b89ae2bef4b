//! Variant-aware operations behind every section.
//!
//! [`Hospital`] applies the form rules of the active [`Variant`] and then
//! hands off to the repositories in [`crate::db`]. Optional text fields are
//! trimmed and blanks are treated as absent, so an empty CNIC is stored as
//! NULL rather than colliding on the unique index.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{Section, Variant};
use crate::db::{Database, DbError, Table};
use crate::export::{TableExport, TableExporter};
use crate::models::{
    Appointment, AppointmentChanges, AppointmentDetail, Bill, BillChanges, Doctor, DoctorChanges,
    MedicalRecord, MedicalRecordChanges, NewAppointment, NewBill, NewDoctor, NewMedicalRecord,
    NewPatient, Patient, PatientChanges,
};
use crate::reports::{ClinicDashboard, HomeDashboard, Overview, PatientStatistics, Reporter};
use crate::slip::{SlipError, SlipGenerator};
use crate::validation::{
    check_age, check_amount, check_cnic, normalize_date, normalize_time, require, ValidationError,
};

/// Service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Database(#[from] DbError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0} is not available in this variant")]
    SectionUnavailable(Section),

    #[error("Appointment slips are not available in the {0} variant")]
    SlipsDisabled(Variant),

    #[error(transparent)]
    Slip(#[from] SlipError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

fn clean(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn not_found(kind: &str, id: i64) -> ServiceError {
    ServiceError::NotFound(format!("{} #{}", kind, id))
}

fn found(updated: bool, kind: &str, id: i64) -> ServiceResult<()> {
    if updated {
        Ok(())
    } else {
        Err(not_found(kind, id))
    }
}

fn section_for(table: Table) -> Section {
    match table {
        Table::Patients => Section::Patients,
        Table::Doctors => Section::Doctors,
        Table::Appointments => Section::Appointments,
        Table::MedicalRecords => Section::MedicalRecords,
        Table::Billings => Section::Billings,
    }
}

/// Hospital operations for one variant.
pub struct Hospital<'a> {
    db: &'a Database,
    variant: Variant,
}

impl<'a> Hospital<'a> {
    pub fn new(db: &'a Database, variant: Variant) -> Self {
        Self { db, variant }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn sections(&self) -> &'static [Section] {
        self.variant.sections()
    }

    fn require_section(&self, section: Section) -> ServiceResult<()> {
        if self.variant.has_section(section) {
            Ok(())
        } else {
            Err(ServiceError::SectionUnavailable(section))
        }
    }

    /// CNIC rule shared by patients and doctors: mandatory in the clinic
    /// variant, checked whenever given.
    fn check_identity(&self, cnic: Option<&str>) -> ServiceResult<()> {
        match cnic {
            Some(cnic) => check_cnic(cnic)?,
            None if self.variant.requires_cnic() => {
                return Err(ValidationError::MissingField("cnic").into())
            }
            None => {}
        }
        Ok(())
    }

    fn ensure_patient(&self, id: i64) -> ServiceResult<()> {
        self.db
            .get_patient(id)?
            .map(|_| ())
            .ok_or_else(|| not_found("patient", id))
    }

    fn ensure_doctor(&self, id: i64) -> ServiceResult<()> {
        self.db
            .get_doctor(id)?
            .map(|_| ())
            .ok_or_else(|| not_found("doctor", id))
    }

    // =====================================================================
    // Patients
    // =====================================================================

    /// All patients, or those whose name, CNIC or phone contains `search`.
    pub fn list_patients(&self, search: Option<&str>) -> ServiceResult<Vec<Patient>> {
        self.require_section(Section::Patients)?;
        Ok(match search {
            Some(term) => self.db.search_patients(term)?,
            None => self.db.list_patients()?,
        })
    }

    pub fn get_patient(&self, id: i64) -> ServiceResult<Patient> {
        self.require_section(Section::Patients)?;
        self.db.get_patient(id)?.ok_or_else(|| not_found("patient", id))
    }

    pub fn register_patient(&self, patient: &NewPatient) -> ServiceResult<i64> {
        self.require_section(Section::Patients)?;
        require("name", Some(patient.name.as_str()))?;

        let mut patient = NewPatient {
            name: patient.name.trim().to_string(),
            cnic: clean(&patient.cnic),
            phone: clean(&patient.phone),
            address: clean(&patient.address),
            email: clean(&patient.email),
            ..patient.clone()
        };
        self.check_identity(patient.cnic.as_deref())?;
        if self.variant.requires_phone() {
            require("phone", patient.phone.as_deref())?;
        }
        if let Some(age) = patient.age {
            check_age(age)?;
        }
        if let Some(date) = &patient.registration_date {
            patient.registration_date = Some(normalize_date(date)?);
        }

        let id = self.db.insert_patient(&patient)?;
        tracing::info!(id, variant = %self.variant, "patient registered");
        Ok(id)
    }

    /// Overwrite the given fields. Blank text counts as not given.
    pub fn update_patient(&self, id: i64, changes: &PatientChanges) -> ServiceResult<()> {
        self.require_section(Section::Patients)?;
        let changes = PatientChanges {
            name: clean(&changes.name),
            cnic: clean(&changes.cnic),
            phone: clean(&changes.phone),
            address: clean(&changes.address),
            email: clean(&changes.email),
            ..changes.clone()
        };
        if changes.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }
        if let Some(cnic) = &changes.cnic {
            check_cnic(cnic)?;
        }
        if let Some(age) = changes.age {
            check_age(age)?;
        }
        found(self.db.update_patient(id, &changes)?, "patient", id)
    }

    /// Returns whether a patient was removed. Their appointments, records and
    /// bills are left in place.
    pub fn delete_patient(&self, id: i64) -> ServiceResult<bool> {
        self.require_section(Section::Patients)?;
        Ok(self.db.delete_patient(id)?)
    }

    // =====================================================================
    // Doctors
    // =====================================================================

    pub fn list_doctors(&self, search: Option<&str>) -> ServiceResult<Vec<Doctor>> {
        self.require_section(Section::Doctors)?;
        Ok(match search {
            Some(term) => self.db.search_doctors(term)?,
            None => self.db.list_doctors()?,
        })
    }

    pub fn get_doctor(&self, id: i64) -> ServiceResult<Doctor> {
        self.require_section(Section::Doctors)?;
        self.db.get_doctor(id)?.ok_or_else(|| not_found("doctor", id))
    }

    pub fn add_doctor(&self, doctor: &NewDoctor) -> ServiceResult<i64> {
        self.require_section(Section::Doctors)?;
        require("name", Some(doctor.name.as_str()))?;

        let doctor = NewDoctor {
            name: doctor.name.trim().to_string(),
            cnic: clean(&doctor.cnic),
            specialty: clean(&doctor.specialty),
            phone: clean(&doctor.phone),
            email: clean(&doctor.email),
            ..doctor.clone()
        };
        self.check_identity(doctor.cnic.as_deref())?;

        let id = self.db.insert_doctor(&doctor)?;
        tracing::info!(id, variant = %self.variant, "doctor added");
        Ok(id)
    }

    pub fn update_doctor(&self, id: i64, changes: &DoctorChanges) -> ServiceResult<()> {
        self.require_section(Section::Doctors)?;
        let changes = DoctorChanges {
            name: clean(&changes.name),
            cnic: clean(&changes.cnic),
            specialty: clean(&changes.specialty),
            phone: clean(&changes.phone),
            email: clean(&changes.email),
            ..changes.clone()
        };
        if changes.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }
        if let Some(cnic) = &changes.cnic {
            check_cnic(cnic)?;
        }
        found(self.db.update_doctor(id, &changes)?, "doctor", id)
    }

    pub fn delete_doctor(&self, id: i64) -> ServiceResult<bool> {
        self.require_section(Section::Doctors)?;
        Ok(self.db.delete_doctor(id)?)
    }

    // =====================================================================
    // Appointments
    // =====================================================================

    /// Appointments with patient and doctor labels resolved.
    pub fn list_appointments(&self) -> ServiceResult<Vec<AppointmentDetail>> {
        self.require_section(Section::Appointments)?;
        Ok(self.db.list_appointment_details()?)
    }

    pub fn get_appointment(&self, id: i64) -> ServiceResult<AppointmentDetail> {
        self.require_section(Section::Appointments)?;
        self.db
            .get_appointment_detail(id)?
            .ok_or_else(|| not_found("appointment", id))
    }

    pub fn book_appointment(&self, appointment: &NewAppointment) -> ServiceResult<i64> {
        self.require_section(Section::Appointments)?;
        let appointment = NewAppointment {
            date: normalize_date(&appointment.date)?,
            time: normalize_time(&appointment.time)?,
            ..appointment.clone()
        };
        self.ensure_patient(appointment.patient_id)?;
        self.ensure_doctor(appointment.doctor_id)?;

        let id = self.db.insert_appointment(&appointment)?;
        tracing::info!(
            id,
            patient_id = appointment.patient_id,
            doctor_id = appointment.doctor_id,
            date = %appointment.date,
            "appointment booked"
        );
        Ok(id)
    }

    pub fn update_appointment(&self, id: i64, changes: &AppointmentChanges) -> ServiceResult<()> {
        self.require_section(Section::Appointments)?;
        if changes.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }
        let changes = AppointmentChanges {
            date: changes.date.as_deref().map(normalize_date).transpose()?,
            time: changes.time.as_deref().map(normalize_time).transpose()?,
            ..changes.clone()
        };
        if let Some(patient_id) = changes.patient_id {
            self.ensure_patient(patient_id)?;
        }
        if let Some(doctor_id) = changes.doctor_id {
            self.ensure_doctor(doctor_id)?;
        }
        found(self.db.update_appointment(id, &changes)?, "appointment", id)
    }

    pub fn delete_appointment(&self, id: i64) -> ServiceResult<bool> {
        self.require_section(Section::Appointments)?;
        Ok(self.db.delete_appointment(id)?)
    }

    /// Raw appointment rows, without labels.
    pub fn appointments(&self) -> ServiceResult<Vec<Appointment>> {
        self.require_section(Section::Appointments)?;
        Ok(self.db.list_appointments()?)
    }

    /// Write the PDF slip for an appointment into `output_dir`.
    pub fn generate_slip(&self, id: i64, output_dir: &Path) -> ServiceResult<PathBuf> {
        if !self.variant.slips_enabled() {
            return Err(ServiceError::SlipsDisabled(self.variant));
        }
        Ok(SlipGenerator::new(self.db, output_dir).generate(id)?)
    }

    // =====================================================================
    // Medical records
    // =====================================================================

    /// All records, or only those of one patient.
    pub fn list_medical_records(&self, patient_id: Option<i64>) -> ServiceResult<Vec<MedicalRecord>> {
        self.require_section(Section::MedicalRecords)?;
        Ok(match patient_id {
            Some(patient_id) => self.db.list_medical_records_for_patient(patient_id)?,
            None => self.db.list_medical_records()?,
        })
    }

    pub fn get_medical_record(&self, id: i64) -> ServiceResult<MedicalRecord> {
        self.require_section(Section::MedicalRecords)?;
        self.db
            .get_medical_record(id)?
            .ok_or_else(|| not_found("medical record", id))
    }

    pub fn add_medical_record(&self, record: &NewMedicalRecord) -> ServiceResult<i64> {
        self.require_section(Section::MedicalRecords)?;
        self.ensure_patient(record.patient_id)?;
        self.ensure_doctor(record.doctor_id)?;
        let record = NewMedicalRecord {
            diagnosis: clean(&record.diagnosis),
            treatment: clean(&record.treatment),
            prescription: clean(&record.prescription),
            ..record.clone()
        };
        Ok(self.db.insert_medical_record(&record)?)
    }

    pub fn update_medical_record(&self, id: i64, changes: &MedicalRecordChanges) -> ServiceResult<()> {
        self.require_section(Section::MedicalRecords)?;
        let changes = MedicalRecordChanges {
            diagnosis: clean(&changes.diagnosis),
            treatment: clean(&changes.treatment),
            prescription: clean(&changes.prescription),
            ..changes.clone()
        };
        if changes.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }
        if let Some(patient_id) = changes.patient_id {
            self.ensure_patient(patient_id)?;
        }
        if let Some(doctor_id) = changes.doctor_id {
            self.ensure_doctor(doctor_id)?;
        }
        found(self.db.update_medical_record(id, &changes)?, "medical record", id)
    }

    pub fn delete_medical_record(&self, id: i64) -> ServiceResult<bool> {
        self.require_section(Section::MedicalRecords)?;
        Ok(self.db.delete_medical_record(id)?)
    }

    // =====================================================================
    // Billing
    // =====================================================================

    pub fn list_bills(&self) -> ServiceResult<Vec<Bill>> {
        self.require_section(Section::Billings)?;
        Ok(self.db.list_bills()?)
    }

    pub fn get_bill(&self, id: i64) -> ServiceResult<Bill> {
        self.require_section(Section::Billings)?;
        self.db.get_bill(id)?.ok_or_else(|| not_found("bill", id))
    }

    pub fn add_bill(&self, bill: &NewBill) -> ServiceResult<i64> {
        self.require_section(Section::Billings)?;
        check_amount(bill.amount)?;
        self.ensure_patient(bill.patient_id)?;
        let bill = NewBill {
            details: clean(&bill.details),
            bill_date: bill.bill_date.as_deref().map(normalize_date).transpose()?,
            ..bill.clone()
        };
        let id = self.db.insert_bill(&bill)?;
        tracing::info!(id, patient_id = bill.patient_id, amount = bill.amount, "bill added");
        Ok(id)
    }

    pub fn update_bill(&self, id: i64, changes: &BillChanges) -> ServiceResult<()> {
        self.require_section(Section::Billings)?;
        let changes = BillChanges {
            details: clean(&changes.details),
            bill_date: changes.bill_date.as_deref().map(normalize_date).transpose()?,
            ..changes.clone()
        };
        if changes.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }
        if let Some(amount) = changes.amount {
            check_amount(amount)?;
        }
        if let Some(patient_id) = changes.patient_id {
            self.ensure_patient(patient_id)?;
        }
        found(self.db.update_bill(id, &changes)?, "bill", id)
    }

    pub fn delete_bill(&self, id: i64) -> ServiceResult<bool> {
        self.require_section(Section::Billings)?;
        Ok(self.db.delete_bill(id)?)
    }

    // =====================================================================
    // Dashboards and export
    // =====================================================================

    pub fn overview(&self) -> ServiceResult<Overview> {
        Ok(Reporter::new(self.db).overview()?)
    }

    pub fn clinic_dashboard(&self, year: Option<i32>) -> ServiceResult<ClinicDashboard> {
        self.require_section(Section::Dashboard)?;
        Ok(Reporter::new(self.db).clinic_dashboard(year)?)
    }

    pub fn home_dashboard(&self) -> ServiceResult<HomeDashboard> {
        self.require_section(Section::Home)?;
        Ok(Reporter::new(self.db).home_dashboard()?)
    }

    pub fn patient_statistics(&self) -> ServiceResult<PatientStatistics> {
        self.require_section(Section::Patients)?;
        Ok(Reporter::new(self.db).patient_statistics()?)
    }

    /// Dump one section's table.
    pub fn export(&self, table: Table) -> ServiceResult<TableExport> {
        self.require_section(section_for(table))?;
        Ok(TableExporter::new(self.db).export(table)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentStatus, PaymentStatus};

    const CNIC: &str = "35202-1234567-1";

    fn clinic_patient(name: &str, cnic: &str) -> NewPatient {
        NewPatient {
            cnic: Some(cnic.into()),
            ..NewPatient::new(name)
        }
    }

    #[test]
    fn test_clinic_requires_valid_cnic() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Clinic);

        let missing = hospital.register_patient(&NewPatient::new("Ali"));
        assert!(matches!(
            missing,
            Err(ServiceError::Validation(ValidationError::MissingField("cnic")))
        ));

        let blank = hospital.register_patient(&clinic_patient("Ali", "   "));
        assert!(matches!(
            blank,
            Err(ServiceError::Validation(ValidationError::MissingField("cnic")))
        ));

        let malformed = hospital.register_patient(&clinic_patient("Ali", "3520212345671"));
        assert!(matches!(
            malformed,
            Err(ServiceError::Validation(ValidationError::InvalidCnic(_)))
        ));

        let id = hospital.register_patient(&clinic_patient(" Ali ", CNIC)).unwrap();
        let patient = hospital.get_patient(id).unwrap();
        assert_eq!(patient.name, "Ali");
        assert_eq!(patient.label(), "Ali | 35202-1234567-1");
    }

    #[test]
    fn test_records_requires_phone() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Records);

        let result = hospital.register_patient(&NewPatient::new("Sara"));
        assert!(matches!(
            result,
            Err(ServiceError::Validation(ValidationError::MissingField("phone")))
        ));

        let id = hospital
            .register_patient(&NewPatient {
                phone: Some("0300-1234567".into()),
                cnic: Some("".into()),
                ..NewPatient::new("Sara")
            })
            .unwrap();
        assert_eq!(hospital.get_patient(id).unwrap().cnic, None);
    }

    #[test]
    fn test_age_range() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Clinic);
        let patient = NewPatient {
            age: Some(0),
            ..clinic_patient("Ali", CNIC)
        };
        assert!(matches!(
            hospital.register_patient(&patient),
            Err(ServiceError::Validation(ValidationError::InvalidAge(0)))
        ));
    }

    #[test]
    fn test_duplicate_cnic_is_database_constraint() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Clinic);
        hospital.register_patient(&clinic_patient("Ali", CNIC)).unwrap();
        let result = hospital.register_patient(&clinic_patient("Omar", CNIC));
        assert!(matches!(result, Err(ServiceError::Database(DbError::Constraint(_)))));
    }

    #[test]
    fn test_update_patient_rules() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Clinic);
        let id = hospital.register_patient(&clinic_patient("Ali", CNIC)).unwrap();

        assert!(matches!(
            hospital.update_patient(id, &PatientChanges::default()),
            Err(ServiceError::Validation(ValidationError::NothingToUpdate))
        ));
        assert!(matches!(
            hospital.update_patient(id, &PatientChanges { name: Some("  ".into()), ..Default::default() }),
            Err(ServiceError::Validation(ValidationError::NothingToUpdate))
        ));
        assert!(matches!(
            hospital.update_patient(999, &PatientChanges { age: Some(30), ..Default::default() }),
            Err(ServiceError::NotFound(_))
        ));

        hospital
            .update_patient(id, &PatientChanges { age: Some(30), ..Default::default() })
            .unwrap();
        assert_eq!(hospital.get_patient(id).unwrap().age, Some(30));
    }

    #[test]
    fn test_booking_checks_references_and_normalises() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Clinic);
        let patient_id = hospital.register_patient(&clinic_patient("Ali", CNIC)).unwrap();
        let doctor_id = hospital
            .add_doctor(&NewDoctor {
                cnic: Some("35202-7654321-9".into()),
                ..NewDoctor::new("Dr. Imran")
            })
            .unwrap();

        let orphan = hospital.book_appointment(&NewAppointment {
            patient_id,
            doctor_id: doctor_id + 10,
            date: "2024-06-01".into(),
            time: "09:30".into(),
            status: AppointmentStatus::Scheduled,
        });
        assert!(matches!(orphan, Err(ServiceError::NotFound(_))));

        let bad_date = hospital.book_appointment(&NewAppointment {
            patient_id,
            doctor_id,
            date: "01/06/2024".into(),
            time: "09:30".into(),
            status: AppointmentStatus::Scheduled,
        });
        assert!(matches!(
            bad_date,
            Err(ServiceError::Validation(ValidationError::InvalidDate(_)))
        ));

        let id = hospital
            .book_appointment(&NewAppointment {
                patient_id,
                doctor_id,
                date: "2024-06-01".into(),
                time: "09:30".into(),
                status: AppointmentStatus::Scheduled,
            })
            .unwrap();
        let detail = hospital.get_appointment(id).unwrap();
        assert_eq!(detail.appointment.time, "09:30:00");
        assert_eq!(detail.patient_label(), "Ali | 35202-1234567-1");
        assert_eq!(detail.doctor_label(), "Dr. Imran | 35202-7654321-9");
    }

    #[test]
    fn test_clinic_has_no_billing() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Clinic);
        assert!(matches!(
            hospital.list_bills(),
            Err(ServiceError::SectionUnavailable(Section::Billings))
        ));
        assert!(matches!(
            hospital.home_dashboard(),
            Err(ServiceError::SectionUnavailable(Section::Home))
        ));
        assert!(matches!(
            hospital.export(Table::MedicalRecords),
            Err(ServiceError::SectionUnavailable(Section::MedicalRecords))
        ));
    }

    #[test]
    fn test_records_has_no_slips() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Records);
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            hospital.generate_slip(1, dir.path()),
            Err(ServiceError::SlipsDisabled(Variant::Records))
        ));
    }

    #[test]
    fn test_bills() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Records);
        let patient_id = hospital
            .register_patient(&NewPatient {
                phone: Some("0300-1234567".into()),
                ..NewPatient::new("Sara")
            })
            .unwrap();

        let negative = hospital.add_bill(&NewBill {
            patient_id,
            amount: -5.0,
            ..Default::default()
        });
        assert!(matches!(
            negative,
            Err(ServiceError::Validation(ValidationError::InvalidAmount(_)))
        ));

        let id = hospital
            .add_bill(&NewBill {
                patient_id,
                amount: 2500.0,
                details: Some("Consultation".into()),
                payment_status: PaymentStatus::Pending,
                bill_date: Some("2024-03-15".into()),
            })
            .unwrap();
        hospital
            .update_bill(id, &BillChanges { payment_status: Some(PaymentStatus::Paid), ..Default::default() })
            .unwrap();

        let bill = hospital.get_bill(id).unwrap();
        assert_eq!(bill.payment_status, PaymentStatus::Paid);
        assert_eq!(bill.bill_date, "2024-03-15");
        assert_eq!(hospital.overview().unwrap().total_revenue, 2500.0);
        assert!(hospital.delete_bill(id).unwrap());
        assert!(!hospital.delete_bill(id).unwrap());
    }

    #[test]
    fn test_medical_records_by_patient() {
        let db = Database::open_in_memory().unwrap();
        let hospital = Hospital::new(&db, Variant::Records);
        let phone = Some("0300-1234567".to_string());
        let a = hospital
            .register_patient(&NewPatient { phone: phone.clone(), ..NewPatient::new("A") })
            .unwrap();
        let b = hospital
            .register_patient(&NewPatient { phone, ..NewPatient::new("B") })
            .unwrap();
        let doctor_id = hospital.add_doctor(&NewDoctor::new("Dr. C")).unwrap();

        for patient_id in [a, a, b] {
            hospital
                .add_medical_record(&NewMedicalRecord {
                    patient_id,
                    doctor_id,
                    diagnosis: Some("Flu".into()),
                    ..Default::default()
                })
                .unwrap();
        }

        assert_eq!(hospital.list_medical_records(None).unwrap().len(), 3);
        assert_eq!(hospital.list_medical_records(Some(a)).unwrap().len(), 2);
        assert!(matches!(
            hospital.add_medical_record(&NewMedicalRecord {
                patient_id: 99,
                doctor_id,
                ..Default::default()
            }),
            Err(ServiceError::NotFound(_))
        ));
    }
}
