//! Hospital Records Core Library
//!
//! Patient, doctor, appointment, medical-record and billing management on a
//! single SQLite file, in one of two variants.
//!
//! # Architecture
//!
//! ```text
//!            CLI / FFI (HospitalCore)
//!                     │
//!          login gate (clinic variant)
//!                     │
//!   ┌─────────────────▼──────────────────┐
//!   │  service::Hospital                 │
//!   │  variant rules + form validation   │
//!   └───────┬──────────┬──────────┬──────┘
//!           │          │          │
//!           ▼          ▼          ▼
//!       db repos    reports     slip / export
//!           │          │          │
//!           └──────────┴──────────┘
//!                     │
//!                 SQLite file
//! ```
//!
//! # Modules
//!
//! - [`db`]: schema bootstrap and per-table repositories over an allow-list
//! - [`models`]: domain types (Patient, Doctor, Appointment, ...)
//! - [`validation`]: CNIC, date/time, amount and age checks
//! - [`auth`]: password digests and login sessions
//! - [`service`]: variant-aware CRUD
//! - [`reports`]: dashboard aggregations
//! - [`slip`]: PDF appointment slips
//! - [`export`]: CSV/JSON table dumps
//! - [`config`]: variants, sections and defaults

pub mod auth;
pub mod config;
pub mod db;
pub mod export;
pub mod models;
pub mod reports;
pub mod service;
pub mod slip;
pub mod validation;

// Re-export commonly used types
pub use auth::{Authenticator, Session, SessionState};
pub use config::{Config, Section, Variant};
pub use db::{Database, Table};
pub use models::{
    Appointment, AppointmentDetail, AppointmentStatus, Bill, Doctor, Gender, MedicalRecord,
    Patient, PaymentStatus, Role,
};
pub use reports::{Chart, ChartKind, Reporter};
pub use service::{Hospital, ServiceError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use models::UnknownChoice;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HospitalError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Export error: {0}")]
    ExportError(String),
}

impl From<db::DbError> for HospitalError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::Constraint(msg) => HospitalError::Duplicate(msg),
            db::DbError::NotFound(msg) => HospitalError::NotFound(msg),
            other => HospitalError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ServiceError> for HospitalError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Database(e) => e.into(),
            ServiceError::NotFound(msg) => HospitalError::NotFound(msg),
            ServiceError::Slip(slip::SlipError::NotFound(id)) => {
                HospitalError::NotFound(format!("appointment #{}", id))
            }
            ServiceError::Slip(e) => HospitalError::ExportError(e.to_string()),
            other => HospitalError::InvalidInput(other.to_string()),
        }
    }
}

impl From<auth::AuthError> for HospitalError {
    fn from(e: auth::AuthError) -> Self {
        match e {
            auth::AuthError::Database(e) => e.into(),
            other => HospitalError::Unauthorized(other.to_string()),
        }
    }
}

impl From<UnknownChoice> for HospitalError {
    fn from(e: UnknownChoice) -> Self {
        HospitalError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for HospitalError {
    fn from(e: serde_json::Error) -> Self {
        HospitalError::ExportError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for HospitalError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HospitalError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path. `variant` is `clinic` or
/// `records`.
#[uniffi::export]
pub fn open_database(path: String, variant: String) -> Result<Arc<HospitalCore>, HospitalError> {
    let variant = Variant::from_str(&variant).map_err(HospitalError::InvalidInput)?;
    let db = Database::open(&path)?;
    Ok(Arc::new(HospitalCore::new(db, variant)))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory(variant: String) -> Result<Arc<HospitalCore>, HospitalError> {
    let variant = Variant::from_str(&variant).map_err(HospitalError::InvalidInput)?;
    let db = Database::open_in_memory()?;
    Ok(Arc::new(HospitalCore::new(db, variant)))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe hospital handle for FFI. In the clinic variant every data
/// operation needs a prior successful [`HospitalCore::login`].
#[derive(uniffi::Object)]
pub struct HospitalCore {
    db: Arc<Mutex<Database>>,
    variant: Variant,
    session: Mutex<SessionState>,
}

impl HospitalCore {
    fn new(db: Database, variant: Variant) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            variant,
            session: Mutex::new(SessionState::new()),
        }
    }

    fn guard(&self) -> Result<(), HospitalError> {
        if self.variant.requires_login() {
            self.session.lock()?.require()?;
        }
        Ok(())
    }

    /// Run `f` against a [`Hospital`] once the login gate has passed.
    fn with_hospital<T>(
        &self,
        f: impl FnOnce(&Hospital<'_>) -> service::ServiceResult<T>,
    ) -> Result<T, HospitalError> {
        self.guard()?;
        let db = self.db.lock()?;
        Ok(f(&Hospital::new(&db, self.variant))?)
    }
}

fn parse_choice<T>(value: Option<String>) -> Result<Option<T>, UnknownChoice>
where
    T: FromStr<Err = UnknownChoice>,
{
    value.as_deref().map(T::from_str).transpose()
}

#[uniffi::export]
impl HospitalCore {
    // =========================================================================
    // Session Operations
    // =========================================================================

    pub fn variant(&self) -> String {
        self.variant.to_string()
    }

    /// Section labels in navigation order.
    pub fn sections(&self) -> Vec<String> {
        self.variant
            .sections()
            .iter()
            .map(|s| s.label().to_string())
            .collect()
    }

    /// Check credentials and start a session.
    pub fn login(&self, username: String, password: String) -> Result<FfiSession, HospitalError> {
        let db = self.db.lock()?;
        let auth = Authenticator::new(&db);
        let mut state = self.session.lock()?;
        let session = state.login(&auth, &username, &password)?;
        Ok(session.clone().into())
    }

    pub fn logout(&self) -> Result<(), HospitalError> {
        self.session.lock()?.logout();
        Ok(())
    }

    pub fn is_logged_in(&self) -> Result<bool, HospitalError> {
        Ok(self.session.lock()?.is_logged_in())
    }

    /// Create a login account. Requires an admin session.
    pub fn add_user(
        &self,
        username: String,
        password: String,
        role: String,
    ) -> Result<(), HospitalError> {
        let role = Role::from_str(&role)?;
        let is_admin = self
            .session
            .lock()?
            .current()
            .is_some_and(|s| s.role == Role::Admin);
        if !is_admin {
            return Err(HospitalError::Unauthorized(
                "adding users needs an admin session".to_string(),
            ));
        }
        let db = self.db.lock()?;
        Authenticator::new(&db).add_user(&username, &password, role)?;
        Ok(())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// List patients, optionally filtered by a name/CNIC/phone substring.
    pub fn list_patients(&self, search: Option<String>) -> Result<Vec<FfiPatient>, HospitalError> {
        let patients = self.with_hospital(|h| h.list_patients(search.as_deref()))?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    pub fn get_patient(&self, id: i64) -> Result<FfiPatient, HospitalError> {
        Ok(self.with_hospital(|h| h.get_patient(id))?.into())
    }

    /// Register a patient and return its ID.
    pub fn register_patient(&self, patient: FfiNewPatient) -> Result<i64, HospitalError> {
        let patient: models::NewPatient = patient.try_into()?;
        self.with_hospital(|h| h.register_patient(&patient))
    }

    pub fn update_patient(&self, id: i64, changes: FfiPatientChanges) -> Result<(), HospitalError> {
        let changes: models::PatientChanges = changes.try_into()?;
        self.with_hospital(|h| h.update_patient(id, &changes))
    }

    pub fn delete_patient(&self, id: i64) -> Result<bool, HospitalError> {
        self.with_hospital(|h| h.delete_patient(id))
    }

    // =========================================================================
    // Doctor Operations
    // =========================================================================

    pub fn list_doctors(&self, search: Option<String>) -> Result<Vec<FfiDoctor>, HospitalError> {
        let doctors = self.with_hospital(|h| h.list_doctors(search.as_deref()))?;
        Ok(doctors.into_iter().map(|d| d.into()).collect())
    }

    pub fn get_doctor(&self, id: i64) -> Result<FfiDoctor, HospitalError> {
        Ok(self.with_hospital(|h| h.get_doctor(id))?.into())
    }

    pub fn add_doctor(&self, doctor: FfiNewDoctor) -> Result<i64, HospitalError> {
        let doctor: models::NewDoctor = doctor.into();
        self.with_hospital(|h| h.add_doctor(&doctor))
    }

    pub fn update_doctor(&self, id: i64, changes: FfiDoctorChanges) -> Result<(), HospitalError> {
        let changes: models::DoctorChanges = changes.into();
        self.with_hospital(|h| h.update_doctor(id, &changes))
    }

    pub fn delete_doctor(&self, id: i64) -> Result<bool, HospitalError> {
        self.with_hospital(|h| h.delete_doctor(id))
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    pub fn list_appointments(&self) -> Result<Vec<FfiAppointment>, HospitalError> {
        let appointments = self.with_hospital(|h| h.list_appointments())?;
        Ok(appointments.into_iter().map(|a| a.into()).collect())
    }

    pub fn get_appointment(&self, id: i64) -> Result<FfiAppointment, HospitalError> {
        Ok(self.with_hospital(|h| h.get_appointment(id))?.into())
    }

    pub fn book_appointment(&self, appointment: FfiNewAppointment) -> Result<i64, HospitalError> {
        let appointment: models::NewAppointment = appointment.try_into()?;
        self.with_hospital(|h| h.book_appointment(&appointment))
    }

    pub fn update_appointment(
        &self,
        id: i64,
        changes: FfiAppointmentChanges,
    ) -> Result<(), HospitalError> {
        let changes: models::AppointmentChanges = changes.try_into()?;
        self.with_hospital(|h| h.update_appointment(id, &changes))
    }

    pub fn delete_appointment(&self, id: i64) -> Result<bool, HospitalError> {
        self.with_hospital(|h| h.delete_appointment(id))
    }

    /// Write `appointment_{id}.pdf` into `output_dir` and return its path.
    pub fn generate_slip(&self, id: i64, output_dir: String) -> Result<String, HospitalError> {
        let path = self.with_hospital(|h| h.generate_slip(id, Path::new(&output_dir)))?;
        Ok(path.display().to_string())
    }

    // =========================================================================
    // Medical Record Operations
    // =========================================================================

    pub fn list_medical_records(
        &self,
        patient_id: Option<i64>,
    ) -> Result<Vec<FfiMedicalRecord>, HospitalError> {
        let records = self.with_hospital(|h| h.list_medical_records(patient_id))?;
        Ok(records.into_iter().map(|r| r.into()).collect())
    }

    pub fn get_medical_record(&self, id: i64) -> Result<FfiMedicalRecord, HospitalError> {
        Ok(self.with_hospital(|h| h.get_medical_record(id))?.into())
    }

    pub fn add_medical_record(&self, record: FfiNewMedicalRecord) -> Result<i64, HospitalError> {
        let record: models::NewMedicalRecord = record.into();
        self.with_hospital(|h| h.add_medical_record(&record))
    }

    pub fn update_medical_record(
        &self,
        id: i64,
        changes: FfiMedicalRecordChanges,
    ) -> Result<(), HospitalError> {
        let changes: models::MedicalRecordChanges = changes.into();
        self.with_hospital(|h| h.update_medical_record(id, &changes))
    }

    pub fn delete_medical_record(&self, id: i64) -> Result<bool, HospitalError> {
        self.with_hospital(|h| h.delete_medical_record(id))
    }

    // =========================================================================
    // Billing Operations
    // =========================================================================

    pub fn list_bills(&self) -> Result<Vec<FfiBill>, HospitalError> {
        let bills = self.with_hospital(|h| h.list_bills())?;
        Ok(bills.into_iter().map(|b| b.into()).collect())
    }

    pub fn get_bill(&self, id: i64) -> Result<FfiBill, HospitalError> {
        Ok(self.with_hospital(|h| h.get_bill(id))?.into())
    }

    pub fn add_bill(&self, bill: FfiNewBill) -> Result<i64, HospitalError> {
        let bill: models::NewBill = bill.try_into()?;
        self.with_hospital(|h| h.add_bill(&bill))
    }

    pub fn update_bill(&self, id: i64, changes: FfiBillChanges) -> Result<(), HospitalError> {
        let changes: models::BillChanges = changes.try_into()?;
        self.with_hospital(|h| h.update_bill(id, &changes))
    }

    pub fn delete_bill(&self, id: i64) -> Result<bool, HospitalError> {
        self.with_hospital(|h| h.delete_bill(id))
    }

    // =========================================================================
    // Dashboard Operations
    // =========================================================================

    pub fn overview(&self) -> Result<FfiOverview, HospitalError> {
        Ok(self.with_hospital(|h| h.overview())?.into())
    }

    /// Clinic analytics; `year` defaults to the earliest year on record.
    pub fn clinic_dashboard(&self, year: Option<i32>) -> Result<FfiClinicDashboard, HospitalError> {
        Ok(self.with_hospital(|h| h.clinic_dashboard(year))?.into())
    }

    pub fn home_dashboard(&self) -> Result<FfiHomeDashboard, HospitalError> {
        Ok(self.with_hospital(|h| h.home_dashboard())?.into())
    }

    pub fn patient_statistics(&self) -> Result<Vec<FfiChart>, HospitalError> {
        let stats = self.with_hospital(|h| h.patient_statistics())?;
        Ok(vec![stats.age_distribution.into(), stats.registrations.into()])
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    /// Export a table (`patients`, `doctors`, ...) as JSON.
    pub fn export_table_json(&self, table: String) -> Result<String, HospitalError> {
        let table = Table::from_str(&table)?;
        let export = self.with_hospital(|h| h.export(table))?;
        Ok(export.to_json()?)
    }

    /// Export a table as CSV.
    pub fn export_table_csv(&self, table: String) -> Result<String, HospitalError> {
        let table = Table::from_str(&table)?;
        let export = self.with_hospital(|h| h.export(table))?;
        Ok(export.to_csv())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe login session.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSession {
    pub token: String,
    pub username: String,
    pub role: String,
    pub logged_in_at: String,
}

impl From<Session> for FfiSession {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            username: session.username,
            role: session.role.to_string(),
            logged_in_at: session.logged_in_at,
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: i64,
    pub name: String,
    pub cnic: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub registration_date: String,
    /// `name | cnic` picker label
    pub label: String,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            label: patient.label(),
            id: patient.id,
            name: patient.name,
            cnic: patient.cnic,
            age: patient.age,
            gender: patient.gender.map(|g| g.to_string()),
            phone: patient.phone,
            address: patient.address,
            email: patient.email,
            registration_date: patient.registration_date,
        }
    }
}

/// FFI-safe patient registration form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub name: String,
    pub cnic: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub registration_date: Option<String>,
}

impl TryFrom<FfiNewPatient> for models::NewPatient {
    type Error = UnknownChoice;

    fn try_from(p: FfiNewPatient) -> Result<Self, Self::Error> {
        Ok(models::NewPatient {
            name: p.name,
            cnic: p.cnic,
            age: p.age,
            gender: parse_choice(p.gender)?,
            phone: p.phone,
            address: p.address,
            email: p.email,
            registration_date: p.registration_date,
        })
    }
}

/// FFI-safe patient update; `None` leaves a field unchanged.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientChanges {
    pub name: Option<String>,
    pub cnic: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
}

impl TryFrom<FfiPatientChanges> for models::PatientChanges {
    type Error = UnknownChoice;

    fn try_from(c: FfiPatientChanges) -> Result<Self, Self::Error> {
        Ok(models::PatientChanges {
            name: c.name,
            cnic: c.cnic,
            age: c.age,
            gender: parse_choice(c.gender)?,
            phone: c.phone,
            address: c.address,
            email: c.email,
        })
    }
}

/// FFI-safe doctor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub id: i64,
    pub name: String,
    pub cnic: Option<String>,
    pub specialty: Option<String>,
    pub dept_id: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub label: String,
}

impl From<Doctor> for FfiDoctor {
    fn from(doctor: Doctor) -> Self {
        Self {
            label: doctor.label(),
            id: doctor.id,
            name: doctor.name,
            cnic: doctor.cnic,
            specialty: doctor.specialty,
            dept_id: doctor.dept_id,
            phone: doctor.phone,
            email: doctor.email,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewDoctor {
    pub name: String,
    pub cnic: Option<String>,
    pub specialty: Option<String>,
    pub dept_id: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<FfiNewDoctor> for models::NewDoctor {
    fn from(d: FfiNewDoctor) -> Self {
        models::NewDoctor {
            name: d.name,
            cnic: d.cnic,
            specialty: d.specialty,
            dept_id: d.dept_id,
            phone: d.phone,
            email: d.email,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctorChanges {
    pub name: Option<String>,
    pub cnic: Option<String>,
    pub specialty: Option<String>,
    pub dept_id: Option<i64>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl From<FfiDoctorChanges> for models::DoctorChanges {
    fn from(c: FfiDoctorChanges) -> Self {
        models::DoctorChanges {
            name: c.name,
            cnic: c.cnic,
            specialty: c.specialty,
            dept_id: c.dept_id,
            phone: c.phone,
            email: c.email,
        }
    }
}

/// FFI-safe appointment with resolved labels.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub patient_label: String,
    pub doctor_label: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

impl From<AppointmentDetail> for FfiAppointment {
    fn from(detail: AppointmentDetail) -> Self {
        Self {
            patient_label: detail.patient_label(),
            doctor_label: detail.doctor_label(),
            id: detail.appointment.id,
            patient_id: detail.appointment.patient_id,
            doctor_id: detail.appointment.doctor_id,
            date: detail.appointment.date,
            time: detail.appointment.time,
            status: detail.appointment.status.to_string(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    /// YYYY-MM-DD
    pub date: String,
    /// HH:MM or HH:MM:SS
    pub time: String,
    /// Defaults to Scheduled
    pub status: Option<String>,
}

impl TryFrom<FfiNewAppointment> for models::NewAppointment {
    type Error = UnknownChoice;

    fn try_from(a: FfiNewAppointment) -> Result<Self, Self::Error> {
        Ok(models::NewAppointment {
            patient_id: a.patient_id,
            doctor_id: a.doctor_id,
            date: a.date,
            time: a.time,
            status: parse_choice(a.status)?.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointmentChanges {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<FfiAppointmentChanges> for models::AppointmentChanges {
    type Error = UnknownChoice;

    fn try_from(c: FfiAppointmentChanges) -> Result<Self, Self::Error> {
        Ok(models::AppointmentChanges {
            patient_id: c.patient_id,
            doctor_id: c.doctor_id,
            date: c.date,
            time: c.time,
            status: parse_choice(c.status)?,
        })
    }
}

/// FFI-safe medical record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicalRecord {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
}

impl From<MedicalRecord> for FfiMedicalRecord {
    fn from(r: MedicalRecord) -> Self {
        Self {
            id: r.id,
            patient_id: r.patient_id,
            doctor_id: r.doctor_id,
            diagnosis: r.diagnosis,
            treatment: r.treatment,
            prescription: r.prescription,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewMedicalRecord {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
}

impl From<FfiNewMedicalRecord> for models::NewMedicalRecord {
    fn from(r: FfiNewMedicalRecord) -> Self {
        models::NewMedicalRecord {
            patient_id: r.patient_id,
            doctor_id: r.doctor_id,
            diagnosis: r.diagnosis,
            treatment: r.treatment,
            prescription: r.prescription,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMedicalRecordChanges {
    pub patient_id: Option<i64>,
    pub doctor_id: Option<i64>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
}

impl From<FfiMedicalRecordChanges> for models::MedicalRecordChanges {
    fn from(c: FfiMedicalRecordChanges) -> Self {
        models::MedicalRecordChanges {
            patient_id: c.patient_id,
            doctor_id: c.doctor_id,
            diagnosis: c.diagnosis,
            treatment: c.treatment,
            prescription: c.prescription,
        }
    }
}

/// FFI-safe bill.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBill {
    pub id: i64,
    pub patient_id: i64,
    pub amount: f64,
    pub details: Option<String>,
    pub payment_status: String,
    pub bill_date: String,
}

impl From<Bill> for FfiBill {
    fn from(b: Bill) -> Self {
        Self {
            id: b.id,
            patient_id: b.patient_id,
            amount: b.amount,
            details: b.details,
            payment_status: b.payment_status.to_string(),
            bill_date: b.bill_date,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewBill {
    pub patient_id: i64,
    pub amount: f64,
    pub details: Option<String>,
    /// Defaults to Pending
    pub payment_status: Option<String>,
    pub bill_date: Option<String>,
}

impl TryFrom<FfiNewBill> for models::NewBill {
    type Error = UnknownChoice;

    fn try_from(b: FfiNewBill) -> Result<Self, Self::Error> {
        Ok(models::NewBill {
            patient_id: b.patient_id,
            amount: b.amount,
            details: b.details,
            payment_status: parse_choice(b.payment_status)?.unwrap_or_default(),
            bill_date: b.bill_date,
        })
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBillChanges {
    pub patient_id: Option<i64>,
    pub amount: Option<f64>,
    pub details: Option<String>,
    pub payment_status: Option<String>,
    pub bill_date: Option<String>,
}

impl TryFrom<FfiBillChanges> for models::BillChanges {
    type Error = UnknownChoice;

    fn try_from(c: FfiBillChanges) -> Result<Self, Self::Error> {
        Ok(models::BillChanges {
            patient_id: c.patient_id,
            amount: c.amount,
            details: c.details,
            payment_status: parse_choice(c.payment_status)?,
            bill_date: c.bill_date,
        })
    }
}

/// FFI-safe chart point.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDataPoint {
    pub label: String,
    pub value: f64,
}

/// FFI-safe chart.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiChart {
    pub title: String,
    /// Line, Bar or Area
    pub kind: String,
    pub points: Vec<FfiDataPoint>,
}

impl From<Chart> for FfiChart {
    fn from(chart: Chart) -> Self {
        Self {
            title: chart.title,
            kind: format!("{:?}", chart.kind),
            points: chart
                .points
                .into_iter()
                .map(|p| FfiDataPoint {
                    label: p.label,
                    value: p.value,
                })
                .collect(),
        }
    }
}

/// FFI-safe headline totals.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiOverview {
    pub total_patients: i64,
    pub total_doctors: i64,
    pub total_appointments: i64,
    pub total_revenue: f64,
}

impl From<reports::Overview> for FfiOverview {
    fn from(o: reports::Overview) -> Self {
        Self {
            total_patients: o.total_patients,
            total_doctors: o.total_doctors,
            total_appointments: o.total_appointments,
            total_revenue: o.total_revenue,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicDashboard {
    pub years: Vec<i32>,
    pub selected_year: Option<i32>,
    pub monthly_trend: FfiChart,
    pub by_doctor: FfiChart,
}

impl From<reports::ClinicDashboard> for FfiClinicDashboard {
    fn from(d: reports::ClinicDashboard) -> Self {
        Self {
            years: d.years,
            selected_year: d.selected_year,
            monthly_trend: d.monthly_trend.into(),
            by_doctor: d.by_doctor.into(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHomeDashboard {
    pub overview: FfiOverview,
    pub charts: Vec<FfiChart>,
}

impl From<reports::HomeDashboard> for FfiHomeDashboard {
    fn from(d: reports::HomeDashboard) -> Self {
        Self {
            overview: d.overview.into(),
            charts: vec![
                d.new_patients.into(),
                d.gender.into(),
                d.appointment_status.into(),
                d.monthly_revenue.into(),
                d.busiest_doctors.into(),
            ],
        }
    }
}
