//! `hospital` command-line front end.

mod cli;
mod render;

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hospital_core::auth::{Authenticator, Session};
use hospital_core::config::{self, Config, Section, Variant};
use hospital_core::models::{
    AppointmentChanges, BillChanges, DoctorChanges, MedicalRecordChanges, NewAppointment, NewBill,
    NewDoctor, NewMedicalRecord, NewPatient, PatientChanges, Role,
};
use hospital_core::{Database, Hospital};

use cli::{
    AppointmentAction, BillAction, Cli, Command, DoctorAction, ExportFormat, PatientAction,
    RecordAction,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    tracing::debug!("{} v{} ({} variant)", config::APP_NAME, config::APP_VERSION, config.variant);

    let db = Database::open(&config.db_path)
        .with_context(|| format!("failed to open database {}", config.db_path.display()))?;
    let session = authenticate(&db, config.variant, cli.user.as_deref(), cli.password.as_deref())?;

    let hospital = Hospital::new(&db, config.variant);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&db, &hospital, session.as_ref(), &config, cli.command, &mut out)
}

/// Log in when credentials are given; the clinic variant insists on them.
///
/// Outside the clinic variant a rejected login only leaves the session empty,
/// so admin-only commands still refuse to run.
fn authenticate(
    db: &Database,
    variant: Variant,
    user: Option<&str>,
    password: Option<&str>,
) -> Result<Option<Session>> {
    match (user, password) {
        (Some(user), Some(password)) => match Authenticator::new(db).login(user, password) {
            Ok(session) => Ok(Some(session)),
            Err(e) if variant.requires_login() => Err(e).context("login failed"),
            Err(e) => {
                tracing::warn!(user, error = %e, "ignoring rejected login");
                Ok(None)
            }
        },
        _ if variant.requires_login() => {
            bail!("the {} variant requires --user and --password", variant)
        }
        _ => Ok(None),
    }
}

fn deleted(out: &mut dyn Write, kind: &str, id: i64, removed: bool) -> Result<()> {
    if removed {
        writeln!(out, "Deleted {} #{}", kind, id)?;
    } else {
        writeln!(out, "No {} #{}", kind, id)?;
    }
    Ok(())
}

fn run(
    db: &Database,
    hospital: &Hospital<'_>,
    session: Option<&Session>,
    config: &Config,
    command: Command,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Sections => {
            for section in hospital.sections() {
                writeln!(out, "{}", section)?;
            }
        }
        Command::Dashboard { year } => dashboard(hospital, year, out)?,
        Command::Patients { action } => patients(hospital, action, out)?,
        Command::Doctors { action } => doctors(hospital, action, out)?,
        Command::Appointments { action } => appointments(hospital, &config.slip_dir, action, out)?,
        Command::Records { action } => records(hospital, action, out)?,
        Command::Bills { action } => bills(hospital, action, out)?,
        Command::Export { table, format } => {
            let export = hospital.export(table)?;
            match format {
                ExportFormat::Csv => write!(out, "{}", export.to_csv())?,
                ExportFormat::Json => writeln!(out, "{}", export.to_json()?)?,
            }
        }
        Command::AddUser {
            username,
            new_password,
            role,
        } => {
            if !session.is_some_and(|s| s.role == Role::Admin) {
                bail!("adding users needs an admin login");
            }
            Authenticator::new(db).add_user(&username, &new_password, role)?;
            writeln!(out, "Added {} user {}", role, username)?;
        }
    }
    Ok(())
}

fn dashboard(hospital: &Hospital<'_>, year: Option<i32>, out: &mut dyn Write) -> Result<()> {
    if hospital.variant().has_section(Section::Dashboard) {
        let dashboard = hospital.clinic_dashboard(year)?;
        let years: Vec<String> = dashboard.years.iter().map(|y| y.to_string()).collect();
        match dashboard.selected_year {
            Some(year) => writeln!(out, "Year: {} (on record: {})\n", year, years.join(", "))?,
            None => writeln!(out, "No appointments on record\n")?,
        }
        write!(out, "{}\n{}", render::chart(&dashboard.monthly_trend), render::chart(&dashboard.by_doctor))?;
    } else {
        let home = hospital.home_dashboard()?;
        writeln!(out, "{}", render::overview(&home.overview))?;
        for chart in [
            &home.new_patients,
            &home.gender,
            &home.appointment_status,
            &home.monthly_revenue,
            &home.busiest_doctors,
        ] {
            writeln!(out, "{}", render::chart(chart))?;
        }
    }
    Ok(())
}

fn patients(hospital: &Hospital<'_>, action: PatientAction, out: &mut dyn Write) -> Result<()> {
    match action {
        PatientAction::List { search } => {
            write!(out, "{}", render::patients(&hospital.list_patients(search.as_deref())?))?
        }
        PatientAction::Show { id } => {
            write!(out, "{}", render::patients(&[hospital.get_patient(id)?]))?
        }
        PatientAction::Add {
            name,
            fields,
            registered,
        } => {
            let id = hospital.register_patient(&NewPatient {
                name,
                cnic: fields.cnic,
                age: fields.age,
                gender: fields.gender,
                phone: fields.phone,
                address: fields.address,
                email: fields.email,
                registration_date: registered,
            })?;
            writeln!(out, "Registered patient #{}", id)?;
        }
        PatientAction::Update { id, name, fields } => {
            hospital.update_patient(
                id,
                &PatientChanges {
                    name,
                    cnic: fields.cnic,
                    age: fields.age,
                    gender: fields.gender,
                    phone: fields.phone,
                    address: fields.address,
                    email: fields.email,
                },
            )?;
            writeln!(out, "Updated patient #{}", id)?;
        }
        PatientAction::Delete { id } => deleted(out, "patient", id, hospital.delete_patient(id)?)?,
        PatientAction::Stats => {
            let stats = hospital.patient_statistics()?;
            write!(
                out,
                "{}\n{}",
                render::chart(&stats.age_distribution),
                render::chart(&stats.registrations)
            )?;
        }
    }
    Ok(())
}

fn doctors(hospital: &Hospital<'_>, action: DoctorAction, out: &mut dyn Write) -> Result<()> {
    match action {
        DoctorAction::List { search } => {
            write!(out, "{}", render::doctors(&hospital.list_doctors(search.as_deref())?))?
        }
        DoctorAction::Show { id } => write!(out, "{}", render::doctors(&[hospital.get_doctor(id)?]))?,
        DoctorAction::Add { name, fields } => {
            let id = hospital.add_doctor(&NewDoctor {
                name,
                cnic: fields.cnic,
                specialty: fields.specialty,
                dept_id: fields.dept_id,
                phone: fields.phone,
                email: fields.email,
            })?;
            writeln!(out, "Added doctor #{}", id)?;
        }
        DoctorAction::Update { id, name, fields } => {
            hospital.update_doctor(
                id,
                &DoctorChanges {
                    name,
                    cnic: fields.cnic,
                    specialty: fields.specialty,
                    dept_id: fields.dept_id,
                    phone: fields.phone,
                    email: fields.email,
                },
            )?;
            writeln!(out, "Updated doctor #{}", id)?;
        }
        DoctorAction::Delete { id } => deleted(out, "doctor", id, hospital.delete_doctor(id)?)?,
    }
    Ok(())
}

fn appointments(
    hospital: &Hospital<'_>,
    slip_dir: &Path,
    action: AppointmentAction,
    out: &mut dyn Write,
) -> Result<()> {
    match action {
        AppointmentAction::List => {
            write!(out, "{}", render::appointments(&hospital.list_appointments()?))?
        }
        AppointmentAction::Show { id } => {
            write!(out, "{}", render::appointments(&[hospital.get_appointment(id)?]))?
        }
        AppointmentAction::Book {
            patient,
            doctor,
            date,
            time,
            status,
        } => {
            let id = hospital.book_appointment(&NewAppointment {
                patient_id: patient,
                doctor_id: doctor,
                date,
                time,
                status: status.unwrap_or_default(),
            })?;
            writeln!(out, "Booked appointment #{}", id)?;
        }
        AppointmentAction::Update {
            id,
            patient,
            doctor,
            date,
            time,
            status,
        } => {
            hospital.update_appointment(
                id,
                &AppointmentChanges {
                    patient_id: patient,
                    doctor_id: doctor,
                    date,
                    time,
                    status,
                },
            )?;
            writeln!(out, "Updated appointment #{}", id)?;
        }
        AppointmentAction::Delete { id } => {
            deleted(out, "appointment", id, hospital.delete_appointment(id)?)?
        }
        AppointmentAction::Slip { id, .. } => {
            let path = hospital
                .generate_slip(id, slip_dir)
                .with_context(|| format!("failed to write slip for appointment #{}", id))?;
            writeln!(out, "Slip written to {}", path.display())?;
        }
    }
    Ok(())
}

fn records(hospital: &Hospital<'_>, action: RecordAction, out: &mut dyn Write) -> Result<()> {
    match action {
        RecordAction::List { patient } => write!(
            out,
            "{}",
            render::medical_records(&hospital.list_medical_records(patient)?)
        )?,
        RecordAction::Show { id } => write!(
            out,
            "{}",
            render::medical_records(&[hospital.get_medical_record(id)?])
        )?,
        RecordAction::Add {
            patient,
            doctor,
            diagnosis,
            treatment,
            prescription,
        } => {
            let id = hospital.add_medical_record(&NewMedicalRecord {
                patient_id: patient,
                doctor_id: doctor,
                diagnosis,
                treatment,
                prescription,
            })?;
            writeln!(out, "Added medical record #{}", id)?;
        }
        RecordAction::Update {
            id,
            patient,
            doctor,
            diagnosis,
            treatment,
            prescription,
        } => {
            hospital.update_medical_record(
                id,
                &MedicalRecordChanges {
                    patient_id: patient,
                    doctor_id: doctor,
                    diagnosis,
                    treatment,
                    prescription,
                },
            )?;
            writeln!(out, "Updated medical record #{}", id)?;
        }
        RecordAction::Delete { id } => {
            deleted(out, "medical record", id, hospital.delete_medical_record(id)?)?
        }
    }
    Ok(())
}

fn bills(hospital: &Hospital<'_>, action: BillAction, out: &mut dyn Write) -> Result<()> {
    match action {
        BillAction::List => write!(out, "{}", render::bills(&hospital.list_bills()?))?,
        BillAction::Show { id } => write!(out, "{}", render::bills(&[hospital.get_bill(id)?]))?,
        BillAction::Add {
            patient,
            amount,
            details,
            status,
            date,
        } => {
            let id = hospital.add_bill(&NewBill {
                patient_id: patient,
                amount,
                details,
                payment_status: status.unwrap_or_default(),
                bill_date: date,
            })?;
            writeln!(out, "Added bill #{}", id)?;
        }
        BillAction::Update {
            id,
            patient,
            amount,
            details,
            status,
            date,
        } => {
            hospital.update_bill(
                id,
                &BillChanges {
                    patient_id: patient,
                    amount,
                    details,
                    payment_status: status,
                    bill_date: date,
                },
            )?;
            writeln!(out, "Updated bill #{}", id)?;
        }
        BillAction::Delete { id } => deleted(out, "bill", id, hospital.delete_bill(id)?)?,
    }
    Ok(())
}
