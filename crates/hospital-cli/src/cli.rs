//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use hospital_core::config::{Config, DEFAULT_DB_FILE};
use hospital_core::models::{AppointmentStatus, Gender, PaymentStatus, Role};
use hospital_core::{Table, Variant};

/// Custom parser for the variant flag so clap reports the supported values.
pub fn parse_variant(value: &str) -> Result<Variant, String> {
    value.parse()
}

#[derive(Parser, Debug)]
#[command(name = "hospital", version, about = "Hospital patient, appointment and billing records")]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "HOSPITAL_DB", default_value = DEFAULT_DB_FILE)]
    pub db: PathBuf,

    /// clinic (login, CNIC, slips) or records (medical records, billing)
    #[arg(long, global = true, env = "HOSPITAL_VARIANT", default_value = "clinic", value_parser = parse_variant)]
    pub variant: Variant,

    /// Login name, required by the clinic variant and by add-user
    #[arg(short, long, global = true, env = "HOSPITAL_USER")]
    pub user: Option<String>,

    /// Login password
    #[arg(long, global = true, env = "HOSPITAL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> Config {
        let mut config = Config {
            db_path: self.db.clone(),
            variant: self.variant,
            ..Config::default()
        };
        if let Command::Appointments {
            action: AppointmentAction::Slip { out: Some(dir), .. },
        } = &self.command
        {
            config.slip_dir = dir.clone();
        }
        config
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// List the sections of the active variant
    Sections,
    /// Show the dashboard (clinic) or home page (records)
    Dashboard {
        /// Year for the clinic trend charts; defaults to the earliest on record
        #[arg(long)]
        year: Option<i32>,
    },
    /// Manage patients
    Patients {
        #[command(subcommand)]
        action: PatientAction,
    },
    /// Manage doctors
    Doctors {
        #[command(subcommand)]
        action: DoctorAction,
    },
    /// Manage appointments
    Appointments {
        #[command(subcommand)]
        action: AppointmentAction,
    },
    /// Manage medical records
    Records {
        #[command(subcommand)]
        action: RecordAction,
    },
    /// Manage bills
    Bills {
        #[command(subcommand)]
        action: BillAction,
    },
    /// Dump a table to stdout
    Export {
        /// patients, doctors, appointments, medical_records or billings
        table: Table,
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
    },
    /// Create a login account (admin only)
    AddUser {
        username: String,
        #[arg(long = "new-password")]
        new_password: String,
        #[arg(long, default_value = "Staff")]
        role: Role,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Args, Debug, PartialEq, Clone, Default)]
pub struct PatientFields {
    #[arg(long)]
    pub cnic: Option<String>,
    #[arg(long)]
    pub age: Option<i64>,
    #[arg(long)]
    pub gender: Option<Gender>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum PatientAction {
    List {
        /// Substring of name, CNIC or phone
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: i64,
    },
    Add {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: PatientFields,
        /// Registration date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        registered: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: PatientFields,
    },
    Delete {
        id: i64,
    },
    /// Age and registration charts
    Stats,
}

#[derive(Args, Debug, PartialEq, Clone, Default)]
pub struct DoctorFields {
    #[arg(long)]
    pub cnic: Option<String>,
    #[arg(long)]
    pub specialty: Option<String>,
    #[arg(long = "dept")]
    pub dept_id: Option<i64>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum DoctorAction {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: i64,
    },
    Add {
        #[arg(long)]
        name: String,
        #[command(flatten)]
        fields: DoctorFields,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: DoctorFields,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum AppointmentAction {
    List,
    Show {
        id: i64,
    },
    Book {
        #[arg(long)]
        patient: i64,
        #[arg(long)]
        doctor: i64,
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
        /// HH:MM or HH:MM:SS
        #[arg(long)]
        time: String,
        #[arg(long)]
        status: Option<AppointmentStatus>,
    },
    Update {
        id: i64,
        #[arg(long)]
        patient: Option<i64>,
        #[arg(long)]
        doctor: Option<i64>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        status: Option<AppointmentStatus>,
    },
    Delete {
        id: i64,
    },
    /// Write the PDF slip for an appointment
    Slip {
        id: i64,
        /// Output directory, defaults to the current one
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum RecordAction {
    List {
        /// Only this patient's records
        #[arg(long)]
        patient: Option<i64>,
    },
    Show {
        id: i64,
    },
    Add {
        #[arg(long)]
        patient: i64,
        #[arg(long)]
        doctor: i64,
        #[arg(long)]
        diagnosis: Option<String>,
        #[arg(long)]
        treatment: Option<String>,
        #[arg(long)]
        prescription: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        patient: Option<i64>,
        #[arg(long)]
        doctor: Option<i64>,
        #[arg(long)]
        diagnosis: Option<String>,
        #[arg(long)]
        treatment: Option<String>,
        #[arg(long)]
        prescription: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum BillAction {
    List,
    Show {
        id: i64,
    },
    Add {
        #[arg(long)]
        patient: i64,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        details: Option<String>,
        #[arg(long)]
        status: Option<PaymentStatus>,
        /// Billing date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        patient: Option<i64>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        details: Option<String>,
        #[arg(long)]
        status: Option<PaymentStatus>,
        #[arg(long)]
        date: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hospital").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["sections"]);
        assert_eq!(cli.db, PathBuf::from("hospital.db"));
        assert_eq!(cli.variant, Variant::Clinic);
        assert_eq!(cli.command, Command::Sections);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["patients", "list", "--variant", "records", "--db", "x.db"]);
        assert_eq!(cli.variant, Variant::Records);
        assert_eq!(cli.config().db_path, PathBuf::from("x.db"));
        assert_eq!(
            cli.command,
            Command::Patients {
                action: PatientAction::List { search: None }
            }
        );
    }

    #[test]
    fn test_patient_add() {
        let cli = parse(&[
            "patients", "add", "--name", "Ali", "--cnic", "35202-1234567-1", "--gender", "male", "--age", "40",
        ]);
        match cli.command {
            Command::Patients {
                action: PatientAction::Add { name, fields, registered },
            } => {
                assert_eq!(name, "Ali");
                assert_eq!(fields.gender, Some(Gender::Male));
                assert_eq!(fields.age, Some(40));
                assert_eq!(registered, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_appointment_book_status() {
        let cli = parse(&[
            "appointments", "book", "--patient", "1", "--doctor", "2", "--date", "2024-01-01", "--time", "09:00",
            "--status", "completed",
        ]);
        match cli.command {
            Command::Appointments {
                action: AppointmentAction::Book { status, .. },
            } => assert_eq!(status, Some(AppointmentStatus::Completed)),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_slip_dir_from_out_flag() {
        let cli = parse(&["appointments", "slip", "3", "--out", "slips"]);
        assert_eq!(cli.config().slip_dir, PathBuf::from("slips"));

        let cli = parse(&["appointments", "slip", "3"]);
        assert_eq!(cli.config().slip_dir, PathBuf::from("."));
    }

    #[test]
    fn test_export_table_and_format() {
        let cli = parse(&["export", "medical-records", "--format", "json"]);
        assert_eq!(
            cli.command,
            Command::Export {
                table: Table::MedicalRecords,
                format: ExportFormat::Json
            }
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["hospital", "--variant", "kiosk", "sections"]).is_err());
        assert!(Cli::try_parse_from(["hospital", "bills", "add", "--patient", "1", "--amount", "x"]).is_err());
        assert!(Cli::try_parse_from(["hospital", "export", "nurses"]).is_err());
        assert!(Cli::try_parse_from(["hospital", "patients", "add", "--name", "A", "--gender", "x"]).is_err());
    }
}
