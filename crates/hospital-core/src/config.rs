//! Application configuration and navigation.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Application-level constants
pub const APP_NAME: &str = "Hospital Records";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Database file used when none is given.
pub const DEFAULT_DB_FILE: &str = "hospital.db";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,hospital_core=info"
}

/// Which of the two dashboards this instance behaves as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    /// Login-gated clinic desk: CNIC-validated patients and doctors,
    /// appointments, analytics and PDF slips.
    #[default]
    Clinic,
    /// Full records dashboard: adds medical records and billing, no login.
    Records,
}

impl Variant {
    /// Sidebar sections, in display order.
    pub fn sections(&self) -> &'static [Section] {
        match self {
            Variant::Clinic => &[
                Section::Dashboard,
                Section::Patients,
                Section::Doctors,
                Section::Appointments,
            ],
            Variant::Records => &[
                Section::Home,
                Section::Patients,
                Section::Doctors,
                Section::Appointments,
                Section::MedicalRecords,
                Section::Billings,
            ],
        }
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.sections().contains(&section)
    }

    pub fn requires_login(&self) -> bool {
        matches!(self, Variant::Clinic)
    }

    /// Patients and doctors must carry a valid CNIC.
    pub fn requires_cnic(&self) -> bool {
        matches!(self, Variant::Clinic)
    }

    /// Patients must have a phone number.
    pub fn requires_phone(&self) -> bool {
        matches!(self, Variant::Records)
    }

    pub fn slips_enabled(&self) -> bool {
        matches!(self, Variant::Clinic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Clinic => "clinic",
            Variant::Records => "records",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clinic" => Ok(Variant::Clinic),
            "records" => Ok(Variant::Records),
            other => Err(format!(
                "Invalid variant: '{}'. Supported values: clinic, records",
                other
            )),
        }
    }
}

/// A named navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Dashboard,
    Home,
    Patients,
    Doctors,
    Appointments,
    MedicalRecords,
    Billings,
}

impl Section {
    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Home => "Home",
            Section::Patients => "Patients",
            Section::Doctors => "Doctors",
            Section::Appointments => "Appointments",
            Section::MedicalRecords => "Medical Records",
            Section::Billings => "Billings",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite file
    pub db_path: PathBuf,
    pub variant: Variant,
    /// Where appointment slips are written
    pub slip_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            variant: Variant::default(),
            slip_dir: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinic_sections() {
        let labels: Vec<_> = Variant::Clinic.sections().iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Dashboard", "Patients", "Doctors", "Appointments"]);
        assert!(!Variant::Clinic.has_section(Section::Billings));
    }

    #[test]
    fn test_records_sections() {
        assert_eq!(Variant::Records.sections().len(), 6);
        assert!(Variant::Records.has_section(Section::MedicalRecords));
        assert!(!Variant::Records.has_section(Section::Dashboard));
    }

    #[test]
    fn test_variant_rules() {
        assert!(Variant::Clinic.requires_login());
        assert!(Variant::Clinic.requires_cnic());
        assert!(Variant::Clinic.slips_enabled());
        assert!(!Variant::Records.requires_login());
        assert!(Variant::Records.requires_phone());
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("Records".parse::<Variant>().unwrap(), Variant::Records);
        assert!("kiosk".parse::<Variant>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.db_path, PathBuf::from("hospital.db"));
        assert_eq!(config.variant, Variant::Clinic);
    }
}
