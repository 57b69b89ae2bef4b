//! Dashboard aggregations.
//!
//! Every report re-reads the full tables and aggregates in memory; nothing is
//! cached between calls. Count orderings are descending with ties broken by
//! label, and rows whose dates fail to parse are skipped.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult, Table};
use crate::models::{Appointment, AppointmentDetail, AppointmentStatus, Bill, Doctor, Gender, Patient};

/// Number of doctors on the "busiest doctors" chart.
pub const TOP_DOCTORS: usize = 6;

/// Age buckets as `(label, exclusive lower edge, inclusive upper edge)`.
pub const AGE_BINS: [(&str, i64, i64); 5] = [
    ("0-18", 0, 18),
    ("19-35", 18, 35),
    ("36-50", 35, 50),
    ("51-65", 50, 65),
    ("65+", 65, 120),
];

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartKind {
    Line,
    Bar,
    Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

/// A titled series ready to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<DataPoint>,
}

impl Chart {
    fn new<L, V>(title: &str, kind: ChartKind, points: impl IntoIterator<Item = (L, V)>) -> Self
    where
        L: ToString,
        V: Into<f64>,
    {
        Self {
            title: title.to_string(),
            kind,
            points: points
                .into_iter()
                .map(|(label, value)| DataPoint {
                    label: label.to_string(),
                    value: value.into(),
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Headline numbers for the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_patients: i64,
    pub total_doctors: i64,
    pub total_appointments: i64,
    pub total_revenue: f64,
}

/// Analytics page of the clinic variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicDashboard {
    /// Years with at least one appointment, ascending
    pub years: Vec<i32>,
    pub selected_year: Option<i32>,
    pub monthly_trend: Chart,
    pub by_doctor: Chart,
}

/// Home page of the records variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeDashboard {
    pub overview: Overview,
    pub new_patients: Chart,
    pub gender: Chart,
    pub appointment_status: Chart,
    pub monthly_revenue: Chart,
    pub busiest_doctors: Chart,
}

/// Statistics tab of the patients section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientStatistics {
    pub age_distribution: Chart,
    pub registrations: Chart,
}

// =========================================================================
// Aggregations
// =========================================================================

fn parse_date(value: &str, what: &str, id: i64) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            tracing::warn!(what, id, value, "skipping row with unparsable date");
            None
        }
    }
}

fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Count occurrences, highest count first, ties by `label` ascending.
fn value_counts<K, L>(items: impl IntoIterator<Item = K>, label: L) -> Vec<(K, usize)>
where
    K: Ord,
    L: Fn(&K) -> String,
{
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_insert(0usize) += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by_cached_key(|(key, count)| (Reverse(*count), label(key)));
    counts
}

fn appointment_date(appointment: &Appointment) -> Option<NaiveDate> {
    parse_date(&appointment.date, "appointment", appointment.id)
}

/// Distinct appointment years, ascending.
pub fn appointment_years(appointments: &[Appointment]) -> Vec<i32> {
    let mut years: Vec<i32> = appointments
        .iter()
        .filter_map(appointment_date)
        .map(|d| d.year())
        .collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Appointments per month (1-12) within `year`. Empty months are omitted.
pub fn monthly_appointment_counts(appointments: &[Appointment], year: i32) -> Vec<(u32, usize)> {
    let mut counts = BTreeMap::new();
    for date in appointments.iter().filter_map(appointment_date) {
        if date.year() == year {
            *counts.entry(date.month()).or_insert(0usize) += 1;
        }
    }
    counts.into_iter().collect()
}

/// Appointments per doctor label.
pub fn appointments_by_doctor(details: &[AppointmentDetail]) -> Vec<(String, usize)> {
    value_counts(details.iter().map(|d| d.doctor_label()), String::clone)
}

pub fn status_counts(appointments: &[Appointment]) -> Vec<(AppointmentStatus, usize)> {
    value_counts(appointments.iter().map(|a| a.status), ToString::to_string)
}

/// New registrations per `YYYY-MM`, chronological.
pub fn registrations_by_month(patients: &[Patient]) -> Vec<(String, usize)> {
    let mut counts = BTreeMap::new();
    for patient in patients {
        if let Some(date) = parse_date(&patient.registration_date, "patient", patient.id) {
            *counts.entry(month_key(date)).or_insert(0usize) += 1;
        }
    }
    counts.into_iter().collect()
}

/// Patients per recorded gender. Patients without one are left out.
pub fn gender_distribution(patients: &[Patient]) -> Vec<(Gender, usize)> {
    value_counts(patients.iter().filter_map(|p| p.gender), ToString::to_string)
}

/// Summed bill amounts per `YYYY-MM`, chronological.
pub fn revenue_by_month(bills: &[Bill]) -> Vec<(String, f64)> {
    let mut sums = BTreeMap::new();
    for bill in bills {
        if let Some(date) = parse_date(&bill.bill_date, "bill", bill.id) {
            *sums.entry(month_key(date)).or_insert(0.0) += bill.amount;
        }
    }
    sums.into_iter().collect()
}

/// The `limit` doctor ids with the most appointments, named. Ids with no
/// matching doctor are dropped after the cut, so fewer than `limit` may come
/// back.
pub fn top_busy_doctors(
    appointments: &[Appointment],
    doctors: &[Doctor],
    limit: usize,
) -> Vec<(String, usize)> {
    let name_of = |doctor_id: i64| doctors.iter().find(|d| d.id == doctor_id).map(|d| d.name.clone());
    // Unknown ids rank by their number among equal counts
    value_counts(appointments.iter().map(|a| a.doctor_id), |id| {
        name_of(*id).unwrap_or_else(|| format!("#{}", id))
    })
    .into_iter()
    .take(limit)
    .filter_map(|(doctor_id, count)| name_of(doctor_id).map(|name| (name, count)))
    .collect()
}

/// Patients per age bucket; every bucket is reported, empty ones as zero.
/// Ages outside (0, 120] are not counted.
pub fn age_distribution(patients: &[Patient]) -> Vec<(&'static str, usize)> {
    AGE_BINS
        .iter()
        .map(|(label, low, high)| {
            let count = patients
                .iter()
                .filter_map(|p| p.age)
                .filter(|age| age > low && age <= high)
                .count();
            (*label, count)
        })
        .collect()
}

// =========================================================================
// Dashboards
// =========================================================================

/// Builds dashboards from fresh table reads.
pub struct Reporter<'a> {
    db: &'a Database,
}

impl<'a> Reporter<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn overview(&self) -> DbResult<Overview> {
        Ok(Overview {
            total_patients: self.db.count(Table::Patients)?,
            total_doctors: self.db.count(Table::Doctors)?,
            total_appointments: self.db.count(Table::Appointments)?,
            total_revenue: self.db.total_revenue()?,
        })
    }

    /// Monthly trend and per-doctor counts for one year. Without `year`, the
    /// earliest year on record is used.
    pub fn clinic_dashboard(&self, year: Option<i32>) -> DbResult<ClinicDashboard> {
        let details = self.db.list_appointment_details()?;
        let appointments: Vec<Appointment> =
            details.iter().map(|d| d.appointment.clone()).collect();

        let years = appointment_years(&appointments);
        let selected_year = year.or_else(|| years.first().copied());

        let (monthly_trend, by_doctor) = match selected_year {
            Some(year) => {
                let in_year: Vec<AppointmentDetail> = details
                    .into_iter()
                    .filter(|d| appointment_date(&d.appointment).map(|date| date.year()) == Some(year))
                    .collect();
                let monthly = monthly_appointment_counts(&appointments, year)
                    .into_iter()
                    .map(|(month, count)| (MONTH_NAMES[(month - 1) as usize], count as f64));
                (
                    Chart::new("Monthly Appointment Trend", ChartKind::Line, monthly),
                    Chart::new(
                        "Doctor-wise Appointments",
                        ChartKind::Bar,
                        counts_as_f64(appointments_by_doctor(&in_year)),
                    ),
                )
            }
            None => (
                Chart::new("Monthly Appointment Trend", ChartKind::Line, Vec::<(String, f64)>::new()),
                Chart::new("Doctor-wise Appointments", ChartKind::Bar, Vec::<(String, f64)>::new()),
            ),
        };

        Ok(ClinicDashboard {
            years,
            selected_year,
            monthly_trend,
            by_doctor,
        })
    }

    pub fn home_dashboard(&self) -> DbResult<HomeDashboard> {
        let patients = self.db.list_patients()?;
        let doctors = self.db.list_doctors()?;
        let appointments = self.db.list_appointments()?;
        let bills = self.db.list_bills()?;

        Ok(HomeDashboard {
            overview: self.overview()?,
            new_patients: Chart::new(
                "New Patients Over Time",
                ChartKind::Line,
                counts_as_f64(registrations_by_month(&patients)),
            ),
            gender: Chart::new(
                "Patient Gender Distribution",
                ChartKind::Bar,
                counts_as_f64(gender_distribution(&patients)),
            ),
            appointment_status: Chart::new(
                "Appointments by Status",
                ChartKind::Bar,
                counts_as_f64(status_counts(&appointments)),
            ),
            monthly_revenue: Chart::new(
                "Monthly Revenue",
                ChartKind::Area,
                revenue_by_month(&bills),
            ),
            busiest_doctors: Chart::new(
                "Top 6 Busy Doctors",
                ChartKind::Bar,
                counts_as_f64(top_busy_doctors(&appointments, &doctors, TOP_DOCTORS)),
            ),
        })
    }

    pub fn patient_statistics(&self) -> DbResult<PatientStatistics> {
        let patients = self.db.list_patients()?;
        Ok(PatientStatistics {
            age_distribution: Chart::new(
                "Age Distribution",
                ChartKind::Bar,
                counts_as_f64(age_distribution(&patients)),
            ),
            registrations: Chart::new(
                "Registrations Over Time",
                ChartKind::Line,
                counts_as_f64(registrations_by_month(&patients)),
            ),
        })
    }
}

fn counts_as_f64<L>(counts: Vec<(L, usize)>) -> Vec<(L, f64)> {
    counts
        .into_iter()
        .map(|(label, count)| (label, count as f64))
        .collect()
}
