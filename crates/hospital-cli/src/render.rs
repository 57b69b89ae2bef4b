//! Plain-text tables and bar charts for terminal output.

use hospital_core::models::{AppointmentDetail, Bill, Doctor, MedicalRecord, Patient};
use hospital_core::reports::Overview;
use hospital_core::Chart;

const BAR_WIDTH: usize = 40;

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}

pub fn patients(patients: &[Patient]) -> String {
    let rows: Vec<Vec<String>> = patients
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                opt(&p.cnic),
                p.age.map(|a| a.to_string()).unwrap_or_default(),
                p.gender.map(|g| g.to_string()).unwrap_or_default(),
                opt(&p.phone),
                opt(&p.email),
                p.registration_date.clone(),
            ]
        })
        .collect();
    table(
        &["ID", "Name", "CNIC", "Age", "Gender", "Phone", "Email", "Registered"],
        &rows,
    )
}

pub fn doctors(doctors: &[Doctor]) -> String {
    let rows: Vec<Vec<String>> = doctors
        .iter()
        .map(|d| {
            vec![
                d.id.to_string(),
                d.name.clone(),
                opt(&d.cnic),
                opt(&d.specialty),
                d.dept_id.map(|id| id.to_string()).unwrap_or_default(),
                opt(&d.phone),
                opt(&d.email),
            ]
        })
        .collect();
    table(
        &["ID", "Name", "CNIC", "Specialty", "Dept", "Phone", "Email"],
        &rows,
    )
}

pub fn appointments(appointments: &[AppointmentDetail]) -> String {
    let rows: Vec<Vec<String>> = appointments
        .iter()
        .map(|a| {
            vec![
                a.appointment.id.to_string(),
                a.patient_label(),
                a.doctor_label(),
                a.appointment.date.clone(),
                a.appointment.time.clone(),
                a.appointment.status.to_string(),
            ]
        })
        .collect();
    table(&["ID", "Patient", "Doctor", "Date", "Time", "Status"], &rows)
}

pub fn medical_records(records: &[MedicalRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.patient_id.to_string(),
                r.doctor_id.to_string(),
                opt(&r.diagnosis),
                opt(&r.treatment),
                opt(&r.prescription),
            ]
        })
        .collect();
    table(
        &["ID", "Patient", "Doctor", "Diagnosis", "Treatment", "Prescription"],
        &rows,
    )
}

pub fn bills(bills: &[Bill]) -> String {
    let rows: Vec<Vec<String>> = bills
        .iter()
        .map(|b| {
            vec![
                b.id.to_string(),
                b.patient_id.to_string(),
                format!("{:.2}", b.amount),
                opt(&b.details),
                b.payment_status.to_string(),
                b.bill_date.clone(),
            ]
        })
        .collect();
    table(
        &["ID", "Patient", "Amount", "Details", "Status", "Date"],
        &rows,
    )
}

pub fn overview(overview: &Overview) -> String {
    format!(
        "Patients: {}\nDoctors: {}\nAppointments: {}\nRevenue: {:.2}\n",
        overview.total_patients,
        overview.total_doctors,
        overview.total_appointments,
        overview.total_revenue
    )
}

/// Horizontal bars scaled to the largest value.
pub fn chart(chart: &Chart) -> String {
    let mut out = format!("{}\n", chart.title);
    if chart.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let label_width = chart
        .points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);
    let max = chart.points.iter().map(|p| p.value).fold(0.0_f64, f64::max);

    for point in &chart.points {
        let len = if max > 0.0 {
            ((point.value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "  {:<width$} | {} {}\n",
            point.label,
            "#".repeat(len),
            format_value(point.value),
            width = label_width
        ));
    }
    out
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hospital_core::reports::DataPoint;
    use hospital_core::ChartKind;

    #[test]
    fn test_table_alignment() {
        let out = table(
            &["ID", "Name"],
            &[
                vec!["1".to_string(), "Ali".to_string()],
                vec!["10".to_string(), "Ayesha".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "ID  Name");
        assert_eq!(lines[1], "--  ------");
        assert_eq!(lines[2], "1   Ali");
        assert_eq!(lines[3], "10  Ayesha");
    }

    #[test]
    fn test_chart_bars() {
        let bars = Chart {
            title: "Appointments by Status".to_string(),
            kind: ChartKind::Bar,
            points: vec![
                DataPoint { label: "Scheduled".to_string(), value: 4.0 },
                DataPoint { label: "Paid".to_string(), value: 2.5 },
            ],
        };
        let out = chart(&bars);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Appointments by Status");
        assert_eq!(lines[1], format!("  Scheduled | {} 4", "#".repeat(40)));
        assert_eq!(lines[2], format!("  Paid      | {} 2.50", "#".repeat(25)));
    }

    #[test]
    fn test_empty_chart() {
        let empty = Chart {
            title: "Monthly Revenue".to_string(),
            kind: ChartKind::Area,
            points: vec![],
        };
        assert_eq!(chart(&empty), "Monthly Revenue\n  (no data)\n");
    }
}
