//! Whole-table export to CSV and JSON.

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult, Table};

/// Snapshot of one table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableExport {
    /// Table name
    pub table: String,
    /// Export timestamp
    pub exported_at: String,
    pub columns: Vec<String>,
    /// Rows in id order, values in column order
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl TableExport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format. NULLs become empty cells.
    pub fn to_csv(&self) -> String {
        let mut csv = String::new();

        let header: Vec<String> = self.columns.iter().map(|c| escape_csv(c)).collect();
        csv.push_str(&header.join(","));
        csv.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(cell_text).collect();
            csv.push_str(&cells.join(","));
            csv.push('\n');
        }

        csv
    }
}

fn json_value(value: Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => i.into(),
        Value::Real(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => s.into(),
        Value::Blob(bytes) => hex::encode(bytes).into(),
    }
}

fn cell_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => escape_csv(s),
        other => escape_csv(&other.to_string()),
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Table exporter.
pub struct TableExporter<'a> {
    db: &'a Database,
}

impl<'a> TableExporter<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn export(&self, table: Table) -> DbResult<TableExport> {
        let rows = self
            .db
            .fetch_all(table)?
            .into_iter()
            .map(|row| row.values.into_iter().map(json_value).collect())
            .collect::<Vec<Vec<_>>>();

        tracing::debug!(table = %table, rows = rows.len(), "table exported");
        Ok(TableExport {
            table: table.name().to_string(),
            exported_at: chrono::Utc::now().to_rfc3339(),
            columns: table.columns().iter().map(|c| c.to_string()).collect(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewBill, NewPatient, PaymentStatus};

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_patients_csv() {
        let db = Database::open_in_memory().unwrap();
        db.insert_patient(&NewPatient {
            address: Some("House 4, Street 9".into()),
            age: Some(40),
            registration_date: Some("2024-01-02".into()),
            ..NewPatient::new("Ali")
        })
        .unwrap();

        let csv = TableExporter::new(&db).export(Table::Patients).unwrap().to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,name,cnic,age,gender,phone,address,email,registration_date");
        assert_eq!(lines[1], "1,Ali,,40,,,\"House 4, Street 9\",,2024-01-02");
    }

    #[test]
    fn test_bills_json() {
        let db = Database::open_in_memory().unwrap();
        db.insert_bill(&NewBill {
            patient_id: 1,
            amount: 99.5,
            details: None,
            payment_status: PaymentStatus::Paid,
            bill_date: Some("2024-02-02".into()),
        })
        .unwrap();

        let export = TableExporter::new(&db).export(Table::Billings).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(parsed["table"], "billings");
        assert_eq!(parsed["rows"][0][2], 99.5);
        assert_eq!(parsed["rows"][0][4], "Paid");
    }
}
