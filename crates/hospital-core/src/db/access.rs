//! Generic record access over a fixed allow-list of tables and columns.
//!
//! Table and column names only ever come from [`Table`]; caller-supplied
//! column names are checked against it before any SQL is built, and every
//! value is bound as a parameter.

use rusqlite::types::Value;
use rusqlite::{params_from_iter, ErrorCode, OptionalExtension, Params};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use super::{Database, DbError, DbResult};
use crate::models::UnknownChoice;

/// The five record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Table {
    Patients,
    Doctors,
    Appointments,
    MedicalRecords,
    Billings,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Patients,
        Table::Doctors,
        Table::Appointments,
        Table::MedicalRecords,
        Table::Billings,
    ];

    /// SQL table name.
    pub fn name(&self) -> &'static str {
        match self {
            Table::Patients => "patients",
            Table::Doctors => "doctors",
            Table::Appointments => "appointments",
            Table::MedicalRecords => "medical_records",
            Table::Billings => "billings",
        }
    }

    pub fn id_column(&self) -> &'static str {
        "id"
    }

    /// Every column, identifier first, in schema order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Table::Patients => &[
                "id",
                "name",
                "cnic",
                "age",
                "gender",
                "phone",
                "address",
                "email",
                "registration_date",
            ],
            Table::Doctors => &["id", "name", "cnic", "specialty", "dept_id", "phone", "email"],
            Table::Appointments => &["id", "patient_id", "doctor_id", "date", "time", "status"],
            Table::MedicalRecords => &[
                "id",
                "patient_id",
                "doctor_id",
                "diagnosis",
                "treatment",
                "prescription",
            ],
            Table::Billings => &[
                "id",
                "patient_id",
                "amount",
                "details",
                "payment_status",
                "bill_date",
            ],
        }
    }

    /// Columns that inserts and updates may set.
    pub fn writable_columns(&self) -> &'static [&'static str] {
        &self.columns()[1..]
    }

    /// Columns matched by free-text search.
    pub fn search_columns(&self) -> &'static [&'static str] {
        match self {
            Table::Patients => &["name", "cnic", "phone"],
            Table::Doctors => &["name", "cnic", "specialty"],
            Table::Appointments => &["date", "status"],
            Table::MedicalRecords => &["diagnosis", "treatment", "prescription"],
            Table::Billings => &["details", "payment_status", "bill_date"],
        }
    }

    fn column_list(&self) -> String {
        self.columns().join(", ")
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "patients" => Ok(Table::Patients),
            "doctors" => Ok(Table::Doctors),
            "appointments" => Ok(Table::Appointments),
            "medical_records" | "records" => Ok(Table::MedicalRecords),
            "billings" | "bills" => Ok(Table::Billings),
            _ => Err(UnknownChoice {
                field: "table",
                value: s.to_string(),
                expected: Table::ALL.iter().map(|t| t.name()).collect::<Vec<_>>().join(", "),
            }),
        }
    }
}

/// An untyped row, values in [`Table::columns`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub table: Table,
    pub values: Vec<Value>,
}

impl Row {
    fn read(table: Table, row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let values = (0..table.columns().len())
            .map(|i| row.get::<_, Value>(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { table, values })
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.table.columns()
    }

    /// Value of a column by name.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns()
            .iter()
            .position(|c| *c == column)
            .and_then(|i| self.values.get(i))
    }

    pub fn id(&self) -> Option<i64> {
        match self.get(self.table.id_column()) {
            Some(Value::Integer(id)) => Some(*id),
            _ => None,
        }
    }
}

/// Map unique/check/not-null failures to [`DbError::Constraint`].
pub(crate) fn classify(err: rusqlite::Error) -> DbError {
    match &err {
        rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
            DbError::Constraint(msg.clone().unwrap_or_else(|| e.to_string()))
        }
        _ => DbError::Sqlite(err),
    }
}

/// `%term%` with LIKE wildcards in `term` escaped (escape char `\`).
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Append `(column, value)` when the value is present.
pub(crate) fn push_field<T: Into<Value>>(
    fields: &mut Vec<(&'static str, Value)>,
    column: &'static str,
    value: Option<T>,
) {
    if let Some(value) = value {
        fields.push((column, value.into()));
    }
}

fn check_columns(table: Table, fields: &[(&str, Value)]) -> DbResult<()> {
    let mut seen = HashSet::new();
    for (column, _) in fields {
        if !table.writable_columns().iter().any(|c| c == column) {
            return Err(DbError::UnknownColumn {
                table: table.name(),
                column: column.to_string(),
            });
        }
        if !seen.insert(*column) {
            return Err(DbError::Constraint(format!(
                "column {} listed twice for {}",
                column,
                table.name()
            )));
        }
    }
    Ok(())
}

impl Database {
    /// Run `SELECT <all columns> FROM table <filter> ORDER BY id`.
    ///
    /// `filter` must be built from static column names only.
    pub(crate) fn query_rows<T, P, F>(
        &self,
        table: Table,
        filter: &str,
        params: P,
        map: F,
    ) -> DbResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = format!(
            "SELECT {} FROM {} {} ORDER BY {}",
            table.column_list(),
            table.name(),
            filter,
            table.id_column()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params, map)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Fetch one row by identifier.
    pub(crate) fn query_one<T, F>(&self, table: Table, id: i64, map: F) -> DbResult<Option<T>>
    where
        F: FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?",
            table.column_list(),
            table.name(),
            table.id_column()
        );
        self.conn
            .query_row(&sql, [id], map)
            .optional()
            .map_err(Into::into)
    }

    /// Rows where any search column contains `term`. A blank term matches all.
    pub(crate) fn search_rows<T, F>(&self, table: Table, term: &str, map: F) -> DbResult<Vec<T>>
    where
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let term = term.trim();
        if term.is_empty() {
            return self.query_rows(table, "", [], map);
        }

        let filter = format!(
            "WHERE {}",
            table
                .search_columns()
                .iter()
                .map(|column| format!("{} LIKE ?1 ESCAPE '\\'", column))
                .collect::<Vec<_>>()
                .join(" OR ")
        );
        self.query_rows(table, &filter, [like_pattern(term)], map)
    }

    /// All rows of a table.
    pub fn fetch_all(&self, table: Table) -> DbResult<Vec<Row>> {
        self.query_rows(table, "", [], |row| Row::read(table, row))
    }

    /// Rows whose search columns contain `term` (case-insensitive for ASCII).
    pub fn search(&self, table: Table, term: &str) -> DbResult<Vec<Row>> {
        self.search_rows(table, term, |row| Row::read(table, row))
    }

    /// A single row by identifier.
    pub fn get_record(&self, table: Table, id: i64) -> DbResult<Option<Row>> {
        self.query_one(table, id, |row| Row::read(table, row))
    }

    /// Insert a row with the given columns, in the given order. Omitted
    /// columns take their schema default. Returns the new identifier.
    pub fn insert_record(&self, table: Table, fields: &[(&str, Value)]) -> DbResult<i64> {
        check_columns(table, fields)?;

        let sql = if fields.is_empty() {
            format!("INSERT INTO {} DEFAULT VALUES", table.name())
        } else {
            let columns = fields.iter().map(|(c, _)| *c).collect::<Vec<_>>().join(", ");
            let placeholders = vec!["?"; fields.len()].join(", ");
            format!(
                "INSERT INTO {} ({}) VALUES ({})",
                table.name(),
                columns,
                placeholders
            )
        };

        self.conn
            .execute(&sql, params_from_iter(fields.iter().map(|(_, v)| v)))
            .map_err(classify)?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(table = table.name(), id, "inserted record");
        Ok(id)
    }

    /// Overwrite the listed columns of one row. Returns whether a row matched.
    pub fn update_record(&self, table: Table, id: i64, fields: &[(&str, Value)]) -> DbResult<bool> {
        check_columns(table, fields)?;
        if fields.is_empty() {
            return Err(DbError::Constraint(format!(
                "no columns given to update in {}",
                table.name()
            )));
        }

        let set_clause = fields
            .iter()
            .map(|(c, _)| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            table.name(),
            set_clause,
            table.id_column()
        );

        let id_value = Value::Integer(id);
        let params = fields.iter().map(|(_, v)| v).chain(std::iter::once(&id_value));
        let rows_affected = self
            .conn
            .execute(&sql, params_from_iter(params))
            .map_err(classify)?;
        tracing::debug!(table = table.name(), id, rows_affected, "updated record");
        Ok(rows_affected > 0)
    }

    /// Delete one row. A missing identifier is a no-op returning `false`.
    pub fn delete_record(&self, table: Table, id: i64) -> DbResult<bool> {
        let sql = format!(
            "DELETE FROM {} WHERE {} = ?",
            table.name(),
            table.id_column()
        );
        let rows_affected = self.conn.execute(&sql, [id])?;
        tracing::debug!(table = table.name(), id, rows_affected, "deleted record");
        Ok(rows_affected > 0)
    }

    /// Number of rows in a table.
    pub fn count(&self, table: Table) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_insert_and_fetch_all() {
        let db = setup_db();

        let id = db
            .insert_record(
                Table::Doctors,
                &[("name", text("Dr. Hina")), ("specialty", text("Cardiology"))],
            )
            .unwrap();

        let rows = db.fetch_all(Table::Doctors).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), Some(id));
        assert_eq!(rows[0].get("name"), Some(&text("Dr. Hina")));
        assert_eq!(rows[0].get("specialty"), Some(&text("Cardiology")));
        assert_eq!(rows[0].get("cnic"), Some(&Value::Null));
    }

    #[test]
    fn test_unknown_column_rejected() {
        let db = setup_db();

        let result = db.insert_record(
            Table::Patients,
            &[("name", text("x")), ("name; DROP TABLE patients", text("y"))],
        );
        assert!(matches!(result, Err(DbError::UnknownColumn { .. })));

        // Identifier is not writable
        let result = db.update_record(Table::Patients, 1, &[("id", Value::Integer(9))]);
        assert!(matches!(result, Err(DbError::UnknownColumn { .. })));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let db = setup_db();
        let result = db.insert_record(Table::Patients, &[("name", text("a")), ("name", text("b"))]);
        assert!(matches!(result, Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_unique_violation_is_constraint() {
        let db = setup_db();
        let fields = [("name", text("A")), ("cnic", text("12345-1234567-1"))];
        db.insert_record(Table::Patients, &fields).unwrap();

        let result = db.insert_record(Table::Patients, &fields);
        assert!(matches!(result, Err(DbError::Constraint(_))));
    }

    #[test]
    fn test_update_only_listed_columns() {
        let db = setup_db();
        let id = db
            .insert_record(
                Table::Patients,
                &[("name", text("Old")), ("phone", text("111")), ("email", text("a@b.c"))],
            )
            .unwrap();

        assert!(db.update_record(Table::Patients, id, &[("phone", text("222"))]).unwrap());

        let row = db.get_record(Table::Patients, id).unwrap().unwrap();
        assert_eq!(row.get("name"), Some(&text("Old")));
        assert_eq!(row.get("phone"), Some(&text("222")));
        assert_eq!(row.get("email"), Some(&text("a@b.c")));
    }

    #[test]
    fn test_update_missing_row() {
        let db = setup_db();
        assert!(!db.update_record(Table::Patients, 42, &[("name", text("x"))]).unwrap());
    }

    #[test]
    fn test_update_without_fields_is_error() {
        let db = setup_db();
        assert!(db.update_record(Table::Patients, 1, &[]).is_err());
    }

    #[test]
    fn test_delete_record() {
        let db = setup_db();
        let a = db.insert_record(Table::Patients, &[("name", text("A"))]).unwrap();
        let b = db.insert_record(Table::Patients, &[("name", text("B"))]).unwrap();

        assert!(db.delete_record(Table::Patients, a).unwrap());
        assert!(!db.delete_record(Table::Patients, a).unwrap());

        let rows = db.fetch_all(Table::Patients).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), Some(b));
    }

    #[test]
    fn test_search_escapes_wildcards() {
        let db = setup_db();
        db.insert_record(Table::Patients, &[("name", text("100% cotton"))]).unwrap();
        db.insert_record(Table::Patients, &[("name", text("1000 beds"))]).unwrap();

        let rows = db.search(Table::Patients, "100%").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("name"), Some(&text("100% cotton")));

        // Blank search returns everything
        assert_eq!(db.search(Table::Patients, "  ").unwrap().len(), 2);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let db = setup_db();
        db.insert_record(Table::Doctors, &[("name", text("Dr. Bilal")), ("specialty", text("ENT"))])
            .unwrap();

        assert_eq!(db.search(Table::Doctors, "bilal").unwrap().len(), 1);
        assert_eq!(db.search(Table::Doctors, "ent").unwrap().len(), 1);
        assert_eq!(db.search(Table::Doctors, "ortho").unwrap().len(), 0);
    }

    #[test]
    fn test_table_from_str() {
        assert_eq!("medical-records".parse::<Table>().unwrap(), Table::MedicalRecords);
        assert_eq!("Bills".parse::<Table>().unwrap(), Table::Billings);
        let err = "users".parse::<Table>().unwrap_err();
        assert_eq!(err.field, "table");
        assert_eq!(err.value, "users");
        assert!(err.expected.contains("medical_records"));
    }
}
