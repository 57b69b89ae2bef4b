//! SQLite schema definition.

/// Complete database schema. Every statement is idempotent, so the batch runs
/// on every open.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Staff Logins
-- ============================================================================

CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL,                 -- SHA-256 hex digest
    role TEXT NOT NULL DEFAULT 'Staff' CHECK (role IN ('Admin', 'Staff'))
);

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    cnic TEXT UNIQUE,                            -- NULL allowed, unique when set
    age INTEGER,
    gender TEXT CHECK (gender IN ('Male', 'Female', 'Other')),
    phone TEXT,
    address TEXT,
    email TEXT,
    registration_date TEXT NOT NULL DEFAULT (date('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(name);

-- ============================================================================
-- Doctors
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    cnic TEXT UNIQUE,
    specialty TEXT,
    dept_id INTEGER,
    phone TEXT,
    email TEXT
);

CREATE INDEX IF NOT EXISTS idx_doctors_name ON doctors(name);

-- ============================================================================
-- Appointments (no foreign keys: rows outlive their patient/doctor)
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL,
    doctor_id INTEGER NOT NULL,
    date TEXT NOT NULL,                          -- YYYY-MM-DD
    time TEXT NOT NULL,                          -- HH:MM:SS
    status TEXT NOT NULL DEFAULT 'Scheduled'
        CHECK (status IN ('Scheduled', 'Completed', 'Cancelled'))
);

CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(date);
CREATE INDEX IF NOT EXISTS idx_appointments_doctor ON appointments(doctor_id);

-- ============================================================================
-- Medical Records
-- ============================================================================

CREATE TABLE IF NOT EXISTS medical_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL,
    doctor_id INTEGER NOT NULL,
    diagnosis TEXT,
    treatment TEXT,
    prescription TEXT
);

CREATE INDEX IF NOT EXISTS idx_medical_records_patient ON medical_records(patient_id);

-- ============================================================================
-- Billings
-- ============================================================================

CREATE TABLE IF NOT EXISTS billings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL,
    amount REAL NOT NULL DEFAULT 0,
    details TEXT,
    payment_status TEXT NOT NULL DEFAULT 'Pending'
        CHECK (payment_status IN ('Pending', 'Paid')),
    bill_date TEXT NOT NULL DEFAULT (date('now'))
);

CREATE INDEX IF NOT EXISTS idx_billings_patient ON billings(patient_id);
"#;

/// Login seeded on every open (`INSERT OR IGNORE`).
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_cnic_unique_but_nullable() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        // Several patients without a CNIC are fine
        conn.execute("INSERT INTO patients (name) VALUES ('A')", []).unwrap();
        conn.execute("INSERT INTO patients (name) VALUES ('B')", []).unwrap();

        conn.execute(
            "INSERT INTO patients (name, cnic) VALUES ('C', '35202-1234567-1')",
            [],
        )
        .unwrap();
        let result = conn.execute(
            "INSERT INTO patients (name, cnic) VALUES ('D', '35202-1234567-1')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_status_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let result = conn.execute(
            "INSERT INTO appointments (patient_id, doctor_id, date, time, status)
             VALUES (1, 1, '2024-01-01', '10:00:00', 'Lost')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_applied() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute("INSERT INTO billings (patient_id, amount) VALUES (1, 50.0)", [])
            .unwrap();
        let (status, date): (String, String) = conn
            .query_row("SELECT payment_status, bill_date FROM billings", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(status, "Pending");
        assert_eq!(date.len(), 10);
    }
}
