//! Billing database operations.

use rusqlite::types::Value;

use super::access::push_field;
use super::{Database, DbResult, Table};
use crate::models::{Bill, BillChanges, NewBill};

impl Database {
    pub fn insert_bill(&self, bill: &NewBill) -> DbResult<i64> {
        let mut fields = vec![
            ("patient_id", Value::from(bill.patient_id)),
            ("amount", Value::from(bill.amount)),
        ];
        push_field(&mut fields, "details", bill.details.clone());
        fields.push(("payment_status", Value::from(bill.payment_status)));
        push_field(&mut fields, "bill_date", bill.bill_date.clone());
        self.insert_record(Table::Billings, &fields)
    }

    pub fn update_bill(&self, id: i64, changes: &BillChanges) -> DbResult<bool> {
        let mut fields = Vec::new();
        push_field(&mut fields, "patient_id", changes.patient_id);
        push_field(&mut fields, "amount", changes.amount);
        push_field(&mut fields, "details", changes.details.clone());
        push_field(&mut fields, "payment_status", changes.payment_status);
        push_field(&mut fields, "bill_date", changes.bill_date.clone());
        self.update_record(Table::Billings, id, &fields)
    }

    pub fn get_bill(&self, id: i64) -> DbResult<Option<Bill>> {
        self.query_one(Table::Billings, id, bill_from_row)
    }

    pub fn list_bills(&self) -> DbResult<Vec<Bill>> {
        self.query_rows(Table::Billings, "", [], bill_from_row)
    }

    pub fn delete_bill(&self, id: i64) -> DbResult<bool> {
        self.delete_record(Table::Billings, id)
    }

    /// Sum of all bill amounts, zero when there are none.
    pub fn total_revenue(&self) -> DbResult<f64> {
        self.conn
            .query_row("SELECT COALESCE(SUM(amount), 0.0) FROM billings", [], |row| {
                row.get(0)
            })
            .map_err(Into::into)
    }
}

fn bill_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Bill> {
    Ok(Bill {
        id: row.get("id")?,
        patient_id: row.get("patient_id")?,
        amount: row.get("amount")?,
        details: row.get("details")?,
        payment_status: row.get("payment_status")?,
        bill_date: row.get("bill_date")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;

    fn make_bill(amount: f64) -> NewBill {
        NewBill {
            patient_id: 1,
            amount,
            details: Some("Consultation".into()),
            payment_status: PaymentStatus::Pending,
            bill_date: Some("2024-03-05".into()),
        }
    }

    #[test]
    fn test_insert_and_total() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.total_revenue().unwrap(), 0.0);

        db.insert_bill(&make_bill(1500.0)).unwrap();
        db.insert_bill(&make_bill(250.5)).unwrap();

        assert_eq!(db.list_bills().unwrap().len(), 2);
        assert!((db.total_revenue().unwrap() - 1750.5).abs() < 1e-9);
    }

    #[test]
    fn test_mark_paid() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert_bill(&make_bill(900.0)).unwrap();

        let changes = BillChanges {
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        };
        assert!(db.update_bill(id, &changes).unwrap());

        let bill = db.get_bill(id).unwrap().unwrap();
        assert_eq!(bill.payment_status, PaymentStatus::Paid);
        assert_eq!(bill.amount, 900.0);
        assert_eq!(bill.bill_date, "2024-03-05");
    }
}
