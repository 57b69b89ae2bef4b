//! Billing models.

use serde::{Deserialize, Serialize};

choice_enum! {
    /// Whether a bill has been settled.
    #[derive(Default)]
    PaymentStatus ("payment status") {
        #[default]
        Pending => "Pending",
        Paid => "Paid",
    }
}

/// A bill raised against a patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bill {
    pub id: i64,
    pub patient_id: i64,
    /// Amount in the hospital's currency
    pub amount: f64,
    pub details: Option<String>,
    pub payment_status: PaymentStatus,
    /// Billing date (YYYY-MM-DD), defaults to the insert date
    pub bill_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewBill {
    pub patient_id: i64,
    pub amount: f64,
    pub details: Option<String>,
    pub payment_status: PaymentStatus,
    pub bill_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BillChanges {
    pub patient_id: Option<i64>,
    pub amount: Option<f64>,
    pub details: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub bill_date: Option<String>,
}

impl BillChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
