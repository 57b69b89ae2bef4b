//! Domain models for hospital records.

use thiserror::Error;

/// A text value outside one of the fixed choice lists (gender, status, ...).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid {field} {value:?}, expected one of: {expected}")]
pub struct UnknownChoice {
    pub field: &'static str,
    pub value: String,
    pub expected: String,
}

/// Declares a closed set of text choices stored as TEXT columns.
///
/// Generates `ALL`, `as_str`, `Display`, case-insensitive `FromStr`, and the
/// rusqlite `ToSql`/`FromSql`/`Value` conversions.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($field:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every choice, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::models::UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| $crate::models::UnknownChoice {
                        field: $field,
                        value: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|choice| choice.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }

        impl rusqlite::types::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                Ok(self.as_str().into())
            }
        }

        impl From<$name> for rusqlite::types::Value {
            fn from(choice: $name) -> Self {
                rusqlite::types::Value::Text(choice.as_str().to_string())
            }
        }

        impl rusqlite::types::FromSql for $name {
            fn column_result(
                value: rusqlite::types::ValueRef<'_>,
            ) -> rusqlite::types::FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| rusqlite::types::FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

mod appointment;
mod billing;
mod doctor;
mod medical_record;
mod patient;
mod user;

pub use appointment::*;
pub use billing::*;
pub use doctor::*;
pub use medical_record::*;
pub use patient::*;
pub use user::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_parse_is_case_insensitive() {
        assert_eq!("male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" Cancelled ".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Cancelled);
    }

    #[test]
    fn test_unknown_choice_lists_expected() {
        let err = "maybe".parse::<PaymentStatus>().unwrap_err();
        assert_eq!(err.field, "payment status");
        assert_eq!(err.expected, "Pending, Paid");
    }

    #[test]
    fn test_choice_defaults() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Scheduled);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }
}
