//! Staff login accounts.

use serde::{Deserialize, Serialize};

choice_enum! {
    /// Access role attached to a login.
    Role ("role") {
        Admin => "Admin",
        Staff => "Staff",
    }
}

/// A login account. The password digest never leaves the db layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub username: String,
    pub role: Role,
}
