use crate::traits::Cell;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Role of a user, stored as text in `users.user_type`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsExpression, FromSqlRow, Serialize, Deserialize,
)]
#[diesel(sql_type = Text)]
pub enum UserType {
    Customer,
    Employee,
    Manager,
}

impl UserType {
    pub const ALL: [UserType; 3] = [UserType::Manager, UserType::Employee, UserType::Customer];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "Customer",
            UserType::Employee => "Employee",
            UserType::Manager => "Manager",
        }
    }

    /// Parses a stored or typed role. Surrounding blanks are ignored since
    /// fixed-width columns pad with spaces.
    pub fn get_enum_from_str(value: Option<&str>) -> Option<Self> {
        match value?.trim().to_ascii_lowercase().as_str() {
            "customer" => Some(UserType::Customer),
            "employee" => Some(UserType::Employee),
            "manager" => Some(UserType::Manager),
            _ => None,
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, UserType::Employee | UserType::Manager)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Cell for UserType {
    fn cell(&self) -> String {
        self.as_str().to_string()
    }
}

impl ToSql<Text, Pg> for UserType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for UserType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let raw = std::str::from_utf8(bytes.as_bytes())?;
        UserType::get_enum_from_str(Some(raw))
            .ok_or_else(|| format!("Unrecognized user type: {raw}").into())
    }
}
