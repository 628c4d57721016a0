use crate::models::common::{ItemStatus, Order};
use crate::traits::Cell;
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Preparation state of one line item, stored as text in `item_status.status`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    AsExpression,
    FromSqlRow,
    Serialize,
    Deserialize,
)]
#[diesel(sql_type = Text)]
pub enum PrepStatus {
    #[default]
    HasntStarted,
    Started,
    Finished,
}

impl PrepStatus {
    pub const ALL: [PrepStatus; 3] = [
        PrepStatus::HasntStarted,
        PrepStatus::Started,
        PrepStatus::Finished,
    ];

    pub fn human_readable(&self) -> &'static str {
        match self {
            PrepStatus::HasntStarted => "Hasnt started",
            PrepStatus::Started => "Started",
            PrepStatus::Finished => "Finished",
        }
    }

    pub fn get_enum_from_str(value: Option<&str>) -> Option<Self> {
        let value = value?.trim();
        PrepStatus::ALL
            .into_iter()
            .find(|s| s.human_readable().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for PrepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.human_readable())
    }
}

impl Cell for PrepStatus {
    fn cell(&self) -> String {
        self.human_readable().to_string()
    }
}

impl ToSql<Text, Pg> for PrepStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.human_readable().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for PrepStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let raw = std::str::from_utf8(bytes.as_bytes())?;
        PrepStatus::get_enum_from_str(Some(raw))
            .ok_or_else(|| format!("Unrecognized item status: {raw}").into())
    }
}

/// An order together with its line items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    pub order: Order,
    pub items: Vec<ItemStatus>,
}
