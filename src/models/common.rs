use crate::enums::common::PrepStatus;
use crate::traits::TableRow;
use chrono::NaiveDateTime;
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, PartialEq, Clone, Debug, Serialize, Deserialize, TableRow)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    #[table_row(rename = "orderid")]
    pub order_id: i32,
    pub login: String,
    pub paid: bool,
    #[table_row(rename = "timestamprecieved")]
    pub received_at: NaiveDateTime,
    pub total: f64,
}

#[derive(Insertable, Debug, Serialize, Deserialize)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrder {
    pub login: String,
    pub paid: bool,
    pub total: f64,
}

#[derive(
    Queryable,
    Selectable,
    Identifiable,
    Associations,
    PartialEq,
    Clone,
    Debug,
    Serialize,
    Deserialize,
    TableRow,
)]
#[diesel(table_name = crate::db::schema::item_status)]
#[diesel(primary_key(order_id, item_name))]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemStatus {
    #[table_row(rename = "orderid")]
    pub order_id: i32,
    #[table_row(rename = "itemname")]
    pub item_name: String,
    #[table_row(rename = "lastupdated")]
    pub last_updated: NaiveDateTime,
    pub status: PrepStatus,
    pub comments: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::item_status)]
pub struct NewItemStatus {
    pub order_id: i32,
    pub item_name: String,
    pub status: PrepStatus,
}
