use crate::traits::TableRow;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, PartialEq, Clone, Debug, Serialize, Deserialize, TableRow)]
#[diesel(table_name = crate::db::schema::menu)]
#[diesel(primary_key(item_name))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MenuItem {
    #[table_row(rename = "itemname")]
    pub item_name: String,
    #[table_row(rename = "type")]
    pub item_type: String,
    pub price: f64,
    pub description: Option<String>,
    #[table_row(rename = "imageurl")]
    pub image_url: Option<String>,
}

#[derive(Insertable, Clone, Debug, Serialize, Deserialize)]
#[diesel(table_name = crate::db::schema::menu)]
pub struct NewMenuItem {
    pub item_name: String,
    pub item_type: String,
    pub price: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, AsChangeset)]
#[diesel(table_name = crate::db::schema::menu)]
pub struct UpdateMenuItem {
    pub item_type: Option<String>,
    pub price: Option<f64>,
    pub description: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
}

impl UpdateMenuItem {
    pub fn is_empty(&self) -> bool {
        self.item_type.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image_url.is_none()
    }
}
