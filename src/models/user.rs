use crate::enums::users::UserType;
use crate::traits::TableRow;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

#[derive(Queryable, Selectable, Identifiable, PartialEq, Clone, Debug, Serialize, Deserialize, TableRow)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(primary_key(login))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub login: String,
    #[table_row(rename = "phonenum")]
    pub phone_num: Option<String>,
    pub password: String,
    #[table_row(rename = "favitems")]
    pub fav_items: String,
    #[table_row(rename = "type")]
    pub user_type: UserType,
}

#[derive(Insertable, Debug, Serialize, Deserialize)]
#[diesel(table_name = crate::db::schema::users)]
pub struct NewUser {
    pub login: String,
    pub password: String,
    pub phone_num: Option<String>,
    pub fav_items: String,
    pub user_type: UserType,
}

impl NewUser {
    /// Self-registration always creates a customer with no favourites.
    pub fn customer(login: &str, password: &str, phone_num: Option<&str>) -> Self {
        Self {
            login: login.trim().to_string(),
            password: password.to_string(),
            phone_num: phone_num
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            fav_items: String::new(),
            user_type: UserType::Customer,
        }
    }
}

#[derive(Debug, Clone, Default, AsChangeset, Serialize, Deserialize)]
#[diesel(table_name = crate::db::schema::users)]
pub struct UpdateUser {
    pub password: Option<String>,
    pub phone_num: Option<Option<String>>,
    pub fav_items: Option<String>,
    pub user_type: Option<UserType>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.password.is_none()
            && self.phone_num.is_none()
            && self.fav_items.is_none()
            && self.user_type.is_none()
    }
}
