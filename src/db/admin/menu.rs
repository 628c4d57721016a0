use crate::db::errors::RepositoryError;
use crate::db::schema::menu::dsl::*;
use crate::db::DbConnection;
use crate::models::admin::{MenuItem, NewMenuItem, UpdateMenuItem};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use log::{error, info};

fn validate_price(value: f64) -> Result<(), RepositoryError> {
    if !value.is_finite() || value < 0.0 {
        return Err(RepositoryError::ValidationError(format!(
            "Price must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone)]
pub struct MenuOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl MenuOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn add_menu_item(&self, menu_item: NewMenuItem) -> Result<MenuItem, RepositoryError> {
        if menu_item.item_name.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Item name must not be empty".to_string(),
            ));
        }
        if menu_item.item_type.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Item type must not be empty".to_string(),
            ));
        }
        validate_price(menu_item.price)?;

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("add_menu_item: failed to acquire DB connection: {}", e);
            e
        })?;

        let menu_item = NewMenuItem {
            description: blank_to_none(menu_item.description),
            image_url: blank_to_none(menu_item.image_url),
            ..menu_item
        };

        diesel::insert_into(menu)
            .values(&menu_item)
            .returning(MenuItem::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "add_menu_item: error inserting menu item '{}': {}",
                    menu_item.item_name, e
                );
                RepositoryError::from_diesel(e, &format!("menu: {}", menu_item.item_name))
            })
    }

    /// Fails with a validation error while orders still reference the item.
    pub fn remove_menu_item(&self, name: &str) -> Result<MenuItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "remove_menu_item: failed to acquire DB connection for '{}': {}",
                name, e
            );
            e
        })?;

        let removed = diesel::delete(menu.filter(item_name.eq(name)))
            .returning(MenuItem::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!("remove_menu_item: error deleting menu item '{}': {}", name, e);
                RepositoryError::from_diesel(e, &format!("menu: {name}"))
            })?;
        info!("remove_menu_item: deleted '{}'", name);
        Ok(removed)
    }

    pub fn update_menu_item(
        &self,
        name: &str,
        changed_menu_item: UpdateMenuItem,
    ) -> Result<MenuItem, RepositoryError> {
        if changed_menu_item.is_empty() {
            return Err(RepositoryError::ValidationError(format!(
                "No changes given for menu item '{name}'"
            )));
        }
        if matches!(changed_menu_item.item_type.as_deref(), Some(t) if t.trim().is_empty()) {
            return Err(RepositoryError::ValidationError(
                "Item type must not be empty".to_string(),
            ));
        }
        if let Some(new_price) = changed_menu_item.price {
            validate_price(new_price)?;
        }

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_menu_item: failed to acquire DB connection for '{}': {}",
                name, e
            );
            e
        })?;

        let changed_menu_item = UpdateMenuItem {
            description: changed_menu_item.description.map(blank_to_none),
            image_url: changed_menu_item.image_url.map(blank_to_none),
            ..changed_menu_item
        };

        diesel::update(menu.filter(item_name.eq(name)))
            .set(&changed_menu_item)
            .returning(MenuItem::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!("update_menu_item: error updating menu item '{}': {}", name, e);
                RepositoryError::from_diesel(e, &format!("menu: {name}"))
            })
    }

    pub fn get_all_menu_items(&self) -> Result<Vec<MenuItem>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_menu_items: failed to acquire DB connection: {}", e);
            e
        })?;

        menu.order_by((item_type.asc(), item_name.asc()))
            .select(MenuItem::as_select())
            .load::<MenuItem>(conn.connection())
            .map_err(|e| {
                error!("get_all_menu_items: error fetching menu items: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_menu_item(&self, name: &str) -> Result<MenuItem, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_menu_item: failed to acquire DB connection for '{}': {}",
                name, e
            );
            e
        })?;

        menu.filter(item_name.eq(name))
            .select(MenuItem::as_select())
            .first::<MenuItem>(conn.connection())
            .map_err(|e| {
                error!("get_menu_item: error fetching menu item '{}': {}", name, e);
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("menu: {name}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    pub fn item_exists(&self, name: &str) -> Result<bool, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        diesel::select(diesel::dsl::exists(menu.filter(item_name.eq(name))))
            .get_result::<bool>(conn.connection())
            .map_err(|e| {
                error!("item_exists: error checking menu item '{}': {}", name, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn browse_by_name(&self, name: &str) -> Result<Vec<MenuItem>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "browse_by_name: failed to acquire DB connection for '{}': {}",
                name, e
            );
            e
        })?;

        menu.filter(item_name.eq(name.trim()))
            .select(MenuItem::as_select())
            .load::<MenuItem>(conn.connection())
            .map_err(|e| {
                error!("browse_by_name: error searching for '{}': {}", name, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn browse_by_type(&self, type_name: &str) -> Result<Vec<MenuItem>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "browse_by_type: failed to acquire DB connection for '{}': {}",
                type_name, e
            );
            e
        })?;

        menu.filter(item_type.eq(type_name.trim()))
            .order_by(item_name.asc())
            .select(MenuItem::as_select())
            .load::<MenuItem>(conn.connection())
            .map_err(|e| {
                error!("browse_by_type: error searching for type '{}': {}", type_name, e);
                RepositoryError::DatabaseError(e)
            })
    }
}
