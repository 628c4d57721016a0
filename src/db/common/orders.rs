use crate::db::sql::current_sequence_value;
use crate::db::{DbConnection, RepositoryError};
use crate::enums::common::{OrderDetails, PrepStatus};
use crate::models::common::{ItemStatus, NewItemStatus, NewOrder, Order};
use diesel::dsl::{exists, now, sum, IntervalDsl};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use diesel::PgConnection;
use log::{debug, error, info};

pub const ORDER_ID_SEQUENCE: &str = "orders_order_id_seq";

/// Locks the order row for the rest of the transaction and rejects paid
/// orders.
fn lock_unpaid_order(conn: &mut PgConnection, search_order_id: i32) -> Result<Order, RepositoryError> {
    use crate::db::schema::orders::dsl::*;

    let order = orders
        .find(search_order_id)
        .select(Order::as_select())
        .for_update()
        .first::<Order>(conn)
        .map_err(|e| match e {
            Error::NotFound => RepositoryError::NotFound(format!("orders: {search_order_id}")),
            other => RepositoryError::DatabaseError(other),
        })?;

    if order.paid {
        return Err(RepositoryError::OrderLocked(search_order_id));
    }
    Ok(order)
}

/// Sets the order total to the sum of the menu prices of its line items.
fn recompute_total(conn: &mut PgConnection, search_order_id: i32) -> QueryResult<Order> {
    use crate::db::schema::{item_status, menu, orders};

    let new_total: Option<f64> = item_status::table
        .inner_join(menu::table)
        .filter(item_status::order_id.eq(search_order_id))
        .select(sum(menu::price))
        .first(conn)?;

    diesel::update(orders::table.find(search_order_id))
        .set(orders::total.eq(new_total.unwrap_or(0.0)))
        .returning(Order::as_returning())
        .get_result(conn)
}

#[derive(Clone)]
pub struct OrderOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl OrderOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Starts an empty unpaid order for `userlogin` and returns its id.
    pub fn create_order(&self, userlogin: &str) -> Result<i32, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_order: failed to acquire DB connection: {}", e);
            e
        })?;

        conn.connection().transaction(|conn| {
            use crate::db::schema::orders::dsl::*;

            diesel::insert_into(orders)
                .values(&NewOrder {
                    login: userlogin.to_string(),
                    paid: false,
                    total: 0.0,
                })
                .execute(conn)
                .map_err(|e| {
                    error!("create_order: error inserting order for '{}': {}", userlogin, e);
                    RepositoryError::from_diesel(e, &format!("users: {userlogin}"))
                })?;

            let new_order_id = current_sequence_value(conn, ORDER_ID_SEQUENCE)?;
            info!("create_order: order {} started for '{}'", new_order_id, userlogin);
            i32::try_from(new_order_id).map_err(|_| {
                RepositoryError::ValidationError(format!("order id {new_order_id} out of range"))
            })
        })
    }

    pub fn add_item(&self, search_order_id: i32, name: &str) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "add_item: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        conn.connection()
            .transaction(|conn| {
                use crate::db::schema::{item_status, menu};

                lock_unpaid_order(conn, search_order_id)?;

                let on_menu = diesel::select(exists(menu::table.filter(menu::item_name.eq(name))))
                    .get_result::<bool>(conn)?;
                if !on_menu {
                    return Err(RepositoryError::NotFound(format!("menu: {name}")));
                }

                let already_ordered = diesel::select(exists(
                    item_status::table
                        .filter(item_status::order_id.eq(search_order_id))
                        .filter(item_status::item_name.eq(name)),
                ))
                .get_result::<bool>(conn)?;
                if already_ordered {
                    return Err(RepositoryError::Conflict(format!(
                        "order {search_order_id} already contains '{name}'"
                    )));
                }

                diesel::insert_into(item_status::table)
                    .values(&NewItemStatus {
                        order_id: search_order_id,
                        item_name: name.to_string(),
                        status: PrepStatus::HasntStarted,
                    })
                    .execute(conn)?;

                let order = recompute_total(conn, search_order_id)?;
                debug!(
                    "add_item: order {} total is now {:.2}",
                    search_order_id, order.total
                );
                Ok(order)
            })
            .map_err(|e| {
                error!(
                    "add_item: error adding '{}' to order {}: {}",
                    name, search_order_id, e
                );
                e
            })
    }

    pub fn delete_item(&self, search_order_id: i32, name: &str) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "delete_item: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        conn.connection()
            .transaction(|conn| {
                use crate::db::schema::item_status::dsl::*;

                lock_unpaid_order(conn, search_order_id)?;

                let deleted = diesel::delete(
                    item_status
                        .filter(order_id.eq(search_order_id))
                        .filter(item_name.eq(name)),
                )
                .execute(conn)?;
                if deleted == 0 {
                    return Err(RepositoryError::NotFound(format!(
                        "item_status: order {search_order_id} has no '{name}'"
                    )));
                }

                Ok(recompute_total(conn, search_order_id)?)
            })
            .map_err(|e| {
                error!(
                    "delete_item: error removing '{}' from order {}: {}",
                    name, search_order_id, e
                );
                e
            })
    }

    pub fn get_order(&self, search_order_id: i32) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_order: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        orders
            .find(search_order_id)
            .select(Order::as_select())
            .first::<Order>(conn.connection())
            .map_err(|e| {
                error!("get_order: error fetching order {}: {}", search_order_id, e);
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("orders: {search_order_id}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    pub fn get_order_items(&self, search_order_id: i32) -> Result<Vec<ItemStatus>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_order_items: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        use crate::db::schema::item_status::dsl::*;
        item_status
            .filter(order_id.eq(search_order_id))
            .order_by((last_updated.asc(), item_name.asc()))
            .select(ItemStatus::as_select())
            .load::<ItemStatus>(conn.connection())
            .map_err(|e| {
                error!(
                    "get_order_items: error loading items for order {}: {}",
                    search_order_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_order_details(&self, search_order_id: i32) -> Result<OrderDetails, RepositoryError> {
        let order = self.get_order(search_order_id)?;
        let items = self.get_order_items(search_order_id)?;
        Ok(OrderDetails { order, items })
    }

    /// Most recent orders of `userlogin`, newest first.
    pub fn get_order_history(&self, userlogin: &str, limit: i64) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_order_history: failed to acquire DB connection for '{}': {}",
                userlogin, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        orders
            .filter(login.eq(userlogin))
            .order_by((received_at.desc(), order_id.desc()))
            .limit(limit)
            .select(Order::as_select())
            .load::<Order>(conn.connection())
            .map_err(|e| {
                error!(
                    "get_order_history: error loading orders for '{}': {}",
                    userlogin, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    /// Unpaid orders received within the past 24 hours.
    pub fn get_current_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_current_orders: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        orders
            .filter(paid.eq(false))
            .filter(received_at.ge(now - 1.day()))
            .order_by((received_at.desc(), order_id.desc()))
            .select(Order::as_select())
            .load::<Order>(conn.connection())
            .map_err(|e| {
                error!("get_current_orders: error loading current orders: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    /// Marks an order as paid. Paying twice is a no-op.
    pub fn mark_paid(&self, search_order_id: i32) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "mark_paid: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        let order = diesel::update(orders.find(search_order_id))
            .set(paid.eq(true))
            .returning(Order::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!("mark_paid: error updating order {}: {}", search_order_id, e);
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("orders: {search_order_id}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })?;
        info!("mark_paid: order {} paid, total {:.2}", order.order_id, order.total);
        Ok(order)
    }

    /// Updates the preparation state of one line item. Allowed on paid orders.
    pub fn update_item_status(
        &self,
        search_order_id: i32,
        name: &str,
        new_status: PrepStatus,
        new_comments: Option<String>,
    ) -> Result<ItemStatus, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_item_status: failed to acquire DB connection for order {}: {}",
                search_order_id, e
            );
            e
        })?;

        let new_comments = new_comments.filter(|c| !c.trim().is_empty());

        use crate::db::schema::item_status::dsl::*;
        diesel::update(
            item_status
                .filter(order_id.eq(search_order_id))
                .filter(item_name.eq(name)),
        )
        .set((
            status.eq(new_status),
            comments.eq(new_comments),
            last_updated.eq(now),
        ))
        .returning(ItemStatus::as_returning())
        .get_result(conn.connection())
        .map_err(|e| {
            error!(
                "update_item_status: error updating '{}' in order {}: {}",
                name, search_order_id, e
            );
            match e {
                Error::NotFound => RepositoryError::NotFound(format!(
                    "item_status: order {search_order_id} has no '{name}'"
                )),
                other => RepositoryError::DatabaseError(other),
            }
        })
    }
}
