#[macro_use]
extern crate log;

pub mod cli;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod test_utils;
pub mod traits;
pub mod ui;

use crate::config::CafeConfig;
use crate::db::{
    establish_connection_pool, run_db_migrations, MenuOperations, OrderOperations,
    RepositoryError, SqlOperations, UserOperations,
};
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

#[derive(Clone)]
pub struct CafeState {
    pub user_ops: UserOperations,
    pub menu_ops: MenuOperations,
    pub order_ops: OrderOperations,
    pub sql_ops: SqlOperations,
    pub history_limit: i64,
}

impl CafeState {
    pub fn new(config: &CafeConfig) -> Result<Self, RepositoryError> {
        info!("Connecting to {}", config.redacted_url());
        let db = establish_connection_pool(
            &config.database_url,
            config.pool_size,
            config.connect_timeout,
        )?;
        if config.run_migrations {
            run_db_migrations(db.clone())?;
        }

        Ok(Self::from_pool(db, config.history_limit))
    }

    pub fn from_pool(db: Pool<ConnectionManager<PgConnection>>, history_limit: i64) -> Self {
        CafeState {
            user_ops: UserOperations::new(db.clone()),
            menu_ops: MenuOperations::new(db.clone()),
            order_ops: OrderOperations::new(db.clone()),
            sql_ops: SqlOperations::new(db),
            history_limit,
        }
    }
}
