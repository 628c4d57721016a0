use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, RepositoryError};
use crate::enums::users::UserType;
use crate::models::admin::NewMenuItem;
use crate::models::user::NewUser;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use std::sync::Once;
use std::time::Duration;

// Fixture strategy:
// - One customer, one employee, one manager.
// - Three menu items with prices that sum exactly in binary floating point.
const TEST_POOL_SIZE: u32 = 4;
const TEST_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
static TEST_THREADS_GUARD: Once = Once::new();

fn ensure_single_threaded_tests() {
    TEST_THREADS_GUARD.call_once(|| {
        let threads = test_threads_from_args().or_else(|| std::env::var("RUST_TEST_THREADS").ok());
        if threads.as_deref() != Some("1") {
            panic!(
                "Tests must run with --test-threads=1 or RUST_TEST_THREADS=1 because every test truncates the shared database."
            );
        }
    });
}

fn test_threads_from_args() -> Option<String> {
    let mut args = std::env::args();
    while let Some(arg) = args.next() {
        if arg == "--test-threads" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--test-threads=") {
            return Some(value.to_string());
        }
    }
    None
}

pub fn init_test_env() {
    ensure_single_threaded_tests();
}

pub fn build_test_pool(database_url: &str) -> Pool<ConnectionManager<PgConnection>> {
    build_test_pool_with_size(database_url, TEST_POOL_SIZE)
}

pub fn build_test_pool_with_size(
    database_url: &str,
    max_size: u32,
) -> Pool<ConnectionManager<PgConnection>> {
    let pool = establish_connection_pool(database_url, max_size, TEST_CONNECT_TIMEOUT)
        .expect("Unable to build connection pool");
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query("TRUNCATE TABLE item_status, orders, menu, users RESTART IDENTITY CASCADE")
        .execute(conn.connection())
        .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    pub customer_login: String,
    pub employee_login: String,
    pub manager_login: String,
    pub menu_item_names: Vec<String>,
}

pub fn seed_basic_fixtures(
    pool: &Pool<ConnectionManager<PgConnection>>,
) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let customer_login = insert_user(conn.connection(), "alice", "alice-pw", UserType::Customer)?;
    let employee_login = insert_user(conn.connection(), "bob", "bob-pw", UserType::Employee)?;
    let manager_login = insert_user(conn.connection(), "carol", "carol-pw", UserType::Manager)?;

    let latte = seed_menu_item(conn.connection(), "Latte", "Drinks", 4.5, Some("Espresso and milk"))?;
    let muffin = seed_menu_item(conn.connection(), "Muffin", "Bakery", 2.25, None)?;
    let mocha = seed_menu_item(conn.connection(), "Mocha", "Drinks", 5.0, Some("Chocolate latte"))?;

    Ok(TestFixtures {
        customer_login,
        employee_login,
        manager_login,
        menu_item_names: vec![latte, muffin, mocha],
    })
}

pub fn insert_user(
    conn: &mut PgConnection,
    login_val: &str,
    password_val: &str,
    user_type_val: UserType,
) -> Result<String, RepositoryError> {
    use crate::db::schema::users::dsl::*;

    let new_user = NewUser {
        user_type: user_type_val,
        ..NewUser::customer(login_val, password_val, None)
    };

    diesel::insert_into(users)
        .values(&new_user)
        .returning(login)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn seed_menu_item(
    conn: &mut PgConnection,
    name_val: &str,
    type_val: &str,
    price_val: f64,
    description_val: Option<&str>,
) -> Result<String, RepositoryError> {
    use crate::db::schema::menu::dsl::*;

    let new_item = NewMenuItem {
        item_name: name_val.to_string(),
        item_type: type_val.to_string(),
        price: price_val,
        description: description_val.map(|val| val.to_string()),
        image_url: None,
    };

    diesel::insert_into(menu)
        .values(&new_item)
        .returning(item_name)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}
