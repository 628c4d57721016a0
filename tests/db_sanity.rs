mod common;

use cafe::db::{run_db_migrations, DbConnection};
use diesel::prelude::*;

#[test]
fn db_migrations_run_and_empty_state() {
    let pool = common::setup_pool();

    let mut conn = DbConnection::new(&pool).expect("db connection");

    let user_count: i64 = cafe::db::schema::users::table
        .count()
        .get_result(conn.connection())
        .expect("count users");
    let menu_count: i64 = cafe::db::schema::menu::table
        .count()
        .get_result(conn.connection())
        .expect("count menu");
    let order_count: i64 = cafe::db::schema::orders::table
        .count()
        .get_result(conn.connection())
        .expect("count orders");
    let item_status_count: i64 = cafe::db::schema::item_status::table
        .count()
        .get_result(conn.connection())
        .expect("count item_status");

    assert_eq!(user_count, 0);
    assert_eq!(menu_count, 0);
    assert_eq!(order_count, 0);
    assert_eq!(item_status_count, 0);
}

#[test]
fn migrations_are_idempotent() {
    let pool = common::setup_pool();

    run_db_migrations(pool.clone()).expect("second migration run should be a no-op");
}

#[test]
fn user_type_check_constraint_rejects_unknown_roles() {
    let pool = common::setup_pool();
    let mut conn = DbConnection::new(&pool).expect("db connection");

    let result = diesel::sql_query(
        "INSERT INTO users (login, password, user_type) VALUES ('mallory', 'pw', 'Owner')",
    )
    .execute(conn.connection());

    assert!(result.is_err(), "unknown user type must violate the check");
}
