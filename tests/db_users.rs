mod common;

use cafe::db::{RepositoryError, UserOperations};
use cafe::enums::users::UserType;
use cafe::models::user::{NewUser, UpdateUser};

#[test]
fn create_user_registers_customer() {
    let pool = common::setup_pool();
    let user_ops = UserOperations::new(pool.clone());

    let user = user_ops
        .create_user(NewUser::customer("dave", "secret", Some(" 555-0100 ")))
        .expect("create user should succeed");

    assert_eq!(user.login, "dave");
    assert_eq!(user.password, "secret");
    assert_eq!(user.phone_num.as_deref(), Some("555-0100"));
    assert_eq!(user.fav_items, "");
    assert_eq!(user.user_type, UserType::Customer);
}

#[test]
fn create_user_blank_phone_is_stored_as_null() {
    let pool = common::setup_pool();
    let user_ops = UserOperations::new(pool.clone());

    let user = user_ops
        .create_user(NewUser::customer("erin", "pw", Some("")))
        .expect("create user");

    assert_eq!(user.phone_num, None);
}

#[test]
fn create_user_duplicate_login_conflicts() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    let result = user_ops.create_user(NewUser::customer(&fixtures.customer_login, "other", None));

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[test]
fn create_user_rejects_empty_login_or_password() {
    let pool = common::setup_pool();
    let user_ops = UserOperations::new(pool.clone());

    assert!(matches!(
        user_ops.create_user(NewUser::customer("   ", "pw", None)),
        Err(RepositoryError::ValidationError(_))
    ));
    assert!(matches!(
        user_ops.create_user(NewUser::customer("frank", "", None)),
        Err(RepositoryError::ValidationError(_))
    ));
}

#[test]
fn log_in_matches_exact_credentials() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    let user = user_ops
        .log_in(&fixtures.customer_login, "alice-pw")
        .expect("log in query")
        .expect("credentials should match");
    assert_eq!(user.login, fixtures.customer_login);

    let wrong_password = user_ops
        .log_in(&fixtures.customer_login, "ALICE-PW")
        .expect("log in query");
    assert!(wrong_password.is_none());

    let unknown = user_ops.log_in("nobody", "alice-pw").expect("log in query");
    assert!(unknown.is_none());
}

#[test]
fn log_in_is_not_fooled_by_quotes() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    let result = user_ops
        .log_in(&fixtures.customer_login, "' OR '1'='1")
        .expect("log in query");

    assert!(result.is_none());
}

#[test]
fn find_type_returns_stored_role() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    assert_eq!(
        user_ops.find_type(&fixtures.customer_login).expect("type"),
        UserType::Customer
    );
    assert_eq!(
        user_ops.find_type(&fixtures.employee_login).expect("type"),
        UserType::Employee
    );
    assert_eq!(
        user_ops.find_type(&fixtures.manager_login).expect("type"),
        UserType::Manager
    );
    assert!(matches!(
        user_ops.find_type("nobody"),
        Err(RepositoryError::NotFound(_))
    ));
}

#[test]
fn get_user_not_found() {
    let pool = common::setup_pool();
    let user_ops = UserOperations::new(pool.clone());

    assert!(matches!(
        user_ops.get_user("ghost"),
        Err(RepositoryError::NotFound(_))
    ));
}

#[test]
fn update_password_rejects_empty_and_accepts_new_value() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    assert!(matches!(
        user_ops.update_password(&fixtures.customer_login, ""),
        Err(RepositoryError::ValidationError(_))
    ));

    user_ops
        .update_password(&fixtures.customer_login, "new-pw")
        .expect("update password");

    assert!(user_ops
        .log_in(&fixtures.customer_login, "new-pw")
        .expect("log in")
        .is_some());
    assert!(user_ops
        .log_in(&fixtures.customer_login, "alice-pw")
        .expect("log in")
        .is_none());
}

#[test]
fn update_phone_and_favourites() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    let user = user_ops
        .update_phone(&fixtures.customer_login, "555-0199")
        .expect("update phone");
    assert_eq!(user.phone_num.as_deref(), Some("555-0199"));

    let user = user_ops
        .update_phone(&fixtures.customer_login, "  ")
        .expect("clear phone");
    assert_eq!(user.phone_num, None);

    let user = user_ops
        .update_fav_items(&fixtures.customer_login, "Latte, Muffin")
        .expect("update favourites");
    assert_eq!(user.fav_items, "Latte, Muffin");
}

#[test]
fn update_user_type_promotes_customer() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    let user = user_ops
        .update_user_type(&fixtures.customer_login, UserType::Employee)
        .expect("update type");

    assert_eq!(user.user_type, UserType::Employee);
    assert_eq!(
        user_ops.find_type(&fixtures.customer_login).expect("type"),
        UserType::Employee
    );
}

#[test]
fn update_user_rejects_empty_changeset_and_unknown_login() {
    let pool = common::setup_pool();
    let user_ops = UserOperations::new(pool.clone());

    assert!(matches!(
        user_ops.update_user("ghost", UpdateUser::default()),
        Err(RepositoryError::ValidationError(_))
    ));
    assert!(matches!(
        user_ops.update_fav_items("ghost", "Tea"),
        Err(RepositoryError::NotFound(_))
    ));
}
