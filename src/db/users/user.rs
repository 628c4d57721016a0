use crate::db::errors::RepositoryError;
use crate::db::DbConnection;
use crate::enums::users::UserType;
use crate::models::user::{NewUser, UpdateUser, User};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use log::{debug, error};

#[derive(Clone)]
pub struct UserOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl UserOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        if new_user.login.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "Login must not be empty".to_string(),
            ));
        }
        if new_user.password.is_empty() {
            return Err(RepositoryError::ValidationError(
                "Password must not be empty".to_string(),
            ));
        }

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_user: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!(
                    "create_user: error inserting new user with login '{}': {}",
                    new_user.login, e
                );
                RepositoryError::from_diesel(e, &format!("users: {}", new_user.login))
            })
    }

    /// Returns the user when the login/password pair matches exactly.
    pub fn log_in(&self, login_val: &str, password_val: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "log_in: failed to acquire DB connection for login '{}': {}",
                login_val, e
            );
            e
        })?;

        use crate::db::schema::users::dsl::*;
        users
            .filter(login.eq(login_val))
            .filter(password.eq(password_val))
            .select(User::as_select())
            .first::<User>(conn.connection())
            .optional()
            .map_err(|e| {
                error!("log_in: error checking credentials for '{}': {}", login_val, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn get_user(&self, login_val: &str) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::users::dsl::*;
        users
            .find(login_val)
            .select(User::as_select())
            .first::<User>(conn.connection())
            .map_err(|e| {
                error!("get_user: error fetching user '{}': {}", login_val, e);
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("users: {login_val}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    pub fn find_type(&self, login_val: &str) -> Result<UserType, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::users::dsl::*;
        users
            .find(login_val)
            .select(user_type)
            .first::<UserType>(conn.connection())
            .map_err(|e| {
                error!("find_type: error fetching type of '{}': {}", login_val, e);
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("users: {login_val}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    pub fn update_user(&self, login_val: &str, changes: UpdateUser) -> Result<User, RepositoryError> {
        if changes.is_empty() {
            return Err(RepositoryError::ValidationError(format!(
                "No changes given for user '{login_val}'"
            )));
        }
        if matches!(changes.password.as_deref(), Some("")) {
            return Err(RepositoryError::ValidationError(
                "Password must not be empty".to_string(),
            ));
        }

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_user: failed to acquire DB connection for '{}': {}",
                login_val, e
            );
            e
        })?;
        debug!("update_user: updating '{}'", login_val);

        use crate::db::schema::users::dsl::*;
        diesel::update(users.find(login_val))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!("update_user: error updating user '{}': {}", login_val, e);
                RepositoryError::from_diesel(e, &format!("users: {login_val}"))
            })
    }

    pub fn update_password(&self, login_val: &str, new_password: &str) -> Result<User, RepositoryError> {
        self.update_user(
            login_val,
            UpdateUser {
                password: Some(new_password.to_string()),
                ..Default::default()
            },
        )
    }

    /// A blank number clears the stored phone.
    pub fn update_phone(&self, login_val: &str, new_phone: &str) -> Result<User, RepositoryError> {
        let trimmed = new_phone.trim();
        self.update_user(
            login_val,
            UpdateUser {
                phone_num: Some((!trimmed.is_empty()).then(|| trimmed.to_string())),
                ..Default::default()
            },
        )
    }

    pub fn update_fav_items(&self, login_val: &str, new_fav_items: &str) -> Result<User, RepositoryError> {
        self.update_user(
            login_val,
            UpdateUser {
                fav_items: Some(new_fav_items.to_string()),
                ..Default::default()
            },
        )
    }

    pub fn update_user_type(&self, login_val: &str, new_type: UserType) -> Result<User, RepositoryError> {
        self.update_user(
            login_val,
            UpdateUser {
                user_type: Some(new_type),
                ..Default::default()
            },
        )
    }
}
