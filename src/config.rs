use crate::cli::Cli;
use dotenvy::var;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_POOL_SIZE: u32 = 1;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HISTORY_LIMIT: i64 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),
}

#[derive(Clone, Debug)]
pub struct CafeConfig {
    pub database_url: String,
    pub pool_size: u32,
    pub connect_timeout: Duration,
    pub history_limit: i64,
    pub run_migrations: bool,
    pub execute: Option<String>,
}

/// `postgres://[user[:password]@]host:port/dbname`, with userinfo
/// percent-encoded.
fn connection_url(
    host: &str,
    port: u16,
    dbname: &str,
    user: Option<&str>,
    password: Option<&str>,
) -> Result<Url, ConfigError> {
    let mut url = Url::parse(&format!("postgres://{host}:{port}"))
        .map_err(|e| ConfigError::InvalidUrl(format!("host '{host}': {e}")))?;
    url.set_path(&format!("/{dbname}"));
    if let Some(user) = user {
        url.set_username(user)
            .map_err(|_| ConfigError::InvalidUrl(format!("user '{user}'")))?;
        url.set_password(password)
            .map_err(|_| ConfigError::InvalidUrl("password".to_string()))?;
    }
    Ok(url)
}

impl CafeConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_cli_with(cli, |key| var(key).ok())
    }

    /// Builds the configuration from parsed arguments and an environment
    /// lookup. `DATABASE_URL` wins over the URL assembled from the arguments.
    pub fn from_cli_with<F>(cli: &Cli, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match env("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url,
            None => {
                let user = cli.user.clone().or_else(|| env("PGUSER"));
                let password = env("PGPASSWORD");
                connection_url(
                    &cli.host,
                    cli.port,
                    &cli.dbname,
                    user.as_deref(),
                    password.as_deref(),
                )?
                .to_string()
            }
        };
        let pool_size = env("CAFE_DB_POOL_SIZE")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_POOL_SIZE);
        let connect_timeout = env("CAFE_DB_CONNECT_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
        let history_limit = env("CAFE_HISTORY_LIMIT")
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        Ok(Self {
            database_url,
            pool_size,
            connect_timeout,
            history_limit,
            run_migrations: !cli.skip_migrations,
            execute: cli.execute.clone(),
        })
    }

    /// The connection URL with any password masked, for log lines.
    pub fn redacted_url(&self) -> String {
        match Url::parse(&self.database_url) {
            Ok(mut url) => {
                if url.password().is_some() {
                    // Fails only for URLs without a host.
                    let _ = url.set_password(Some("***"));
                }
                url.to_string()
            }
            Err(_) => "<unparsable database url>".to_string(),
        }
    }
}
