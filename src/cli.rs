use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "cafe",
    author,
    version,
    about = "Cafe ordering console for customers, employees and managers."
)]
pub struct Cli {
    /// Name of the PostgreSQL database.
    pub dbname: String,

    /// Port the PostgreSQL server listens on.
    pub port: u16,

    /// Host of the PostgreSQL server.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Database role to connect as.
    #[arg(long, env = "PGUSER")]
    pub user: Option<String>,

    /// Run one trusted SQL statement, print its result and exit.
    #[arg(long, short = 'e', value_name = "SQL")]
    pub execute: Option<String>,

    /// Do not apply the embedded schema migrations at startup.
    #[arg(long = "skip-migrations", action = ArgAction::SetTrue)]
    pub skip_migrations: bool,
}
