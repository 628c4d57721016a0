use cafe::cli::Cli;
use cafe::config::CafeConfig;
use cafe::{ui, CafeState};
use clap::Parser;
use dotenvy::dotenv;
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is fine; the environment and arguments still apply.
    let dotenv_result = dotenv();

    // Setup logging
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    pretty_env_logger::init();
    if let Err(e) = dotenv_result {
        info!("No .env file loaded: {}", e);
    }

    let cli = Cli::parse();
    let config = match CafeConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Connecting to database...");
    let state = match CafeState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("Unable to connect to {}: {}", config.redacted_url(), e);
            eprintln!("Error - Unable to Connect to Database: {e}");
            eprintln!("Make sure you started postgres on this machine");
            return ExitCode::FAILURE;
        }
    };
    println!("Done");

    let result = match config.execute.as_deref() {
        Some(sql) => ui::run_statement(&state, sql),
        None => ui::main_menu(&state),
    };

    print!("Disconnecting from database...");
    drop(state);
    println!("Done\n\nBye !");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
