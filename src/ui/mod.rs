//! Interactive console.
//!
//! `main_menu` runs the logged-out loop (create user, log in, exit). A
//! successful log in switches to the menu of the user's role until they log
//! out. Failures of a single action are reported and the loop carries on;
//! terminal errors end the program.

pub mod account;
pub mod menu;
pub mod orders;
pub mod prompt;
pub mod render;

use crate::db::sql::returns_rows;
use crate::db::RepositoryError;
use crate::enums::users::UserType;
use crate::CafeState;
use anyhow::Result;
use std::io::{self, Write};

/// The logged in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub login: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    BrowseByName,
    BrowseByType,
    FullMenu,
    AddOrder,
    UpdateOrder,
    EmployeeUpdateOrder,
    OrderHistory,
    CurrentOrders,
    OrderStatus,
    UpdateOwnInfo,
    UpdateAnyUser,
    UpdateMenu,
    LogOut,
}

impl MenuAction {
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::BrowseByName => "Browse Menu by ItemName",
            MenuAction::BrowseByType => "Browse Menu by Type",
            MenuAction::FullMenu => "View Full Menu",
            MenuAction::AddOrder => "Add Order",
            MenuAction::UpdateOrder | MenuAction::EmployeeUpdateOrder => "Update Order",
            MenuAction::OrderHistory => "View Order History",
            MenuAction::CurrentOrders => "View Current Orders",
            MenuAction::OrderStatus => "View Order Status",
            MenuAction::UpdateOwnInfo | MenuAction::UpdateAnyUser => "Update User Info",
            MenuAction::UpdateMenu => "Update Menu",
            MenuAction::LogOut => "Log out",
        }
    }
}

/// Entries of the menu shown to a user of the given role, in display order.
pub fn role_menu(user_type: UserType) -> Vec<MenuAction> {
    use MenuAction::*;

    match user_type {
        UserType::Customer => vec![
            BrowseByName,
            BrowseByType,
            FullMenu,
            AddOrder,
            UpdateOrder,
            OrderHistory,
            OrderStatus,
            UpdateOwnInfo,
            LogOut,
        ],
        UserType::Employee => vec![
            BrowseByName,
            BrowseByType,
            FullMenu,
            AddOrder,
            EmployeeUpdateOrder,
            CurrentOrders,
            OrderStatus,
            UpdateOwnInfo,
            LogOut,
        ],
        UserType::Manager => vec![
            BrowseByName,
            BrowseByType,
            FullMenu,
            AddOrder,
            EmployeeUpdateOrder,
            CurrentOrders,
            OrderStatus,
            UpdateAnyUser,
            UpdateMenu,
            LogOut,
        ],
    }
}

/// Prints the message for a failed action. Data-layer errors keep the loop
/// going; anything else (terminal I/O) is handed back to the caller.
pub(crate) fn report(action: &str, err: anyhow::Error) -> Result<()> {
    match err.downcast::<RepositoryError>() {
        Ok(repo_err) => {
            error!("{}: {}", action, repo_err);
            println!("\t{}", repo_err);
            Ok(())
        }
        Err(other) => Err(other),
    }
}

fn greeting() {
    println!(
        "\n\n*******************************************************\n\
         \x20             Cafe Ordering Console                    \n\
         *******************************************************\n"
    );
}

pub fn main_menu(state: &CafeState) -> Result<()> {
    greeting();
    let items = ["Create user", "Log in", "< EXIT"];
    loop {
        println!("MAIN MENU");
        println!("---------");
        match prompt::choose("Please make your choice", &items)? {
            0 => {
                if let Err(e) = account::create_user(state) {
                    report("create_user", e)?;
                }
            }
            1 => match account::log_in(state) {
                Ok(Some(session)) => user_menu(state, &session)?,
                Ok(None) => {}
                Err(e) => report("log_in", e)?,
            },
            _ => break,
        }
    }
    Ok(())
}

fn user_menu(state: &CafeState, session: &Session) -> Result<()> {
    let actions = role_menu(session.user_type);
    let labels: Vec<&str> = actions.iter().map(MenuAction::label).collect();
    info!("'{}' logged in as {}", session.login, session.user_type);

    loop {
        println!("MAIN MENU ({}: {})", session.user_type, session.login);
        println!("---------");
        let action = actions[prompt::choose("Please make your choice", &labels)?];
        let result = match action {
            MenuAction::BrowseByName => menu::browse_by_name(state),
            MenuAction::BrowseByType => menu::browse_by_type(state),
            MenuAction::FullMenu => menu::full_menu(state),
            MenuAction::AddOrder => orders::add_order(state, session).map(|_| ()),
            MenuAction::UpdateOrder => orders::update_order(state, session),
            MenuAction::EmployeeUpdateOrder => orders::employee_update_order(state),
            MenuAction::OrderHistory => orders::order_history(state, session),
            MenuAction::CurrentOrders => orders::current_orders(state),
            MenuAction::OrderStatus => orders::order_status(state, session),
            MenuAction::UpdateOwnInfo => account::update_own_info(state, session),
            MenuAction::UpdateAnyUser => account::update_any_user(state),
            MenuAction::UpdateMenu => menu::update_menu(state),
            MenuAction::LogOut => break,
        };
        if let Err(e) = result {
            report(action.label(), e)?;
        }
    }
    info!("'{}' logged out", session.login);
    Ok(())
}

/// Runs a single trusted statement through the raw SQL façade.
pub fn run_statement(state: &CafeState, sql: &str) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_statement_result(state, sql, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Row-returning statements print their rows and `total row(s): N`; anything
/// else prints the affected row count.
pub fn write_statement_result(state: &CafeState, sql: &str, out: &mut dyn Write) -> Result<()> {
    if returns_rows(sql) {
        let count = state.sql_ops.execute_query_print(sql, out)?;
        writeln!(out, "total row(s): {count}")?;
    } else {
        let affected = state.sql_ops.execute_update(sql)?;
        writeln!(out, "{affected} row(s) affected")?;
    }
    Ok(())
}
