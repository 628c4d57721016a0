use crate::db::RepositoryError;
use crate::enums::common::{OrderDetails, PrepStatus};
use crate::models::common::Order;
use crate::ui::render::{print_order_details, print_rows};
use crate::ui::{prompt, report, Session};
use crate::CafeState;
use anyhow::Result;

fn add_one_item(state: &CafeState, order_id: i32) -> Result<()> {
    let name = prompt::required_text("\tPlease enter the item name")?;
    match state.order_ops.add_item(order_id, &name) {
        Ok(order) => println!("\tAdded '{}', order total is now ${:.2}", name, order.total),
        Err(RepositoryError::NotFound(_)) => println!("\tInvalid name!"),
        Err(RepositoryError::Conflict(_)) => println!("\t'{name}' is already in this order"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn delete_one_item(state: &CafeState, details: &OrderDetails) -> Result<()> {
    if details.items.is_empty() {
        println!("\tThe order has no items to delete");
        return Ok(());
    }
    let names: Vec<&str> = details.items.iter().map(|i| i.item_name.as_str()).collect();
    let name = names[prompt::choose("\tWhich item would you like to delete?", &names)?];
    let order = state.order_ops.delete_item(details.order.order_id, name)?;
    println!("\tDeleted! Order total is now ${:.2}", order.total);
    Ok(())
}

/// Looks up an order the current user may see. Customers only get their own
/// orders; staff see every order.
fn visible_order(state: &CafeState, session: &Session, order_id: i32) -> Result<Option<OrderDetails>> {
    match state.order_ops.get_order_details(order_id) {
        Ok(details) if session.user_type.is_staff() || details.order.login == session.login => {
            Ok(Some(details))
        }
        Ok(_) | Err(RepositoryError::NotFound(_)) => {
            println!("\tThe order ID does not exist");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Starts an order and keeps adding items until the user is done. Returns the
/// new order id.
pub fn add_order(state: &CafeState, session: &Session) -> Result<i32> {
    let order_id = state.order_ops.create_order(&session.login)?;

    loop {
        if let Err(e) = add_one_item(state, order_id) {
            report("add_order", e)?;
        }
        if !prompt::confirm("\tIs there any other item to order?")? {
            break;
        }
    }

    let details = state.order_ops.get_order_details(order_id)?;
    println!("\tYour order:");
    let count = print_rows(&details.items)?;
    println!("\tTotal Items: {count}");
    println!("\tOrder total: ${:.2}", details.order.total);
    println!("\tOrder id is: {order_id}");
    println!("\tThank you for your order!");
    Ok(order_id)
}

/// Customer edit of one of their own unpaid orders.
pub fn update_order(state: &CafeState, session: &Session) -> Result<()> {
    let order_id = prompt::order_id("\tPlease enter your order id")?;
    let Some(mut details) = visible_order(state, session, order_id)? else {
        return Ok(());
    };
    if details.order.paid {
        println!("\tSorry, the order has been processed");
        return Ok(());
    }

    let choices = ["Add another item", "Delete an item", "Finish editing"];
    loop {
        println!("Your order:");
        print_order_details(&details)?;
        let result = match prompt::choose("\tWhat changes would you like to make?", &choices)? {
            0 => add_one_item(state, order_id),
            1 => delete_one_item(state, &details),
            _ => break,
        };
        if let Err(e) = result {
            report("update_order", e)?;
        }
        details = state.order_ops.get_order_details(order_id)?;
    }
    println!("\tThank you for checking your order");
    Ok(())
}

fn update_item_status(state: &CafeState, details: &OrderDetails) -> Result<()> {
    if details.items.is_empty() {
        println!("\tThe order has no items");
        return Ok(());
    }
    let names: Vec<&str> = details.items.iter().map(|i| i.item_name.as_str()).collect();
    let name = names[prompt::choose("\tWhich item?", &names)?];
    let statuses: Vec<&str> = PrepStatus::ALL.iter().map(PrepStatus::human_readable).collect();
    let status = PrepStatus::ALL[prompt::choose("\tNew status", &statuses)?];
    let comments = prompt::text("\tComments (blank for none)")?;

    let updated = state
        .order_ops
        .update_item_status(details.order.order_id, name, status, Some(comments))?;
    print_rows(std::slice::from_ref(&updated))?;
    Ok(())
}

/// Staff edit of any order: payment, preparation state and, while unpaid,
/// its items.
pub fn employee_update_order(state: &CafeState) -> Result<()> {
    let order_id = prompt::order_id("\tPlease enter the order id")?;
    let mut details = match state.order_ops.get_order_details(order_id) {
        Ok(details) => details,
        Err(RepositoryError::NotFound(_)) => {
            println!("\tThe order ID does not exist");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let choices = [
        "Mark as paid",
        "Update item status",
        "Add an item",
        "Delete an item",
        "Finish editing",
    ];
    loop {
        print_order_details(&details)?;
        let result = match prompt::choose("\tWhat changes would you like to make?", &choices)? {
            0 => state
                .order_ops
                .mark_paid(order_id)
                .map(|order| {
                    println!("\tOrder {} paid, total ${:.2}", order.order_id, order.total);
                })
                .map_err(anyhow::Error::from),
            1 => update_item_status(state, &details),
            2 if details.order.paid => {
                println!("\tSorry, the order has been processed");
                Ok(())
            }
            2 => add_one_item(state, order_id),
            3 if details.order.paid => {
                println!("\tSorry, the order has been processed");
                Ok(())
            }
            3 => delete_one_item(state, &details),
            _ => break,
        };
        if let Err(e) = result {
            report("employee_update_order", e)?;
        }
        details = state.order_ops.get_order_details(order_id)?;
    }
    Ok(())
}

fn print_orders_or(orders: &[Order], empty_message: &str) -> Result<()> {
    if orders.is_empty() {
        println!("\t{empty_message}");
    } else {
        print_rows(orders)?;
    }
    Ok(())
}

pub fn order_history(state: &CafeState, session: &Session) -> Result<()> {
    let orders = state
        .order_ops
        .get_order_history(&session.login, state.history_limit)?;
    print_orders_or(&orders, "There is no past order")
}

pub fn current_orders(state: &CafeState) -> Result<()> {
    let orders = state.order_ops.get_current_orders()?;
    print_orders_or(&orders, "There is no current order")
}

pub fn order_status(state: &CafeState, session: &Session) -> Result<()> {
    let order_id = prompt::order_id("\tPlease enter your order ID")?;
    if let Some(details) = visible_order(state, session, order_id)? {
        print_order_details(&details)?;
    }
    Ok(())
}
