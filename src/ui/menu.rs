use crate::db::RepositoryError;
use crate::models::admin::{NewMenuItem, UpdateMenuItem};
use crate::ui::{prompt, report};
use crate::ui::render::{print_row_count, print_rows};
use crate::CafeState;
use anyhow::Result;

pub fn browse_by_name(state: &CafeState) -> Result<()> {
    let name = prompt::required_text("\tEnter item name")?;
    let items = state.menu_ops.browse_by_name(&name)?;
    print_row_count(print_rows(&items)?);
    Ok(())
}

pub fn browse_by_type(state: &CafeState) -> Result<()> {
    let item_type = prompt::required_text("\tEnter item type")?;
    let items = state.menu_ops.browse_by_type(&item_type)?;
    print_row_count(print_rows(&items)?);
    Ok(())
}

pub fn full_menu(state: &CafeState) -> Result<()> {
    let items = state.menu_ops.get_all_menu_items()?;
    print_row_count(print_rows(&items)?);
    Ok(())
}

fn add_item(state: &CafeState) -> Result<()> {
    let item_name = prompt::required_text("\tPlease enter the name of the item")?;
    let item_type = prompt::required_text("\tPlease enter the type of the item")?;
    let price = prompt::price("\tPlease enter the price of the item")?;
    let description = prompt::text("\tPlease enter the description of the item (blank for none)")?;
    let image_url = prompt::text("\tPlease enter the imageurl of the item (blank for none)")?;

    let new_item = NewMenuItem {
        item_name,
        item_type,
        price,
        description: Some(description),
        image_url: Some(image_url),
    };
    match state.menu_ops.add_menu_item(new_item) {
        Ok(item) => {
            println!("\tItem added");
            print_rows(std::slice::from_ref(&item))?;
        }
        Err(RepositoryError::Conflict(what)) => println!("\tThe item already exists ({what})"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn delete_item(state: &CafeState) -> Result<()> {
    let name = prompt::required_text("\tPlease enter the name of the item you want to delete")?;
    let item = match state.menu_ops.get_menu_item(&name) {
        Ok(item) => item,
        Err(RepositoryError::NotFound(_)) => {
            println!("\tThe item does not exist");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    print_rows(std::slice::from_ref(&item))?;
    if prompt::confirm("\tAre you sure you want to delete this item?")? {
        state.menu_ops.remove_menu_item(&name)?;
        println!("\tItem Deleted");
    } else {
        println!("\tItem Kept");
    }
    Ok(())
}

fn edit_item(state: &CafeState) -> Result<()> {
    let name = prompt::required_text("\tPlease enter the name of the item you want to update")?;
    let item = match state.menu_ops.get_menu_item(&name) {
        Ok(item) => item,
        Err(RepositoryError::NotFound(_)) => {
            println!("\tThe item does not exist");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    print_rows(std::slice::from_ref(&item))?;

    let fields = ["Type", "Price", "Description", "imageurl", "Nothing"];
    loop {
        let changes = match prompt::choose("\tWhat would you like to update?", &fields)? {
            0 => UpdateMenuItem {
                item_type: Some(prompt::required_text("\tPlease enter the new type of the item")?),
                ..Default::default()
            },
            1 => UpdateMenuItem {
                price: Some(prompt::price("\tPlease enter the new price of the item")?),
                ..Default::default()
            },
            2 => UpdateMenuItem {
                description: Some(Some(prompt::text(
                    "\tPlease enter the new description of the item",
                )?)),
                ..Default::default()
            },
            3 => UpdateMenuItem {
                image_url: Some(Some(prompt::text("\tPlease enter the new imageurl of the item")?)),
                ..Default::default()
            },
            _ => break,
        };
        let updated = state.menu_ops.update_menu_item(&name, changes)?;
        print_rows(std::slice::from_ref(&updated))?;
    }
    println!("\tThank you for updating");
    Ok(())
}

/// Manager-only menu maintenance.
pub fn update_menu(state: &CafeState) -> Result<()> {
    let actions = ["Add an item", "Delete an item", "Edit an item", "Finished updating"];
    loop {
        let result = match prompt::choose("\tWhich action would you like to take today?", &actions)? {
            0 => add_item(state),
            1 => delete_item(state),
            2 => edit_item(state),
            _ => break,
        };
        if let Err(e) = result {
            report("update_menu", e)?;
        }
    }
    println!("\tThank you for updating the menu");
    Ok(())
}
