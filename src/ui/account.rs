use crate::db::RepositoryError;
use crate::enums::users::UserType;
use crate::models::user::NewUser;
use crate::ui::render::print_rows;
use crate::ui::{prompt, Session};
use crate::CafeState;
use anyhow::Result;

/// Self-registration; new accounts are always customers.
pub fn create_user(state: &CafeState) -> Result<()> {
    let login = prompt::required_text("\tEnter user login")?;
    let password = prompt::password("\tEnter user password")?;
    let phone = prompt::text("\tEnter user phone (can be left blank)")?;

    match state
        .user_ops
        .create_user(NewUser::customer(&login, &password, Some(&phone)))
    {
        Ok(_) => println!("User successfully created!"),
        Err(RepositoryError::Conflict(_)) => println!("\tThe login '{login}' is already taken"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

pub fn log_in(state: &CafeState) -> Result<Option<Session>> {
    let login = prompt::required_text("\tEnter user login")?;
    let password = prompt::password("\tEnter user password")?;

    match state.user_ops.log_in(&login, &password)? {
        Some(user) => {
            println!("\tLogged in successfully!");
            Ok(Some(Session {
                login: user.login,
                user_type: user.user_type,
            }))
        }
        None => {
            println!("\tWrong user login or password");
            Ok(None)
        }
    }
}

/// Menu shared by self-service and manager edits. Returns false once the
/// user picks "Nothing".
fn update_fields(state: &CafeState, login: &str, allow_type: bool) -> Result<bool> {
    let mut fields = vec!["Password", "Phone Number", "Favorite Items"];
    if allow_type {
        fields.push("Type");
    }
    fields.push("Nothing");

    let choice = fields[prompt::choose("\tWhich would you like to update?", &fields)?];
    let updated = match choice {
        "Password" => {
            let new_password = prompt::password("\tPlease enter the new password")?;
            state.user_ops.update_password(login, &new_password)?
        }
        "Phone Number" => {
            let new_phone = prompt::text("\tPlease enter the new phone number")?;
            state.user_ops.update_phone(login, &new_phone)?
        }
        "Favorite Items" => {
            let new_fav = prompt::text("\tPlease enter the favorite items")?;
            state.user_ops.update_fav_items(login, &new_fav)?
        }
        "Type" => {
            let types: Vec<&str> = UserType::ALL.iter().map(UserType::as_str).collect();
            let new_type = UserType::ALL[prompt::choose("\tPlease enter the type", &types)?];
            state.user_ops.update_user_type(login, new_type)?
        }
        _ => return Ok(false),
    };
    println!("\tUpdated.");
    print_rows(std::slice::from_ref(&updated))?;
    Ok(true)
}

pub fn update_own_info(state: &CafeState, session: &Session) -> Result<()> {
    loop {
        let user = state.user_ops.get_user(&session.login)?;
        print_rows(std::slice::from_ref(&user))?;
        if !update_fields(state, &session.login, false)? {
            break;
        }
    }
    println!("\tThank you for updating your info");
    Ok(())
}

/// Manager variant: any account, including its type.
pub fn update_any_user(state: &CafeState) -> Result<()> {
    loop {
        let login = prompt::required_text("Please enter the login you want to check")?;
        match state.user_ops.get_user(&login) {
            Ok(user) => {
                print_rows(std::slice::from_ref(&user))?;
                while update_fields(state, &login, true)? {}
                let user = state.user_ops.get_user(&login)?;
                print_rows(std::slice::from_ref(&user))?;
            }
            Err(RepositoryError::NotFound(_)) => println!("\tThere is no user '{login}'"),
            Err(e) => return Err(e.into()),
        }
        if !prompt::confirm("Is there another user info you want to update?")? {
            break;
        }
    }
    Ok(())
}
