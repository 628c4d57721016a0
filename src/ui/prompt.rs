//! Thin wrappers over `dialoguer` so every screen prompts the same way.
//! Each call blocks until the user gives an acceptable answer.

use anyhow::Result;
use dialoguer::{Confirm, Input, Password, Select};

#[allow(clippy::ptr_arg)]
fn not_blank(input: &String) -> Result<(), &'static str> {
    if input.trim().is_empty() {
        Err("This value must not be empty")
    } else {
        Ok(())
    }
}

/// Free text; an empty answer is allowed.
pub fn text(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Text that is asked again until it is not blank.
pub fn required_text(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .validate_with(not_blank)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Hidden input, asked again until it is not empty.
pub fn password(prompt: &str) -> Result<String> {
    Ok(Password::new().with_prompt(prompt).interact()?)
}

pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}

pub fn choose<T: ToString>(prompt: &str, items: &[T]) -> Result<usize> {
    Ok(Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()?)
}

pub fn order_id(prompt: &str) -> Result<i32> {
    Ok(Input::<i32>::new()
        .with_prompt(prompt)
        .validate_with(|id: &i32| {
            if *id > 0 {
                Ok(())
            } else {
                Err("Order ids are positive numbers")
            }
        })
        .interact_text()?)
}

pub fn price(prompt: &str) -> Result<f64> {
    Ok(Input::<f64>::new()
        .with_prompt(prompt)
        .validate_with(|p: &f64| {
            if p.is_finite() && *p >= 0.0 {
                Ok(())
            } else {
                Err("Price must be a non-negative number")
            }
        })
        .interact_text()?)
}
