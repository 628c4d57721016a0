pub mod common;
pub mod users;
