pub mod add_users;
pub mod details;
pub mod users_grid;
