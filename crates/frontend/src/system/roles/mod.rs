pub mod api;
pub mod pending;
pub mod ui;
