pub mod data_grid;
pub mod ui;
