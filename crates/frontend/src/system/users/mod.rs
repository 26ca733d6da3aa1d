pub mod api;
pub mod search_state;
pub mod source;
