pub mod api;
pub mod notes;
pub mod ui;
