pub mod history;
pub mod layout;
pub mod predict;
pub mod settings;
