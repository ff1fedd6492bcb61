pub mod about;
pub mod history;
pub mod home;
pub mod not_found;
pub mod predict;
