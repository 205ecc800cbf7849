pub mod admin;
pub mod places;
