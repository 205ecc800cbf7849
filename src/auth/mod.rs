pub mod authorizor;
mod catalog;
mod user;

pub use catalog::Catalog;
pub use user::{AdminSecret, User, ADMIN_SECRET_HEADER};
