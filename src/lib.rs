pub mod errors;
pub mod generate;
pub mod handlers;
pub mod models;
pub mod store;
