pub mod config;
pub mod errors;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod util;

pub use repository::*;
