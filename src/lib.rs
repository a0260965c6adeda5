pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
