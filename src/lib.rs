pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod server;
pub mod validation;
pub mod workflow;

pub use error::AppError;
pub use routes::AppState;
