pub mod advisor;
pub mod app;
pub mod auth;
pub mod budgets;
pub mod config;
pub mod dates;
pub mod error;
pub mod expenses;
pub mod goals;
pub mod settings;
pub mod state;
pub mod users;
