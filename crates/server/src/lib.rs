pub mod config;
pub mod error;
pub mod links;
pub mod routes;
pub mod state;
