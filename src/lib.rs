pub mod categories;
pub mod config;
pub mod date_time_provider;
pub mod db;
pub mod entities;
pub mod env_provider;
pub mod extract;
pub mod models;
pub mod response;
pub mod routes;
pub mod state;
pub mod transactions;
pub mod validations;
