pub mod commands;
pub mod config;
pub mod db;
pub mod fixtures;
pub mod routes;
pub mod types;
pub mod utils;
