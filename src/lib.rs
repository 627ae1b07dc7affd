pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
pub mod transform;
pub mod validation;
