pub mod config;
pub mod error;
pub mod grouping;
pub mod models;
