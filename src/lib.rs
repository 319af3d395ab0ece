pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod grades;
pub mod models;
pub mod schedule;
pub mod services;
pub mod state;
pub mod store;
