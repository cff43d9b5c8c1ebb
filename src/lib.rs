pub mod database;
pub mod error;
pub mod fixtures;
pub mod models;
pub mod services;
pub mod session;
pub mod web;
