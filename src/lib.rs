pub mod app_state;
pub mod auth;
pub mod compression;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod integrations;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod seed;
pub mod services;
