pub mod api;
pub mod browser;
pub mod clipboard;
pub mod config;
pub mod data_models;
pub mod query_builder;
pub mod search_client;
pub mod session;
