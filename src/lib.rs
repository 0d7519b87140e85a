pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod markdown;
pub mod store;
pub mod theme;
pub mod workspace;
