pub mod cache;
pub mod catalog;
pub mod citations;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod logging;
pub mod photos;
pub mod share;
pub mod types;
pub mod urls;

// Browser front end over the core modules
pub mod web;
