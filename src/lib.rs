pub mod chain;
pub mod config;
pub mod discovery;
pub mod handlers;
pub mod observability;
