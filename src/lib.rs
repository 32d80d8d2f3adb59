pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod join;
pub mod output;
pub mod present;
pub mod search;
pub mod source;
pub mod store;
