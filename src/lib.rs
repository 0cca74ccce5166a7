// src/lib.rs
pub mod checker;
pub mod client;
pub mod config;
pub mod logging;
pub mod report;
