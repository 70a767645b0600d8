// src/app/mod.rs
//
// Application bootstrap: configuration and wiring

pub mod config;
pub mod scan_init;

pub use config::AppConfig;
pub use scan_init::{assemble_app_state, init_app_state};
