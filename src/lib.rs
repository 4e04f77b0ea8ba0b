pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod menus;
pub mod models;
pub mod providers;
