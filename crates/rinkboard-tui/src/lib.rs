pub mod app;
pub mod config;
pub mod protocol;
pub mod tui;
