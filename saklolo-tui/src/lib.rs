// Library interface for the saklolo client (shared by the binary and tests)
pub mod api;
pub mod app;
pub mod config;

#[macro_use]
pub mod logging;

pub mod photo;
pub mod report;
pub mod terminal;
pub mod ui;
