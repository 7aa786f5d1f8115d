pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod logging;
pub mod progress;
pub mod search;
pub mod ui;

#[cfg(test)]
mod testing;
