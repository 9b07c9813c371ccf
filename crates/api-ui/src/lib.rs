pub mod charts;
pub mod config;
pub mod dashboard;
pub mod databases;
pub mod error;
pub mod layers;
pub mod metrics;
pub mod router;
pub mod state;
pub mod tables;
#[cfg(test)]
pub mod tests;
pub mod web_assets;
