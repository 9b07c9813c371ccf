pub mod connection;
pub mod dashboard;
pub mod error;
pub mod introspect;
pub mod metrics;
pub mod models;
pub mod pagination;
pub mod temporal;

#[cfg(test)]
pub(crate) mod tests;

pub use connection::ConnectionProvider;
pub use error::{ExplorerError, ExplorerResult};
pub use models::*;
