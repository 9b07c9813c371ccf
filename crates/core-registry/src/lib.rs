pub mod config;
pub mod error;
pub mod registry;

pub use config::{ExplorerConfig, PaginationConfig};
pub use error::{RegistryError, RegistryResult};
pub use registry::{DatabaseEntry, Registry};
