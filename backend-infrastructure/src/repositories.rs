pub mod config_store;
pub mod memory_store;

pub use config_store::*;
pub use memory_store::*;
