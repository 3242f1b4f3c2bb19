pub mod config_handlers;
pub mod ingest_handlers;
pub mod ops_handlers;
pub mod query_handlers;
pub mod ws_handlers;

pub use config_handlers::*;
pub use ingest_handlers::*;
pub use ops_handlers::*;
pub use query_handlers::*;
pub use ws_handlers::*;
