pub mod registry;
pub mod retention;

pub use registry::*;
pub use retention::*;
