// Domain entities

pub mod aggregate;
pub mod config;
pub mod event;
pub mod message;

pub use aggregate::*;
pub use config::*;
pub use event::*;
pub use message::*;
