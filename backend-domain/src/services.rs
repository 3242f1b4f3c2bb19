// Pure domain services

pub mod counters;
pub mod event_log;
pub mod ticket;

pub use counters::*;
pub use event_log::*;
pub use ticket::*;
