pub mod stream_hub;

pub use stream_hub::*;
