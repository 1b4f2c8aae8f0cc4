pub mod config;
pub mod coordinator;
pub mod error;
pub mod import;
pub mod platform;
pub mod pool;
pub mod protocol;
pub mod schedule;
pub mod selection;
pub mod storage;

pub use error::WheelError;
