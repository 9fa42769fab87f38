pub use rusb;
pub mod devices;
pub mod error;
pub mod matcher;
pub mod resolver;
