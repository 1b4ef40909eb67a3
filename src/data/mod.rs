pub mod loader;
pub mod sample;

pub use loader::{load_csv, localize, LoadError};
pub use sample::{format_timestamp, parse_timestamp, EquitySample, TIMESTAMP_FORMAT};
