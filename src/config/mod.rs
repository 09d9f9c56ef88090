//! Configuration loading for the compliance engine.
//!
//! Only deployment data lives in configuration: the operator metadata and
//! the holiday calendar. Regulatory thresholds are constants in
//! [`compliance`](crate::compliance).
//!
//! # Example
//!
//! ```no_run
//! use driver_compliance::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/es").unwrap();
//! println!("Loaded {} holidays", config.holidays().len());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineMetadata, HolidayCalendar, HolidayFile};
