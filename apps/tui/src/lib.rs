// Export our modules for use in binaries and tests
pub mod cache;
pub mod catalog;
pub mod config;
pub mod docs;
pub mod domain;
pub mod error;
pub mod predicthq;
pub mod radius;
pub mod selection;
pub mod sidebar;
pub mod signals;

pub use domain::{Industry, RadiusUnit, UnitSystem};
pub use error::LookupError;
