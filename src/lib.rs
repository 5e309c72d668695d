pub mod config;
pub mod dataset;
pub mod dates;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod harvest;

pub use error::{HarvestError, Result};
