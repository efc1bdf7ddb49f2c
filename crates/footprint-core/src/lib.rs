pub mod calculator;
pub mod error;
pub mod factors;
pub mod mitigation;
pub mod runtime;
pub mod service;
pub mod store;
pub mod types;

pub use error::FootprintError;
pub use types::*;

/// Standard result type for all footprint operations
pub type FootprintResult<T> = Result<T, FootprintError>;
