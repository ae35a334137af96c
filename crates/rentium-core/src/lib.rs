pub mod acquisition;
pub mod error;
pub mod fiscal;
pub mod format;
pub mod types;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "recommendations")]
pub mod recommendations;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(all(feature = "projection", feature = "recommendations"))]
pub mod analysis;

pub use error::RentiumError;
pub use types::*;

/// Standard result type for all rentium operations
pub type RentiumResult<T> = Result<T, RentiumError>;
