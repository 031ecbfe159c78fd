//! Configuration validation
//!
//! Validates run specifications before any training starts.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::{validate_config, VALID_OPTIMIZERS};
