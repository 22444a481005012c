//! API route handlers

pub mod error;
pub mod hosts;
pub mod system;
pub mod ws;

#[allow(unused)]
pub use error::{ApiError, AppError};
