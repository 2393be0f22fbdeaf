pub mod api;
pub mod camera;
pub mod config;
pub mod console;
pub mod error;
pub mod serial;
pub mod visca;

pub use error::{AppError, Result};
