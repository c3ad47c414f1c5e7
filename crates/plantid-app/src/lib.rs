//! Application service layer for plant-identify

pub mod config;
pub mod scanner;
pub mod service;

pub use config::{Config, API_KEY_ENV};
pub use scanner::{is_supported_image, validate_image, IMAGE_EXTENSIONS};
pub use service::{identify_file, identify_file_with};
