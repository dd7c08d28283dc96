pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod gui;
pub mod json_view;
pub mod landing;
pub mod render;
pub mod upload;

pub use error::ApiError;

pub type Result<T> = std::result::Result<T, ApiError>;
