//! Application services: content loading, rendering and registration submission.

pub mod content;
pub mod error;
pub mod landing;
pub mod registration;
pub mod render;

pub use landing::{AppContext, RegistrationView};
