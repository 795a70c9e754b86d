pub mod document;
pub mod presentation;
pub mod slide_image;
