//! Small helpers shared across layers.

pub mod image_url;
