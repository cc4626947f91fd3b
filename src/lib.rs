//! Focus garden library crate.
//!
//! The binary (`main.rs`) opens the window and adds the drawing plugins.
//! Everything else lives here so `tests/` can drive the scene headless,
//! without a window or GPU.

pub mod shared;
pub mod environment;
pub mod garden;
pub mod particles;
pub mod sprites;
pub mod render;
pub mod data;
pub mod ui;
