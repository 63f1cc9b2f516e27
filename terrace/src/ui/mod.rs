//! UI module for the stack browser

pub mod render;
pub mod theme;
pub mod widgets;

pub use render::Overlay;
