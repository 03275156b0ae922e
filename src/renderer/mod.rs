//! Rendering module
//!
//! [`scene`] turns a session into backend-neutral draw commands; [`terminal`]
//! rasterises them onto a character grid with crossterm.

pub mod scene;
pub mod terminal;

pub use scene::{Align, DrawCommand, Sprite, TextStyle, build_scene};
pub use terminal::{CharGrid, TerminalRenderer};

/// Something that can show a frame
pub trait Renderer {
    fn present(&mut self, scene: &[DrawCommand]) -> std::io::Result<()>;

    /// Output area changed size (in backend units)
    fn resize(&mut self, _width: u16, _height: u16) {}
}
