pub mod config;
pub mod controls;
pub mod events;
pub mod game;
pub mod grid;
pub mod input;
pub mod io;
pub mod render;
pub mod rule_set;
pub mod simulation;

/// Viewport sizes, in pixels
pub type ScreenSize = u32;

/// Pointer and button positions, in pixels. Pointers can leave the viewport, so this is signed.
pub type ScreenOffset = i32;
