//! Rotating textured cube engine crate.
//!
//! This crate owns the GPU runtime, the cube renderer and the surface
//! lifecycle host that platform shells (desktop window, Android JNI) drive
//! through the three-call renderer contract.

pub mod coords;
pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
