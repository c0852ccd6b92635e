//! GPU rendering subsystem.
//!
//! The cube renderer owns its GPU resources (pipeline, buffers, texture,
//! depth target) and creates them lazily the first time it is asked to
//! initialize or draw.
//!
//! Convention:
//! - model space is the unit cube centered at the origin
//! - clip space follows wgpu (depth 0..1, right-handed view)

mod ctx;
mod cube;
pub mod mesh;
pub mod texture;
pub mod transform;

pub use ctx::{RenderCtx, RenderTarget};
pub use cube::{CubeConfig, CubeRenderer};
pub use texture::{TextureImage, TextureSource};
pub use transform::{Camera, Spin, Transforms};
