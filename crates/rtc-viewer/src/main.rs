use std::path::PathBuf;

use anyhow::Result;
use rtc_engine::device::GpuInit;
use rtc_engine::logging::{init_logging, LoggingConfig};
use rtc_engine::render::{CubeConfig, TextureSource};
use rtc_engine::window::{Runtime, RuntimeConfig};

/// Usage: `rtc-viewer [TEXTURE]`
///
/// Without a texture path the cube is drawn with a procedural checkerboard.
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let texture = match std::env::args_os().nth(1) {
        Some(path) => TextureSource::Path(PathBuf::from(path)),
        None => TextureSource::default(),
    };
    log::info!("texture source: {texture:?}");

    let cube = CubeConfig {
        texture,
        ..Default::default()
    };

    Runtime::run(RuntimeConfig::default(), GpuInit::default(), cube)
}
