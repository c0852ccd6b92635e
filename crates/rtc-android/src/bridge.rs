//! JNI exports for `com.mgtt.rtc.GL3JNILib`.
//!
//! Nothing may unwind into the JVM: every export runs inside
//! `catch_unwind`, and failures are logged instead of returned.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{LazyLock, Mutex, MutexGuard};

use anyhow::{Context, Result};
use jni::JNIEnv;
use jni::objects::{JByteArray, JClass, JObject};
use jni::sys::{jint, jlong};

use rtc_engine::core::{CubeLibrary, FrameOutcome, SurfaceHost};
use rtc_engine::device::{Gpu, GpuInit};
use rtc_engine::render::{CubeConfig, TextureSource};

use crate::native_window::NativeWindow;
use crate::registry::HandleRegistry;

type AndroidHost = SurfaceHost<CubeLibrary<'static>>;

static HOSTS: LazyLock<Mutex<HandleRegistry<AndroidHost>>> =
    LazyLock::new(|| Mutex::new(HandleRegistry::new()));

/// Routes the `log` facade to logcat. App processes have no usable stderr.
fn init_logcat() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_tag("rotating_textured_cube")
            .with_max_level(log::LevelFilter::Info),
    );
}

fn hosts() -> MutexGuard<'static, HandleRegistry<AndroidHost>> {
    // A panic while holding the lock is caught at the boundary; the
    // registry itself is still consistent.
    HOSTS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn guarded<R>(name: &str, fallback: R, f: impl FnOnce() -> R) -> R {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        log::error!("{name}: panic caught at JNI boundary");
        fallback
    })
}

fn with_host(name: &str, handle: jlong, f: impl FnOnce(&mut AndroidHost)) {
    guarded(name, (), || {
        if let Err(e) = hosts().with(handle, f) {
            log::warn!("{name}: {e}");
        }
    });
}

fn create(env: &JNIEnv<'_>, surface: &JObject<'_>, texture: &JByteArray<'_>) -> Result<jlong> {
    anyhow::ensure!(!surface.is_null(), "surface is null");

    let window = unsafe { NativeWindow::from_surface(env.get_raw(), surface.as_raw()) }
        .context("ANativeWindow_fromSurface returned null")?;
    let size = window.size().context("native window has no buffer size yet")?;

    let texture = if texture.is_null() {
        TextureSource::default()
    } else {
        let bytes = env
            .convert_byte_array(texture)
            .context("failed to read texture bytes")?;
        TextureSource::Bytes(bytes)
    };

    let init = GpuInit {
        backends: wgpu::Backends::VULKAN | wgpu::Backends::GL,
        ..Default::default()
    };
    let gpu = pollster::block_on(Gpu::new(window, size, init))?;

    let cube = CubeConfig {
        texture,
        ..Default::default()
    };
    let handle = hosts().insert(SurfaceHost::new(CubeLibrary::new(gpu, cube)));

    log::info!("surface {handle} created ({}x{})", size.width, size.height);
    Ok(handle)
}

/// Surface created. Returns 0 on failure.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mgtt_rtc_GL3JNILib_nativeCreate<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
    surface: JObject<'local>,
    texture: JByteArray<'local>,
) -> jlong {
    init_logcat();

    guarded("nativeCreate", 0, || {
        create(&env, &surface, &texture).unwrap_or_else(|e| {
            log::error!("nativeCreate: {e:#}");
            0
        })
    })
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mgtt_rtc_GL3JNILib_nativeInit<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) {
    with_host("nativeInit", handle, |host| {
        if let Err(e) = host.initialize() {
            log::error!("nativeInit: {e:#}");
        }
    });
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mgtt_rtc_GL3JNILib_nativeRender<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) {
    with_host("nativeRender", handle, |host| {
        if host.draw_frame() == FrameOutcome::Fatal {
            log::error!("nativeRender: surface {handle} can no longer render");
        }
    });
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mgtt_rtc_GL3JNILib_nativeResize<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
    width: jint,
    height: jint,
) {
    with_host("nativeResize", handle, |host| {
        if let Err(e) = host.surface_changed(width, height) {
            log::warn!("nativeResize: {e}");
        }
    });
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mgtt_rtc_GL3JNILib_nativePause<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) {
    with_host("nativePause", handle, |host| host.pause());
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mgtt_rtc_GL3JNILib_nativeResume<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) {
    with_host("nativeResume", handle, |host| host.resume());
}

/// `onTrimMemory`: drops the cube's GPU resources. They are rebuilt on the
/// next rendered frame.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mgtt_rtc_GL3JNILib_nativeTrimMemory<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) {
    with_host("nativeTrimMemory", handle, |host| {
        if let Some(library) = host.renderer_mut() {
            library.clear();
        }
    });
}

/// Surface destroyed. The renderer and its GPU resources are dropped here,
/// on the rendering thread, after the registry lock is released.
#[unsafe(no_mangle)]
pub extern "system" fn Java_com_mgtt_rtc_GL3JNILib_nativeDestroy<'local>(
    _env: JNIEnv<'local>,
    _class: JClass<'local>,
    handle: jlong,
) {
    guarded("nativeDestroy", (), || {
        let removed = hosts().remove(handle);
        match removed {
            Ok(mut host) => {
                host.destroy();
                log::info!("surface {handle} destroyed");
            }
            Err(e) => log::warn!("nativeDestroy: {e}"),
        }
    });
}
