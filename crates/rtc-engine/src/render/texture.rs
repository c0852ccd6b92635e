//! Base-color texture loading.
//!
//! Images are decoded on the CPU into tightly packed RGBA8 (3-channel sources
//! are expanded), a full mip chain is built, and every level is uploaded
//! to an sRGB texture sampled with repeat wrapping and trilinear filtering.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::RgbaImage;

use super::RenderCtx;

/// Where the cube's texture comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    /// Encoded image file on disk (PNG or JPEG).
    Path(PathBuf),
    /// Encoded image bytes, e.g. an APK asset read by the host.
    Bytes(Vec<u8>),
    /// Procedural checkerboard; needs no assets.
    Checkerboard { size: u32, cells: u32 },
}

impl Default for TextureSource {
    fn default() -> Self {
        Self::Checkerboard { size: 256, cells: 8 }
    }
}

impl TextureSource {
    /// Produces the CPU image for this source.
    pub fn load(&self) -> Result<TextureImage> {
        match self {
            Self::Path(path) => TextureImage::open(path),
            Self::Bytes(bytes) => TextureImage::decode(bytes),
            Self::Checkerboard { size, cells } => Ok(TextureImage::checkerboard(*size, *cells)),
        }
    }
}

/// CPU-side RGBA8 image.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// Decodes an encoded image and converts it to RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).context("failed to decode texture image")?;
        let channels = img.color().channel_count();
        anyhow::ensure!(
            channels == 3 || channels == 4,
            "unsupported texture channel count {channels} (expected 3 or 4)"
        );

        Ok(Self::from_rgba(img.to_rgba8()))
    }

    /// Reads and decodes an image file.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to load texture {}", path.display()))?;
        Self::decode(&bytes).with_context(|| format!("failed to load texture {}", path.display()))
    }

    /// Two-tone checkerboard, `size`×`size` pixels with `cells` squares per side.
    pub fn checkerboard(size: u32, cells: u32) -> Self {
        let size = size.max(1);
        let cell = (size / cells.max(1)).max(1);

        let img = RgbaImage::from_fn(size, size, |x, y| {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                image::Rgba([230, 230, 230, 255])
            } else {
                image::Rgba([40, 90, 160, 255])
            }
        });
        Self::from_rgba(img)
    }

    fn from_rgba(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    fn to_rgba(&self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Builds the full mip chain, level 0 first, ending at 1×1.
    pub fn mip_chain(&self) -> Vec<TextureImage> {
        let levels = mip_level_count(self.width, self.height);
        let mut chain = Vec::with_capacity(levels as usize);
        chain.push(self.clone());

        let Some(base) = self.to_rgba() else {
            log::warn!("texture pixel buffer does not match its size; skipping mips");
            return chain;
        };

        for level in 1..levels {
            let w = (self.width >> level).max(1);
            let h = (self.height >> level).max(1);
            chain.push(Self::from_rgba(image::imageops::resize(&base, w, h, FilterType::Triangle)));
        }
        chain
    }
}

/// Number of mip levels for a `width`×`height` base level.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Texture + view + sampler uploaded to the GPU.
pub(crate) struct GpuTexture {
    pub _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl GpuTexture {
    pub(crate) fn upload(ctx: &RenderCtx<'_>, image: &TextureImage) -> Self {
        let mips = image.mip_chain();

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("rtc base color texture"),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: mips.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, mip) in mips.iter().enumerate() {
            ctx.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &mip.pixels,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * mip.width),
                    rows_per_image: Some(mip.height),
                },
                wgpu::Extent3d {
                    width: mip.width,
                    height: mip.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("rtc base color sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        log::debug!(
            "uploaded texture {}x{} ({} mip levels)",
            image.width,
            image.height,
            mips.len()
        );

        Self {
            _texture: texture,
            view,
            sampler,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_png(img: image::DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn rgb_source_expanded_to_rgba() {
        let rgb = image::RgbImage::from_pixel(4, 2, image::Rgb([10, 20, 30]));
        let tex = TextureImage::decode(&encode_png(rgb.into())).unwrap();

        assert_eq!((tex.width, tex.height), (4, 2));
        assert_eq!(tex.pixels.len(), 4 * 2 * 4);
        assert_eq!(&tex.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn rgba_source_kept() {
        let rgba = image::RgbaImage::from_pixel(3, 3, image::Rgba([1, 2, 3, 4]));
        let tex = TextureImage::decode(&encode_png(rgba.into())).unwrap();
        assert_eq!(&tex.pixels[..4], &[1, 2, 3, 4]);
    }

    #[test]
    fn grayscale_source_rejected() {
        let gray = image::GrayImage::from_pixel(2, 2, image::Luma([7]));
        let err = TextureImage::decode(&encode_png(gray.into())).unwrap_err();
        assert!(format!("{err:#}").contains("channel count"));
    }

    #[test]
    fn garbage_bytes_rejected() {
        assert!(TextureImage::decode(b"definitely not an image").is_err());
    }

    #[test]
    fn missing_file_names_path() {
        let err = TextureSource::Path("no/such/surgery.jpg".into())
            .load()
            .unwrap_err();
        assert!(format!("{err:#}").contains("surgery.jpg"));
    }

    #[test]
    fn checkerboard_alternates() {
        let tex = TextureImage::checkerboard(4, 2);
        let px = |x: u32, y: u32| {
            let i = ((y * tex.width + x) * 4) as usize;
            tex.pixels[i..i + 4].to_vec()
        };
        assert_eq!(px(0, 0), px(1, 1));
        assert_ne!(px(0, 0), px(2, 0));
        assert_eq!(px(0, 0), px(2, 2));
    }

    #[test]
    fn mip_counts() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(256, 256), 9);
        assert_eq!(mip_level_count(300, 20), 9);
        assert_eq!(mip_level_count(0, 0), 1);
    }

    #[test]
    fn mip_chain_halves_down_to_one() {
        let chain = TextureImage::checkerboard(8, 2).mip_chain();
        let sizes: Vec<(u32, u32)> = chain.iter().map(|m| (m.width, m.height)).collect();
        assert_eq!(sizes, vec![(8, 8), (4, 4), (2, 2), (1, 1)]);
        assert!(chain.iter().all(|m| m.pixels.len() == (m.width * m.height * 4) as usize));
    }
}
