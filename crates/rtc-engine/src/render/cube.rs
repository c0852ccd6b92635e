use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::coords::PixelSize;
use crate::render::mesh::{CubeVertex, CUBE_VERTEX_COUNT, CUBE_VERTICES};
use crate::render::texture::{GpuTexture, TextureSource};
use crate::render::transform::{Camera, MvpUniform, Spin, Transforms};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Cube renderer settings.
#[derive(Debug, Clone)]
pub struct CubeConfig {
    /// Linear RGBA clear color.
    pub clear_color: [f64; 4],
    pub texture: TextureSource,
    pub spin: Spin,
    pub camera: Camera,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            texture: TextureSource::default(),
            spin: Spin::default(),
            camera: Camera::default(),
        }
    }
}

/// Draws one rotating textured cube per frame.
///
/// GPU resources are created on `initialize` (or on the first `draw`) and
/// dropped by `clear`; both are safe to repeat.
pub struct CubeRenderer {
    config: CubeConfig,
    spin: Spin,

    resources: Option<CubeResources>,
    depth: Option<DepthTarget>,
}

struct CubeResources {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    transform_ubo: wgpu::Buffer,
    vbo: wgpu::Buffer,
    _texture: GpuTexture,
}

struct DepthTarget {
    size: PixelSize,
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl CubeRenderer {
    pub fn new(config: CubeConfig) -> Self {
        Self {
            spin: config.spin,
            config,
            resources: None,
            depth: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.resources.is_some()
    }

    /// Creates pipeline, buffers and texture.
    ///
    /// A no-op when resources already exist for the current surface format.
    pub fn initialize(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        if self
            .resources
            .as_ref()
            .is_some_and(|r| r.format == ctx.surface_format)
        {
            return Ok(());
        }

        let image = self
            .config
            .texture
            .load()
            .context("cube texture unavailable")?;
        let texture = GpuTexture::upload(ctx, &image);

        self.resources = Some(CubeResources::new(ctx, texture));
        self.ensure_depth(ctx, ctx.size);

        log::info!(
            "cube renderer initialized ({:?}, {}x{})",
            ctx.surface_format,
            ctx.size.width,
            ctx.size.height
        );
        Ok(())
    }

    /// Releases every GPU resource. The next `initialize` or `draw` recreates them.
    pub fn clear(&mut self) {
        if self.resources.take().is_some() {
            log::debug!("cube renderer resources released");
        }
        self.depth = None;
    }

    /// Tracks a new drawable size. The depth buffer follows lazily.
    pub fn resize(&mut self, ctx: &RenderCtx<'_>, size: PixelSize) {
        if self.is_initialized() {
            self.ensure_depth(ctx, size);
        }
    }

    /// Advances the rotation by `time.dt` and records the cube pass into `target`.
    pub fn draw(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        time: FrameTime,
    ) -> Result<()> {
        self.initialize(ctx)?;
        self.ensure_depth(ctx, ctx.size);

        self.spin.advance(time.dt);
        let transforms =
            Transforms::compute(&self.spin, &self.config.camera, ctx.size.aspect_ratio());

        let (res, depth) = self.pass_inputs()?;

        ctx.queue.write_buffer(
            &res.transform_ubo,
            0,
            bytemuck::bytes_of(&MvpUniform::from(&transforms)),
        );

        let [r, g, b, a] = self.config.clear_color;
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("rtc cube pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(
            0.0,
            0.0,
            ctx.size.width as f32,
            ctx.size.height as f32,
            0.0,
            1.0,
        );
        rpass.set_pipeline(&res.pipeline);
        rpass.set_bind_group(0, &res.bind_group, &[]);
        rpass.set_vertex_buffer(0, res.vbo.slice(..));
        rpass.draw(0..CUBE_VERTEX_COUNT, 0..1);

        Ok(())
    }

    /// Everything the cube pass binds. Recording a pass without them would
    /// present an uncleared frame, so their absence is an error.
    fn pass_inputs(&self) -> Result<(&CubeResources, &DepthTarget)> {
        let res = self
            .resources
            .as_ref()
            .context("cube resources missing after initialize")?;
        let depth = self
            .depth
            .as_ref()
            .context("depth target missing for a non-empty surface")?;
        Ok((res, depth))
    }

    fn ensure_depth(&mut self, ctx: &RenderCtx<'_>, size: PixelSize) {
        if size.is_empty() || self.depth.as_ref().is_some_and(|d| d.size == size) {
            return;
        }
        self.depth = Some(DepthTarget::new(ctx.device, size));
    }
}

impl CubeResources {
    fn new(ctx: &RenderCtx<'_>, texture: GpuTexture) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rtc cube shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/cube.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("rtc cube bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<MvpUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("rtc cube pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("rtc cube pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CubeVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Face winding in the mesh table is mixed; depth testing
                // resolves visibility instead of culling.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let transform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rtc cube transform ubo"),
            size: std::mem::size_of::<MvpUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rtc cube bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: transform_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.sampler),
                },
            ],
        });

        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("rtc cube vbo"),
            contents: bytemuck::cast_slice(&CUBE_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            transform_ubo,
            vbo,
            _texture: texture,
        }
    }
}

impl DepthTarget {
    fn new(device: &wgpu::Device, size: PixelSize) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("rtc depth"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            size,
            _texture: texture,
            view,
        }
    }
}
