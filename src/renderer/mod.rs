pub mod pipeline;
pub mod texture;

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use pipeline::{RootUniform, SpritePipeline, SpriteVertex, create_sprite_pipeline};
use texture::PageTexture;

use crate::atlas::TileAtlas;
use crate::error::RenderError;
use crate::scene::SpriteBatch;
use crate::viewport::ViewportFit;

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    sprite_pipeline: SpritePipeline,
    /// Root container transform (design → clip), rewritten on every resize.
    root_buffer: wgpu::Buffer,
    root_bind_group: wgpu::BindGroup,
    /// One entry per loaded atlas page, indexed like `TileAtlas::pages`.
    pages: Vec<PageTexture>,
    clear_color: wgpu::Color,
}

impl Renderer {
    pub async fn new(
        window: Arc<Window>,
        atlas: &TileAtlas,
        background: [f32; 4],
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();
        tracing::info!(
            width = size.width,
            height = size.height,
            scale_factor = window.scale_factor(),
            "creating renderer"
        );

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sprite_pipeline = create_sprite_pipeline(&device, format);

        let root_uniform =
            RootUniform::new(ViewportFit::IDENTITY, config.width as f32, config.height as f32);
        let root_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("root_buffer"),
            contents: bytemuck::cast_slice(&[root_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let root_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("root_bg"),
            layout: &sprite_pipeline.root_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: root_buffer.as_entire_binding(),
            }],
        });

        let pages = atlas
            .pages()
            .iter()
            .map(|p| {
                PageTexture::upload(
                    &device,
                    &queue,
                    &sprite_pipeline.atlas_bind_group_layout,
                    &p.name,
                    &p.image,
                )
            })
            .collect::<Vec<_>>();
        tracing::debug!(pages = pages.len(), "uploaded atlas pages");

        let clear_color = clear_color(background, format.is_srgb());

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            sprite_pipeline,
            root_buffer,
            root_bind_group,
            pages,
            clear_color,
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload the root container transform for the current surface size.
    pub fn set_root_transform(&mut self, fit: ViewportFit) {
        let uniform = RootUniform::new(fit, self.config.width as f32, self.config.height as f32);
        self.queue
            .write_buffer(&self.root_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    /// Render one frame: clear, then draw each batch with its page texture.
    pub fn render(&mut self, batches: &[SpriteBatch]) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Draw order is batch order; each batch gets its own vertex range.
        let vertices: Vec<SpriteVertex> =
            batches.iter().flat_map(|b| b.vertices.iter().copied()).collect();
        let vbuf = (!vertices.is_empty()).then(|| {
            self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("sprite_vertex_buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sprite_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let Some(vbuf) = &vbuf {
                pass.set_pipeline(&self.sprite_pipeline.render_pipeline);
                pass.set_bind_group(0, &self.root_bind_group, &[]);
                pass.set_vertex_buffer(0, vbuf.slice(..));

                let mut first = 0u32;
                for batch in batches {
                    let count = batch.vertices.len() as u32;
                    match self.pages.get(batch.page) {
                        Some(page) => {
                            pass.set_bind_group(1, &page.bind_group, &[]);
                            pass.draw(first..first + count, 0..1);
                        }
                        None => tracing::warn!(page = batch.page, "batch references an unloaded atlas page"),
                    }
                    first += count;
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Clear colour for the surface. Config colours are sRGB; a sRGB surface
/// expects linear values.
fn clear_color(rgba: [f32; 4], srgb_surface: bool) -> wgpu::Color {
    let to_linear = |c: f32| {
        if !srgb_surface {
            c
        } else if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    wgpu::Color {
        r: to_linear(rgba[0]) as f64,
        g: to_linear(rgba[1]) as f64,
        b: to_linear(rgba[2]) as f64,
        a: rgba[3] as f64,
    }
}
