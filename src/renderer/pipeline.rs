use glam::{Mat4, Vec3};

use crate::viewport::ViewportFit;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteVertex {
    /// Design-space position; the root transform maps it to clip space.
    pub position: [f32; 2],
    pub uv: [f32; 2],
    pub tint: [f32; 4],
}

impl SpriteVertex {
    const ATTRIBS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2,  // position
        1 => Float32x2,  // uv
        2 => Float32x4,  // tint
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Root container transform uploaded to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RootUniform {
    /// Column-major 4×4 design → clip matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl RootUniform {
    pub fn new(fit: ViewportFit, screen_w: f32, screen_h: f32) -> Self {
        Self { view_proj: root_transform(fit, screen_w, screen_h).to_cols_array_2d() }
    }
}

/// Design space → clip space for a `screen_w × screen_h` surface.
///
/// ```text
/// pixel = design * scale + offset
/// clip  = ortho(0..w, 0..h, y down) * pixel
/// ```
pub fn root_transform(fit: ViewportFit, screen_w: f32, screen_h: f32) -> Mat4 {
    let ortho = Mat4::orthographic_rh(0.0, screen_w.max(1.0), screen_h.max(1.0), 0.0, -1.0, 1.0);
    ortho
        * Mat4::from_translation(Vec3::new(fit.offset_x, fit.offset_y, 0.0))
        * Mat4::from_scale(Vec3::new(fit.scale, fit.scale, 1.0))
}

pub struct SpritePipeline {
    pub render_pipeline: wgpu::RenderPipeline,
    pub root_bind_group_layout: wgpu::BindGroupLayout,
    pub atlas_bind_group_layout: wgpu::BindGroupLayout,
}

pub fn create_sprite_pipeline(
    device: &wgpu::Device,
    surface_format: wgpu::TextureFormat,
) -> SpritePipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("sprite_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
    });

    let root_bind_group_layout =
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("root_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

    let atlas_bind_group_layout =
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("atlas_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("sprite_pipeline_layout"),
        bind_group_layouts: &[&root_bind_group_layout, &atlas_bind_group_layout],
        ..Default::default()
    });

    let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("sprite_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[SpriteVertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    SpritePipeline { render_pipeline, root_bind_group_layout, atlas_bind_group_layout }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::DesignSize;
    use glam::Vec4;

    fn clip(m: Mat4, x: f32, y: f32) -> [f32; 2] {
        let v = m * Vec4::new(x, y, 0.0, 1.0);
        [v.x / v.w, v.y / v.w]
    }

    fn close(a: [f32; 2], b: [f32; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-5 && (a[1] - b[1]).abs() < 1e-5
    }

    #[test]
    fn identity_fit_maps_surface_corners() {
        let m = root_transform(ViewportFit::IDENTITY, 800.0, 600.0);
        assert!(close(clip(m, 0.0, 0.0), [-1.0, 1.0]));
        assert!(close(clip(m, 800.0, 600.0), [1.0, -1.0]));
    }

    #[test]
    fn design_corners_land_on_viewport_edges() {
        // 9×9 in 1920×1080: viewport x = 420..1500, y = 0..1080.
        let design = DesignSize::new(9.0, 9.0).unwrap();
        let fit = ViewportFit::compute(design, 1920.0, 1080.0);
        let m = root_transform(fit, 1920.0, 1080.0);
        assert!(close(clip(m, 0.0, 0.0), [420.0 / 960.0 - 1.0, 1.0]));
        assert!(close(clip(m, 9.0, 9.0), [1500.0 / 960.0 - 1.0, -1.0]));
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<SpriteVertex>(), 32);
    }
}
