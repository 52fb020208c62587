//! Render pipelines, bind-group layouts, and GPU uniform types

use crate::geometry::{LineVertex, MeshVertex, ParticleInstance, QuadVertex};
use bytemuck::{Pod, Zeroable};

/// Per-frame globals shared by every pipeline
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct GlobalUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Camera right vector (xyz) for billboards
    pub camera_right: [f32; 4],
    /// Camera up vector (xyz) for billboards
    pub camera_up: [f32; 4],
    /// x = days from J2000 (display effects only)
    pub time: [f32; 4],
}

/// Per-object uniforms
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    /// Multiplied with the sampled texel
    pub color: [f32; 4],
    /// x = emissive (renders unlit), y = two-sided (ring annulus)
    pub params: [f32; 4],
}

impl ObjectUniforms {
    pub fn new(model: [[f32; 4]; 4], color: [f32; 4], emissive: bool, two_sided: bool) -> Self {
        Self {
            model,
            color,
            params: [
                if emissive { 1.0 } else { 0.0 },
                if two_sided { 1.0 } else { 0.0 },
                0.0,
                0.0,
            ],
        }
    }
}

pub struct BindLayouts {
    pub globals: wgpu::BindGroupLayout,
    pub object: wgpu::BindGroupLayout,
    pub texture: wgpu::BindGroupLayout,
}

pub struct Pipelines {
    /// Opaque lit spheres (bodies, moons)
    pub body: wgpu::RenderPipeline,
    /// Translucent lit annuli (ring systems)
    pub ring: wgpu::RenderPipeline,
    /// Unlit polylines (orbit paths, reference grids)
    pub lines: wgpu::RenderPipeline,
    /// Camera-facing billboards (belts, stars)
    pub points: wgpu::RenderPipeline,
}

pub fn create_depth_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Depth32Float,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

pub fn create_bind_layouts(device: &wgpu::Device) -> BindLayouts {
    let globals = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Globals Layout"),
        entries: &[uniform_entry(0)],
    });

    let object = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Object Layout"),
        entries: &[uniform_entry(0)],
    });

    let texture = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Texture Layout"),
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

    BindLayouts {
        globals,
        object,
        texture,
    }
}

fn depth_state(write_enabled: bool) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: wgpu::TextureFormat::Depth32Float,
        depth_write_enabled: write_enabled,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    buffers: &[wgpu::VertexBufferLayout<'_>],
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    blend: wgpu::BlendState,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(depth_state(depth_write)),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

pub fn create_pipelines(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    layouts: &BindLayouts,
) -> Pipelines {
    let body_shader = device.create_shader_module(wgpu::include_wgsl!("shaders/body.wgsl"));
    let lines_shader = device.create_shader_module(wgpu::include_wgsl!("shaders/lines.wgsl"));
    let points_shader = device.create_shader_module(wgpu::include_wgsl!("shaders/points.wgsl"));

    let textured_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Textured Pipeline Layout"),
        bind_group_layouts: &[&layouts.globals, &layouts.object, &layouts.texture],
        push_constant_ranges: &[],
    });

    let plain_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Plain Pipeline Layout"),
        bind_group_layouts: &[&layouts.globals, &layouts.object],
        push_constant_ranges: &[],
    });

    let body = build_pipeline(
        device,
        "Body Pipeline",
        &textured_layout,
        &body_shader,
        &[MeshVertex::layout()],
        format,
        wgpu::PrimitiveTopology::TriangleList,
        Some(wgpu::Face::Back),
        wgpu::BlendState::REPLACE,
        true,
    );

    let ring = build_pipeline(
        device,
        "Ring Pipeline",
        &textured_layout,
        &body_shader,
        &[MeshVertex::layout()],
        format,
        wgpu::PrimitiveTopology::TriangleList,
        None,
        wgpu::BlendState::ALPHA_BLENDING,
        false,
    );

    let lines = build_pipeline(
        device,
        "Line Pipeline",
        &plain_layout,
        &lines_shader,
        &[LineVertex::layout()],
        format,
        wgpu::PrimitiveTopology::LineList,
        None,
        wgpu::BlendState::ALPHA_BLENDING,
        false,
    );

    let points = build_pipeline(
        device,
        "Point Pipeline",
        &plain_layout,
        &points_shader,
        &[QuadVertex::layout(), ParticleInstance::layout()],
        format,
        wgpu::PrimitiveTopology::TriangleList,
        None,
        wgpu::BlendState::ALPHA_BLENDING,
        false,
    );

    Pipelines {
        body,
        ring,
        lines,
        points,
    }
}
