//! WebGPU renderer: one instanced point-sprite pipeline shared by all three
//! particle systems, plus the solid and wireframe passes for the logo.

use glam::Mat4;
use intro_core::constants::*;
use intro_core::logo::LogoGeometry;
use intro_core::ParticleInstance;
use web_sys as web;
use wgpu::util::DeviceExt;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const ADDITIVE_BLENDING: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

// Two triangles spanning the unit billboard quad
const QUAD_CORNERS: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, //
    -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    misc: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LogoUniforms {
    mvp: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    base_color: [f32; 4],
    ambient: [f32; 4],
    light_a_pos: [f32; 4],
    light_a_color: [f32; 4],
    light_b_pos: [f32; 4],
    light_b_color: [f32; 4],
    misc: [f32; 4],
}

fn logo_uniforms(mvp: Mat4, model: Mat4, base_color: [f32; 3], opacity: f32) -> LogoUniforms {
    LogoUniforms {
        mvp: mvp.to_cols_array_2d(),
        model: model.to_cols_array_2d(),
        base_color: [base_color[0], base_color[1], base_color[2], opacity],
        ambient: [AMBIENT_LIGHT[0], AMBIENT_LIGHT[1], AMBIENT_LIGHT[2], 0.0],
        light_a_pos: [LIGHT_A_POSITION[0], LIGHT_A_POSITION[1], LIGHT_A_POSITION[2], 0.0],
        light_a_color: [LIGHT_A_COLOR[0], LIGHT_A_COLOR[1], LIGHT_A_COLOR[2], 0.0],
        light_b_pos: [LIGHT_B_POSITION[0], LIGHT_B_POSITION[1], LIGHT_B_POSITION[2], 0.0],
        light_b_color: [LIGHT_B_COLOR[0], LIGHT_B_COLOR[1], LIGHT_B_COLOR[2], 0.0],
        misc: [LIGHT_INTENSITY, LIGHT_RANGE, 0.0, 0.0],
    }
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    points_pipeline: wgpu::RenderPipeline,
    scene_uniform_buffer: wgpu::Buffer,
    points_bind_group: wgpu::BindGroup,
    corner_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,

    solid_pipeline: wgpu::RenderPipeline,
    cage_pipeline: wgpu::RenderPipeline,
    solid_uniform_buffer: wgpu::Buffer,
    solid_bind_group: wgpu::BindGroup,
    cage_uniform_buffer: wgpu::Buffer,
    cage_bind_group: wgpu::BindGroup,
    core_vertex_buffer: wgpu::Buffer,
    core_index_buffer: wgpu::Buffer,
    core_index_count: u32,
    cage_vertex_buffer: wgpu::Buffer,
    cage_index_buffer: wgpu::Buffer,
    cage_index_count: u32,

    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(
        canvas: &web::HtmlCanvasElement,
        geometry: &LogoGeometry,
        instance_capacity: usize,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Default limits keep older WebGPU implementations happy
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, width, height);

        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("intro_uniform_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("intro_pl"),
            bind_group_layouts: &[&uniform_bgl],
            push_constant_ranges: &[],
        });

        // Points: unit quad corners + one instance per particle
        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(intro_core::POINTS_WGSL.into()),
        });
        let corner_layout = wgpu::VertexBufferLayout {
            array_stride: 8,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x2,
                offset: 0,
                shader_location: 0,
            }],
        };
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 1,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32,
                    offset: 12,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 3,
                },
            ],
        };
        let points_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("points_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &points_shader,
                entry_point: Some("vs_points"),
                buffers: &[corner_layout, instance_layout],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &points_shader,
                entry_point: Some("fs_points"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // Additive: overlapping sprites brighten instead of occlude
                    blend: Some(ADDITIVE_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });

        let scene_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let points_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("points_bg"),
            layout: &uniform_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_uniform_buffer.as_entire_binding(),
            }],
        });
        let corner_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_corners"),
            contents: bytemuck::cast_slice(&QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle_instances"),
            size: (instance_capacity * std::mem::size_of::<ParticleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Logo: shared shader module, one solid and one line-list pipeline
        let logo_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("logo_shader"),
            source: wgpu::ShaderSource::Wgsl(intro_core::LOGO_WGSL.into()),
        });
        let logo_vertex_layout = wgpu::VertexBufferLayout {
            array_stride: 12,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                format: wgpu::VertexFormat::Float32x3,
                offset: 0,
                shader_location: 0,
            }],
        };
        let logo_pipeline = |entry: &str, topology: wgpu::PrimitiveTopology, write_depth: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("logo_pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &logo_shader,
                    entry_point: Some("vs_logo"),
                    buffers: std::slice::from_ref(&logo_vertex_layout),
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: write_depth,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &logo_shader,
                    entry_point: Some(entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let solid_pipeline = logo_pipeline("fs_solid", wgpu::PrimitiveTopology::TriangleList, true);
        let cage_pipeline = logo_pipeline("fs_cage", wgpu::PrimitiveTopology::LineList, false);

        let make_uniform = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<LogoUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };
        let solid_uniform_buffer = make_uniform("solid_uniforms");
        let cage_uniform_buffer = make_uniform("cage_uniforms");
        let make_bind_group = |label: &str, buffer: &wgpu::Buffer| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &uniform_bgl,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            })
        };
        let solid_bind_group = make_bind_group("solid_bg", &solid_uniform_buffer);
        let cage_bind_group = make_bind_group("cage_bg", &cage_uniform_buffer);

        let core_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("core_vertices"),
            contents: bytemuck::cast_slice(&geometry.core.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let core_indices = geometry.core.indices();
        let core_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("core_indices"),
            contents: bytemuck::cast_slice(&core_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let cage_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cage_vertices"),
            contents: bytemuck::cast_slice(&geometry.cage.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cage_indices: Vec<u32> = geometry
            .cage_edges
            .iter()
            .flat_map(|e| e.iter().copied())
            .collect();
        let cage_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("cage_indices"),
            contents: bytemuck::cast_slice(&cage_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            points_pipeline,
            scene_uniform_buffer,
            points_bind_group,
            corner_buffer,
            instance_buffer,
            instance_capacity,
            solid_pipeline,
            cage_pipeline,
            solid_uniform_buffer,
            solid_bind_group,
            cage_uniform_buffer,
            cage_bind_group,
            core_vertex_buffer,
            core_index_buffer,
            core_index_count: core_indices.len() as u32,
            cage_vertex_buffer,
            cage_index_buffer,
            cage_index_count: cage_indices.len() as u32,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn render(
        &mut self,
        instances: &[ParticleInstance],
        view: Mat4,
        proj: Mat4,
        model: Mat4,
    ) -> anyhow::Result<()> {
        let count = instances.len().min(self.instance_capacity);
        self.queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&instances[..count]),
        );
        self.queue.write_buffer(
            &self.scene_uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms {
                view: view.to_cols_array_2d(),
                proj: proj.to_cols_array_2d(),
                misc: [FOG_DENSITY, 0.0, 0.0, 0.0],
            }),
        );
        let mvp = proj * view * model;
        self.queue.write_buffer(
            &self.solid_uniform_buffer,
            0,
            bytemuck::bytes_of(&logo_uniforms(mvp, model, LOGO_CORE_COLOR, LOGO_CORE_OPACITY)),
        );
        self.queue.write_buffer(
            &self.cage_uniform_buffer,
            0,
            bytemuck::bytes_of(&logo_uniforms(mvp, model, LOGO_CAGE_COLOR, LOGO_CAGE_OPACITY)),
        );

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                self.surface
                    .get_current_texture()
                    .map_err(|e| anyhow::anyhow!("surface error after reconfigure: {:?}", e))?
            }
            Err(e) => return Err(anyhow::anyhow!("surface error: {:?}", e)),
        };
        let view_tex = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("intro_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("intro_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view_tex,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: BACKGROUND_COLOR[0] as f64,
                            g: BACKGROUND_COLOR[1] as f64,
                            b: BACKGROUND_COLOR[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.solid_pipeline);
            rpass.set_bind_group(0, &self.solid_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.core_vertex_buffer.slice(..));
            rpass.set_index_buffer(self.core_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.core_index_count, 0, 0..1);

            rpass.set_pipeline(&self.cage_pipeline);
            rpass.set_bind_group(0, &self.cage_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.cage_vertex_buffer.slice(..));
            rpass.set_index_buffer(self.cage_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.cage_index_count, 0, 0..1);

            rpass.set_pipeline(&self.points_pipeline);
            rpass.set_bind_group(0, &self.points_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.corner_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            rpass.draw(0..6, 0..count as u32);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let depth = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    depth.create_view(&wgpu::TextureViewDescriptor::default())
}
