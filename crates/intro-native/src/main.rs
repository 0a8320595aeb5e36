//! Desktop frontend for the hero intro: winit window, wgpu renderer, cpal
//! playback for the one-shot cue. Pass `--muted` to suppress the audio cue.

use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use glam::Mat4;
use intro_core::constants::*;
use intro_core::logo::LogoGeometry;
use intro_core::{cue, Clock, IntroScene, ParticleInstance, PointerInput};
use wgpu::util::DeviceExt;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

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

const QUAD_CORNERS: [f32; 12] = [
    -0.5, -0.5, 0.5, -0.5, 0.5, 0.5, //
    -0.5, -0.5, 0.5, 0.5, -0.5, 0.5,
];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    misc: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LogoUniforms {
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

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
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
}

impl<'w> GpuState<'w> {
    async fn new(
        window: &'w winit::window::Window,
        geometry: &LogoGeometry,
        instance_capacity: usize,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        let uniform_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("bgl"),
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
            label: Some("pl"),
            bind_group_layouts: &[&uniform_bgl],
            push_constant_ranges: &[],
        });

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
            window,
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
        })
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.config.width = size.width.max(1);
        self.config.height = size.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, self.config.width, self.config.height);
    }

    fn aspect(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    fn render(
        &mut self,
        instances: &[ParticleInstance],
        view: Mat4,
        proj: Mat4,
        model: Mat4,
    ) -> Result<(), wgpu::SurfaceError> {
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

        let frame = self.surface.get_current_texture()?;
        let view_tex = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("rpass"),
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

// ---------------- Native audio (cpal) ----------------

/// Playhead of the one-shot cue, advanced by the audio callback.
struct CuePlayback {
    t: f32,
}

type CueSlot = Arc<Mutex<Option<CuePlayback>>>;

fn start_cue_output(slot: CueSlot) -> Option<cpal::Stream> {
    let host = cpal::default_host();
    let device = host.default_output_device()?;
    let config = device.default_output_config().ok()?;
    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    let err_fn = |err| eprintln!("audio stream error: {err}");

    let stream = match config.sample_format() {
        cpal::SampleFormat::F32 => {
            build_stream_f32(&device, &config.into(), channels, sample_rate, slot, err_fn).ok()?
        }
        cpal::SampleFormat::I16 => {
            build_stream_i16(&device, &config.into(), channels, sample_rate, slot, err_fn).ok()?
        }
        _ => return None,
    };
    stream.play().ok()?;
    Some(stream)
}

/// Mix one mono frame from the cue (silence when it is not playing) and
/// drop the playback once it passes the hard stop.
fn next_cue_sample(slot: &CueSlot, sample_dt: f32) -> f32 {
    let mut guard = match slot.lock() {
        Ok(g) => g,
        Err(_) => return 0.0,
    };
    let Some(playback) = guard.as_mut() else {
        return 0.0;
    };
    let s = cue::sample(playback.t);
    playback.t += sample_dt;
    if cue::finished(playback.t) {
        *guard = None;
    }
    s
}

fn build_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    sample_rate: f32,
    slot: CueSlot,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    let sample_dt = 1.0 / sample_rate;
    device.build_output_stream(
        config,
        move |data: &mut [f32], _| {
            for frame in data.chunks_mut(channels) {
                let s = next_cue_sample(&slot, sample_dt);
                for out in frame.iter_mut() {
                    *out = s;
                }
            }
        },
        err_fn,
        None,
    )
}

fn build_stream_i16(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    sample_rate: f32,
    slot: CueSlot,
    err_fn: impl Fn(cpal::StreamError) + Send + 'static,
) -> Result<cpal::Stream, cpal::BuildStreamError> {
    let sample_dt = 1.0 / sample_rate;
    device.build_output_stream(
        config,
        move |data: &mut [i16], _| {
            for frame in data.chunks_mut(channels) {
                let s = next_cue_sample(&slot, sample_dt);
                let v = (s * i16::MAX as f32) as i16;
                for out in frame.iter_mut() {
                    *out = v;
                }
            }
        },
        err_fn,
        None,
    )
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let muted = std::env::args().any(|a| a == "--muted");
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut scene = IntroScene::new(seed);
    scene.set_muted(muted);
    let capacity = scene.particle_capacity();

    let cue_slot: CueSlot = Arc::new(Mutex::new(None));
    let _stream = if muted {
        None
    } else {
        let stream = start_cue_output(Arc::clone(&cue_slot));
        if stream.is_none() {
            log::warn!("no audio output device; running silent");
        }
        stream
    };

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Hero Intro")
        .build(&event_loop)?;
    let mut state = pollster::block_on(GpuState::new(&window, &scene.geometry, capacity))?;

    let mut clock = Clock::new();
    let mut pointer = PointerInput::default();
    let mut instances: Vec<ParticleInstance> = Vec::with_capacity(capacity);
    let mut elapsed = 0.0f32;
    let mut last_flags = scene.overlay_flags();
    log::info!("intro started (seed {seed})");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => state.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let size = state.window.inner_size();
            pointer = PointerInput {
                x: (position.x as f32 / size.width.max(1) as f32) * 2.0 - 1.0,
                y: -((position.y as f32 / size.height.max(1) as f32) * 2.0 - 1.0),
            };
        }
        Event::WindowEvent {
            event:
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } => {
            scene.request_exit(elapsed);
        }
        Event::AboutToWait => {
            let (now, dt) = clock.tick();
            elapsed = now;
            let events = scene.update(elapsed, dt, pointer);
            if events.start_audio {
                if let Ok(mut slot) = cue_slot.lock() {
                    *slot = Some(CuePlayback { t: 0.0 });
                }
            }
            let flags = scene.overlay_flags();
            if flags != last_flags {
                log::info!(
                    "overlay: text={} button={}",
                    flags.text_visible,
                    flags.button_visible
                );
                last_flags = flags;
            }

            scene.particle_instances(&mut instances);
            let view = scene.rig.view_matrix();
            let proj = scene.rig.projection_matrix(state.aspect());
            let model = scene.logo_transform();
            match state.render(&instances, view, proj, model) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.resize(state.window.inner_size())
                }
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("surface error: {:?}", e),
            }

            if scene.finished(elapsed) {
                if let Ok(mut slot) = cue_slot.lock() {
                    *slot = None;
                }
                elwt.exit();
            } else {
                state.window.request_redraw();
            }
        }
        _ => {}
    })?;
    log::info!("intro torn down");
    Ok(())
}
