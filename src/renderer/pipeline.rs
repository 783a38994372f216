//! WebGPU render pipeline setup

use std::fmt;

use wgpu::util::DeviceExt;

use super::scene::build_scene;
use super::vertex::{Vertex, colors};
use crate::sim::{Arena, Simulation};

/// Reasons the app cannot start drawing. All of them are fatal.
#[derive(Debug)]
pub enum StartupError {
    /// No browser window/document/canvas to draw into
    NoCanvas(&'static str),
    /// The canvas could not back a WebGPU surface
    Surface(wgpu::CreateSurfaceError),
    /// No adapter compatible with the surface
    Adapter(wgpu::RequestAdapterError),
    /// The adapter refused to give us a device
    Device(wgpu::RequestDeviceError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::NoCanvas(what) => write!(f, "no drawing surface: {}", what),
            StartupError::Surface(e) => write!(f, "failed to create surface: {}", e),
            StartupError::Adapter(e) => write!(f, "failed to get adapter: {}", e),
            StartupError::Device(e) => write!(f, "failed to create device: {}", e),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StartupError::NoCanvas(_) => None,
            StartupError::Surface(e) => Some(e),
            StartupError::Adapter(e) => Some(e),
            StartupError::Device(e) => Some(e),
        }
    }
}

impl From<wgpu::CreateSurfaceError> for StartupError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        StartupError::Surface(e)
    }
}

impl From<wgpu::RequestAdapterError> for StartupError {
    fn from(e: wgpu::RequestAdapterError) -> Self {
        StartupError::Adapter(e)
    }
}

impl From<wgpu::RequestDeviceError> for StartupError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        StartupError::Device(e)
    }
}

/// Map an arena point to normalized device coordinates.
///
/// Arena y grows downward; NDC y grows upward.
pub fn arena_to_ndc(arena: &Arena, x: f32, y: f32) -> (f32, f32) {
    let nx = (x - arena.left) / arena.width() * 2.0 - 1.0;
    let ny = 1.0 - (y - arena.top) / arena.height() * 2.0;
    (nx, ny)
}

/// Main render state
pub struct RenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    /// Viewport size in pixels
    pub size: (u32, u32),
    /// Arena rectangle for coordinate mapping
    pub arena: Arena,
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
        arena: Arena,
    ) -> Result<Self, StartupError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("wallball-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Create shader module
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // Create pipeline
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("render_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        // Create initial vertex buffer (will be updated each frame)
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("vertex_buffer"),
            contents: bytemuck::cast_slice(&[Vertex::new(0.0, 0.0, [1.0; 4])]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        log::info!("Render pipeline ready ({}x{}, {:?})", width, height, config.format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_count: 0,
            size: (width, height),
            arena,
        })
    }

    /// Reconfigure the surface at its startup size (after it was lost)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Build the scene for `sim` and draw it
    pub fn draw(&mut self, sim: &Simulation) -> Result<(), wgpu::SurfaceError> {
        let vertices = build_scene(sim);
        self.render(&vertices)
    }

    /// Upload vertices and render
    pub fn render(&mut self, vertices: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        // Convert vertices to NDC
        let ndc_vertices: Vec<Vertex> = vertices
            .iter()
            .map(|v| {
                let (x, y) = arena_to_ndc(&self.arena, v.position[0], v.position[1]);
                Vertex::new(x, y, v.color)
            })
            .collect();

        // Recreate buffer if needed (simple approach; could optimize)
        self.vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("vertex_buffer"),
                contents: bytemuck::cast_slice(&ndc_vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.vertex_count = ndc_vertices.len() as u32;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: colors::BACKGROUND[0] as f64,
                            g: colors::BACKGROUND[1] as f64,
                            b: colors::BACKGROUND[2] as f64,
                            a: colors::BACKGROUND[3] as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if self.vertex_count > 0 {
                render_pass.set_pipeline(&self.pipeline);
                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                render_pass.draw(0..self.vertex_count, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_to_ndc_corners() {
        let arena = Arena::from_size(200.0, 100.0);
        assert_eq!(arena_to_ndc(&arena, 0.0, 0.0), (-1.0, 1.0));
        assert_eq!(arena_to_ndc(&arena, 200.0, 100.0), (1.0, -1.0));
        assert_eq!(arena_to_ndc(&arena, 100.0, 50.0), (0.0, 0.0));
    }

    #[test]
    fn test_arena_to_ndc_offset_arena() {
        let arena = Arena {
            top: 10.0,
            left: 20.0,
            right: 120.0,
            bottom: 60.0,
        };
        assert_eq!(arena_to_ndc(&arena, 20.0, 10.0), (-1.0, 1.0));
        assert_eq!(arena_to_ndc(&arena, 70.0, 35.0), (0.0, 0.0));
    }

    #[test]
    fn test_startup_error_display() {
        let err = StartupError::NoCanvas("missing #canvas element");
        assert_eq!(err.to_string(), "no drawing surface: missing #canvas element");
        assert!(std::error::Error::source(&err).is_none());
    }
}
