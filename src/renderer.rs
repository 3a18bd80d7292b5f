use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::core::{Attribute, AttributeLayout, BufferKind, RenderTarget, Uniform, VEC3_F32_LAYOUT};
use crate::types::{object_slot_stride, CameraUniform, ObjectUniform};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

const INITIAL_OBJECT_SLOTS: u64 = 16;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

/// Handle to a buffer owned by [`SceneRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpuBuffer(u32);

/// Response after a failed surface acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable (out of memory); the application should exit.
    Fatal,
}

/// One recorded draw call.
#[derive(Debug, Clone, Copy)]
struct DrawRecord {
    uniform: ObjectUniform,
    positions: GpuBuffer,
    colors: GpuBuffer,
    indices: GpuBuffer,
    count: u32,
}

/// State recorded through [`RenderTarget`] calls during one tick.
#[derive(Debug, Default)]
struct FrameRecording {
    clear: Option<[f32; 4]>,
    depth_test: bool,
    camera: Option<CameraUniform>,
    positions: Option<GpuBuffer>,
    colors: Option<GpuBuffer>,
    indices: Option<GpuBuffer>,
    object: ObjectUniform,
    draws: Vec<DrawRecord>,
}

struct EguiLayer {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// wgpu implementation of the scene render target.
///
/// Target calls made during a tick are recorded; [`SceneRenderer::finish_frame`]
/// turns the recording into one render pass, draws the control panel on top
/// and presents.
pub struct SceneRenderer {
    window: Arc<Window>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    depth_view: wgpu::TextureView,
    depth_pipeline: wgpu::RenderPipeline,
    no_depth_pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    object_buffer: wgpu::Buffer,
    object_bind_group: wgpu::BindGroup,
    object_stride: u64,
    object_slots: u64,
    buffers: HashMap<GpuBuffer, wgpu::Buffer>,
    next_buffer: u32,
    frame: FrameRecording,
    egui: Option<EguiLayer>,
}

impl SceneRenderer {
    /// Creates the GPU context and shader pipelines for `window`.
    pub async fn new(window: Arc<Window>, show_ui: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find an appropriate adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Scene Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("failed to create device")?;

        log::info!("using adapter: {}", adapter.get_info().name);

        let config = Self::create_surface_config(&surface, &adapter, size)?;
        surface.configure(&device, &config);

        let depth_view = Self::create_depth_view(&device, &config);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bind_group_layout"),
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

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bind_group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ObjectUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let object_stride = object_slot_stride(device.limits().min_uniform_buffer_offset_alignment);
        let (object_buffer, object_bind_group) = Self::create_object_slots(
            &device,
            &object_layout,
            object_stride,
            INITIAL_OBJECT_SLOTS,
        );

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("scene.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let depth_pipeline =
            Self::create_pipeline(&device, &pipeline_layout, &shader, config.format, true);
        let no_depth_pipeline =
            Self::create_pipeline(&device, &pipeline_layout, &shader, config.format, false);

        let egui = show_ui.then(|| {
            let ctx = egui::Context::default();
            let state = egui_winit::State::new(
                ctx.clone(),
                egui::ViewportId::ROOT,
                &*window,
                Some(window.scale_factor() as f32),
                None,
                None,
            );
            let renderer = egui_wgpu::Renderer::new(
                &device,
                config.format,
                egui_wgpu::RendererOptions::default(),
            );
            EguiLayer {
                ctx,
                state,
                renderer,
            }
        });

        log::info!(
            "scene renderer initialized: {}x{} {:?}",
            size.width,
            size.height,
            config.format
        );

        Ok(Self {
            window,
            device,
            queue,
            surface,
            config,
            size,
            depth_view,
            depth_pipeline,
            no_depth_pipeline,
            camera_buffer,
            camera_bind_group,
            object_layout,
            object_buffer,
            object_bind_group,
            object_stride,
            object_slots: INITIAL_OBJECT_SLOTS,
            buffers: HashMap::new(),
            next_buffer: 0,
            frame: FrameRecording::default(),
            egui,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no supported formats")?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_object_slots(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        stride: u64,
        slots: u64,
    ) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Object Uniform Buffer"),
            size: stride * slots,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("object_bind_group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ObjectUniform>() as u64),
                }),
            }],
        });

        (buffer, bind_group)
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        depth_test: bool,
    ) -> wgpu::RenderPipeline {
        let vertex_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: VEC3_F32_LAYOUT.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &POSITION_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: VEC3_F32_LAYOUT.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &COLOR_ATTRIBUTES,
            },
        ];

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(if depth_test {
                "Scene Pipeline (depth test)"
            } else {
                "Scene Pipeline (no depth test)"
            }),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &vertex_buffers,
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Negative scale flips winding; draw both faces.
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: depth_test,
                depth_compare: if depth_test {
                    wgpu::CompareFunction::Less
                } else {
                    wgpu::CompareFunction::Always
                },
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    /// Number of live GPU buffers created through [`RenderTarget::create_buffer`].
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Reconfigures the surface and depth buffer. Zero sizes are deferred.
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = Self::create_depth_view(&self.device, &self.config);
    }

    /// Lets the control panel see the event first; true if it consumed it.
    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        match &mut self.egui {
            Some(egui) => egui.state.on_window_event(&self.window, event).consumed,
            None => false,
        }
    }

    /// Maps a surface error to what the caller should do next.
    pub fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                if self.size.width > 0 && self.size.height > 0 {
                    self.surface.configure(&self.device, &self.config);
                }
                SurfaceErrorAction::Reconfigured
            }
            wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            _ => SurfaceErrorAction::SkipFrame,
        }
    }

    /// Submits the recorded tick, runs `ui` for the control panel and presents.
    pub fn finish_frame(
        &mut self,
        ui: impl FnMut(&egui::Context),
    ) -> std::result::Result<(), wgpu::SurfaceError> {
        let frame = std::mem::take(&mut self.frame);

        if let Some(camera) = frame.camera {
            self.queue
                .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera]));
        }
        self.write_object_slots(&frame.draws);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        self.encode_scene(&mut encoder, &view, &frame);
        let ui_commands = self.encode_ui(&mut encoder, &view, ui);

        self.queue
            .submit(ui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        Ok(())
    }

    fn write_object_slots(&mut self, draws: &[DrawRecord]) {
        if draws.is_empty() {
            return;
        }

        let needed = draws.len() as u64;
        if needed > self.object_slots {
            let slots = needed.next_power_of_two();
            log::debug!("growing object uniform slots {} -> {}", self.object_slots, slots);
            let (buffer, bind_group) =
                Self::create_object_slots(&self.device, &self.object_layout, self.object_stride, slots);
            self.object_buffer = buffer;
            self.object_bind_group = bind_group;
            self.object_slots = slots;
        }

        let stride = self.object_stride as usize;
        let mut staging = vec![0u8; stride * draws.len()];
        for (slot, draw) in staging.chunks_exact_mut(stride).zip(draws) {
            let bytes = bytemuck::bytes_of(&draw.uniform);
            slot[..bytes.len()].copy_from_slice(bytes);
        }
        self.queue.write_buffer(&self.object_buffer, 0, &staging);
    }

    fn encode_scene(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: &FrameRecording,
    ) {
        let load = match frame.clear {
            Some([r, g, b, a]) => wgpu::LoadOp::Clear(wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: a as f64,
            }),
            None => wgpu::LoadOp::Load,
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        if frame.draws.is_empty() {
            return;
        }

        let pipeline = if frame.depth_test {
            &self.depth_pipeline
        } else {
            &self.no_depth_pipeline
        };
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

        for (slot, draw) in frame.draws.iter().enumerate() {
            let (Some(positions), Some(colors), Some(indices)) = (
                self.buffers.get(&draw.positions),
                self.buffers.get(&draw.colors),
                self.buffers.get(&draw.indices),
            ) else {
                log::warn!("skipping draw {}: buffer released before submit", slot);
                continue;
            };
            // Zero-sized buffers cannot be sliced.
            if [positions, colors, indices].iter().any(|b| b.size() == 0) {
                continue;
            }

            let offset = (slot as u64 * self.object_stride) as u32;
            render_pass.set_bind_group(1, &self.object_bind_group, &[offset]);
            render_pass.set_vertex_buffer(Attribute::Position.location(), positions.slice(..));
            render_pass.set_vertex_buffer(Attribute::Color.location(), colors.slice(..));
            render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..draw.count, 0, 0..1);
        }
    }

    fn encode_ui(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        ui: impl FnMut(&egui::Context),
    ) -> Vec<wgpu::CommandBuffer> {
        let Some(egui) = &mut self.egui else {
            return Vec::new();
        };

        let raw_input = egui.state.take_egui_input(&self.window);
        let full_output = egui.ctx.run(raw_input, ui);

        egui.state
            .handle_platform_output(&self.window, full_output.platform_output);

        let tris = egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            egui.renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let commands = egui.renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            egui.renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            egui.renderer.free_texture(id);
        }

        commands
    }

    fn allocate(&mut self, buffer: wgpu::Buffer) -> GpuBuffer {
        let handle = GpuBuffer(self.next_buffer);
        self.next_buffer = self.next_buffer.wrapping_add(1);
        self.buffers.insert(handle, buffer);
        handle
    }
}

impl RenderTarget for SceneRenderer {
    type Buffer = GpuBuffer;

    fn create_buffer(&mut self, kind: BufferKind, contents: &[u8]) -> GpuBuffer {
        let buffer = match kind {
            BufferKind::Vertex => self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Figure Vertex Buffer"),
                contents,
                usage: wgpu::BufferUsages::VERTEX,
            }),
            BufferKind::Index => {
                // No 8-bit index format in wgpu.
                let widened: Vec<u16> = contents.iter().map(|&i| i as u16).collect();
                self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Figure Index Buffer"),
                    contents: bytemuck::cast_slice(&widened),
                    usage: wgpu::BufferUsages::INDEX,
                })
            }
        };
        self.allocate(buffer)
    }

    fn destroy_buffer(&mut self, buffer: GpuBuffer) {
        if let Some(buffer) = self.buffers.remove(&buffer) {
            buffer.destroy();
        }
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.frame.clear = Some(color);
        // A new tick starts with a clean pipeline state.
        self.frame.depth_test = false;
    }

    fn enable_depth_test(&mut self) {
        self.frame.depth_test = true;
    }

    fn set_uniform(&mut self, uniform: Uniform, matrix: &[f32; 16]) {
        let cols = glam::Mat4::from_cols_array(matrix).to_cols_array_2d();
        match uniform {
            Uniform::Mvp => self.frame.camera = Some(CameraUniform::from_cols_array(matrix)),
            Uniform::Transform => self.frame.object.transform = cols,
            Uniform::DefaultTranslate => self.frame.object.default_translate = cols,
            Uniform::Rotate => self.frame.object.rotate = cols,
        }
    }

    fn bind_attribute(&mut self, attribute: Attribute, buffer: &GpuBuffer, layout: AttributeLayout) {
        debug_assert_eq!(layout, VEC3_F32_LAYOUT, "pipeline only reads packed vec3<f32>");
        match attribute {
            Attribute::Position => self.frame.positions = Some(*buffer),
            Attribute::Color => self.frame.colors = Some(*buffer),
        }
    }

    fn bind_index_buffer(&mut self, buffer: &GpuBuffer) {
        self.frame.indices = Some(*buffer);
    }

    fn draw_indexed(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        let frame = &mut self.frame;
        match (frame.positions, frame.colors, frame.indices) {
            (Some(positions), Some(colors), Some(indices)) => frame.draws.push(DrawRecord {
                uniform: frame.object,
                positions,
                colors,
                indices,
                count,
            }),
            _ => log::warn!("draw_indexed without bound geometry; skipped"),
        }
    }
}
