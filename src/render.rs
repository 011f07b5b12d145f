use glam::{Mat4, Vec3};
use web_sys as web;
use yantra_core::text::TextAtlas;
use yantra_core::{SpotLight, ViewportRect};

mod helpers;
mod mesh;
mod post;
mod scene;
mod targets;

pub use scene::{DrawObject, MeshKind};
use post::GlowChain;
use scene::SceneResources;
use targets::RenderTargets;

/// Camera matrices for one render pass.
#[derive(Clone, Copy, Debug)]
pub struct ViewParams {
    pub view_proj: Mat4,
    pub eye: Vec3,
}

#[derive(Clone, Copy, Debug)]
pub struct SceneLights {
    pub ambient: f32,
    pub point: (Vec3, f32),
    pub spot: Option<SpotLight>,
    pub spot_cone_radians: f32,
    pub spot_intensity: f32,
}

/// Everything the renderer needs for one frame, assembled by the frame loop.
pub struct FrameScene<'s> {
    pub main: ViewParams,
    pub inset: Option<(ViewParams, ViewportRect)>,
    pub lights: SceneLights,
    pub objects: &'s [DrawObject],
    pub time: f32,
    pub glow: f32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    scene: SceneResources,
    glow: GlowChain,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, atlas: &TextAtlas) -> anyhow::Result<Self> {
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
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let scene = SceneResources::new(&device, &queue, atlas);
        let glow = GlowChain::new(&device, &targets, format);
        log::info!(
            "[render] surface {}x{} {:?}, atlas {}x{}",
            width,
            height,
            format,
            atlas.bitmap.width,
            atlas.bitmap.height
        );

        let [r, g, b] = crate::constants::CLEAR_RGB;
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            scene,
            glow,
            width,
            height,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets = RenderTargets::new(&self.device, width, height);
            self.glow.retarget(&self.device, &self.targets);
            log::debug!("[render] resized to {}x{}", width, height);
        }
    }

    pub fn render(&mut self, frame_scene: &FrameScene<'_>) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let lights = &frame_scene.lights;
        let spot = lights.spot.map(|s| {
            (
                s.position,
                s.direction(),
                (lights.spot_cone_radians * 0.5).cos(),
                lights.spot_intensity,
            )
        });
        let pack = |v: &ViewParams| {
            scene::globals_uniform(
                v.view_proj,
                v.eye,
                lights.ambient,
                lights.point,
                spot,
                frame_scene.time,
                frame_scene.glow,
            )
        };
        SceneResources::write_globals(&self.queue, &self.scene.main_globals, &pack(&frame_scene.main));
        let drawn = self.scene.write_objects(&self.queue, frame_scene.objects);
        let objects = &frame_scene.objects[..drawn];

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(depth_attachment(&self.targets.depth_view)),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.scene
                .draw_objects(&mut rpass, &self.scene.main_globals, objects);
        }

        if let Some((inset, rect)) = &frame_scene.inset {
            // rect was computed against the canvas; skip if the targets lag behind
            let canvas = yantra_core::CanvasSize::new(self.width, self.height);
            if !rect.is_empty() && rect.is_within(canvas) {
                SceneResources::write_globals(&self.queue, &self.scene.inset_globals, &pack(inset));
                let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("inset_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &self.targets.hdr_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(depth_attachment(
                        &self.targets.inset_depth_view,
                    )),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
                rpass.set_viewport(
                    rect.x as f32,
                    rect.y as f32,
                    rect.width as f32,
                    rect.height as f32,
                    0.0,
                    1.0,
                );
                rpass.set_scissor_rect(rect.x, rect.y, rect.width, rect.height);
                rpass.set_pipeline(&self.scene.backdrop);
                rpass.set_bind_group(0, &self.scene.inset_globals.bind_group, &[]);
                rpass.draw(0..3, 0..1);
                self.scene
                    .draw_objects(&mut rpass, &self.scene.inset_globals, objects);
            }
        }

        let bloom_res = [
            (self.width / 2).max(1) as f32,
            (self.height / 2).max(1) as f32,
        ];
        self.glow
            .write_uniforms(&self.queue, bloom_res, frame_scene.time, frame_scene.glow);
        self.glow.encode(&mut encoder, &self.targets, &view);

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn depth_attachment(view: &wgpu::TextureView) -> wgpu::RenderPassDepthStencilAttachment<'_> {
    wgpu::RenderPassDepthStencilAttachment {
        view,
        depth_ops: Some(wgpu::Operations {
            load: wgpu::LoadOp::Clear(1.0),
            store: wgpu::StoreOp::Store,
        }),
        stencil_ops: None,
    }
}
