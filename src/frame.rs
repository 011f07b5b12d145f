use crate::constants::*;
use crate::render::{self, DrawObject, FrameScene, MeshKind, SceneLights, ViewParams};
use glam::{Mat4, Vec3, Vec4};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;
use yantra_core::constants::{AMBIENT_INTENSITY, LABEL_FONT_SIZE, POINT_LIGHT_POSITION};
use yantra_core::text::{AtlasEntry, TextAtlas};
use yantra_core::{
    Camera, CanvasSize, FrameInput, FrameUpdater, PointerCell, SceneConfig, SceneNodes,
};

/// Glyph atlas plus which entry belongs to what.
pub struct TextAssets {
    pub atlas: TextAtlas,
    pub headline: AtlasEntry,
    /// One per configured label, in config order.
    pub labels: Vec<AtlasEntry>,
}

impl TextAssets {
    pub fn build(config: &SceneConfig) -> Self {
        let mut texts: Vec<&str> = vec![config.layout.headline.as_str()];
        texts.extend(config.layout.labels.iter().map(|l| l.text.as_str()));
        let atlas = TextAtlas::build(&texts, GLYPH_SCALE);
        let headline = atlas.entries[0];
        let labels = atlas.entries[1..].to_vec();
        Self {
            atlas,
            headline,
            labels,
        }
    }
}

pub struct FrameContext<'a> {
    pub config: Rc<RefCell<SceneConfig>>,
    pub updater: Rc<RefCell<FrameUpdater>>,
    pub nodes: SceneNodes,
    pub pointer: Rc<PointerCell>,
    pub hover_box: Rc<RefCell<Option<usize>>>,

    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub text: TextAssets,

    pub started: Instant,
    pub draws: Vec<DrawObject>,
}

impl<'a> FrameContext<'a> {
    /// Attach scene nodes once the renderer exists; until then frames only
    /// advance the updater against empty handles.
    pub fn mount(&mut self, gpu: render::GpuState<'a>) {
        self.gpu = Some(gpu);
        self.nodes.attach_from_config(&self.config.borrow());
        log::info!(
            "[frame] mounted: {} labels, secondary camera {}",
            self.nodes.labels.len(),
            self.nodes.secondary_camera.is_some()
        );
    }

    pub fn frame(&mut self) {
        let canvas = CanvasSize::new(self.canvas.width(), self.canvas.height());
        let input = FrameInput {
            pointer: self.pointer.latest(),
            elapsed_sec: self.started.elapsed().as_secs_f32(),
            canvas,
        };

        // A behavior swap may have added or removed the secondary camera
        self.sync_secondary_node();

        let output = self.updater.borrow_mut().update(input, &mut self.nodes);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(canvas.width, canvas.height);

        let config = self.config.borrow();
        let behavior = *self.updater.borrow().behavior();
        let primary = Camera::primary(canvas.aspect());
        let main = ViewParams {
            view_proj: primary.view_proj(),
            eye: primary.eye,
        };
        let inset = match (self.nodes.secondary_camera, output.secondary_viewport) {
            (Some(pose), Some(rect)) if !rect.is_empty() => {
                let cam = Camera::from_pose(&pose, rect.width as f32 / rect.height as f32);
                Some((
                    ViewParams {
                        view_proj: cam.view_proj(),
                        eye: cam.eye,
                    },
                    rect,
                ))
            }
            _ => None,
        };

        self.draws.clear();
        let hover = *self.hover_box.borrow();
        for (i, nav) in config.layout.nav_boxes.iter().enumerate() {
            let mut color = Vec4::from_array(NAV_BOX_RGBA);
            if hover == Some(i) {
                color = (color.truncate() * HOVER_BRIGHTEN).extend(color.w);
            }
            self.draws.push(DrawObject {
                mesh: MeshKind::Cube,
                model: Mat4::from_scale_rotation_translation(
                    nav.half_extents * 2.0,
                    glam::Quat::IDENTITY,
                    nav.center,
                ),
                color,
                uv_rect: [0.0; 4],
                emissive: NAV_BOX_EMISSIVE,
                textured: false,
                lit: true,
            });
        }
        if let Some(text) = self.nodes.text {
            let h = config.layout.font_size * self.text.headline.lines as f32;
            let size = Vec3::new(h * self.text.headline.aspect, h, 1.0);
            self.draws.push(DrawObject {
                mesh: MeshKind::Quad,
                model: text.matrix() * Mat4::from_scale(size),
                color: Vec4::from_array(HEADLINE_RGBA),
                uv_rect: self.text.headline.uv_rect,
                emissive: HEADLINE_EMISSIVE,
                textured: true,
                lit: true,
            });
        }
        for (label, entry) in self.nodes.labels.iter().zip(&self.text.labels) {
            if !label.visible {
                continue;
            }
            let h = LABEL_FONT_SIZE * entry.lines as f32;
            self.draws.push(DrawObject {
                mesh: MeshKind::Quad,
                model: Mat4::from_translation(label.anchor)
                    * Mat4::from_scale(Vec3::new(h * entry.aspect, h, 1.0)),
                color: Vec4::from_array(LABEL_RGBA),
                uv_rect: entry.uv_rect,
                emissive: LABEL_EMISSIVE,
                textured: true,
                lit: false,
            });
        }

        let scene = FrameScene {
            main,
            inset,
            lights: SceneLights {
                ambient: AMBIENT_INTENSITY,
                point: (Vec3::from_array(POINT_LIGHT_POSITION), POINT_LIGHT_INTENSITY),
                spot: self.nodes.spotlight,
                spot_cone_radians: behavior.light.cone_radians,
                spot_intensity: behavior.light.intensity,
            },
            objects: &self.draws,
            time: input.elapsed_sec,
            glow: output.glow,
        };
        if let Err(e) = gpu.render(&scene) {
            log::error!("render error: {:?}", e);
        }
    }

    fn sync_secondary_node(&mut self) {
        if self.gpu.is_none() {
            return;
        }
        let wants = self.updater.borrow().behavior().secondary;
        match (wants, self.nodes.secondary_camera.is_some()) {
            (Some(cfg), false) => {
                self.nodes.attach_secondary_camera(yantra_core::CameraPose {
                    eye: Vec3::new(0.0, 0.0, cfg.height),
                    target: Vec3::ZERO,
                });
                log::debug!("[frame] secondary camera attached");
            }
            (None, true) => {
                self.nodes.detach_secondary_camera();
                log::debug!("[frame] secondary camera detached");
            }
            _ => {}
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    atlas: &TextAtlas,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, atlas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Handle to the running loop. Dropping the closure stops the loop at the
/// next tick, which is how the scene is torn down.
pub struct LoopHandle {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl LoopHandle {
    pub fn stop(&self) {
        self.tick.borrow_mut().take();
        log::info!("[frame] loop stopped");
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> LoopHandle {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
    LoopHandle { tick }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
