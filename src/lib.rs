#![cfg(target_arch = "wasm32")]
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;
use yantra_core::{FrameUpdater, PointerCell, PointerState, Preset, SceneConfig, SceneNodes};

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

/// Stop the frame loop and drop node handles when the page goes away.
fn wire_teardown(
    handle: frame::LoopHandle,
    frame_ctx: Rc<RefCell<frame::FrameContext<'static>>>,
) {
    let closure = Closure::wrap(Box::new(move || {
        handle.stop();
        frame_ctx.borrow_mut().nodes.detach_all();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Compiled defaults, then `?preset=` from the page URL.
fn load_config() -> anyhow::Result<SceneConfig> {
    let preset = match dom::query_param("preset") {
        Some(name) => match name.parse::<Preset>() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("[config] {}; using {}", e, Preset::default());
                Preset::default()
            }
        },
        None => Preset::default(),
    };
    let config = SceneConfig::from_preset(preset);
    config.validate()?;
    log::info!("[config] preset {}", preset);
    Ok(config)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = input::log_level_from_query(dom::query_param("log").as_deref());
    console_log::init_with_level(level).ok();
    log::info!("yantra-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let config = load_config()?;
    let updater = Rc::new(RefCell::new(FrameUpdater::new(config.behavior)?));
    let text = frame::TextAssets::build(&config);
    let config = Rc::new(RefCell::new(config));

    // ---------------- Interaction state ----------------
    let pointer = Rc::new(PointerCell::new(PointerState::CENTER));
    let mouse_state = Rc::new(RefCell::new(input::MouseState::default()));
    let hover_box = Rc::new(RefCell::new(None::<usize>));

    events::wire_global_keydown(updater.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        config: config.clone(),
        pointer: pointer.clone(),
        mouse_state,
        hover_box: hover_box.clone(),
    });

    // The loop starts before the renderer exists; nodes attach on mount
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        config,
        updater,
        nodes: SceneNodes::default(),
        pointer,
        hover_box,
        canvas: canvas.clone(),
        gpu: None,
        text,
        started: Instant::now(),
        draws: Vec::new(),
    }));
    let handle = frame::start_loop(frame_ctx.clone());

    let atlas = frame_ctx.borrow().text.atlas.clone();
    match frame::init_gpu(&canvas, &atlas).await {
        Some(gpu) => frame_ctx.borrow_mut().mount(gpu),
        None => log::warn!("[init] running without a renderer"),
    }
    wire_teardown(handle, frame_ctx);
    Ok(())
}
