use crate::dom;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;
use yantra_core::{
    pick_nav_box, screen_to_world_ray, Camera, CanvasSize, PointerCell, PointerState, SceneConfig,
};

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub config: Rc<RefCell<SceneConfig>>,
    pub pointer: Rc<PointerCell>,
    pub mouse_state: Rc<RefCell<input::MouseState>>,
    pub hover_box: Rc<RefCell<Option<usize>>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
}

fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> [f32; 2] {
    let rect = canvas.get_bounding_client_rect();
    input::client_to_canvas_px(
        ev.client_x() as f32,
        ev.client_y() as f32,
        [
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ],
        canvas.width(),
        canvas.height(),
    )
}

/// Nav box under a canvas pixel, seen from the primary camera.
fn box_under(w: &InputWiring, px: f32, py: f32) -> Option<usize> {
    let canvas = CanvasSize::new(w.canvas.width(), w.canvas.height());
    if canvas.is_empty() {
        return None;
    }
    let camera = Camera::primary(canvas.aspect());
    let ray = screen_to_world_ray(&camera, canvas, px, py);
    pick_nav_box(ray, &w.config.borrow().layout.nav_boxes)
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !w.canvas.is_connected() {
            return;
        }
        let [px, py] = pointer_canvas_px(&ev, &w.canvas);
        w.pointer.record(PointerState::from_canvas_px(
            px,
            py,
            w.canvas.width(),
            w.canvas.height(),
        ));

        let hovered = box_under(&w, px, py);
        let mut hover = w.hover_box.borrow_mut();
        if *hover != hovered {
            *hover = hovered;
            _ = w
                .canvas
                .style()
                .set_property("cursor", if hovered.is_some() { "pointer" } else { "default" });
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let [px, py] = pointer_canvas_px(&ev, &w.canvas);
        {
            let mut ms = w.mouse_state.borrow_mut();
            ms.down = true;
            ms.pressed_box = box_under(&w, px, py);
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pressed = {
            let mut ms = w.mouse_state.borrow_mut();
            if !ms.down {
                return;
            }
            ms.down = false;
            ms.pressed_box.take()
        };
        let [px, py] = pointer_canvas_px(&ev, &w.canvas);
        // a click is press and release on the same box
        if let (Some(i), Some(j)) = (pressed, box_under(&w, px, py)) {
            if i == j {
                let config = w.config.borrow();
                if let Some(nav) = config.layout.nav_boxes.get(i) {
                    log::info!("[click] nav box {} -> {}", nav.title, nav.target);
                    dom::set_location_hash(&nav.target);
                }
            }
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}
