use crate::input::{action_for_key, next_behavior};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;
use yantra_core::FrameUpdater;

pub fn handle_global_keydown(ev: &web::KeyboardEvent, updater: &Rc<RefCell<FrameUpdater>>) {
    if ev.repeat() || ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    let Some(action) = action_for_key(&key) else {
        return;
    };
    let next = next_behavior(updater.borrow().behavior(), action);
    match updater.borrow_mut().reconfigure(next) {
        Ok(()) => log::info!("[keys] {:?}", action),
        Err(e) => log::warn!("[keys] {:?} ignored: {}", action, e),
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(updater: Rc<RefCell<FrameUpdater>>) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &updater);
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
