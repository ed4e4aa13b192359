//! Touch input: a tap anywhere on the canvas is a flap

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, PointerEvent};

use super::InputSource;
use crate::sim::Action;

pub struct TouchInput {
    buffer: Rc<RefCell<Vec<Action>>>,
}

impl TouchInput {
    pub fn new() -> Self {
        Self {
            buffer: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Attach the pointerdown listener to the canvas
    pub fn init(&self, canvas: &HtmlCanvasElement) {
        let buffer = self.buffer.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
            log::debug!("action: {:?}", Action::Up);
            buffer.borrow_mut().push(Action::Up);
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

impl Default for TouchInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for TouchInput {
    fn drain(&self) -> Vec<Action> {
        std::mem::take(&mut *self.buffer.borrow_mut())
    }
}
