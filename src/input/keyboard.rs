//! Keyboard input: arrow keys with key-down edge detection
//!
//! A held key fires once. Browser auto-repeat keydowns are filtered by
//! tracking the held set until the matching keyup arrives.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent};

use super::InputSource;
use crate::sim::Action;

fn action_for_key(key: &str) -> Option<Action> {
    match key {
        "ArrowUp" => Some(Action::Up),
        "ArrowDown" => Some(Action::Down),
        "ArrowLeft" => Some(Action::Left),
        "ArrowRight" => Some(Action::Right),
        _ => None,
    }
}

pub struct KeyboardInput {
    buffer: Rc<RefCell<Vec<Action>>>,
}

impl KeyboardInput {
    pub fn new() -> Self {
        Self {
            buffer: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Attach keydown/keyup listeners to the document
    pub fn init(&self, document: &Document) {
        let held: Rc<RefCell<HashSet<String>>> = Rc::new(RefCell::new(HashSet::new()));

        {
            let buffer = self.buffer.clone();
            let held = held.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                // Newly pressed only; repeats while held are ignored
                if held.borrow_mut().insert(key.clone())
                    && let Some(action) = action_for_key(&key)
                {
                    log::debug!("action: {:?}", action);
                    buffer.borrow_mut().push(action);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                held.borrow_mut().remove(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyboardInput {
    fn drain(&self) -> Vec<Action> {
        std::mem::take(&mut *self.buffer.borrow_mut())
    }
}
