//! Pointer input marshalled from the host to the controller

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Move,
}

/// A pointer event in viewport pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub client_x: f32,
    pub client_y: f32,
    pub kind: PointerKind,
}

impl PointerEvent {
    pub fn down(client_x: f32, client_y: f32) -> Self {
        Self {
            client_x,
            client_y,
            kind: PointerKind::Down,
        }
    }
}

/// Anything that can hand the controller the pointer events gathered since
/// the last frame
pub trait InputSource {
    fn drain(&mut self) -> Vec<PointerEvent>;
}

/// Shared pointer event queue.
///
/// The host keeps one clone and pushes into it from its event handlers; the
/// controller owns another and drains it on the tick thread. Listeners never
/// touch the scene directly.
#[derive(Debug, Clone, Default)]
pub struct PointerQueue {
    events: Rc<RefCell<Vec<PointerEvent>>>,
}

impl PointerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: PointerEvent) {
        self.events.borrow_mut().push(event);
    }

    /// Queue a pointer-down at the given position
    pub fn click(&self, client_x: f32, client_y: f32) {
        self.push(PointerEvent::down(client_x, client_y));
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl InputSource for PointerQueue {
    fn drain(&mut self) -> Vec<PointerEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

/// Size of the render target in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Convert client pixels to normalized device coordinates in [-1, 1],
    /// Y pointing up
    pub fn to_ndc(&self, client_x: f32, client_y: f32) -> (f32, f32) {
        let width = self.width.max(1.0);
        let height = self.height.max(1.0);
        (
            2.0 * client_x / width - 1.0,
            1.0 - 2.0 * client_y / height,
        )
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }
}
