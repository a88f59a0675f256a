//! Narrow interfaces to the collaborators the minimap consumes
//!
//! Drawing, tile caching, hotkeys, persistence and the native bridge all live
//! outside this crate. The minimap only talks to them through these traits,
//! which keeps every component mockable.

use crate::core::command::{MinimapHandle, PositionUpdate};
use crate::core::geo::Vector2;
use crate::rendering::DrawParameters;
use crate::Result;
use fxhash::FxHashMap;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Handle returned by every `register_*` call. Dropping it unregisters.
#[must_use = "dropping a Registration unregisters it immediately"]
pub struct Registration {
    unregister: Option<Box<dyn FnOnce()>>,
}

impl Registration {
    pub fn new(unregister: impl FnOnce() + 'static) -> Self {
        Self {
            unregister: Some(Box::new(unregister)),
        }
    }

    /// A registration with nothing to undo.
    pub fn noop() -> Self {
        Self { unregister: None }
    }

    pub fn unregister(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.run();
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}

/// Durable key/value settings store. Writes are fire-and-forget.
pub trait PersistentStore {
    fn store(&mut self, key: &str, value: Value) -> Result<()>;
}

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<FxHashMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl PersistentStore for MemoryStore {
    fn store(&mut self, key: &str, value: Value) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

/// Tile cache notifications about in-flight downloads.
pub trait TileStatusSource {
    fn register_on_tile_downloading_count_change(
        &self,
        callback: Box<dyn Fn(usize)>,
    ) -> Registration;
}

pub trait HotkeyManager {
    fn register_hotkey(&self, name: &str, callback: Box<dyn Fn()>) -> Registration;
}

/// Process-wide player position events.
pub trait PositionEventSource {
    fn register_position_callback(&self, callback: Box<dyn Fn(PositionUpdate)>) -> Registration;
}

/// Map markers handed out to the native bridge.
pub trait MarkerSource: Send + Sync {
    fn markers(&self) -> Value;
}

/// The rendering surface the pointer events are delivered to.
pub trait CanvasSurface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn set_pointer_capture(&mut self, pointer_id: i32);
    fn release_pointer_capture(&mut self, pointer_id: i32);
}

/// Draws the label of whatever lies under the pointer.
pub trait HoverLabelPainter {
    fn draw_hover_label(&mut self, pointer: Vector2, parameters: &DrawParameters, icon_scale: f64);
}

/// Where the minimap publishes its external commands for the native bridge.
pub trait CommandPort {
    fn expose(&mut self, handle: MinimapHandle);
    fn withdraw(&mut self);
}
