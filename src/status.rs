//! Thin adapters onto the tile cache and the hotkey manager.

use crate::core::command::{MinimapCommand, MinimapHandle};
use crate::core::constants::{HOTKEY_ZOOM_IN, HOTKEY_ZOOM_OUT};
use crate::traits::{HotkeyManager, Registration, TileStatusSource};
use std::cell::Cell;
use std::rc::Rc;

/// In-flight tile download count, kept current by the tile cache.
#[derive(Debug, Clone, Default)]
pub struct TileStatus {
    downloading: Rc<Cell<usize>>,
}

impl TileStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts mirroring `source`. The mirror stops when the returned
    /// registration is dropped.
    pub fn attach(&self, source: &dyn TileStatusSource) -> Registration {
        let downloading = self.downloading.clone();
        source.register_on_tile_downloading_count_change(Box::new(move |count| {
            downloading.set(count);
        }))
    }

    pub fn downloading(&self) -> usize {
        self.downloading.get()
    }

    /// Text for the loading indicator, if anything is loading.
    pub fn loading_message(&self) -> Option<String> {
        match self.downloading() {
            0 => None,
            count => Some(format!("Loading {count} tiles")),
        }
    }
}

/// Registers the zoom hotkeys; they feed the command channel like any other
/// external caller.
pub fn register_zoom_hotkeys(hotkeys: &dyn HotkeyManager, handle: &MinimapHandle) -> Vec<Registration> {
    [
        (HOTKEY_ZOOM_IN, MinimapCommand::ZoomIn),
        (HOTKEY_ZOOM_OUT, MinimapCommand::ZoomOut),
    ]
    .into_iter()
    .map(|(name, command)| {
        let handle = handle.clone();
        hotkeys.register_hotkey(
            name,
            Box::new(move || {
                if let Err(e) = handle.send(command.clone()) {
                    log::warn!("hotkey {} ignored: {}", name, e);
                }
            }),
        )
    })
    .collect()
}
