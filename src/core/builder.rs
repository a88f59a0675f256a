//! Minimap builder for fluent API configuration
//!
//! Every collaborator has a sensible default, so `MinimapBuilder::new().build()`
//! yields a working headless minimap. Hosts swap in their own renderer,
//! canvas, store and bridge port as needed.

use crate::{
    core::{
        command::CommandQueue,
        config::{MinimapSettings, SurfaceKind, WindowVariant},
        minimap::{Minimap, MinimapParts},
    },
    friends::{FriendLocationService, FriendSync, HttpFriendLocationService},
    navigation::{NavigationModule, SingleTargetNavigation},
    rendering::{HeadlessRenderer, Renderer},
    runtime::{spawners::GlobalSpawner, AsyncSpawner},
    traits::{
        CanvasSurface, CommandPort, HoverLabelPainter, MarkerSource, MemoryStore, PersistentStore,
    },
    Result,
};
use std::sync::Arc;

/// Builder for creating and configuring Minimap instances
pub struct MinimapBuilder {
    settings: MinimapSettings,
    variant: WindowVariant,
    surface: SurfaceKind,
    renderer: Option<Box<dyn Renderer>>,
    navigation: Option<Box<dyn NavigationModule>>,
    store: Option<Box<dyn PersistentStore>>,
    canvas: Option<Box<dyn CanvasSurface>>,
    hover: Option<Box<dyn HoverLabelPainter>>,
    command_port: Option<Box<dyn CommandPort>>,
    markers: Option<Arc<dyn MarkerSource>>,
    friend_service: Option<Arc<dyn FriendLocationService>>,
    spawner: Option<Arc<dyn AsyncSpawner>>,
}

impl MinimapBuilder {
    /// Create a new MinimapBuilder with default settings
    pub fn new() -> Self {
        Self {
            settings: MinimapSettings::default(),
            variant: WindowVariant::Overlay,
            surface: SurfaceKind::Opaque,
            renderer: None,
            navigation: None,
            store: None,
            canvas: None,
            hover: None,
            command_port: None,
            markers: None,
            friend_service: None,
            spawner: None,
        }
    }

    pub fn with_settings(mut self, settings: MinimapSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Parse settings from the host's JSON settings blob
    pub fn with_settings_json(mut self, json: &str) -> Result<Self> {
        self.settings = MinimapSettings::from_json(json)?;
        Ok(self)
    }

    pub fn with_variant(mut self, variant: WindowVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_surface(mut self, surface: SurfaceKind) -> Self {
        self.surface = surface;
        self
    }

    /// Set the renderer. Defaults to a [`HeadlessRenderer`] sized to the
    /// canvas.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn with_navigation(mut self, navigation: Box<dyn NavigationModule>) -> Self {
        self.navigation = Some(navigation);
        self
    }

    /// Set the durable settings store. Defaults to an in-memory store.
    pub fn with_store(mut self, store: Box<dyn PersistentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_canvas(mut self, canvas: Box<dyn CanvasSurface>) -> Self {
        self.canvas = Some(canvas);
        self
    }

    pub fn with_hover_painter(mut self, hover: Box<dyn HoverLabelPainter>) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Where the external command handle gets published on mount
    pub fn with_command_port(mut self, port: Box<dyn CommandPort>) -> Self {
        self.command_port = Some(port);
        self
    }

    pub fn with_markers(mut self, markers: Arc<dyn MarkerSource>) -> Self {
        self.markers = Some(markers);
        self
    }

    /// Set the friend server client. Defaults to HTTP.
    pub fn with_friend_service(mut self, service: Arc<dyn FriendLocationService>) -> Self {
        self.friend_service = Some(service);
        self
    }

    /// Executor for background work. Defaults to the global runtime.
    pub fn with_spawner(mut self, spawner: Arc<dyn AsyncSpawner>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    /// Build the minimap with the configured options
    pub fn build(self) -> Result<Minimap> {
        self.settings.validate()?;

        let (width, height) = self
            .canvas
            .as_ref()
            .map(|canvas| (canvas.width(), canvas.height()))
            .unwrap_or((0.0, 0.0));
        let renderer = self.renderer.unwrap_or_else(|| {
            Box::new(HeadlessRenderer::from_settings(
                &self.settings,
                self.surface,
                width,
                height,
            ))
        });

        let commands = CommandQueue::new();
        let friend_sync = FriendSync::new(
            self.friend_service
                .unwrap_or_else(|| Arc::new(HttpFriendLocationService::new())),
            self.spawner.unwrap_or_else(|| Arc::new(GlobalSpawner)),
            commands.sender(),
        );

        Ok(Minimap::new(MinimapParts {
            settings: self.settings,
            variant: self.variant,
            surface: self.surface,
            renderer,
            navigation: self
                .navigation
                .unwrap_or_else(|| Box::new(SingleTargetNavigation::new())),
            store: self.store.unwrap_or_else(|| Box::new(MemoryStore::new())),
            canvas: self.canvas,
            hover: self.hover,
            command_port: self.command_port,
            markers: self.markers,
            commands,
            friend_sync,
        }))
    }
}

impl Default for MinimapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience methods for the window contexts the minimap ships in
impl MinimapBuilder {
    /// Standalone desktop window with pan-drag and toolbar
    pub fn desktop() -> Self {
        Self::new()
            .with_variant(WindowVariant::Desktop)
            .with_surface(SurfaceKind::Opaque)
    }

    /// In-game window with zoom hotkeys
    pub fn in_game() -> Self {
        Self::new()
            .with_variant(WindowVariant::InGame)
            .with_surface(SurfaceKind::Opaque)
    }

    /// Transparent overlay drawn over the game; compass mode applies here
    pub fn overlay() -> Self {
        Self::new()
            .with_variant(WindowVariant::Overlay)
            .with_surface(SurfaceKind::Transparent)
    }
}
