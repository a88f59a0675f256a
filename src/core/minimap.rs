//! The per-instance minimap controller
//!
//! `Minimap` owns the render state (through its renderer), the interaction
//! controller, the frame scheduler and the command queue. Everything runs on
//! the thread that owns it: hosts feed it input events and animation frames,
//! other threads reach it only through a [`MinimapHandle`].

use crate::{
    animation::scheduler::{FrameHost, FrameOutcome, FrameScheduler},
    core::{
        command::{CommandQueue, MinimapCommand, MinimapHandle, PositionUpdate},
        config::{MinimapSettings, SurfaceKind, WindowVariant},
        constants::{DEFAULT_PLAYER_NAME, LAST_KNOWN_POSITION_KEY, ZOOM_STEP_DIVISOR},
        geo::Vector2,
    },
    friends::{FriendData, FriendSync},
    input::{EventHandled, InputEvent, InteractionContext, InteractionController},
    navigation::NavigationModule,
    rendering::Renderer,
    status::{register_zoom_hotkeys, TileStatus},
    traits::{
        CanvasSurface, CommandPort, HotkeyManager, HoverLabelPainter, MarkerSource,
        PersistentStore, PositionEventSource, Registration, TileStatusSource,
    },
    Result,
};
use std::sync::Arc;

/// Host services only needed while mounted.
pub struct MountEnvironment<'a> {
    pub frame_host: &'a mut dyn FrameHost,
    pub tile_source: Option<&'a dyn TileStatusSource>,
    pub hotkeys: Option<&'a dyn HotkeyManager>,
    pub position_events: Option<&'a dyn PositionEventSource>,
}

impl<'a> MountEnvironment<'a> {
    pub fn new(frame_host: &'a mut dyn FrameHost) -> Self {
        Self {
            frame_host,
            tile_source: None,
            hotkeys: None,
            position_events: None,
        }
    }

    pub fn with_tile_source(mut self, source: &'a dyn TileStatusSource) -> Self {
        self.tile_source = Some(source);
        self
    }

    pub fn with_hotkeys(mut self, hotkeys: &'a dyn HotkeyManager) -> Self {
        self.hotkeys = Some(hotkeys);
        self
    }

    pub fn with_position_events(mut self, events: &'a dyn PositionEventSource) -> Self {
        self.position_events = Some(events);
        self
    }
}

pub struct Minimap {
    settings: MinimapSettings,
    variant: WindowVariant,
    surface: SurfaceKind,
    renderer: Box<dyn Renderer>,
    navigation: Box<dyn NavigationModule>,
    store: Box<dyn PersistentStore>,
    canvas: Option<Box<dyn CanvasSurface>>,
    hover: Option<Box<dyn HoverLabelPainter>>,
    command_port: Option<Box<dyn CommandPort>>,
    markers: Option<Arc<dyn MarkerSource>>,
    friend_sync: FriendSync,
    controller: InteractionController,
    scheduler: FrameScheduler,
    commands: CommandQueue,
    tile_status: TileStatus,
    player_name: String,
    registrations: Vec<Registration>,
    mounted: bool,
}

/// Collaborators [`Minimap::new`] is assembled from. Built by
/// [`crate::core::builder::MinimapBuilder`].
pub(crate) struct MinimapParts {
    pub settings: MinimapSettings,
    pub variant: WindowVariant,
    pub surface: SurfaceKind,
    pub renderer: Box<dyn Renderer>,
    pub navigation: Box<dyn NavigationModule>,
    pub store: Box<dyn PersistentStore>,
    pub canvas: Option<Box<dyn CanvasSurface>>,
    pub hover: Option<Box<dyn HoverLabelPainter>>,
    pub command_port: Option<Box<dyn CommandPort>>,
    pub markers: Option<Arc<dyn MarkerSource>>,
    pub commands: CommandQueue,
    pub friend_sync: FriendSync,
}

impl Minimap {
    pub(crate) fn new(parts: MinimapParts) -> Self {
        let MinimapParts {
            settings,
            variant,
            surface,
            mut renderer,
            navigation,
            store,
            canvas,
            hover,
            command_port,
            markers,
            commands,
            friend_sync,
        } = parts;

        renderer.configure(&settings, surface);
        Self {
            controller: InteractionController::new(variant, surface, &settings),
            scheduler: FrameScheduler::new(settings.frame_timing()),
            settings,
            variant,
            surface,
            renderer,
            navigation,
            store,
            canvas,
            hover,
            command_port,
            markers,
            friend_sync,
            commands,
            tile_status: TileStatus::new(),
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            registrations: Vec::new(),
            mounted: false,
        }
    }

    pub fn settings(&self) -> &MinimapSettings {
        &self.settings
    }

    pub fn variant(&self) -> WindowVariant {
        self.variant
    }

    pub fn renderer(&self) -> &dyn Renderer {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> &mut dyn Renderer {
        self.renderer.as_mut()
    }

    pub fn navigation(&self) -> &dyn NavigationModule {
        self.navigation.as_ref()
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// A new handle for callers on other threads.
    pub fn handle(&self) -> MinimapHandle {
        MinimapHandle::new(self.commands.sender(), self.markers.clone())
    }

    /// Starts the redraw loop and registers with every host service.
    /// `now` is the host's frame clock in milliseconds.
    pub fn mount(&mut self, now: f64, env: MountEnvironment<'_>) {
        if self.mounted {
            return;
        }
        let handle = self.handle();

        if let Some(port) = self.command_port.as_mut() {
            port.expose(handle.clone());
            log::info!("minimap commands exposed");
        }
        if let Some(source) = env.tile_source {
            self.registrations.push(self.tile_status.attach(source));
        }
        if let (Some(hotkeys), true) = (env.hotkeys, self.variant.registers_hotkeys()) {
            self.registrations
                .extend(register_zoom_hotkeys(hotkeys, &handle));
        }
        if let Some(events) = env.position_events {
            let handle = handle.clone();
            self.registrations
                .push(events.register_position_callback(Box::new(move |update| {
                    if let Err(e) = handle.position_update(update) {
                        log::warn!("position update dropped: {}", e);
                    }
                })));
        }

        self.scheduler.start(now, env.frame_host);
        self.renderer.redraw(true);
        self.mounted = true;
        log::info!("minimap mounted ({:?} window)", self.variant);
    }

    /// Stops the loop and undoes every registration made by `mount`.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.scheduler.stop();
        self.registrations.clear();
        if let Some(port) = self.command_port.as_mut() {
            port.withdraw();
        }
        self.mounted = false;
        log::info!("minimap unmounted");
    }

    /// Applies every queued command. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let commands = self.commands.drain();
        let count = commands.len();
        for command in commands {
            self.apply(command);
        }
        count
    }

    fn apply(&mut self, command: MinimapCommand) {
        match command {
            MinimapCommand::SetPosition(position) => self.set_position(position),
            MinimapCommand::PositionUpdate(update) => self.on_position_update(update),
            MinimapCommand::SetFriends(friends) => self.set_friends(friends),
            MinimapCommand::ZoomIn => self.zoom_in(),
            MinimapCommand::ZoomOut => self.zoom_out(),
        }
    }

    /// Records a new player position. Never blocks: the friend publish, if
    /// any, runs in the background.
    pub fn set_position(&mut self, position: Vector2) {
        if self.settings.share_location {
            self.friend_sync
                .publish(&self.settings.friend_server_url, &self.player_name, position);
        }

        match serde_json::to_value(position) {
            Ok(value) => {
                if let Err(e) = self.store.store(LAST_KNOWN_POSITION_KEY, value) {
                    log::warn!("failed to persist last known position: {}", e);
                }
            }
            Err(e) => log::warn!("failed to encode position: {}", e),
        }

        self.renderer.state_mut().set_player_position(position);
    }

    /// Handles the process-wide position event. A name in the event becomes
    /// the player name for friend publishing.
    pub fn on_position_update(&mut self, update: PositionUpdate) {
        if let Some(name) = update.name {
            if name != self.player_name {
                log::debug!("player name is now {}", name);
                self.player_name = name;
            }
        }
        self.set_position(update.position);
    }

    pub fn set_heading(&mut self, heading: f64) {
        self.renderer.state_mut().player_heading = heading;
    }

    /// Replaces the friends list. `None` clears it.
    pub fn set_friends(&mut self, friends: Option<Vec<FriendData>>) {
        self.renderer.state_mut().friends = friends.unwrap_or_default();
        self.renderer.redraw(true);
    }

    /// Queued commands are applied before the frame is considered.
    pub fn on_animation_frame(&mut self, time: f64, host: &mut dyn FrameHost) -> FrameOutcome {
        self.pump();
        self.scheduler
            .on_animation_frame(time, self.renderer.as_mut(), host)
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> EventHandled {
        let mut ctx = InteractionContext {
            renderer: self.renderer.as_mut(),
            navigation: self.navigation.as_mut(),
            canvas: self
                .canvas
                .as_mut()
                .map(|canvas| canvas.as_mut() as &mut dyn CanvasSurface),
            hover: self
                .hover
                .as_mut()
                .map(|hover| hover.as_mut() as &mut dyn HoverLabelPainter),
        };
        self.controller.handle_event(event, &mut ctx)
    }

    pub fn on_resize(&mut self, width: f64, height: f64) {
        self.renderer.resize(width, height);
        self.renderer.redraw(true);
    }

    pub fn zoom_in(&mut self) {
        let zoom = self.renderer.zoom_level();
        self.renderer.zoom_by(-zoom / ZOOM_STEP_DIVISOR);
    }

    pub fn zoom_out(&mut self) {
        let zoom = self.renderer.zoom_level();
        self.renderer.zoom_by(zoom / ZOOM_STEP_DIVISOR);
    }

    pub fn recenter(&mut self) {
        self.controller.recenter(self.renderer.as_mut());
    }

    pub fn is_map_dragged(&self) -> bool {
        self.controller.is_map_dragged()
    }

    /// Whether the zoom and recenter toolbar belongs on screen.
    pub fn shows_toolbar(&self) -> bool {
        self.variant.shows_toolbar()
    }

    pub fn loading_message(&self) -> Option<String> {
        self.tile_status.loading_message()
    }

    /// Swaps in new settings. The redraw loop restarts if its timing inputs
    /// changed.
    pub fn update_settings(
        &mut self,
        settings: MinimapSettings,
        now: f64,
        host: &mut dyn FrameHost,
    ) -> Result<()> {
        settings.validate()?;
        self.controller.apply_settings(&settings, self.surface);
        self.renderer.configure(&settings, self.surface);
        if self.scheduler.reconfigure(settings.frame_timing(), now, host) {
            log::info!(
                "frame timing changed, redraw loop restarted ({:.1}ms min frame time)",
                self.scheduler.min_frame_time()
            );
        }
        self.settings = settings;
        self.renderer.redraw(true);
        Ok(())
    }
}

impl Drop for Minimap {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl std::fmt::Debug for Minimap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Minimap")
            .field("variant", &self.variant)
            .field("surface", &self.surface)
            .field("mounted", &self.mounted)
            .field("player_name", &self.player_name)
            .finish_non_exhaustive()
    }
}
