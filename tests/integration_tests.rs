use minimap::prelude::*;
use minimap::rendering::ZoomLevels;
use minimap::runtime::spawners::InlineSpawner;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Integration tests driving a whole minimap through recording collaborators
#[cfg(test)]
mod integration_tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    /// Renderer that only counts redraws
    struct CountingRenderer {
        state: RenderState,
        forced: Rc<Cell<usize>>,
        unforced: Rc<Cell<usize>>,
    }

    impl Renderer for CountingRenderer {
        fn state(&self) -> &RenderState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut RenderState {
            &mut self.state
        }

        fn redraw(&mut self, forced: bool) {
            let counter = if forced { &self.forced } else { &self.unforced };
            counter.set(counter.get() + 1);
        }
    }

    #[derive(Default)]
    struct CountingHost {
        requested: usize,
    }

    impl FrameHost for CountingHost {
        fn request_animation_frame(&mut self) {
            self.requested += 1;
        }
    }

    #[derive(Clone, Default)]
    struct SharedCanvas {
        captured: Rc<RefCell<Vec<i32>>>,
        released: Rc<RefCell<Vec<i32>>>,
    }

    impl CanvasSurface for SharedCanvas {
        fn width(&self) -> f64 {
            400.0
        }

        fn height(&self) -> f64 {
            300.0
        }

        fn set_pointer_capture(&mut self, pointer_id: i32) {
            self.captured.borrow_mut().push(pointer_id);
        }

        fn release_pointer_capture(&mut self, pointer_id: i32) {
            self.released.borrow_mut().push(pointer_id);
        }
    }

    #[derive(Clone, Default)]
    struct RecordingPort {
        exposed: Rc<RefCell<Option<MinimapHandle>>>,
        withdrawals: Rc<Cell<usize>>,
    }

    impl CommandPort for RecordingPort {
        fn expose(&mut self, handle: MinimapHandle) {
            *self.exposed.borrow_mut() = Some(handle);
        }

        fn withdraw(&mut self) {
            self.exposed.borrow_mut().take();
            self.withdrawals.set(self.withdrawals.get() + 1);
        }
    }

    #[derive(Default)]
    struct FakeHotkeys {
        bound: RefCell<Vec<(String, Box<dyn Fn()>)>>,
    }

    impl FakeHotkeys {
        fn press(&self, name: &str) {
            for (bound, callback) in self.bound.borrow().iter() {
                if bound == name {
                    callback();
                }
            }
        }
    }

    impl HotkeyManager for FakeHotkeys {
        fn register_hotkey(&self, name: &str, callback: Box<dyn Fn()>) -> Registration {
            self.bound.borrow_mut().push((name.to_string(), callback));
            Registration::noop()
        }
    }

    #[derive(Default)]
    struct FakeTileCache {
        listener: Rc<RefCell<Option<Box<dyn Fn(usize)>>>>,
    }

    impl FakeTileCache {
        fn notify(&self, count: usize) {
            if let Some(listener) = self.listener.borrow().as_ref() {
                listener(count);
            }
        }
    }

    impl TileStatusSource for FakeTileCache {
        fn register_on_tile_downloading_count_change(
            &self,
            callback: Box<dyn Fn(usize)>,
        ) -> Registration {
            *self.listener.borrow_mut() = Some(callback);
            let listener = self.listener.clone();
            Registration::new(move || {
                listener.borrow_mut().take();
            })
        }
    }

    #[derive(Default)]
    struct FakePositionEvents {
        callbacks: RefCell<Vec<Box<dyn Fn(PositionUpdate)>>>,
    }

    impl FakePositionEvents {
        fn fire(&self, update: PositionUpdate) {
            for callback in self.callbacks.borrow().iter() {
                callback(update.clone());
            }
        }
    }

    impl PositionEventSource for FakePositionEvents {
        fn register_position_callback(
            &self,
            callback: Box<dyn Fn(PositionUpdate)>,
        ) -> Registration {
            self.callbacks.borrow_mut().push(callback);
            Registration::noop()
        }
    }

    #[derive(Default)]
    struct EchoFriends {
        calls: std::sync::Mutex<Vec<(String, Vector2)>>,
    }

    #[async_trait]
    impl FriendLocationService for EchoFriends {
        async fn update_friend_location(
            &self,
            _server_url: &str,
            player_name: &str,
            position: Vector2,
        ) -> Result<Option<Vec<FriendData>>> {
            self.calls
                .lock()
                .unwrap()
                .push((player_name.to_string(), position));
            Ok(Some(vec![FriendData::new("Rook", position.add(&Vector2::new(1.0, 1.0)))]))
        }
    }

    struct Counters {
        forced: Rc<Cell<usize>>,
        unforced: Rc<Cell<usize>>,
    }

    fn counting_renderer() -> (Box<dyn Renderer>, Counters) {
        let forced = Rc::new(Cell::new(0));
        let unforced = Rc::new(Cell::new(0));
        let renderer = CountingRenderer {
            state: RenderState::new(Vector2::ZERO, ZoomLevels::default()),
            forced: forced.clone(),
            unforced: unforced.clone(),
        };
        (Box::new(renderer), Counters { forced, unforced })
    }

    fn sharing_settings() -> MinimapSettings {
        MinimapSettings {
            share_location: true,
            friend_server_url: "https://friends.example/api".to_string(),
            ..MinimapSettings::default()
        }
    }

    /// Position updates persist and apply synchronously, whether or not the
    /// location is shared
    #[test]
    fn test_set_position_always_persists() {
        for share_location in [false, true] {
            let store = MemoryStore::new();
            let friends = Arc::new(EchoFriends::default());
            let mut minimap = MinimapBuilder::new()
                .with_settings(MinimapSettings {
                    share_location,
                    ..sharing_settings()
                })
                .with_store(Box::new(store.clone()))
                .with_friend_service(friends.clone())
                .with_spawner(Arc::new(InlineSpawner))
                .build()
                .unwrap();

            minimap.set_position(Vector2::new(12.5, -3.0));

            assert_eq!(
                store.get("lastKnownPosition"),
                Some(json!({ "x": 12.5, "y": -3.0 }))
            );
            assert_eq!(
                minimap.renderer().state().player_position(),
                Vector2::new(12.5, -3.0)
            );
            assert_eq!(friends.calls.lock().unwrap().len(), usize::from(share_location));
        }
    }

    /// A shared position brings back the friends list, applied on the next pump
    #[test]
    fn test_shared_position_updates_friends() {
        let (renderer, counters) = counting_renderer();
        let mut minimap = MinimapBuilder::new()
            .with_settings(sharing_settings())
            .with_renderer(renderer)
            .with_friend_service(Arc::new(EchoFriends::default()))
            .with_spawner(Arc::new(InlineSpawner))
            .build()
            .unwrap();

        minimap.set_position(Vector2::new(5.0, 5.0));
        assert!(minimap.renderer().state().friends.is_empty());

        assert_eq!(minimap.pump(), 1);
        assert_eq!(
            minimap.renderer().state().friends,
            vec![FriendData::new("Rook", Vector2::new(6.0, 6.0))]
        );
        assert_eq!(counters.forced.get(), 1);

        minimap.set_friends(None);
        assert!(minimap.renderer().state().friends.is_empty());
        assert_eq!(counters.forced.get(), 2);
    }

    /// Named position events rename the player used for friend publishing
    #[test]
    fn test_position_events_carry_player_name() {
        let friends = Arc::new(EchoFriends::default());
        let mut minimap = MinimapBuilder::new()
            .with_settings(sharing_settings())
            .with_friend_service(friends.clone())
            .with_spawner(Arc::new(InlineSpawner))
            .build()
            .unwrap();
        let events = FakePositionEvents::default();
        let mut host = CountingHost::default();
        minimap.mount(0.0, MountEnvironment::new(&mut host).with_position_events(&events));

        events.fire(PositionUpdate::new(Vector2::new(1.0, 1.0)));
        events.fire(PositionUpdate::new(Vector2::new(2.0, 2.0)).with_name("Aria"));
        minimap.pump();

        assert_eq!(minimap.player_name(), "Aria");
        let calls = friends.calls.lock().unwrap();
        assert_eq!(calls[0].0, "UnknownFriend");
        assert_eq!(calls[1], ("Aria".to_string(), Vector2::new(2.0, 2.0)));
    }

    /// The bridge gets a handle on mount and loses it on unmount
    #[test]
    fn test_command_port_lifecycle() {
        struct OneMarker;

        impl MarkerSource for OneMarker {
            fn markers(&self) -> serde_json::Value {
                json!([{ "kind": "ore", "x": 1, "y": 2 }])
            }
        }

        let port = RecordingPort::default();
        let mut minimap = MinimapBuilder::new()
            .with_command_port(Box::new(port.clone()))
            .with_markers(Arc::new(OneMarker))
            .build()
            .unwrap();
        let mut host = CountingHost::default();
        minimap.mount(0.0, MountEnvironment::new(&mut host));

        let handle = port.exposed.borrow().clone().unwrap();
        assert_eq!(handle.markers()[0]["kind"], "ore");
        std::thread::spawn(move || handle.set_position(Vector2::new(40.0, 50.0)).unwrap())
            .join()
            .unwrap();
        assert_eq!(minimap.pump(), 1);
        assert_eq!(
            minimap.renderer().state().player_position(),
            Vector2::new(40.0, 50.0)
        );

        minimap.unmount();
        assert!(port.exposed.borrow().is_none());
        assert_eq!(port.withdrawals.get(), 1);

        // unmounting twice is harmless
        minimap.unmount();
        assert_eq!(port.withdrawals.get(), 1);
    }

    /// Redraws follow the cadence while mounted and stop after unmount
    #[test]
    fn test_redraw_loop_stops_on_unmount() {
        #[cfg(feature = "debug")]
        minimap::init_logging();

        let (renderer, counters) = counting_renderer();
        let mut minimap = MinimapBuilder::new()
            .with_renderer(renderer)
            .build()
            .unwrap();
        let mut host = CountingHost::default();
        minimap.mount(0.0, MountEnvironment::new(&mut host));
        assert_eq!(counters.forced.get(), 1);

        // 100ms updates resampled 6 times: one redraw every 16.7ms at most
        let mut time = 0.0;
        for _ in 0..10 {
            time += 20.0;
            assert_eq!(minimap.on_animation_frame(time, &mut host), FrameOutcome::Redrawn);
        }
        assert_eq!(minimap.on_animation_frame(time + 5.0, &mut host), FrameOutcome::Throttled);
        assert_eq!(counters.unforced.get(), 10);

        minimap.unmount();
        let requested = host.requested;
        for i in 0..50 {
            let outcome = minimap.on_animation_frame(time + 100.0 + i as f64 * 16.0, &mut host);
            assert_eq!(outcome, FrameOutcome::Cancelled);
        }
        assert_eq!(counters.unforced.get(), 10);
        assert_eq!(host.requested, requested);
    }

    /// Changing the resampling rate restarts the loop with the new cadence
    #[test]
    fn test_update_settings_restarts_loop() {
        let mut minimap = MinimapBuilder::new().build().unwrap();
        let mut host = CountingHost::default();
        minimap.mount(0.0, MountEnvironment::new(&mut host));
        assert_eq!(host.requested, 1);

        minimap
            .update_settings(MinimapSettings::default(), 10.0, &mut host)
            .unwrap();
        assert_eq!(host.requested, 1);

        let settings = MinimapSettings {
            resampling_rate: 2.0,
            ..MinimapSettings::default()
        };
        minimap.update_settings(settings, 10.0, &mut host).unwrap();
        assert_eq!(minimap.scheduler().min_frame_time(), 50.0);
        // the restarted loop adopts the frame already in flight
        assert_eq!(host.requested, 1);
        assert_eq!(minimap.on_animation_frame(100.0, &mut host), FrameOutcome::Redrawn);
        assert_eq!(host.requested, 2);

        let invalid = MinimapSettings {
            position_update_rate_ms: -1.0,
            ..MinimapSettings::default()
        };
        assert!(minimap.update_settings(invalid, 20.0, &mut host).is_err());
        assert_eq!(minimap.settings().resampling_rate, 2.0);
    }

    /// Small pointer jitter is a click; a real drag pans and can be undone
    #[test]
    fn test_pan_drag_and_recenter() {
        let canvas = SharedCanvas::default();
        let mut minimap = MinimapBuilder::desktop()
            .with_canvas(Box::new(canvas.clone()))
            .build()
            .unwrap();

        minimap.handle_input(&InputEvent::PointerDown(PointerEvent::primary(3, 100.0, 100.0)));
        minimap.handle_input(&InputEvent::PointerMove(PointerEvent::primary(3, 101.0, 100.0)));
        minimap.handle_input(&InputEvent::PointerMove(PointerEvent::primary(3, 102.0, 100.0)));
        assert!(!minimap.is_map_dragged());

        minimap.handle_input(&InputEvent::PointerMove(PointerEvent::primary(3, 100.0, 105.0)));
        assert!(minimap.is_map_dragged());
        assert_eq!(
            minimap.renderer().state().camera_override,
            Some(Vector2::new(0.0, 5.0))
        );

        minimap.handle_input(&InputEvent::PointerUp(PointerEvent::primary(3, 100.0, 105.0)));
        assert_eq!(*canvas.captured.borrow(), vec![3]);
        assert_eq!(*canvas.released.borrow(), vec![3]);

        minimap.recenter();
        assert!(!minimap.is_map_dragged());
        assert_eq!(minimap.renderer().state().camera_override, None);
    }

    /// Pan-drag belongs to the desktop window only
    #[test]
    fn test_overlay_ignores_pan_drag() {
        let canvas = SharedCanvas::default();
        let mut minimap = MinimapBuilder::overlay()
            .with_canvas(Box::new(canvas.clone()))
            .build()
            .unwrap();
        let handled =
            minimap.handle_input(&InputEvent::PointerDown(PointerEvent::primary(1, 10.0, 10.0)));
        assert_eq!(handled, EventHandled::Ignored);
        assert!(canvas.captured.borrow().is_empty());
    }

    /// Middle clicks place a target, and a second click near it removes it
    #[test]
    fn test_middle_click_toggles_navigation() {
        let mut minimap = MinimapBuilder::in_game()
            .with_canvas(Box::new(SharedCanvas::default()))
            .build()
            .unwrap();

        let click = |x: f64| InputEvent::PointerDown(PointerEvent::middle(1, x, 150.0));

        minimap.handle_input(&click(220.0));
        assert_eq!(minimap.navigation().nav_target(), Some(Vector2::new(20.0, 0.0)));

        // 25 units away: squared distance 625, a new target
        minimap.handle_input(&click(245.0));
        assert_eq!(minimap.navigation().nav_target(), Some(Vector2::new(45.0, 0.0)));

        // 5 units away: squared distance 25, toggled off
        minimap.handle_input(&click(240.0));
        assert_eq!(minimap.navigation().nav_target(), None);
    }

    /// Zoom hotkeys exist in the in-game window and go through the queue
    #[test]
    fn test_zoom_hotkeys_in_game_only() {
        let hotkeys = FakeHotkeys::default();
        let mut host = CountingHost::default();

        let mut in_game = MinimapBuilder::in_game().build().unwrap();
        in_game.mount(0.0, MountEnvironment::new(&mut host).with_hotkeys(&hotkeys));
        hotkeys.press("zoomIn");
        assert_eq!(in_game.renderer().zoom_level(), 4.0);
        in_game.pump();
        assert!((in_game.renderer().zoom_level() - 3.2).abs() < 1e-9);

        let other = FakeHotkeys::default();
        let mut desktop = MinimapBuilder::desktop().build().unwrap();
        desktop.mount(0.0, MountEnvironment::new(&mut host).with_hotkeys(&other));
        assert!(other.bound.borrow().is_empty());
    }

    /// Toolbar zoom scales with the current level
    #[test]
    fn test_toolbar_zoom() {
        let mut minimap = MinimapBuilder::desktop().build().unwrap();
        minimap.zoom_out();
        assert!((minimap.renderer().zoom_level() - 4.8).abs() < 1e-9);
        minimap.zoom_in();
        assert!((minimap.renderer().zoom_level() - 3.84).abs() < 1e-9);
    }

    /// The loading indicator mirrors the tile cache until unmount
    #[test]
    fn test_tile_loading_message() {
        let cache = FakeTileCache::default();
        let mut host = CountingHost::default();
        let mut minimap = MinimapBuilder::new().build().unwrap();
        minimap.mount(0.0, MountEnvironment::new(&mut host).with_tile_source(&cache));

        cache.notify(4);
        assert_eq!(minimap.loading_message(), Some("Loading 4 tiles".to_string()));

        minimap.unmount();
        assert!(cache.listener.borrow().is_none());
    }

    /// Resizing redraws right away
    #[test]
    fn test_resize_forces_redraw() {
        let (renderer, counters) = counting_renderer();
        let mut minimap = MinimapBuilder::new().with_renderer(renderer).build().unwrap();
        minimap.on_resize(800.0, 600.0);
        assert_eq!(counters.forced.get(), 1);
        assert_eq!(counters.unforced.get(), 0);
    }
}
