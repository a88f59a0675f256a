use anyhow::Context;
use minimap::core::landmarks::TOWN_LOCATIONS;
use minimap::prelude::*;
use std::time::Duration;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const RUN_FOR: Duration = Duration::from_secs(4);

/// Headless minimap driver
///
/// Feeds a simulated player walking between towns through the command
/// handle, fires tokio interval ticks as animation frames and replays a few
/// scripted gestures. Pass a settings JSON file as the first argument to
/// override the defaults.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut builder = MinimapBuilder::desktop()
        .with_canvas(Box::new(FixedCanvas {
            width: 640.0,
            height: 480.0,
        }))
        .with_hover_painter(Box::new(LogHoverPainter))
        .with_command_port(Box::new(BridgePort::default()));
    if let Some(path) = std::env::args().nth(1) {
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("reading settings from {path}"))?;
        builder = builder
            .with_settings_json(&json)
            .map_err(|e| anyhow::anyhow!("invalid settings in {path}: {e}"))?;
    }
    let mut minimap = builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build minimap: {e}"))?;

    let mut host = TickHost::default();
    let start = std::time::Instant::now();
    minimap.mount(0.0, MountEnvironment::new(&mut host));

    let walker = tokio::spawn(walk_between_towns(minimap.handle()));

    let mut interval = tokio::time::interval(FRAME_INTERVAL);
    let mut tick: u64 = 0;
    while start.elapsed() < RUN_FOR {
        interval.tick().await;
        tick += 1;

        for event in scripted_gesture(tick) {
            minimap.handle_input(&event);
        }
        if tick == 180 {
            log::info!("recentering after drag (dragged: {})", minimap.is_map_dragged());
            minimap.recenter();
        }

        if host.take() {
            let now = start.elapsed().as_secs_f64() * 1000.0;
            minimap.on_animation_frame(now, &mut host);
        }
    }

    walker.abort();
    minimap.unmount();

    let scheduler = minimap.scheduler();
    log::info!(
        "{} frames, {} interpolated redraws, final zoom {:.2}, nav target {:?}",
        scheduler.frames_seen(),
        scheduler.redraw_count(),
        minimap.renderer().zoom_level(),
        minimap.navigation().nav_target()
    );
    log::info!(
        "player ended at {:?}",
        minimap.renderer().state().player_position()
    );
    Ok(())
}

/// Sends a position every update interval, walking the town table in order.
async fn walk_between_towns(handle: MinimapHandle) {
    let mut interval = tokio::time::interval(Duration::from_millis(100));
    let legs = TOWN_LOCATIONS.windows(2).cycle();
    for leg in legs {
        let (from, to) = (leg[0], leg[1]);
        log::info!("walking from {} to {}", from.name, to.name);
        for step in 0..=20 {
            interval.tick().await;
            let position = from.position.lerp(&to.position, step as f64 / 20.0);
            let update = PositionUpdate::new(position).with_name("Wanderer");
            if let Err(e) = handle.position_update(update) {
                log::warn!("stopping walker: {}", e);
                return;
            }
        }
    }
}

/// Pointer input replayed at fixed ticks: a wheel zoom, a pan drag and a
/// navigation click.
fn scripted_gesture(tick: u64) -> Vec<InputEvent> {
    match tick {
        30 => vec![InputEvent::Wheel(WheelEvent::new(-120.0))],
        60 => vec![InputEvent::PointerDown(PointerEvent::primary(1, 320.0, 240.0))],
        61..=90 => {
            let offset = (tick - 60) as f64 * 4.0;
            vec![InputEvent::PointerMove(PointerEvent::primary(
                1,
                320.0 + offset,
                240.0 - offset / 2.0,
            ))]
        }
        91 => vec![InputEvent::PointerUp(PointerEvent::primary(1, 440.0, 180.0))],
        120 => vec![InputEvent::PointerDown(PointerEvent::middle(2, 500.0, 120.0))],
        _ => Vec::new(),
    }
}

#[derive(Default)]
struct TickHost {
    pending: bool,
}

impl TickHost {
    fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

impl FrameHost for TickHost {
    fn request_animation_frame(&mut self) {
        self.pending = true;
    }
}

struct FixedCanvas {
    width: f64,
    height: f64,
}

impl CanvasSurface for FixedCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn set_pointer_capture(&mut self, pointer_id: i32) {
        log::debug!("capture pointer {}", pointer_id);
    }

    fn release_pointer_capture(&mut self, pointer_id: i32) {
        log::debug!("release pointer {}", pointer_id);
    }
}

struct LogHoverPainter;

impl HoverLabelPainter for LogHoverPainter {
    fn draw_hover_label(&mut self, pointer: Vector2, parameters: &DrawParameters, _icon_scale: f64) {
        let world = parameters.viewport.canvas_to_world(&pointer);
        log::trace!("hovering ({:.0}, {:.0})", world.x, world.y);
    }
}

#[derive(Default)]
struct BridgePort {
    handle: Option<MinimapHandle>,
}

impl CommandPort for BridgePort {
    fn expose(&mut self, handle: MinimapHandle) {
        log::info!("bridge received {:?}", handle);
        self.handle = Some(handle);
    }

    fn withdraw(&mut self) {
        self.handle = None;
    }
}
