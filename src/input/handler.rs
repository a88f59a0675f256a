use crate::{
    core::{
        config::{MinimapSettings, SurfaceKind, WindowVariant},
        constants::{DRAG_THRESHOLD_PX, WHEEL_DELTA_UNIT, ZOOM_STEP_DIVISOR},
        geo::Vector2,
        viewport::{drag_to_world_delta, Viewport},
    },
    input::events::{EventHandled, InputEvent, MouseButton, PointerEvent, PointerType, WheelEvent},
    navigation::{toggle_nav_target, NavToggle, NavigationModule},
    rendering::Renderer,
    traits::{CanvasSurface, HoverLabelPainter},
};

/// The one pointer drag that may be in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub pointer_id: i32,
    /// Where movement is measured from. Stays at the press position until
    /// the drag threshold is crossed, so small moves add up; after that it
    /// follows every move.
    pub last_position: Vector2,
    pub threshold_crossed: bool,
}

impl DragSession {
    fn new(pointer_id: i32, position: Vector2) -> Self {
        Self {
            pointer_id,
            last_position: position,
            threshold_crossed: false,
        }
    }
}

/// Collaborators an event may touch. Canvas and hover painter are optional;
/// without a canvas, anything that needs its size or pointer capture is a
/// no-op.
pub struct InteractionContext<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub navigation: &'a mut dyn NavigationModule,
    pub canvas: Option<&'a mut dyn CanvasSurface>,
    pub hover: Option<&'a mut dyn HoverLabelPainter>,
}

/// Pointer state machine of the minimap canvas.
///
/// Wheel zooms, primary-button drags pan (desktop window only) and a middle
/// click toggles the navigation target.
#[derive(Debug, Clone)]
pub struct InteractionController {
    variant: WindowVariant,
    compass_active: bool,
    show_text: bool,
    icon_scale: f64,
    session: Option<DragSession>,
    map_dragged: bool,
}

impl InteractionController {
    pub fn new(variant: WindowVariant, surface: SurfaceKind, settings: &MinimapSettings) -> Self {
        let mut controller = Self {
            variant,
            compass_active: false,
            show_text: false,
            icon_scale: 1.0,
            session: None,
            map_dragged: false,
        };
        controller.apply_settings(settings, surface);
        controller
    }

    pub fn apply_settings(&mut self, settings: &MinimapSettings, surface: SurfaceKind) {
        self.compass_active = settings.compass_active(surface);
        self.show_text = settings.show_text;
        self.icon_scale = settings.icon_scale;
    }

    pub fn variant(&self) -> WindowVariant {
        self.variant
    }

    /// True while the camera is detached from the player; drives the
    /// recenter control.
    pub fn is_map_dragged(&self) -> bool {
        self.map_dragged
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn handle_event(&mut self, event: &InputEvent, ctx: &mut InteractionContext<'_>) -> EventHandled {
        match event {
            InputEvent::PointerDown(pointer) => self.on_pointer_down(pointer, ctx),
            InputEvent::PointerMove(pointer) => self.on_pointer_move(pointer, ctx),
            InputEvent::PointerUp(pointer) => self.on_pointer_up(pointer, ctx),
            InputEvent::LostPointerCapture { pointer_id } => self.on_lost_pointer_capture(*pointer_id),
            InputEvent::Wheel(wheel) => self.on_wheel(wheel, ctx.renderer),
        }
    }

    pub fn on_wheel(&mut self, event: &WheelEvent, renderer: &mut dyn Renderer) -> EventHandled {
        let zoom = renderer.zoom_level();
        renderer.zoom_by(zoom / ZOOM_STEP_DIVISOR * event.delta_y / WHEEL_DELTA_UNIT);
        EventHandled::Handled
    }

    pub fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        ctx: &mut InteractionContext<'_>,
    ) -> EventHandled {
        match event.button {
            MouseButton::Middle if event.pointer_type == PointerType::Mouse => {
                self.toggle_navigation(event.position, ctx)
            }
            MouseButton::Primary if self.variant.allows_pan_drag() => {
                if self.session.is_some() {
                    return EventHandled::Ignored;
                }
                let Some(canvas) = ctx.canvas.as_deref_mut() else {
                    return EventHandled::Ignored;
                };
                canvas.set_pointer_capture(event.pointer_id);
                self.session = Some(DragSession::new(event.pointer_id, event.position));
                EventHandled::Handled
            }
            _ => EventHandled::Ignored,
        }
    }

    pub fn on_pointer_move(
        &mut self,
        event: &PointerEvent,
        ctx: &mut InteractionContext<'_>,
    ) -> EventHandled {
        let handled = self.draw_hover_label(event.position, ctx);

        let Some(session) = self.session.as_mut() else {
            return handled;
        };
        if session.pointer_id != event.pointer_id {
            return handled;
        }

        let delta = event.position.subtract(&session.last_position);
        let crossed = session.threshold_crossed
            || delta.x.abs() > DRAG_THRESHOLD_PX
            || delta.y.abs() > DRAG_THRESHOLD_PX;
        if !crossed {
            return handled;
        }

        let state = ctx.renderer.state_mut();
        if !session.threshold_crossed {
            session.threshold_crossed = true;
            state.camera_override = Some(state.drawn_center());
            self.map_dragged = true;
            log::debug!("pan drag started by pointer {}", event.pointer_id);
        }
        session.last_position = event.position;

        let world_delta = drag_to_world_delta(&delta, ctx.renderer.zoom_level());
        let state = ctx.renderer.state_mut();
        let center = state.effective_center();
        state.camera_override = Some(center.add(&world_delta));
        ctx.renderer.redraw(true);
        EventHandled::Handled
    }

    pub fn on_pointer_up(
        &mut self,
        event: &PointerEvent,
        ctx: &mut InteractionContext<'_>,
    ) -> EventHandled {
        match self.session {
            Some(session) if session.pointer_id == event.pointer_id => {
                if let Some(canvas) = ctx.canvas.as_deref_mut() {
                    canvas.release_pointer_capture(session.pointer_id);
                }
                if session.threshold_crossed {
                    log::debug!("pan drag ended");
                }
                self.session = None;
                EventHandled::Handled
            }
            _ => EventHandled::Ignored,
        }
    }

    /// Capture loss and pointer cancel end the session without a release.
    pub fn on_lost_pointer_capture(&mut self, pointer_id: i32) -> EventHandled {
        match self.session {
            Some(session) if session.pointer_id == pointer_id => {
                log::debug!("pointer {} lost capture, dropping drag session", pointer_id);
                self.session = None;
                EventHandled::Handled
            }
            _ => EventHandled::Ignored,
        }
    }

    /// Follow the player again.
    pub fn recenter(&mut self, renderer: &mut dyn Renderer) {
        renderer.state_mut().camera_override = None;
        renderer.redraw(true);
        self.map_dragged = false;
    }

    /// World point under a canvas pixel of the frame on screen.
    pub fn resolve_click(&self, canvas_position: Vector2, renderer: &dyn Renderer, canvas: &dyn CanvasSurface) -> Vector2 {
        self.on_screen_viewport(renderer, canvas)
            .canvas_to_world(&canvas_position)
    }

    /// The last drawn viewport, or the one the live state would draw when
    /// the renderer has not recorded a frame.
    fn on_screen_viewport(&self, renderer: &dyn Renderer, canvas: &dyn CanvasSurface) -> Viewport {
        let state = renderer.state();
        if let Some(drawn) = state.last_draw.as_ref() {
            return drawn.viewport;
        }
        let rotation = if self.compass_active {
            state.player_heading
        } else {
            0.0
        };
        Viewport::new(
            state.drawn_center(),
            renderer.zoom_level(),
            canvas.width(),
            canvas.height(),
        )
        .with_rotation(rotation)
    }

    fn toggle_navigation(&mut self, canvas_position: Vector2, ctx: &mut InteractionContext<'_>) -> EventHandled {
        let Some(canvas) = ctx.canvas.as_deref() else {
            return EventHandled::Ignored;
        };
        let clicked = self.resolve_click(canvas_position, &*ctx.renderer, canvas);
        let player = ctx.renderer.state().player_position();
        if let NavToggle::Set(target) = toggle_nav_target(ctx.navigation, player, clicked) {
            log::debug!("navigation click resolved to ({:.1}, {:.1})", target.x, target.y);
        }
        ctx.renderer.redraw(true);
        EventHandled::Handled
    }

    fn draw_hover_label(&self, pointer: Vector2, ctx: &mut InteractionContext<'_>) -> EventHandled {
        if self.show_text {
            return EventHandled::Ignored;
        }
        let (Some(hover), Some(parameters)) =
            (ctx.hover.as_deref_mut(), ctx.renderer.state().last_draw.as_ref())
        else {
            return EventHandled::Ignored;
        };
        hover.draw_hover_label(pointer, parameters, self.icon_scale);
        EventHandled::Handled
    }
}
